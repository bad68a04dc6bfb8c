use anyhow::Context as _;
use blocky_engine::{FlatGrid, GameSeed, generate_board};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ShowArg {
    /// Deepest level the board may be subdivided to
    #[arg(long, default_value_t = 3)]
    max_depth: u8,
    /// Side length of the board
    #[arg(long, default_value_t = 750)]
    size: u32,
    /// Seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<GameSeed>,
}

pub(crate) fn run(arg: &ShowArg) -> anyhow::Result<()> {
    let ShowArg {
        max_depth,
        size,
        seed,
    } = arg;

    let seed = super::seed_or_random(*seed);
    let board = generate_board(*max_depth, *size, &mut seed.rng())
        .context("Failed to generate board")?;
    tracing::debug!(%seed, max_depth, size, "board generated");

    print!("{board}");
    println!();
    print!("{}", render_grid(&FlatGrid::from_block(&board)));
    Ok(())
}

/// Renders one line per row of unit cells, one colour initial per cell.
fn render_grid(grid: &FlatGrid) -> String {
    (0..grid.side())
        .map(|j| {
            let mut line: String = grid.row(j).map(|colour| colour.initial()).collect();
            line.push('\n');
            line
        })
        .collect()
}
