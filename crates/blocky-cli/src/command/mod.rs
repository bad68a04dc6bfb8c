use blocky_engine::GameSeed;
use clap::{Parser, Subcommand};
use rand::Rng as _;

use self::{show::ShowArg, simulate::SimulateArg};

mod show;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Generate a board and print its tree and unit-cell grid
    Show(#[clap(flatten)] ShowArg),
    /// Play a game between automated players
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Show(arg) => show::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

/// Returns `seed`, or a fresh random seed reported on stderr.
fn seed_or_random(seed: Option<GameSeed>) -> GameSeed {
    seed.unwrap_or_else(|| {
        let seed = rand::rng().random();
        eprintln!("Using seed {seed}");
        seed
    })
}
