use std::path::PathBuf;

use anyhow::Context as _;
use blocky_engine::GameSeed;
use blocky_evaluator::session::{GameSession, SessionConfig};
use chrono::Utc;

use crate::{
    schema::report::{PlayerSummary, SimulationReport},
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Session config JSON file; other options override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Deepest level the board may be subdivided to
    #[arg(long)]
    max_depth: Option<u8>,
    /// Side length of the board
    #[arg(long)]
    size: Option<u32>,
    /// Number of random players
    #[arg(long)]
    random: Option<usize>,
    /// Add a smart player with this difficulty (repeatable)
    #[arg(long = "smart")]
    smart: Vec<usize>,
    /// Number of rounds to play
    #[arg(long)]
    rounds: Option<usize>,
    /// Seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<GameSeed>,
    /// Write a JSON report of the game to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

impl SimulateArg {
    fn session_config(&self) -> anyhow::Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("session config", path)?,
            None => SessionConfig::default(),
        };
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(random) = self.random {
            config.num_random = random;
        }
        if !self.smart.is_empty() {
            config.smart_difficulties.clone_from(&self.smart);
        }
        if let Some(rounds) = self.rounds {
            config.max_rounds = rounds;
        }
        Ok(config)
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let config = arg.session_config()?;
    let seed = super::seed_or_random(arg.seed);

    let mut session = GameSession::new(&config, seed).context("Failed to set up game")?;
    eprintln!(
        "Playing {} rounds with {} players...",
        config.max_rounds,
        session.players().len()
    );
    let turns = session.run().to_vec();

    let players: Vec<_> = session
        .players()
        .iter()
        .zip(session.scores())
        .map(|(player, final_score)| PlayerSummary {
            id: player.id(),
            strategy: player.strategy().to_string(),
            goal: *player.goal(),
            final_score,
        })
        .collect();

    for player in &players {
        println!(
            "Player {} ({}): {} Score: {}",
            player.id,
            player.strategy,
            player.goal.description(),
            player.final_score
        );
    }

    if let Some(path) = &arg.output {
        let report = SimulationReport {
            simulated_at: Utc::now(),
            seed,
            config,
            players,
            turns,
        };
        util::write_json_file("report", path, &report)?;
        eprintln!("Report saved to {}", path.display());
    }
    Ok(())
}
