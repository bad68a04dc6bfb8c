use blocky_engine::GameSeed;
use blocky_evaluator::{
    goal::Goal,
    session::{SessionConfig, TurnRecord},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Report of a simulated game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Timestamp when the game was played (ISO 8601 format)
    pub simulated_at: DateTime<Utc>,
    /// Seed the board, goals and players were drawn from
    pub seed: GameSeed,
    pub config: SessionConfig,
    pub players: Vec<PlayerSummary>,
    /// Every turn in play order
    pub turns: Vec<TurnRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: usize,
    pub strategy: String,
    pub goal: Goal,
    pub final_score: usize,
}
