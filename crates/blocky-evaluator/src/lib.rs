//! Goals, moves and players for the Blocky board game.
//!
//! This crate builds the game rules on top of the board model in
//! [`blocky_engine`]:
//!
//! 1. **Goals** ([`goal`]) - Score a board for one target colour, either by
//!    counting cells on the perimeter or by measuring the largest connected blob.
//!
//! 2. **Moves** ([`moves`]) - One action (rotate, swap, smash, paint, combine or
//!    pass) aimed at a block addressed by its [`BlockPath`](blocky_engine::BlockPath).
//!
//! 3. **Move Search** ([`move_search`]) - Enumerates the moves that change a
//!    board and scores each of them on a private copy.
//!
//! 4. **Players** ([`player`]) - Human, random and smart strategies that turn
//!    input or search results into a move.
//!
//! 5. **Sessions** ([`session`]) - A headless coordinator that owns the board,
//!    asks each player for a move in turn and records the outcome.
//!
//! # Architecture
//!
//! ```text
//! GameSession (owns the board, drives turns)
//!     ↓ asks
//! Player (Human / Random / Smart)
//!     ↓ uses
//! Move Search (copy board, apply each move, score)
//!     ↓ uses
//! Goal (score a flattened board)
//! ```
//!
//! Automated players never touch the authoritative board: every candidate is
//! applied to a clone, and only the move the coordinator commits mutates it.
//!
//! # Example: Playing a Session
//!
//! ```
//! use blocky_engine::GameSeed;
//! use blocky_evaluator::session::{GameSession, SessionConfig};
//!
//! let config = SessionConfig {
//!     num_random: 1,
//!     smart_difficulties: vec![0],
//!     max_rounds: 3,
//!     ..SessionConfig::default()
//! };
//! let mut session = GameSession::new(&config, GameSeed::from_u128(1))?;
//! let history = session.run();
//!
//! assert_eq!(history.len(), 6);
//! assert_eq!(session.scores().len(), 2);
//! # Ok::<(), blocky_evaluator::SessionError>(())
//! ```

pub mod goal;
pub mod move_search;
pub mod moves;
pub mod player;
pub mod session;

use blocky_engine::BoardConfigError;

/// Error returned when goals cannot be assigned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum GoalGenerationError {
    #[display("cannot generate {requested} goals from {available} colours")]
    NotEnoughColours { requested: usize, available: usize },
}

/// Error returned when a [`GameSession`](session::GameSession) cannot be set up.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum SessionError {
    #[display("invalid board configuration")]
    Board(BoardConfigError),
    #[display("cannot assign goals to every player")]
    Goals(GoalGenerationError),
}
