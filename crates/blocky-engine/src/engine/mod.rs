//! Board generation and reproducible randomness.
//!
//! - [`generate_board`] - Builds a random board by recursive subdivision
//! - [`GameSeed`] - Seed for deterministic generation
//!
//! # Example
//!
//! ```
//! use blocky_engine::{FlatGrid, GameSeed, generate_board};
//!
//! let mut rng = GameSeed::from_u128(42).rng();
//! let board = generate_board(2, 400, &mut rng)?;
//!
//! let grid = FlatGrid::from_block(&board);
//! assert_eq!(grid.side(), 4);
//! # Ok::<(), blocky_engine::BoardConfigError>(())
//! ```

pub use self::{board_generator::*, seed::*};

mod board_generator;
mod seed;
