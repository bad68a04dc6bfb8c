//! Game board model for Blocky.
//!
//! The board is a square [`Block`] recursively split into quadrants. This crate
//! provides the tree, its mutations (smash, swap, rotate, paint, combine), the
//! projection of a tree onto a grid of unit cells ([`FlatGrid`]), and random
//! board generation.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid direction: {_0}")]
pub struct InvalidDirectionError(#[error(not(source))] pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid seed length: expected 32 hex digits, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid hex digit in seed")]
    InvalidDigit,
}

/// Error returned when a board cannot be generated with the given parameters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum BoardConfigError {
    #[display("max depth {max_depth} exceeds the limit of {limit}")]
    DepthTooLarge { max_depth: u8, limit: u8 },
    #[display("board size {size} is too small for max depth {max_depth} (at least {min_size} needed)")]
    SizeTooSmall {
        size: u32,
        max_depth: u8,
        min_size: u32,
    },
}
