//! Moves: the actions a player can take on a turn.

use std::fmt;

use blocky_engine::{Block, BlockPath, Colour, RotateDirection, SwapDirection};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The action of a [`Move`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum MoveKind {
    #[display("rotate clockwise")]
    RotateClockwise,
    #[display("rotate counter-clockwise")]
    RotateCounterClockwise,
    #[display("swap horizontally")]
    SwapHorizontal,
    #[display("swap vertically")]
    SwapVertical,
    #[display("smash")]
    Smash,
    #[display("paint {_0}")]
    Paint(Colour),
    #[display("combine")]
    Combine,
    #[display("pass")]
    Pass,
}

impl MoveKind {
    /// Performs this action on `block`.
    ///
    /// Returns whether the block operation was performed. [`MoveKind::Pass`]
    /// always succeeds without touching the block.
    pub fn apply<R>(self, block: &mut Block, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::RotateClockwise => block.rotate(RotateDirection::Clockwise),
            Self::RotateCounterClockwise => block.rotate(RotateDirection::CounterClockwise),
            Self::SwapHorizontal => block.swap(SwapDirection::Horizontal),
            Self::SwapVertical => block.swap(SwapDirection::Vertical),
            Self::Smash => block.smash(rng),
            Self::Paint(colour) => block.paint(colour),
            Self::Combine => block.combine(),
            Self::Pass => true,
        }
    }
}

/// An action aimed at one block of the board.
///
/// The target is the path from the board's root to the block, so a move can be
/// computed against one copy of a board and applied to another with the same
/// shape.
///
/// # Example
///
/// ```
/// use blocky_engine::{BlockPath, GameSeed, generate_board};
/// use blocky_evaluator::moves::{Move, MoveKind};
///
/// let mut rng = GameSeed::from_u128(5).rng();
/// let mut board = generate_board(2, 400, &mut rng)?;
/// let saved = board.clone();
///
/// let mv = Move::new(MoveKind::RotateClockwise, BlockPath::root());
/// for _ in 0..4 {
///     assert!(mv.apply(&mut board, &mut rng));
/// }
/// assert_eq!(board, saved);
/// # Ok::<(), blocky_engine::BoardConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Move {
    kind: MoveKind,
    target: BlockPath,
}

impl Move {
    #[must_use]
    pub fn new(kind: MoveKind, target: BlockPath) -> Self {
        Self { kind, target }
    }

    #[must_use]
    pub fn pass() -> Self {
        Self::new(MoveKind::Pass, BlockPath::root())
    }

    #[must_use]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    #[must_use]
    pub fn target(&self) -> &BlockPath {
        &self.target
    }

    /// Applies this move to `board`.
    ///
    /// Returns false if the target does not exist on `board` or the action
    /// could not be performed on it.
    pub fn apply<R>(&self, board: &mut Block, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        if self.kind.is_pass() {
            return true;
        }
        match board.block_at_mut(&self.target) {
            Some(block) => self.kind.apply(block, rng),
            None => false,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.target)
    }
}

#[cfg(test)]
mod tests {
    use blocky_engine::{GameSeed, Position, Quadrant};

    use super::*;

    #[test]
    fn test_apply_to_sub_block() {
        let mut rng = GameSeed::from_u128(0).rng();
        let mut board = Block::new(Position::ORIGIN, 16, Colour::WHITE, 0, 1);
        board.subdivide([Colour::REAL_RED; 4]);

        let target: BlockPath = [Quadrant::LowerRight].into_iter().collect();
        let mv = Move::new(MoveKind::Paint(Colour::OLD_OLIVE), target.clone());
        assert!(mv.apply(&mut board, &mut rng));
        assert_eq!(
            board.block_at(&target).unwrap().colour(),
            Some(Colour::OLD_OLIVE)
        );
        assert!(!mv.apply(&mut board, &mut rng), "repainting is not a change");
    }

    #[test]
    fn test_apply_to_missing_target() {
        let mut rng = GameSeed::from_u128(0).rng();
        let mut board = Block::new(Position::ORIGIN, 16, Colour::WHITE, 0, 2);
        let target = [Quadrant::UpperLeft].into_iter().collect();
        let mv = Move::new(MoveKind::Smash, target);
        assert!(!mv.apply(&mut board, &mut rng));
        assert!(board.is_leaf());
    }

    #[test]
    fn test_pass_always_applies() {
        let mut rng = GameSeed::from_u128(0).rng();
        let mut board = Block::new(Position::ORIGIN, 16, Colour::WHITE, 0, 0);
        let saved = board.clone();
        assert!(Move::pass().apply(&mut board, &mut rng));
        assert_eq!(board, saved);
    }

    #[test]
    fn test_move_display() {
        let target = [Quadrant::UpperRight].into_iter().collect();
        let mv = Move::new(MoveKind::Paint(Colour::REAL_RED), target);
        assert_eq!(mv.to_string(), "paint Real Red at UR");
        assert_eq!(Move::pass().to_string(), "pass at root");
    }

    #[test]
    fn test_move_serialization() {
        let mv = Move::new(MoveKind::Paint(Colour::REAL_RED), BlockPath::root());
        let serialized = serde_json::to_string(&mv).unwrap();
        let deserialized: Move = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, mv);
    }
}
