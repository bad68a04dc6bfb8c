//! Move search: enumerating and scoring the moves available on a board.
//!
//! Automated players choose their move from a small list of candidates built by
//! [`valid_candidates`]:
//!
//! 1. **Enumerate Actions** - Rotate (both ways), swap (both ways), smash, paint
//!    with the goal colour and combine, in that order
//! 2. **Simulate** - Apply each action to a fresh clone of the board
//! 3. **Score** - Keep the actions that were performed, scored on the mutated clone
//!
//! Every candidate targets the root of the board. The board passed in is never
//! modified.
//!
//! # Selection
//!
//! - [`select_random`] picks any candidate uniformly.
//! - [`select_smart`] ignores a number of shuffled candidates (its difficulty),
//!   then takes the first one that improves on the current score.
//!
//! Both fall back to [`Move::pass`] when nothing is left to choose from.

use arrayvec::ArrayVec;
use blocky_engine::{Block, BlockPath};
use rand::{
    Rng,
    seq::{IndexedRandom as _, SliceRandom as _},
};

use crate::{
    goal::Goal,
    moves::{Move, MoveKind},
};

/// Number of actions tried by [`valid_candidates`].
pub const MAX_CANDIDATES: usize = 7;

/// A move that was performed on a copy of the board, with the resulting score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    mv: Move,
    score: usize,
}

impl Candidate {
    #[must_use]
    pub fn mv(&self) -> &Move {
        &self.mv
    }

    /// Goal score of the board after the move.
    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn into_move(self) -> Move {
        self.mv
    }
}

/// Returns the actions tried against the root, in search order.
fn search_actions(goal: &Goal) -> [MoveKind; MAX_CANDIDATES] {
    [
        MoveKind::RotateClockwise,
        MoveKind::RotateCounterClockwise,
        MoveKind::SwapHorizontal,
        MoveKind::SwapVertical,
        MoveKind::Smash,
        MoveKind::Paint(goal.colour()),
        MoveKind::Combine,
    ]
}

/// Builds the candidates that change `board`, scored for `goal`.
///
/// # Example
///
/// ```
/// use blocky_engine::{Block, Colour, Position};
/// use blocky_evaluator::{goal::Goal, move_search, moves::MoveKind};
///
/// let mut rng = blocky_engine::GameSeed::from_u128(0).rng();
/// let board = Block::new(Position::ORIGIN, 100, Colour::REAL_RED, 0, 0);
/// let goal = Goal::blob(Colour::OLD_OLIVE);
///
/// // a single unit-cell leaf can only be painted
/// let candidates = move_search::valid_candidates(&board, &goal, &mut rng);
/// assert_eq!(candidates.len(), 1);
/// assert_eq!(candidates[0].mv().kind(), MoveKind::Paint(Colour::OLD_OLIVE));
/// assert_eq!(candidates[0].score(), 1);
/// ```
pub fn valid_candidates<R>(
    board: &Block,
    goal: &Goal,
    rng: &mut R,
) -> ArrayVec<Candidate, MAX_CANDIDATES>
where
    R: Rng + ?Sized,
{
    let mut candidates = ArrayVec::new();
    for kind in search_actions(goal) {
        let mut copy = board.clone();
        if !kind.apply(&mut copy, rng) {
            continue;
        }
        let score = goal.score(&copy);
        tracing::trace!(%kind, score, "candidate");
        candidates.push(Candidate {
            mv: Move::new(kind, BlockPath::root()),
            score,
        });
    }
    candidates
}

/// Picks one candidate uniformly, or passes if there is none.
pub fn select_random<R>(candidates: &[Candidate], rng: &mut R) -> Move
where
    R: Rng + ?Sized,
{
    candidates
        .choose(rng)
        .map_or_else(Move::pass, |candidate| candidate.mv.clone())
}

/// Picks the first improving candidate after discarding `difficulty` of them.
///
/// Candidates are shuffled, the first `difficulty` are dropped unseen, and the
/// first remaining candidate whose score is strictly greater than
/// `current_score` is returned. Passes if none qualifies, including when
/// `difficulty` is at least the number of candidates.
pub fn select_smart<R>(
    mut candidates: ArrayVec<Candidate, MAX_CANDIDATES>,
    difficulty: usize,
    current_score: usize,
    rng: &mut R,
) -> Move
where
    R: Rng + ?Sized,
{
    candidates.shuffle(rng);
    candidates
        .into_iter()
        .skip(difficulty)
        .find(|candidate| candidate.score > current_score)
        .map_or_else(Move::pass, Candidate::into_move)
}
