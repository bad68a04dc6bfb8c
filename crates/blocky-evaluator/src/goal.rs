//! Player goals: scoring a board against a target colour.
//!
//! Both goal kinds score the board by projecting it onto its grid of unit cells
//! ([`FlatGrid`]) and inspecting the cells of the goal's target colour:
//!
//! - **Perimeter** - Counts target-coloured cells on the outer edge of the board.
//!   Every edge is scanned separately, so a matching corner cell counts twice.
//! - **Blob** - Size of the largest 4-connected region (sides, not corners) of
//!   target-coloured cells.
//!
//! Scores are always non-negative; higher is better for the goal's owner.

use blocky_engine::{Block, Colour, FlatGrid};
use rand::{Rng, seq::SliceRandom as _};
use serde::{Deserialize, Serialize};

use crate::GoalGenerationError;

/// Scoring rule of a [`Goal`].
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
    derive_more::FromStr,
    derive_more::IsVariant,
)]
pub enum GoalKind {
    Perimeter,
    Blob,
}

/// A player's goal: a scoring rule applied to a target colour.
///
/// # Example
///
/// ```
/// use blocky_engine::{Block, Colour, Position};
/// use blocky_evaluator::goal::Goal;
///
/// let board = Block::new(Position::ORIGIN, 100, Colour::REAL_RED, 0, 2);
///
/// // 4x4 unit cells, all red
/// assert_eq!(Goal::blob(Colour::REAL_RED).score(&board), 16);
/// assert_eq!(Goal::perimeter(Colour::REAL_RED).score(&board), 16);
/// assert_eq!(Goal::blob(Colour::OLD_OLIVE).score(&board), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Goal {
    kind: GoalKind,
    colour: Colour,
}

impl Goal {
    #[must_use]
    pub const fn new(kind: GoalKind, colour: Colour) -> Self {
        Self { kind, colour }
    }

    #[must_use]
    pub const fn perimeter(colour: Colour) -> Self {
        Self::new(GoalKind::Perimeter, colour)
    }

    #[must_use]
    pub const fn blob(colour: Colour) -> Self {
        Self::new(GoalKind::Blob, colour)
    }

    #[must_use]
    pub fn kind(&self) -> GoalKind {
        self.kind
    }

    /// The target colour of this goal.
    #[must_use]
    pub fn colour(&self) -> Colour {
        self.colour
    }

    /// Scores `board` for this goal.
    #[must_use]
    pub fn score(&self, board: &Block) -> usize {
        self.score_grid(&FlatGrid::from_block(board))
    }

    /// Scores an already flattened board.
    #[must_use]
    pub fn score_grid(&self, grid: &FlatGrid) -> usize {
        match self.kind {
            GoalKind::Perimeter => perimeter_score(grid, self.colour),
            GoalKind::Blob => largest_blob(grid, self.colour),
        }
    }

    #[must_use]
    pub fn description(&self) -> String {
        match self.kind {
            GoalKind::Perimeter => format!(
                "Get points for colour: {} on the perimeter of the board",
                self.colour
            ),
            GoalKind::Blob => format!(
                "Connect as many blocks of colour: {} touching sides (not corners).",
                self.colour
            ),
        }
    }
}

/// Generates `count` goals of one randomly chosen kind.
///
/// Every goal gets a different colour from [`Colour::PALETTE`].
///
/// # Errors
///
/// Returns [`GoalGenerationError::NotEnoughColours`] if `count` exceeds the
/// palette size. No goal is generated in that case.
pub fn generate_goals<R>(count: usize, rng: &mut R) -> Result<Vec<Goal>, GoalGenerationError>
where
    R: Rng + ?Sized,
{
    let available = Colour::PALETTE.len();
    if count > available {
        return Err(GoalGenerationError::NotEnoughColours {
            requested: count,
            available,
        });
    }

    let kind = if rng.random() {
        GoalKind::Perimeter
    } else {
        GoalKind::Blob
    };
    let mut colours = Colour::PALETTE;
    colours.shuffle(rng);
    Ok(colours
        .into_iter()
        .take(count)
        .map(|colour| Goal::new(kind, colour))
        .collect())
}

fn perimeter_score(grid: &FlatGrid, colour: Colour) -> usize {
    let n = grid.side();
    let last = n - 1;
    (0..n)
        .flat_map(|i| [(i, 0), (i, last), (0, i), (last, i)])
        .filter(|cell| grid[*cell] == colour)
        .count()
}

fn largest_blob(grid: &FlatGrid, colour: Colour) -> usize {
    let n = grid.side();
    let mut visited = vec![false; n * n];
    let mut largest = 0;
    for i in 0..n {
        for j in 0..n {
            largest = largest.max(undiscovered_blob_size(grid, colour, &mut visited, (i, j)));
        }
    }
    largest
}

/// Size of the blob of `colour` containing `start`, counting only unvisited cells.
///
/// Every cell inspected is marked visited, matching or not, so each cell of
/// the grid is explored at most once across a full sweep.
fn undiscovered_blob_size(
    grid: &FlatGrid,
    colour: Colour,
    visited: &mut [bool],
    start: (usize, usize),
) -> usize {
    let n = grid.side();
    let index = |(i, j): (usize, usize)| i * n + j;
    if visited[index(start)] {
        return 0;
    }
    visited[index(start)] = true;
    if grid[start] != colour {
        return 0;
    }

    let mut size = 0;
    let mut stack = vec![start];
    while let Some((i, j)) = stack.pop() {
        size += 1;
        let neighbours = [
            j.checked_sub(1).map(|j| (i, j)),
            (j + 1 < n).then_some((i, j + 1)),
            i.checked_sub(1).map(|i| (i, j)),
            (i + 1 < n).then_some((i + 1, j)),
        ];
        for cell in neighbours.into_iter().flatten() {
            if visited[index(cell)] {
                continue;
            }
            visited[index(cell)] = true;
            if grid[cell] == colour {
                stack.push(cell);
            }
        }
    }
    size
}

#[cfg(test)]
mod tests {
    use blocky_engine::{GameSeed, Position, generate_board};

    use super::*;

    const R: Colour = Colour::REAL_RED;
    const G: Colour = Colour::OLD_OLIVE;
    const B: Colour = Colour::PACIFIC_POINT;

    /// Builds a grid from rows, which read more naturally in tests.
    fn grid_from_rows(rows: &[&[Colour]]) -> FlatGrid {
        let n = rows.len();
        FlatGrid::from_columns((0..n).map(|i| rows.iter().map(|row| row[i]).collect()).collect())
    }

    #[test]
    fn test_blob_uniform_grid() {
        for depth in 0..4 {
            let board = Block::new(Position::ORIGIN, 64, R, 0, depth);
            let n = 1 << depth;
            assert_eq!(Goal::blob(R).score(&board), n * n);
        }
    }

    #[test]
    fn test_blob_ignores_diagonals() {
        let grid = grid_from_rows(&[&[R, G], &[G, R]]);
        assert_eq!(Goal::blob(R).score_grid(&grid), 1);
        assert_eq!(Goal::blob(G).score_grid(&grid), 1);
    }

    #[test]
    fn test_blob_largest_component() {
        let grid = grid_from_rows(&[
            &[R, R, G, R],
            &[G, R, G, R],
            &[G, G, G, R],
            &[R, G, R, R],
        ]);
        assert_eq!(Goal::blob(R).score_grid(&grid), 5);
        assert_eq!(Goal::blob(G).score_grid(&grid), 7);
        assert_eq!(Goal::blob(B).score_grid(&grid), 0);
    }

    #[test]
    fn test_blob_winding_component() {
        // a single snake-shaped region that revisits rows
        let grid = grid_from_rows(&[
            &[R, R, R, R],
            &[G, G, G, R],
            &[R, R, R, R],
            &[R, G, G, G],
        ]);
        assert_eq!(Goal::blob(R).score_grid(&grid), 10);
    }

    #[test]
    fn test_perimeter_counts_corners_twice() {
        let grid = grid_from_rows(&[&[R, G], &[G, G]]);
        assert_eq!(Goal::perimeter(R).score_grid(&grid), 2);
        assert_eq!(Goal::perimeter(G).score_grid(&grid), 6);
    }

    #[test]
    fn test_perimeter_ignores_interior() {
        let grid = grid_from_rows(&[
            &[G, G, G, G],
            &[G, R, R, G],
            &[G, R, R, G],
            &[G, G, G, G],
        ]);
        assert_eq!(Goal::perimeter(R).score_grid(&grid), 0);
        assert_eq!(Goal::perimeter(G).score_grid(&grid), 16);
    }

    #[test]
    fn test_single_cell_board() {
        let board = Block::new(Position::ORIGIN, 10, B, 0, 0);
        assert_eq!(Goal::perimeter(B).score(&board), 4);
        assert_eq!(Goal::blob(B).score(&board), 1);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(
            Goal::perimeter(R).description(),
            "Get points for colour: Real Red on the perimeter of the board"
        );
        assert_eq!(
            Goal::blob(B).description(),
            "Connect as many blocks of colour: Pacific Point touching sides (not corners)."
        );
    }

    #[test]
    fn test_generate_goals() {
        for seed in 0..20 {
            let mut rng = GameSeed::from_u128(seed).rng();
            let goals = generate_goals(4, &mut rng).unwrap();
            assert_eq!(goals.len(), 4);
            assert!(goals.iter().all(|goal| goal.kind() == goals[0].kind()));
            let mut colours: Vec<_> = goals.iter().map(Goal::colour).collect();
            colours.sort();
            colours.dedup();
            assert_eq!(colours.len(), 4);
        }
    }

    #[test]
    fn test_generate_goals_picks_both_kinds() {
        let kinds: Vec<_> = (0..32)
            .map(|seed| {
                let mut rng = GameSeed::from_u128(seed).rng();
                generate_goals(1, &mut rng).unwrap()[0].kind()
            })
            .collect();
        assert!(kinds.iter().any(GoalKind::is_perimeter));
        assert!(kinds.iter().any(GoalKind::is_blob));
    }

    #[test]
    fn test_generate_goals_not_enough_colours() {
        let mut rng = GameSeed::from_u128(0).rng();
        let err = generate_goals(5, &mut rng).unwrap_err();
        assert_eq!(
            err,
            GoalGenerationError::NotEnoughColours {
                requested: 5,
                available: 4
            }
        );
        assert!(generate_goals(0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_score_matches_flattened_board() {
        let mut rng = GameSeed::from_u128(3).rng();
        let board = generate_board(3, 750, &mut rng).unwrap();
        let grid = FlatGrid::from_block(&board);
        for colour in Colour::PALETTE {
            for goal in [Goal::perimeter(colour), Goal::blob(colour)] {
                assert_eq!(goal.score(&board), goal.score_grid(&grid));
            }
        }
        // blobs of different colours never share cells
        let total: usize = Colour::PALETTE
            .iter()
            .map(|colour| Goal::blob(*colour).score_grid(&grid))
            .sum();
        assert!(total <= 64);
    }
}
