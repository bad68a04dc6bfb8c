use rand::Rng;

use crate::{
    BoardConfigError,
    core::{Block, Colour, Position},
};

/// Deepest subdivision level accepted by [`generate_board`].
///
/// A board of depth `d` flattens to `4^d` unit cells.
pub const MAX_DEPTH: u8 = 10;

/// Generates a new game board.
///
/// The board is a `size` by `size` block at the origin whose tree may be
/// subdivided down to `max_depth`. The root starts as a leaf of a random palette
/// colour and is immediately smashed, so every board with `max_depth > 0` has
/// four children; deeper levels are subdivided with decaying probability (see
/// [`Block::smash`]).
///
/// # Errors
///
/// Returns [`BoardConfigError`] if `max_depth` exceeds [`MAX_DEPTH`], or if
/// `size` is smaller than `2^max_depth`, in which case blocks at the deepest
/// level would have no area.
///
/// # Example
///
/// ```
/// use blocky_engine::{GameSeed, generate_board};
///
/// let mut rng = GameSeed::from_u128(7).rng();
/// let board = generate_board(3, 750, &mut rng)?;
///
/// assert_eq!(board.max_depth(), 3);
/// assert_eq!(board.size(), 750);
/// assert_eq!(board.children().len(), 4);
///
/// assert!(generate_board(5, 16, &mut rng).is_err());
/// # Ok::<(), blocky_engine::BoardConfigError>(())
/// ```
pub fn generate_board<R>(max_depth: u8, size: u32, rng: &mut R) -> Result<Block, BoardConfigError>
where
    R: Rng + ?Sized,
{
    if max_depth > MAX_DEPTH {
        return Err(BoardConfigError::DepthTooLarge {
            max_depth,
            limit: MAX_DEPTH,
        });
    }
    let min_size = 1 << max_depth;
    if size < min_size {
        return Err(BoardConfigError::SizeTooSmall {
            size,
            max_depth,
            min_size,
        });
    }

    let colour: Colour = rng.random();
    let mut board = Block::new(Position::ORIGIN, size, colour, 0, max_depth);
    board.smash(rng);
    Ok(board)
}

#[cfg(test)]
mod tests {
    use crate::{FlatGrid, GameSeed, Quadrant};

    use super::*;

    #[test]
    fn test_generated_boards_keep_invariants() {
        for seed in 0..100 {
            let mut rng = GameSeed::from_u128(seed).rng();
            let board = generate_board(4, 750, &mut rng).unwrap();
            board.assert_invariants();
            assert_eq!(board.children().len(), 4);
            assert!(board.leaves().all(|leaf| leaf.colour().is_some()));
        }
    }

    #[test]
    fn test_smallest_board_for_depth() {
        // every level halves exactly down to unit blocks
        for seed in 0..20 {
            let mut rng = GameSeed::from_u128(seed).rng();
            let board = generate_board(5, 32, &mut rng).unwrap();
            board.assert_invariants();
            assert!(board.leaves().all(|leaf| leaf.size() >= 1));
        }
    }

    #[test]
    fn test_size_too_small_for_depth() {
        for seed in 0..20 {
            let mut rng = GameSeed::from_u128(seed).rng();
            assert_eq!(
                generate_board(5, 16, &mut rng).unwrap_err(),
                BoardConfigError::SizeTooSmall {
                    size: 16,
                    max_depth: 5,
                    min_size: 32
                }
            );
        }
        let mut rng = GameSeed::from_u128(0).rng();
        assert!(generate_board(0, 0, &mut rng).unwrap_err().is_size_too_small());
        assert!(generate_board(3, 0, &mut rng).unwrap_err().is_size_too_small());
    }

    #[test]
    fn test_depth_too_large() {
        let mut rng = GameSeed::from_u128(0).rng();
        for max_depth in [MAX_DEPTH + 1, 64, u8::MAX] {
            assert_eq!(
                generate_board(max_depth, u32::MAX, &mut rng).unwrap_err(),
                BoardConfigError::DepthTooLarge {
                    max_depth,
                    limit: MAX_DEPTH
                }
            );
        }
    }

    #[test]
    fn test_depth_zero_board_is_a_leaf() {
        let mut rng = GameSeed::from_u128(1).rng();
        let board = generate_board(0, 100, &mut rng).unwrap();
        assert!(board.is_leaf());
        assert!(Colour::PALETTE.contains(&board.colour().unwrap()));
    }

    #[test]
    fn test_generation_is_reproducible() {
        let seed = GameSeed::from_u128(0xdead_beef);
        let board1 = generate_board(5, 640, &mut seed.rng()).unwrap();
        let board2 = generate_board(5, 640, &mut seed.rng()).unwrap();
        assert_eq!(board1, board2);
        assert_eq!(board1.to_string(), board2.to_string());
    }

    #[test]
    fn test_depth_one_board_flattens_by_quadrant() {
        for seed in 0..10 {
            let mut rng = GameSeed::from_u128(seed).rng();
            let board = generate_board(1, 4, &mut rng).unwrap();
            let grid = FlatGrid::from_block(&board);
            assert_eq!(grid.side(), 2);

            let colour_of = |quadrant: Quadrant| board.children()[quadrant.index()].colour();
            assert_eq!(Some(grid[(0, 0)]), colour_of(Quadrant::UpperLeft));
            assert_eq!(Some(grid[(1, 0)]), colour_of(Quadrant::UpperRight));
            assert_eq!(Some(grid[(0, 1)]), colour_of(Quadrant::LowerLeft));
            assert_eq!(Some(grid[(1, 1)]), colour_of(Quadrant::LowerRight));
        }
    }
}
