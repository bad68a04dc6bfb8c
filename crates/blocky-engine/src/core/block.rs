use std::fmt;

use arrayvec::ArrayVec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::InvalidDirectionError;

use super::{
    colour::Colour,
    quadrant::{BlockPath, Quadrant},
};

/// Base of the stochastic depth decay applied by [`Block::smash`].
///
/// A freshly created child at level `l` is itself smashed with probability
/// `exp(-SUBDIVIDE_DECAY * l)`.
const SUBDIVIDE_DECAY: f64 = 0.25;

/// Upper-left corner of a block, in board units.
///
/// - (0, 0) is the upper-left corner of the board
/// - X increases rightward, Y increases downward
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const ORIGIN: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Direction of [`Block::swap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum SwapDirection {
    /// Exchanges the left and right halves.
    Horizontal = 0,
    /// Exchanges the top and bottom halves.
    Vertical = 1,
}

impl TryFrom<u8> for SwapDirection {
    type Error = InvalidDirectionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Horizontal),
            1 => Ok(Self::Vertical),
            _ => Err(InvalidDirectionError(value)),
        }
    }
}

/// Direction of [`Block::rotate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum RotateDirection {
    Clockwise = 1,
    CounterClockwise = 3,
}

impl TryFrom<u8> for RotateDirection {
    type Error = InvalidDirectionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Clockwise),
            3 => Ok(Self::CounterClockwise),
            _ => Err(InvalidDirectionError(value)),
        }
    }
}

#[derive(Debug, Clone)]
enum Content {
    Leaf(Colour),
    Split(Box<[Block; Quadrant::LEN]>),
}

/// A square block of the game board, represented as a quadtree.
///
/// A block is either a leaf with a colour, or is split into exactly four
/// children stored in [`Quadrant`] order. The split is encoded in the type, so a
/// block can never have a colour and children at the same time.
///
/// # Invariants
///
/// For every child of a split block:
///
/// - `max_depth` equals the parent's
/// - `level` is the parent's plus one
/// - `size` is half the parent's, rounded half to even
/// - `position` is derived from the parent's position and the child's slot
///
/// and `level <= max_depth` holds for every block.
///
/// Cloning a block deep-copies the whole subtree, so a clone can be mutated
/// freely without affecting the original.
///
/// # Example
///
/// ```
/// use blocky_engine::{Block, Colour, Position, RotateDirection};
///
/// let mut board = Block::new(Position::ORIGIN, 8, Colour::REAL_RED, 0, 1);
/// assert!(board.subdivide([
///     Colour::REAL_RED,
///     Colour::OLD_OLIVE,
///     Colour::OLD_OLIVE,
///     Colour::OLD_OLIVE,
/// ]));
///
/// let saved = board.clone();
/// assert!(board.rotate(RotateDirection::Clockwise));
/// assert_ne!(board, saved);
///
/// assert!(board.combine());
/// assert_eq!(board.colour(), Some(Colour::OLD_OLIVE));
/// ```
#[derive(Debug, Clone)]
pub struct Block {
    position: Position,
    size: u32,
    level: u8,
    max_depth: u8,
    content: Content,
}

impl Block {
    /// Creates a leaf block.
    ///
    /// The caller must pass `size > 0` and `level <= max_depth`.
    #[must_use]
    pub fn new(position: Position, size: u32, colour: Colour, level: u8, max_depth: u8) -> Self {
        debug_assert!(size > 0, "block size must be positive");
        debug_assert!(level <= max_depth, "level {level} exceeds max depth {max_depth}");
        Self {
            position,
            size,
            level,
            max_depth,
            content: Content::Leaf(colour),
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[must_use]
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Returns the colour of a leaf, or `None` for a split block.
    #[must_use]
    pub fn colour(&self) -> Option<Colour> {
        match &self.content {
            Content::Leaf(colour) => Some(*colour),
            Content::Split(_) => None,
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self.content, Content::Leaf(_))
    }

    /// Returns the children in [`Quadrant`] order; empty for a leaf.
    #[must_use]
    pub fn children(&self) -> &[Block] {
        match &self.content {
            Content::Leaf(_) => &[],
            Content::Split(children) => children.as_slice(),
        }
    }

    /// Side length of this block's children.
    #[must_use]
    pub fn child_size(&self) -> u32 {
        let half = self.size / 2;
        // x.5 rounds to the even neighbour
        if self.size % 2 == 1 && half % 2 == 1 {
            half + 1
        } else {
            half
        }
    }

    /// Returns true if `location` lies in this block.
    ///
    /// The top and left edges belong to the block, the bottom and right edges do not.
    #[must_use]
    pub fn contains(&self, location: Position) -> bool {
        let Position { x, y } = self.position;
        (x..x + self.size).contains(&location.x) && (y..y + self.size).contains(&location.y)
    }

    /// Moves this block to `position`, re-deriving the positions of all descendants.
    fn set_position(&mut self, position: Position) {
        self.position = position;
        let child_size = self.child_size();
        if let Content::Split(children) = &mut self.content {
            place_children(position, child_size, children);
        }
    }

    /// Returns true if this block is a leaf above the maximum depth.
    #[must_use]
    pub fn smashable(&self) -> bool {
        self.is_leaf() && self.level != self.max_depth
    }

    /// Splits a smashable leaf into four leaves with the given colours.
    ///
    /// Colours are given in [`Quadrant`] order. Returns false, leaving the block
    /// unchanged, if the block is not smashable.
    pub fn subdivide(&mut self, colours: [Colour; Quadrant::LEN]) -> bool {
        if !self.smashable() {
            return false;
        }
        let child_size = self.child_size();
        let level = self.level + 1;
        let children = std::array::from_fn(|i| {
            let position = Quadrant::ALL[i].child_position(self.position, child_size);
            Block::new(position, child_size, colours[i], level, self.max_depth)
        });
        self.content = Content::Split(Box::new(children));
        true
    }

    /// Splits this block into four randomly coloured children.
    ///
    /// Each new child is then smashed again with probability
    /// `exp(-0.25 * child.level)`, so the tree thins out with depth.
    ///
    /// Returns false, leaving the block unchanged, if the block is not smashable.
    pub fn smash<R>(&mut self, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        if !self.smashable() {
            return false;
        }
        let colours = [(); Quadrant::LEN].map(|()| rng.random::<Colour>());
        self.subdivide(colours);
        if let Content::Split(children) = &mut self.content {
            for child in children.iter_mut() {
                let probability = (-SUBDIVIDE_DECAY * f64::from(child.level)).exp();
                if rng.random::<f64>() < probability {
                    child.smash(rng);
                }
            }
        }
        true
    }

    /// Swaps the children of this block.
    ///
    /// The subtrees are moved to their new slots without any other change.
    /// Returns false on a leaf.
    pub fn swap(&mut self, direction: SwapDirection) -> bool {
        let child_size = self.child_size();
        let Content::Split(children) = &mut self.content else {
            return false;
        };
        match direction {
            SwapDirection::Horizontal => {
                children.swap(0, 1);
                children.swap(2, 3);
            }
            SwapDirection::Vertical => children.reverse(),
        }
        place_children(self.position, child_size, children);
        true
    }

    /// Rotates this block and all its descendants.
    ///
    /// Children move one slot along the rotation and every child is then
    /// rotated the same way, so the whole subtree turns by 90 degrees.
    /// Returns false on a leaf.
    pub fn rotate(&mut self, direction: RotateDirection) -> bool {
        let child_size = self.child_size();
        let Content::Split(children) = &mut self.content else {
            return false;
        };
        match direction {
            // UR <- UL <- LL <- LR <- UR
            RotateDirection::Clockwise => children.rotate_left(1),
            RotateDirection::CounterClockwise => children.rotate_right(1),
        }
        place_children(self.position, child_size, children);
        for child in children.iter_mut() {
            child.rotate(direction);
        }
        true
    }

    /// Recolours a leaf at the maximum depth.
    ///
    /// Returns false if this block is not a leaf at `max_depth`, or already has `colour`.
    pub fn paint(&mut self, colour: Colour) -> bool {
        if self.level != self.max_depth {
            return false;
        }
        match &mut self.content {
            Content::Leaf(current) if *current != colour => {
                *current = colour;
                true
            }
            _ => false,
        }
    }

    /// Merges the children of this block into a leaf of their majority colour.
    ///
    /// Only blocks at `max_depth - 1` with children can be combined, and only
    /// when a single colour has the highest count among the children.
    pub fn combine(&mut self) -> bool {
        if self.level.checked_add(1) != Some(self.max_depth) {
            return false;
        }
        let Content::Split(children) = &self.content else {
            return false;
        };
        let Some(colour) = majority_colour(children.as_slice()) else {
            return false;
        };
        self.content = Content::Leaf(colour);
        true
    }

    /// Resolves `path` to a descendant of this block.
    ///
    /// Returns `None` if the path walks past a leaf.
    #[must_use]
    pub fn block_at(&self, path: &BlockPath) -> Option<&Block> {
        path.iter().try_fold(self, |block, quadrant| {
            block.children().get(quadrant.index())
        })
    }

    /// Mutable counterpart of [`Self::block_at`].
    pub fn block_at_mut(&mut self, path: &BlockPath) -> Option<&mut Block> {
        path.iter()
            .try_fold(self, |block, quadrant| match &mut block.content {
                Content::Leaf(_) => None,
                Content::Split(children) => Some(&mut children[quadrant.index()]),
            })
    }

    /// Finds the block at `level` that contains `location`.
    ///
    /// If the tree is shallower than `level` at that location, the deepest block
    /// containing it is returned instead. Returns `None` if `location` lies
    /// outside this block.
    #[must_use]
    pub fn locate(&self, location: Position, level: u8) -> Option<BlockPath> {
        if !self.contains(location) {
            return None;
        }
        let mut path = BlockPath::root();
        let mut block = self;
        while block.level < level && !block.is_leaf() {
            let (quadrant, child) = Quadrant::ALL
                .into_iter()
                .zip(block.children())
                .find(|(_, child)| child.contains(location))?;
            path.push(quadrant);
            block = child;
        }
        Some(path)
    }

    /// Returns an iterator over the leaves of this block, in [`Quadrant`] order.
    pub fn leaves(&self) -> impl Iterator<Item = &Block> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            while let Some(block) = stack.pop() {
                if block.is_leaf() {
                    return Some(block);
                }
                stack.extend(block.children().iter().rev());
            }
            None
        })
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert!(self.size > 0, "zero size at {}", self.position);
        assert!(self.level <= self.max_depth);
        let child_size = self.child_size();
        for (quadrant, child) in Quadrant::ALL.into_iter().zip(self.children()) {
            assert_eq!(child.max_depth, self.max_depth);
            assert_eq!(child.level, self.level + 1);
            assert_eq!(child.size, child_size);
            assert_eq!(
                child.position,
                quadrant.child_position(self.position, child_size)
            );
            child.assert_invariants();
        }
    }
}

fn place_children(position: Position, child_size: u32, children: &mut [Block; Quadrant::LEN]) {
    for (quadrant, child) in Quadrant::ALL.into_iter().zip(children.iter_mut()) {
        child.set_position(quadrant.child_position(position, child_size));
    }
}

fn majority_colour(children: &[Block]) -> Option<Colour> {
    let mut tally = ArrayVec::<(Colour, usize), { Quadrant::LEN }>::new();
    for child in children {
        let colour = child.colour()?;
        match tally.iter_mut().find(|(c, _)| *c == colour) {
            Some((_, count)) => *count += 1,
            None => tally.push((colour, 1)),
        }
    }
    let max_count = tally.iter().map(|(_, count)| *count).max()?;
    let mut winners = tally.iter().filter(|(_, count)| *count == max_count);
    let (colour, _) = winners.next()?;
    if winners.next().is_some() {
        return None;
    }
    Some(*colour)
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        match (&self.content, &other.content) {
            (Content::Leaf(colour), Content::Leaf(other_colour)) => {
                self.position == other.position
                    && self.size == other.size
                    && colour == other_colour
                    && self.level == other.level
                    && self.max_depth == other.max_depth
            }
            (Content::Split(children), Content::Split(other_children)) => {
                children == other_children
            }
            _ => false,
        }
    }
}

impl Eq for Block {}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.level {
            f.write_str("\t")?;
        }
        match &self.content {
            Content::Leaf(colour) => writeln!(
                f,
                "Leaf: colour={colour}, pos={}, size={}, level={}",
                self.position, self.size, self.level
            ),
            Content::Split(children) => {
                writeln!(
                    f,
                    "Parent: pos={}, size={}, level={}",
                    self.position, self.size, self.level
                )?;
                for child in children.iter() {
                    fmt::Display::fmt(child, f)?;
                }
                Ok(())
            }
        }
    }
}
