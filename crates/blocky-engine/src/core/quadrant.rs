use std::fmt;

use serde::{Deserialize, Serialize};

use super::block::Position;

/// Slot of a child block within its parent.
///
/// Children are always stored in this order: upper-right, upper-left,
/// lower-left, lower-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum Quadrant {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

impl Quadrant {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [
        Self::UpperRight,
        Self::UpperLeft,
        Self::LowerLeft,
        Self::LowerRight,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Position of a child in this slot, for a parent at `parent` whose
    /// children have side length `child_size`.
    #[must_use]
    pub const fn child_position(self, parent: Position, child_size: u32) -> Position {
        let Position { x, y } = parent;
        match self {
            Self::UpperRight => Position::new(x + child_size, y),
            Self::UpperLeft => Position::new(x, y),
            Self::LowerLeft => Position::new(x, y + child_size),
            Self::LowerRight => Position::new(x + child_size, y + child_size),
        }
    }

    const fn short_name(self) -> &'static str {
        match self {
            Self::UpperRight => "UR",
            Self::UpperLeft => "UL",
            Self::LowerLeft => "LL",
            Self::LowerRight => "LR",
        }
    }
}

/// Address of a block inside a tree, as the slots walked from the root.
///
/// The tree has no parent pointers, so a block is referred to by the path
/// leading to it rather than by reference. The empty path is the root.
///
/// # Example
///
/// ```
/// use blocky_engine::{BlockPath, Quadrant};
///
/// let mut path = BlockPath::root();
/// assert!(path.is_root());
///
/// path.push(Quadrant::LowerLeft);
/// assert_eq!(path.len(), 1);
/// assert_eq!(path.to_string(), "LL");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct BlockPath(Vec<Quadrant>);

impl BlockPath {
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of slots in the path, which is the level of the addressed block.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, quadrant: Quadrant) {
        self.0.push(quadrant);
    }

    pub fn iter(&self) -> impl Iterator<Item = Quadrant> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Quadrant> for BlockPath {
    fn from_iter<T: IntoIterator<Item = Quadrant>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for BlockPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("root");
        }
        for (i, quadrant) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            f.write_str(quadrant.short_name())?;
        }
        Ok(())
    }
}
