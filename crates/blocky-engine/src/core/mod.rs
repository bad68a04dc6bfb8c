pub use self::{block::*, colour::*, flat_grid::*, quadrant::*};

pub(crate) mod block;
pub(crate) mod colour;
pub(crate) mod flat_grid;
pub(crate) mod quadrant;
