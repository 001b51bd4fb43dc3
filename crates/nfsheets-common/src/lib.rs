pub mod coord;
pub mod grid;

pub use coord::*;
pub use grid::*;
