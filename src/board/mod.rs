//! The board and the rule that gates what goes on it.
//!
//! - `Grid`: sparse `Coord -> Tile` map with ordered placement history
//! - `check_placement` / `is_valid_placement`: pure legality check

pub mod grid;
pub mod placement;

pub use grid::Grid;
pub use placement::{check_placement, is_valid_placement, legal_placements, valid_rotations, PlacementError};
