//! Placement legality.
//!
//! A tile may go on an empty cell that touches at least one placed tile,
//! and every touching edge must carry the same terrain on both sides.
//! The check never mutates the grid.
//!
//! ```
//! use rust_carcassonne::board::{check_placement, Grid, PlacementError};
//! use rust_carcassonne::core::Coord;
//! use rust_carcassonne::tiles::{TileCatalog, TileKindId};
//!
//! let mut catalog = TileCatalog::standard();
//! let grid = Grid::new(catalog.start_tile());
//!
//! let monastery = catalog.create(TileKindId(3));
//! assert_eq!(check_placement(&grid, Coord::new(0, -1), &monastery), Ok(()));
//! assert_eq!(
//!     check_placement(&grid, Coord::new(7, 7), &monastery),
//!     Err(PlacementError::NoAdjacentTile)
//! );
//! ```

use crate::core::{Coord, Direction};
use crate::tiles::{SectionType, Tile};

use super::grid::Grid;

/// Why a tile cannot go where it was asked to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("cell is already occupied")]
    Occupied,

    /// The neighbour in `direction` shows `expected` but the tile shows `found`.
    #[error("{direction} edge is {found} but the neighbour shows {expected}")]
    EdgeMismatch {
        direction: Direction,
        expected: SectionType,
        found: SectionType,
    },

    #[error("tile would not touch any placed tile")]
    NoAdjacentTile,
}

/// Check whether `tile`, as currently rotated, may be placed at `coord`.
///
/// Checks run in a fixed order: occupancy, then edges Up, Left, Down, Right,
/// then adjacency. The first failure is reported.
pub fn check_placement(grid: &Grid, coord: Coord, tile: &Tile) -> Result<(), PlacementError> {
    if grid.is_occupied(coord) {
        return Err(PlacementError::Occupied);
    }

    let mut neighbours = 0;
    for direction in Direction::ALL {
        let Some(neighbour) = grid.abutting_tile(coord, direction) else {
            continue;
        };
        neighbours += 1;

        let expected = neighbour.edge(direction.opposite()).kind();
        let found = tile.edge(direction).kind();
        if expected != found {
            return Err(PlacementError::EdgeMismatch {
                direction,
                expected,
                found,
            });
        }
    }

    if neighbours == 0 {
        return Err(PlacementError::NoAdjacentTile);
    }
    Ok(())
}

/// Boolean form of `check_placement`.
#[must_use]
pub fn is_valid_placement(grid: &Grid, coord: Coord, tile: &Tile) -> bool {
    check_placement(grid, coord, tile).is_ok()
}

/// Every rotation (0-3 quarter turns) under which `tile` fits at `coord`.
#[must_use]
pub fn valid_rotations(grid: &Grid, coord: Coord, tile: &Tile) -> Vec<u8> {
    let mut candidate = tile.clone();
    let mut turns = Vec::new();
    for turn in 0..4 {
        if is_valid_placement(grid, coord, &candidate) {
            turns.push(turn);
        }
        candidate.rotate_clockwise();
    }
    turns
}

/// Every `(coord, turns)` at which `tile` could be placed, ordered by
/// coordinate then rotation.
#[must_use]
pub fn legal_placements(grid: &Grid, tile: &Tile) -> Vec<(Coord, u8)> {
    grid.frontier()
        .into_iter()
        .flat_map(|coord| {
            valid_rotations(grid, coord, tile)
                .into_iter()
                .map(move |turns| (coord, turns))
        })
        .collect()
}
