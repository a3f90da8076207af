//! The board: a sparse map from coordinates to placed tiles.
//!
//! The grid also remembers the order tiles were placed in, so feature
//! managers can be rebuilt by replaying history.
//!
//! ```
//! use rust_carcassonne::board::Grid;
//! use rust_carcassonne::core::{Coord, Direction};
//! use rust_carcassonne::tiles::{TileCatalog, TileKindId};
//!
//! let mut catalog = TileCatalog::standard();
//! let mut grid = Grid::new(catalog.start_tile());
//!
//! let road = catalog.create(TileKindId(10)).rotated(1);
//! grid.place(Coord::new(1, 0), road);
//!
//! assert!(grid.tile_at(Coord::ORIGIN).is_some());
//! assert!(grid.abutting_tile(Coord::ORIGIN, Direction::Right).is_some());
//! assert!(grid.abutting_tile(Coord::ORIGIN, Direction::Left).is_none());
//! assert_eq!(grid.len(), 2);
//! ```

use im::Vector;
use rustc_hash::FxHashMap;

use crate::core::{Coord, Direction};
use crate::tiles::{Section, SectionRef, Tile, TileId};

/// Placed tiles by coordinate.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    tiles: FxHashMap<Coord, Tile>,

    /// Reverse lookup for section references.
    positions: FxHashMap<TileId, Coord>,

    /// Coordinates in placement order.
    history: Vector<Coord>,
}

impl Grid {
    /// Create a grid with the start tile at the origin.
    #[must_use]
    pub fn new(start: Tile) -> Self {
        let mut grid = Self::empty();
        grid.place(Coord::ORIGIN, start);
        grid
    }

    /// Create a grid with no tiles at all.
    ///
    /// Only useful for replaying an existing grid tile by tile.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.tiles.contains_key(&coord)
    }

    #[must_use]
    pub fn tile_at(&self, coord: Coord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    /// The tile sharing `coord`'s edge in `direction`.
    #[must_use]
    pub fn abutting_tile(&self, coord: Coord, direction: Direction) -> Option<&Tile> {
        self.tile_at(coord.step(direction))
    }

    #[must_use]
    pub fn position_of(&self, tile: TileId) -> Option<Coord> {
        self.positions.get(&tile).copied()
    }

    #[must_use]
    pub fn tile_by_id(&self, tile: TileId) -> Option<&Tile> {
        self.position_of(tile).and_then(|coord| self.tile_at(coord))
    }

    pub fn tile_by_id_mut(&mut self, tile: TileId) -> Option<&mut Tile> {
        let coord = self.position_of(tile)?;
        self.tiles.get_mut(&coord)
    }

    #[must_use]
    pub fn section(&self, section: SectionRef) -> Option<&Section> {
        self.tile_by_id(section.tile)?.section(section.section)
    }

    pub fn section_mut(&mut self, section: SectionRef) -> Option<&mut Section> {
        self.tile_by_id_mut(section.tile)?.section_mut(section.section)
    }

    /// Put a tile on the board.
    ///
    /// Does not check edge compatibility, use `check_placement` first.
    /// Panics if the cell is taken or the tile is already on the board.
    pub fn place(&mut self, coord: Coord, tile: Tile) {
        assert!(!self.is_occupied(coord), "Cell {} is already occupied", coord);
        assert!(
            !self.positions.contains_key(&tile.id()),
            "{} is already on the board",
            tile.id()
        );

        self.positions.insert(tile.id(), coord);
        self.tiles.insert(coord, tile);
        self.history.push_back(coord);
    }

    /// Placed tiles in the order they were placed.
    pub fn placements(&self) -> impl Iterator<Item = (Coord, &Tile)> {
        self.history.iter().map(move |&coord| (coord, &self.tiles[&coord]))
    }

    /// Coordinates in placement order.
    #[must_use]
    pub fn history(&self) -> &Vector<Coord> {
        &self.history
    }

    /// Empty cells sharing an edge with at least one placed tile, sorted.
    #[must_use]
    pub fn frontier(&self) -> Vec<Coord> {
        let mut cells: Vec<Coord> = self
            .tiles
            .keys()
            .flat_map(|&coord| Direction::ALL.map(|d| coord.step(d)))
            .filter(|&coord| !self.is_occupied(coord))
            .collect();
        cells.sort();
        cells.dedup();
        cells
    }
}
