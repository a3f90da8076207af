//! Tile kinds and the catalogue that stamps out tiles.
//!
//! A `TileKind` is the printed design (edges, centers, coat of arms, how
//! many copies exist). The `TileCatalog` owns the kinds and hands out
//! `Tile`s with fresh `TileId`s. Loading kinds from files and shuffling
//! decks belong to the caller.
//!
//! ```
//! use rust_carcassonne::core::Direction;
//! use rust_carcassonne::tiles::{SectionType, TileCatalog, TileKindId};
//!
//! let mut catalog = TileCatalog::standard();
//!
//! let start = catalog.start_tile();
//! assert_eq!(start.edge(Direction::Up).kind(), SectionType::City);
//! assert_eq!(start.edge(Direction::Down).kind(), SectionType::Field);
//!
//! let monastery = catalog.create(TileKindId(18));
//! assert!(monastery.has_center(SectionType::Monastery));
//! assert_ne!(monastery.id(), start.id());
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::section::SectionType;
use super::tile::{Tile, TileId, TileKindId};
use crate::core::Direction;

/// Kind of the start tile in the standard catalogue.
pub const START_KIND: TileKindId = TileKindId(24);

/// A printed tile design.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileKind {
    pub id: TileKindId,

    /// Short label (the rulebook letter for the base game).
    pub name: String,

    /// Edge types by `Direction::index()`: top, left, bottom, right.
    pub edges: [SectionType; 4],

    pub centers: Vec<SectionType>,

    #[serde(default)]
    pub coat_of_arms: bool,

    /// Copies in a full deck.
    pub quantity: u8,
}

impl TileKind {
    /// Create a kind from edge types in top, left, bottom, right order.
    pub fn new(id: TileKindId, name: impl Into<String>, edges: [SectionType; 4], centers: &[SectionType]) -> Self {
        Self {
            id,
            name: name.into(),
            edges,
            centers: centers.to_vec(),
            coat_of_arms: false,
            quantity: 1,
        }
    }

    #[must_use]
    pub fn with_coat_of_arms(mut self) -> Self {
        self.coat_of_arms = true;
        self
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: u8) -> Self {
        self.quantity = quantity;
        self
    }

    /// Stamp out a tile of this kind.
    #[must_use]
    pub fn build(&self, id: TileId) -> Tile {
        let mut builder = Tile::builder(id, self.id).coat_of_arms(self.coat_of_arms);
        for direction in Direction::ALL {
            builder = builder.edge(direction, self.edges[direction.index()]);
        }
        for &center in &self.centers {
            builder = builder.center(center);
        }
        builder.build()
    }
}

/// Registry of tile kinds and allocator of tile ids.
#[derive(Clone, Debug, Default)]
pub struct TileCatalog {
    kinds: FxHashMap<TileKindId, TileKind>,
    next_tile: u32,
}

impl TileCatalog {
    /// Create an empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The 24 kinds of the base game.
    ///
    /// Quantities add up to 71 tiles: the 72-tile game minus the start
    /// tile, which is a fourth kind 24 stamped separately with `start_tile`.
    #[must_use]
    pub fn standard() -> Self {
        use SectionType::{Blank, City as C, Field as F, Monastery, Road as R};

        let kinds = [
            TileKind::new(TileKindId(1), "C", [C, C, C, C], &[C]).with_coat_of_arms().with_quantity(1),
            TileKind::new(TileKindId(2), "X", [R, R, R, R], &[Blank]).with_quantity(1),
            TileKind::new(TileKindId(3), "B", [F, F, F, F], &[Monastery]).with_quantity(4),
            TileKind::new(TileKindId(4), "F", [F, C, F, C], &[C]).with_coat_of_arms().with_quantity(2),
            TileKind::new(TileKindId(5), "H", [F, C, F, C], &[F]).with_quantity(3),
            TileKind::new(TileKindId(6), "I", [C, C, F, F], &[F]).with_quantity(2),
            TileKind::new(TileKindId(7), "W", [F, R, R, R], &[Blank]).with_quantity(4),
            TileKind::new(TileKindId(8), "G", [F, C, F, C], &[C]).with_quantity(1),
            TileKind::new(TileKindId(9), "M", [C, C, F, F], &[C]).with_coat_of_arms().with_quantity(2),
            TileKind::new(TileKindId(10), "U", [R, F, R, F], &[R]).with_quantity(8),
            TileKind::new(TileKindId(11), "N", [C, C, F, F], &[C]).with_quantity(3),
            TileKind::new(TileKindId(12), "O", [C, C, R, R], &[C, R]).with_coat_of_arms().with_quantity(2),
            TileKind::new(TileKindId(13), "L", [C, R, R, R], &[Blank]).with_quantity(3),
            TileKind::new(TileKindId(14), "J", [C, F, R, R], &[R]).with_quantity(3),
            TileKind::new(TileKindId(15), "V", [F, R, R, F], &[R]).with_quantity(9),
            TileKind::new(TileKindId(16), "P", [C, C, R, R], &[C, R]).with_quantity(3),
            TileKind::new(TileKindId(17), "Q", [C, C, F, C], &[C]).with_coat_of_arms().with_quantity(1),
            TileKind::new(TileKindId(18), "A", [F, F, R, F], &[Monastery]).with_quantity(2),
            TileKind::new(TileKindId(19), "R", [C, C, F, C], &[C]).with_quantity(3),
            TileKind::new(TileKindId(20), "E", [C, F, F, F], &[F]).with_quantity(5),
            TileKind::new(TileKindId(21), "S", [C, C, R, C], &[C]).with_coat_of_arms().with_quantity(2),
            TileKind::new(TileKindId(22), "K", [C, R, R, F], &[R]).with_quantity(3),
            TileKind::new(TileKindId(23), "T", [C, C, R, C], &[C]).with_quantity(1),
            TileKind::new(START_KIND, "D", [C, R, F, R], &[R]).with_quantity(3),
        ];

        let mut catalog = Self::new();
        for kind in kinds {
            catalog.register(kind);
        }
        catalog
    }

    /// Register a kind.
    ///
    /// Panics if a kind with the same id already exists.
    pub fn register(&mut self, kind: TileKind) {
        if self.kinds.contains_key(&kind.id) {
            panic!("Tile kind {} already registered", kind.id);
        }
        self.kinds.insert(kind.id, kind);
    }

    #[must_use]
    pub fn get(&self, id: TileKindId) -> Option<&TileKind> {
        self.kinds.get(&id)
    }

    /// Iterate over kinds in id order.
    pub fn kinds(&self) -> impl Iterator<Item = &TileKind> {
        let mut kinds: Vec<_> = self.kinds.values().collect();
        kinds.sort_by_key(|kind| kind.id);
        kinds.into_iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Total copies across all kinds.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.kinds.values().map(|kind| kind.quantity as usize).sum()
    }

    /// Stamp out a tile of `kind`, or `None` for an unknown kind.
    pub fn try_create(&mut self, kind: TileKindId) -> Option<Tile> {
        let id = TileId(self.next_tile);
        let tile = self.kinds.get(&kind)?.build(id);
        self.next_tile += 1;
        Some(tile)
    }

    /// Stamp out a tile of `kind`.
    ///
    /// Panics on an unknown kind.
    pub fn create(&mut self, kind: TileKindId) -> Tile {
        self.try_create(kind)
            .unwrap_or_else(|| panic!("Unknown tile kind {}", kind))
    }

    /// Stamp out the start tile.
    pub fn start_tile(&mut self) -> Tile {
        self.create(START_KIND)
    }

    /// Every copy of every kind, in kind order. Shuffling is the caller's job.
    pub fn full_deck(&mut self) -> Vec<Tile> {
        let plan: Vec<(TileKindId, u8)> = self.kinds().map(|kind| (kind.id, kind.quantity)).collect();
        plan.into_iter()
            .flat_map(|(kind, quantity)| std::iter::repeat(kind).take(quantity as usize))
            .map(|kind| self.create(kind))
            .collect()
    }
}
