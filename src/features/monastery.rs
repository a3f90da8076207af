//! Monasteries: complete once all eight surrounding cells hold tiles.
//!
//! Each monastery keeps a 3x3 window of the board centred on its own tile.
//! Rows run top to bottom and columns left to right, so with up being +y
//! a tile at offset `(dx, dy)` from the monastery lands at
//! `row = 1 - dy`, `col = 1 + dx`.
//!
//! ```
//! use rust_carcassonne::core::Coord;
//! use rust_carcassonne::features::monastery_cell;
//!
//! let monastery = Coord::new(0, 0);
//! assert_eq!(monastery_cell(monastery, Coord::new(0, 1)), (0, 1));
//! assert_eq!(monastery_cell(monastery, Coord::new(-1, 0)), (1, 0));
//! assert_eq!(monastery_cell(monastery, Coord::new(1, -1)), (2, 2));
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::{Award, Feature};
use crate::board::Grid;
use crate::core::{Coord, MeepleLedger, RulesConfig};
use crate::tiles::{SectionRef, SectionType, TileId};

/// Window cell of `tile` relative to a monastery at `monastery`.
///
/// Only meaningful when `tile` is within one step of `monastery` on both
/// axes. Panics otherwise. Never overflows, whatever the inputs.
#[must_use]
pub fn monastery_cell(monastery: Coord, tile: Coord) -> (usize, usize) {
    let row = 1 + (i64::from(monastery.y) - i64::from(tile.y));
    let col = 1 + (i64::from(tile.x) - i64::from(monastery.x));
    assert!(
        (0..3).contains(&row) && (0..3).contains(&col),
        "{} is not next to the monastery at {}",
        tile,
        monastery
    );
    (row as usize, col as usize)
}

/// One monastery and the tiles around it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonasteryFeature {
    anchor: Coord,
    section: SectionRef,
    cells: [[Option<TileId>; 3]; 3],
    scored: bool,
}

impl MonasteryFeature {
    fn new(anchor: Coord, section: SectionRef) -> Self {
        let mut cells = [[None; 3]; 3];
        cells[1][1] = Some(section.tile);
        Self {
            anchor,
            section,
            cells,
            scored: false,
        }
    }

    /// Coordinate of the monastery tile.
    #[must_use]
    pub fn anchor(&self) -> Coord {
        self.anchor
    }

    /// The monastery center section.
    #[must_use]
    pub fn section(&self) -> SectionRef {
        self.section
    }

    #[must_use]
    pub fn cells(&self) -> &[[Option<TileId>; 3]; 3] {
        &self.cells
    }

    /// Number of filled cells, the monastery itself included.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// Record `tile` at `coord`. Panics if that cell is already filled.
    pub fn register(&mut self, coord: Coord, tile: TileId) {
        let (row, col) = monastery_cell(self.anchor, coord);
        let cell = &mut self.cells[row][col];
        if let Some(existing) = cell {
            panic!(
                "Monastery at {} already has {} at [{}][{}], got {}",
                self.anchor, existing, row, col, tile
            );
        }
        *cell = Some(tile);
    }

    /// Score once, when complete. Points go to the owner of the meeple on
    /// the monastery, if there is one.
    pub fn score(&mut self, grid: &mut Grid, ledger: &mut dyn MeepleLedger, config: &RulesConfig) -> Option<Award> {
        if self.scored || !self.is_complete() {
            return None;
        }
        self.scored = true;

        let meeple = grid
            .section_mut(self.section)
            .unwrap_or_else(|| panic!("Monastery {} is not on the board", self.section))
            .take_meeple();
        let Some(meeple) = meeple else {
            debug!(anchor = %self.anchor, "completed without meeple");
            return None;
        };

        let player = ledger.owner_of(meeple);
        ledger.return_meeple(meeple);
        ledger.credit(player, config.monastery_points);
        info!(anchor = %self.anchor, %player, points = config.monastery_points, "scored monastery");

        Some(Award {
            player,
            points: config.monastery_points,
            kind: SectionType::Monastery,
        })
    }
}

impl Feature for MonasteryFeature {
    fn kind(&self) -> SectionType {
        SectionType::Monastery
    }

    fn is_complete(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    fn is_scored(&self) -> bool {
        self.scored
    }
}

/// Tracks every monastery on the board, keyed by its coordinate.
#[derive(Clone, Debug)]
pub struct MonasteryFeatureManager {
    config: RulesConfig,
    monasteries: FxHashMap<Coord, MonasteryFeature>,
}

impl MonasteryFeatureManager {
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self {
            config,
            monasteries: FxHashMap::default(),
        }
    }

    /// Build a manager for a grid that already has tiles on it, replaying
    /// them in placement order.
    #[must_use]
    pub fn from_grid(grid: &Grid, config: RulesConfig) -> Self {
        let mut manager = Self::new(config);
        let mut replay = Grid::empty();
        for (coord, tile) in grid.placements() {
            replay.place(coord, tile.clone());
            manager.update(&replay, coord);
        }
        manager
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Register the tile at `coord` with surrounding monasteries, and
    /// start tracking it if it is a monastery itself.
    #[instrument(skip(self, grid))]
    pub fn update(&mut self, grid: &Grid, coord: Coord) {
        let tile = grid
            .tile_at(coord)
            .unwrap_or_else(|| panic!("No tile at {} to update monasteries for", coord));

        for neighbour in coord.neighborhood() {
            if let Some(monastery) = self.monasteries.get_mut(&neighbour) {
                monastery.register(coord, tile.id());
            }
        }

        let Some((id, _)) = tile
            .centers()
            .find(|(_, section)| section.kind() == SectionType::Monastery)
        else {
            return;
        };

        let mut monastery = MonasteryFeature::new(coord, tile.section_ref(id));
        for neighbour in coord.neighborhood() {
            if let Some(placed) = grid.tile_at(neighbour) {
                monastery.register(neighbour, placed.id());
            }
        }
        debug!(anchor = %coord, filled = monastery.filled(), "new monastery");
        self.monasteries.insert(coord, monastery);
    }

    /// Monasteries never block a meeple.
    #[must_use]
    pub fn can_place_meeple(&self, _grid: &Grid, _section: SectionRef) -> bool {
        true
    }

    /// Score every complete, unscored monastery, in coordinate order.
    #[instrument(skip_all)]
    pub fn score_features(&mut self, grid: &mut Grid, ledger: &mut dyn MeepleLedger) -> Vec<Award> {
        let mut anchors: Vec<Coord> = self.monasteries.keys().copied().collect();
        anchors.sort();

        let mut awards = Vec::new();
        for anchor in anchors {
            if let Some(monastery) = self.monasteries.get_mut(&anchor) {
                awards.extend(monastery.score(grid, ledger, &self.config));
            }
        }
        awards
    }

    /// All monasteries, in coordinate order.
    #[must_use]
    pub fn features(&self) -> Vec<&MonasteryFeature> {
        let mut monasteries: Vec<_> = self.monasteries.values().collect();
        monasteries.sort_by_key(|m| m.anchor);
        monasteries
    }

    #[must_use]
    pub fn feature_at(&self, coord: Coord) -> Option<&MonasteryFeature> {
        self.monasteries.get(&coord)
    }

    /// Whether `section` is the center of a monastery that has been scored.
    #[must_use]
    pub fn is_scored(&self, grid: &Grid, section: SectionRef) -> bool {
        grid.position_of(section.tile)
            .and_then(|coord| self.monasteries.get(&coord))
            .is_some_and(|monastery| monastery.section == section && monastery.scored)
    }

    /// Anchors of scored monasteries, sorted.
    #[must_use]
    pub fn scored_anchors(&self) -> Vec<Coord> {
        let mut anchors: Vec<Coord> = self
            .monasteries
            .values()
            .filter(|monastery| monastery.scored)
            .map(|monastery| monastery.anchor)
            .collect();
        anchors.sort();
        anchors
    }

    /// Flag the monastery at `anchor` as scored without paying anyone.
    /// Returns false if there is no monastery there.
    pub fn mark_scored(&mut self, anchor: Coord) -> bool {
        let Some(monastery) = self.monasteries.get_mut(&anchor) else {
            return false;
        };
        monastery.scored = true;
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.monasteries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.monasteries.is_empty()
    }
}
