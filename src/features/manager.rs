//! The interface every feature tracker exposes to the game.
//!
//! The caller places a tile on the grid, then hands the same coordinate to
//! `update_features`. Meeple checks and scoring read the grid and never
//! change which tiles are on it.

use super::feature::{Award, FeatureRef};
use super::graph::GraphFeatureManager;
use super::monastery::MonasteryFeatureManager;
use crate::board::Grid;
use crate::core::{Coord, MeepleLedger};
use crate::tiles::SectionRef;

/// A tracker of one or more feature families.
pub trait FeatureManager {
    /// Account for the tile just placed at `coord`.
    ///
    /// The tile must already be on `grid`.
    fn update_features(&mut self, grid: &Grid, coord: Coord);

    /// Whether this tracker allows a meeple on `section`.
    fn can_place_meeple(&self, grid: &Grid, section: SectionRef) -> bool;

    /// Score whatever has just completed. Calling twice in a row awards
    /// nothing the second time.
    fn score_features(&mut self, grid: &mut Grid, ledger: &mut dyn MeepleLedger) -> Vec<Award>;

    fn features(&self) -> Vec<FeatureRef<'_>>;
}

impl FeatureManager for GraphFeatureManager {
    fn update_features(&mut self, grid: &Grid, coord: Coord) {
        self.update(grid, coord);
    }

    fn can_place_meeple(&self, grid: &Grid, section: SectionRef) -> bool {
        GraphFeatureManager::can_place_meeple(self, grid, section)
    }

    fn score_features(&mut self, grid: &mut Grid, ledger: &mut dyn MeepleLedger) -> Vec<Award> {
        GraphFeatureManager::score_features(self, grid, ledger)
    }

    fn features(&self) -> Vec<FeatureRef<'_>> {
        GraphFeatureManager::features(self)
            .into_iter()
            .map(FeatureRef::Graph)
            .collect()
    }
}

impl FeatureManager for MonasteryFeatureManager {
    fn update_features(&mut self, grid: &Grid, coord: Coord) {
        self.update(grid, coord);
    }

    fn can_place_meeple(&self, grid: &Grid, section: SectionRef) -> bool {
        MonasteryFeatureManager::can_place_meeple(self, grid, section)
    }

    fn score_features(&mut self, grid: &mut Grid, ledger: &mut dyn MeepleLedger) -> Vec<Award> {
        MonasteryFeatureManager::score_features(self, grid, ledger)
    }

    fn features(&self) -> Vec<FeatureRef<'_>> {
        MonasteryFeatureManager::features(self)
            .into_iter()
            .map(FeatureRef::Monastery)
            .collect()
    }
}
