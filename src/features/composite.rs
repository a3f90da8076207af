//! Both feature families behind one `FeatureManager`.

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use super::feature::{Award, FeatureRef};
use super::graph::GraphFeatureManager;
use super::manager::FeatureManager;
use super::monastery::MonasteryFeatureManager;
use crate::board::Grid;
use crate::core::{Coord, MeepleLedger, RulesConfig};
use crate::tiles::SectionRef;

/// Which features have already paid out.
///
/// Replaying a grid rebuilds connectivity but not scoring history, so a
/// saved game keeps this next to its grid and roster.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredFeatures {
    /// One section of each scored city or road.
    pub sections: Vec<SectionRef>,

    /// Anchors of scored monasteries.
    pub monasteries: Vec<Coord>,
}

/// Cities and roads plus monasteries.
///
/// Updates and scoring go to both trackers, graph first. The meeple check
/// is the full claim rule of the game: only cities, roads and monasteries
/// can be claimed, one meeple per tile, nothing already scored, and every
/// tracker must agree.
#[derive(Clone, Debug)]
pub struct CompositeFeatureManager {
    graph: GraphFeatureManager,
    monasteries: MonasteryFeatureManager,
}

impl CompositeFeatureManager {
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self {
            graph: GraphFeatureManager::new(config.clone()),
            monasteries: MonasteryFeatureManager::new(config),
        }
    }

    /// Rebuild both trackers by replaying `grid`.
    #[must_use]
    pub fn from_grid(grid: &Grid, config: RulesConfig) -> Self {
        Self {
            graph: GraphFeatureManager::from_grid(grid, config.clone()),
            monasteries: MonasteryFeatureManager::from_grid(grid, config),
        }
    }

    #[must_use]
    pub fn graph(&self) -> &GraphFeatureManager {
        &self.graph
    }

    #[must_use]
    pub fn monasteries(&self) -> &MonasteryFeatureManager {
        &self.monasteries
    }

    /// Rebuild both trackers by replaying `grid`, then restore which
    /// features were already scored.
    #[must_use]
    pub fn resume(grid: &Grid, scored: &ScoredFeatures, config: RulesConfig) -> Self {
        let mut manager = Self::from_grid(grid, config);
        manager.restore_scored(scored);
        manager
    }

    /// Snapshot of the scored flags of both trackers.
    #[must_use]
    pub fn scored(&self) -> ScoredFeatures {
        ScoredFeatures {
            sections: self.graph.scored_sections(),
            monasteries: self.monasteries.scored_anchors(),
        }
    }

    /// Flag the listed features as scored. Entries that match nothing on
    /// this board are logged and skipped.
    pub fn restore_scored(&mut self, scored: &ScoredFeatures) {
        for &section in &scored.sections {
            if !self.graph.mark_scored(section) {
                warn!(%section, "scored section is not tracked");
            }
        }
        for &anchor in &scored.monasteries {
            if !self.monasteries.mark_scored(anchor) {
                warn!(%anchor, "no monastery to mark scored");
            }
        }
    }

    fn managers(&self) -> [&dyn FeatureManager; 2] {
        [&self.graph, &self.monasteries]
    }
}

impl FeatureManager for CompositeFeatureManager {
    fn update_features(&mut self, grid: &Grid, coord: Coord) {
        self.graph.update_features(grid, coord);
        self.monasteries.update_features(grid, coord);
    }

    fn can_place_meeple(&self, grid: &Grid, section: SectionRef) -> bool {
        let Some(tile) = grid.tile_by_id(section.tile) else {
            return false;
        };
        let Some(target) = tile.section(section.section) else {
            return false;
        };

        target.kind().is_claimable()
            && !tile.has_meeple()
            && !self.graph.is_scored(section)
            && !self.monasteries.is_scored(grid, section)
            && self.managers().into_iter().all(|m| m.can_place_meeple(grid, section))
    }

    #[instrument(skip_all)]
    fn score_features(&mut self, grid: &mut Grid, ledger: &mut dyn MeepleLedger) -> Vec<Award> {
        let mut awards = self.graph.score_features(grid, ledger);
        awards.extend(self.monasteries.score_features(grid, ledger));
        awards
    }

    fn features(&self) -> Vec<FeatureRef<'_>> {
        self.managers().into_iter().flat_map(|m| m.features()).collect()
    }
}
