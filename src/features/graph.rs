//! City and road features: incremental connectivity and majority scoring.
//!
//! ## Update
//!
//! When a tile lands, `GraphFeatureManager::update` runs two passes over it:
//!
//! 1. **Edges.** Each city or road edge gets a node with its two side slots
//!    closed. If a tile already sits across that edge, the two nodes are
//!    linked and the new edge joins the neighbour's feature. Otherwise the
//!    edge starts a feature of its own.
//! 2. **Centers.** Each city or road center gets a node linked to every
//!    edge of the same type. If those edges belong to several features, the
//!    features are merged into the largest one.
//!
//! Finally every edge node's inward slot is closed unless a center claimed
//! it, so the only slot left open on the new tile faces an empty cell.
//!
//! ## Scoring
//!
//! A complete feature scores once. Meeples come off the board, and the
//! players with the most meeples on it split the points evenly (remainder
//! dropped).
//!
//! ```
//! use rust_carcassonne::board::Grid;
//! use rust_carcassonne::core::{Coord, RulesConfig};
//! use rust_carcassonne::features::GraphFeatureManager;
//! use rust_carcassonne::tiles::{TileCatalog, TileKindId};
//!
//! let mut catalog = TileCatalog::standard();
//! let mut grid = Grid::new(catalog.start_tile());
//! let mut features = GraphFeatureManager::from_grid(&grid, RulesConfig::default());
//!
//! // start tile: one city, one road running left to right
//! assert_eq!(features.features().len(), 2);
//!
//! // a straight road extends it without creating anything new
//! let road = catalog.create(TileKindId(10)).rotated(1);
//! grid.place(Coord::new(1, 0), road);
//! features.update(&grid, Coord::new(1, 0));
//! assert_eq!(features.features().len(), 2);
//! ```

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, instrument, trace};

use super::node::{NodeArena, NodeId};
use super::{Award, Feature};
use crate::board::Grid;
use crate::core::{Coord, Direction, MeepleLedger, PlayerId, RulesConfig};
use crate::tiles::{Section, SectionRef, SectionType, TileId};

/// Identity of a graph feature.
///
/// Ids are never reused. A feature absorbed by a merge disappears along
/// with its id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureId(pub u32);

impl FeatureId {
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Feature({})", self.0)
    }
}

/// A connected city or road.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphFeature {
    id: FeatureId,
    kind: SectionType,
    nodes: Vec<NodeId>,
    scored: bool,
}

impl GraphFeature {
    fn new(id: FeatureId, kind: SectionType, first: NodeId) -> Self {
        Self {
            id,
            kind,
            nodes: vec![first],
            scored: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> FeatureId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> SectionType {
        self.kind
    }

    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.scored
    }

    /// Complete once no node can grow any further.
    #[must_use]
    pub fn is_complete(&self, arena: &NodeArena) -> bool {
        self.nodes.iter().all(|&node| !arena.get(node).has_open_slot())
    }

    pub fn sections<'a>(&'a self, arena: &'a NodeArena) -> impl Iterator<Item = SectionRef> + 'a {
        self.nodes.iter().map(move |&node| arena.get(node).section)
    }

    /// Distinct tiles the feature covers.
    #[must_use]
    pub fn tiles(&self, arena: &NodeArena) -> FxHashSet<TileId> {
        self.sections(arena).map(|section| section.tile).collect()
    }

    /// Points the feature is worth, before splitting between players.
    #[must_use]
    pub fn base_score(&self, arena: &NodeArena, grid: &Grid, config: &RulesConfig) -> u32 {
        let tiles = self.tiles(arena);
        match self.kind {
            SectionType::City => {
                let shields = tiles
                    .iter()
                    .filter_map(|&tile| grid.tile_by_id(tile))
                    .filter(|tile| tile.has_coat_of_arms())
                    .count() as u32;
                (tiles.len() as u32)
                    .saturating_mul(config.city_points_per_tile)
                    .saturating_add(shields.saturating_mul(config.coat_of_arms_points))
            }
            SectionType::Road => (tiles.len() as u32).saturating_mul(config.road_points_per_tile),
            other => unreachable!("graph feature of type {}", other),
        }
    }

    /// Score the feature if it is complete and has not been scored yet.
    ///
    /// Lifts every meeple off the feature and returns it through the
    /// ledger, then credits the majority holders. Awards are ordered by
    /// player.
    pub fn score(
        &mut self,
        arena: &NodeArena,
        grid: &mut Grid,
        ledger: &mut dyn MeepleLedger,
        config: &RulesConfig,
    ) -> Vec<Award> {
        if self.scored || !self.is_complete(arena) {
            return Vec::new();
        }
        self.scored = true;

        let mut counts: FxHashMap<PlayerId, u32> = FxHashMap::default();
        for section in self.sections(arena) {
            let meeple = grid
                .section_mut(section)
                .unwrap_or_else(|| panic!("{} of {} is not on the board", section, self.id))
                .take_meeple();
            if let Some(meeple) = meeple {
                *counts.entry(ledger.owner_of(meeple)).or_default() += 1;
                ledger.return_meeple(meeple);
            }
        }

        let base = self.base_score(arena, grid, config);
        let Some(&most) = counts.values().max() else {
            debug!(feature = %self.id, base, "completed without meeples");
            return Vec::new();
        };

        let mut winners: Vec<PlayerId> = counts
            .into_iter()
            .filter(|&(_, count)| count == most)
            .map(|(player, _)| player)
            .collect();
        winners.sort();

        let points = base / winners.len() as u32;
        winners
            .into_iter()
            .map(|player| {
                ledger.credit(player, points);
                info!(feature = %self.id, %player, points, "scored {}", self.kind);
                Award {
                    player,
                    points,
                    kind: self.kind,
                }
            })
            .collect()
    }
}

/// Read-only view of a graph feature together with the node arena it
/// needs to answer completion queries.
#[derive(Clone, Copy, Debug)]
pub struct GraphFeatureRef<'a> {
    feature: &'a GraphFeature,
    arena: &'a NodeArena,
}

impl<'a> GraphFeatureRef<'a> {
    #[must_use]
    pub fn id(&self) -> FeatureId {
        self.feature.id
    }

    #[must_use]
    pub fn feature(&self) -> &'a GraphFeature {
        self.feature
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.feature.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.feature.nodes.is_empty()
    }

    pub fn sections(&self) -> impl Iterator<Item = SectionRef> + 'a {
        self.feature.sections(self.arena)
    }

    #[must_use]
    pub fn tiles(&self) -> FxHashSet<TileId> {
        self.feature.tiles(self.arena)
    }

    #[must_use]
    pub fn contains(&self, section: SectionRef) -> bool {
        self.sections().any(|s| s == section)
    }
}

impl Feature for GraphFeatureRef<'_> {
    fn kind(&self) -> SectionType {
        self.feature.kind
    }

    fn is_complete(&self) -> bool {
        self.feature.is_complete(self.arena)
    }

    fn is_scored(&self) -> bool {
        self.feature.scored
    }
}

/// Tracks every city and road on the board.
#[derive(Clone, Debug)]
pub struct GraphFeatureManager {
    config: RulesConfig,
    nodes: NodeArena,
    features: FxHashMap<FeatureId, GraphFeature>,
    /// Every city or road section ever placed, except centers that touched
    /// no edge of their type.
    section_features: FxHashMap<SectionRef, FeatureId>,
    next_feature: u32,
}

impl GraphFeatureManager {
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self {
            config,
            nodes: NodeArena::new(),
            features: FxHashMap::default(),
            section_features: FxHashMap::default(),
            next_feature: 0,
        }
    }

    /// Build a manager for a grid that already has tiles on it.
    ///
    /// Tiles are replayed in placement order, each one seeing only the
    /// tiles placed before it. Scored flags are not recovered; features
    /// scored earlier have no meeples left, so rescoring them awards nothing.
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

    #[must_use]
    pub fn nodes(&self) -> &NodeArena {
        &self.nodes
    }

    /// Fold the tile at `coord` into the feature graph.
    ///
    /// The tile must already be on `grid` and must pass `check_placement`
    /// against the tiles placed before it. Panics otherwise.
    #[instrument(skip(self, grid))]
    pub fn update(&mut self, grid: &Grid, coord: Coord) {
        let tile = grid
            .tile_at(coord)
            .unwrap_or_else(|| panic!("No tile at {} to update features for", coord));

        let mut edge_nodes: [Option<NodeId>; 4] = [None; 4];
        for direction in Direction::ALL {
            let kind = tile.edge(direction).kind();
            if !kind.is_connectable() {
                continue;
            }

            let section = tile.edge_ref(direction);
            let node = self.nodes.alloc(section);
            for side in direction.perpendicular() {
                self.nodes.close(node, side);
            }
            edge_nodes[direction.index()] = Some(node);

            let Some(neighbour) = grid.abutting_tile(coord, direction) else {
                self.create_feature(kind, section, node);
                continue;
            };

            let facing = neighbour.edge_ref(direction.opposite());
            let facing_kind = neighbour.edge(direction.opposite()).kind();
            assert_eq!(
                facing_kind, kind,
                "{} edge at {} meets a {} edge on {}",
                direction, coord, facing_kind, neighbour.id()
            );
            let facing_node = self
                .nodes
                .node_for(facing)
                .unwrap_or_else(|| panic!("{} has no node", facing));
            let feature = self.require_feature(facing);

            self.nodes.link(node, direction, facing_node);
            self.attach(feature, section, node);
            trace!(%section, %facing, %feature, "linked across {} edge", direction);
        }

        let centers: SmallVec<[(SectionRef, SectionType); 2]> = tile
            .centers()
            .filter(|(_, section)| section.kind().is_connectable())
            .map(|(id, section)| (tile.section_ref(id), section.kind()))
            .collect();

        for (section, kind) in centers {
            let node = self.nodes.alloc(section);
            let mut touched: SmallVec<[FeatureId; 4]> = SmallVec::new();

            for direction in Direction::ALL {
                match edge_nodes[direction.index()] {
                    Some(edge_node) if tile.edge(direction).kind() == kind => {
                        self.nodes.link(node, direction, edge_node);
                        let feature = self.require_feature(tile.edge_ref(direction));
                        if !touched.contains(&feature) {
                            touched.push(feature);
                        }
                    }
                    _ => self.nodes.close(node, direction),
                }
            }

            match touched.as_slice() {
                [] => debug!(%section, "center touches no {} edge", kind),
                [feature] => self.attach(*feature, section, node),
                _ => {
                    let survivor = self.merge(&touched);
                    self.attach(survivor, section, node);
                }
            }
        }

        for direction in Direction::ALL {
            if let Some(node) = edge_nodes[direction.index()] {
                self.nodes.close_if_open(node, direction.opposite());
            }
        }
    }

    /// Whether a meeple may go on `section` as far as cities and roads are
    /// concerned: the section is not a tracked city or road, or nobody has
    /// claimed the feature it belongs to.
    #[must_use]
    pub fn can_place_meeple(&self, grid: &Grid, section: SectionRef) -> bool {
        let Some(feature) = self.feature_of(section).and_then(|id| self.features.get(&id)) else {
            return true;
        };
        !feature
            .sections(&self.nodes)
            .any(|s| grid.section(s).is_some_and(Section::is_occupied))
    }

    /// Score every complete, unscored feature, in feature id order.
    #[instrument(skip_all)]
    pub fn score_features(&mut self, grid: &mut Grid, ledger: &mut dyn MeepleLedger) -> Vec<Award> {
        let mut ids: Vec<FeatureId> = self.features.keys().copied().collect();
        ids.sort();

        let mut awards = Vec::new();
        for id in ids {
            if let Some(feature) = self.features.get_mut(&id) {
                awards.extend(feature.score(&self.nodes, grid, ledger, &self.config));
            }
        }
        awards
    }

    /// All live features, in id order.
    #[must_use]
    pub fn features(&self) -> Vec<GraphFeatureRef<'_>> {
        let mut features: Vec<_> = self.features.values().map(|f| self.view(f)).collect();
        features.sort_by_key(|f| f.id());
        features
    }

    #[must_use]
    pub fn feature_of(&self, section: SectionRef) -> Option<FeatureId> {
        self.section_features.get(&section).copied()
    }

    #[must_use]
    pub fn feature(&self, id: FeatureId) -> Option<GraphFeatureRef<'_>> {
        self.features.get(&id).map(|f| self.view(f))
    }

    /// Sections currently tracked.
    #[must_use]
    pub fn tracked_sections(&self) -> usize {
        self.section_features.len()
    }

    /// Whether `section` belongs to a feature that has already been scored.
    #[must_use]
    pub fn is_scored(&self, section: SectionRef) -> bool {
        self.feature_of(section)
            .and_then(|id| self.features.get(&id))
            .is_some_and(|feature| feature.scored)
    }

    /// One section of every scored feature, sorted. Enough to restore the
    /// scored flags after a replay with `mark_scored`.
    #[must_use]
    pub fn scored_sections(&self) -> Vec<SectionRef> {
        let mut sections: Vec<SectionRef> = self
            .features
            .values()
            .filter(|feature| feature.scored)
            .filter_map(|feature| feature.nodes.first())
            .map(|&node| self.nodes.get(node).section)
            .collect();
        sections.sort();
        sections
    }

    /// Flag the feature holding `section` as scored without paying anyone.
    /// Returns false if the section is not tracked.
    pub fn mark_scored(&mut self, section: SectionRef) -> bool {
        let Some(feature) = self.feature_of(section).and_then(|id| self.features.get_mut(&id)) else {
            return false;
        };
        feature.scored = true;
        true
    }

    fn view<'a>(&'a self, feature: &'a GraphFeature) -> GraphFeatureRef<'a> {
        GraphFeatureRef {
            feature,
            arena: &self.nodes,
        }
    }

    fn require_feature(&self, section: SectionRef) -> FeatureId {
        self.feature_of(section)
            .unwrap_or_else(|| panic!("{} belongs to no feature", section))
    }

    fn create_feature(&mut self, kind: SectionType, section: SectionRef, node: NodeId) -> FeatureId {
        let id = FeatureId(self.next_feature);
        self.next_feature += 1;
        self.features.insert(id, GraphFeature::new(id, kind, node));
        self.section_features.insert(section, id);
        debug!(feature = %id, %section, "new {}", kind);
        id
    }

    fn attach(&mut self, feature: FeatureId, section: SectionRef, node: NodeId) {
        self.features
            .get_mut(&feature)
            .unwrap_or_else(|| panic!("{} is not live", feature))
            .nodes
            .push(node);
        self.section_features.insert(section, feature);
    }

    /// Fold every feature in `ids` into the largest one and return it.
    fn merge(&mut self, ids: &[FeatureId]) -> FeatureId {
        let size = |id: &FeatureId| self.features.get(id).map_or(0, |f| f.nodes.len());
        let mut survivor = ids[0];
        for id in &ids[1..] {
            if size(id) > size(&survivor) {
                survivor = *id;
            }
        }

        for &id in ids {
            if id == survivor {
                continue;
            }
            let absorbed = self
                .features
                .remove(&id)
                .unwrap_or_else(|| panic!("{} is not live", id));
            for &node in &absorbed.nodes {
                self.section_features.insert(self.nodes.get(node).section, survivor);
            }

            let target = self
                .features
                .get_mut(&survivor)
                .unwrap_or_else(|| panic!("{} is not live", survivor));
            target.nodes.extend(absorbed.nodes);
            target.scored |= absorbed.scored;
            debug!(%survivor, absorbed = %id, "merged");
        }
        survivor
    }
}
