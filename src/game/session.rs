//! A board, its feature trackers and its players, kept in step.
//!
//! `GameSession` applies the fixed order of a placement: validate, place,
//! update features, optionally claim, then score. It does not know whose
//! turn it is; every call names the acting player.
//!
//! ```
//! use rust_carcassonne::core::{Coord, Direction, PlayerId, RulesConfig};
//! use rust_carcassonne::game::GameSession;
//! use rust_carcassonne::tiles::{TileCatalog, TileKindId};
//!
//! let mut catalog = TileCatalog::standard();
//! let mut session = GameSession::new(catalog.start_tile(), 2, RulesConfig::default());
//!
//! // claim the city on the start tile
//! let city = session.grid().tile_at(Coord::ORIGIN).unwrap().edge_id(Direction::Up);
//! session.place_meeple(PlayerId::new(0), Coord::ORIGIN, city).unwrap();
//!
//! // close it with a single-edge city cap
//! let cap = catalog.create(TileKindId(20)).rotated(2);
//! session.place_tile(cap, Coord::new(0, 1)).unwrap();
//!
//! let awards = session.score_features();
//! assert_eq!(awards.len(), 1);
//! assert_eq!(session.roster().score(PlayerId::new(0)), 4);
//! ```

use tracing::{debug, instrument};

use crate::board::{check_placement, legal_placements, Grid, PlacementError};
use crate::core::{Coord, MeepleId, PlayerId, PlayerRoster, RulesConfig};
use crate::features::{Award, CompositeFeatureManager, FeatureManager, FeatureRef, ScoredFeatures};
use crate::tiles::{SectionId, Tile};

/// Why a meeple could not be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MeepleError {
    #[error("no tile at {0}")]
    NoTile(Coord),

    #[error("tile at {coord} has no section {}", .section.0)]
    UnknownSection { coord: Coord, section: SectionId },

    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),

    /// The section cannot be claimed: wrong terrain, its feature or tile is
    /// already claimed, or its feature has been scored.
    #[error("section {} at {coord} cannot be claimed", .section.0)]
    Claimed { coord: Coord, section: SectionId },

    #[error("{0} has no meeples left")]
    NoMeeplesLeft(PlayerId),
}

/// One game in progress.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: RulesConfig,
    grid: Grid,
    features: CompositeFeatureManager,
    roster: PlayerRoster,
}

impl GameSession {
    /// Start a game with `start` at the origin.
    ///
    /// Panics if `player_count` is zero.
    #[must_use]
    pub fn new(start: Tile, player_count: usize, config: RulesConfig) -> Self {
        let roster = PlayerRoster::new(player_count, &config);
        Self::from_parts(Grid::new(start), roster, &ScoredFeatures::default(), config)
    }

    /// Resume a game from a board, a roster and the record of what has
    /// been scored (see `scored_features`). Feature trackers are rebuilt
    /// by replaying the board.
    #[must_use]
    pub fn from_parts(grid: Grid, roster: PlayerRoster, scored: &ScoredFeatures, config: RulesConfig) -> Self {
        let features = CompositeFeatureManager::resume(&grid, scored, config.clone());
        Self {
            config,
            grid,
            features,
            roster,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn roster(&self) -> &PlayerRoster {
        &self.roster
    }

    #[must_use]
    pub fn feature_manager(&self) -> &CompositeFeatureManager {
        &self.features
    }

    /// Features that have already paid out, to be saved with the grid.
    #[must_use]
    pub fn scored_features(&self) -> ScoredFeatures {
        self.features.scored()
    }

    /// Every tracked feature: cities and roads first, then monasteries.
    #[must_use]
    pub fn features(&self) -> Vec<FeatureRef<'_>> {
        self.features.features()
    }

    /// Where `tile` could go, as `(coord, quarter turns)`.
    #[must_use]
    pub fn legal_placements(&self, tile: &Tile) -> Vec<(Coord, u8)> {
        legal_placements(&self.grid, tile)
    }

    /// Validate and place a tile, then update every feature it touches.
    #[instrument(skip(self, tile), fields(tile = %tile.id()))]
    pub fn place_tile(&mut self, tile: Tile, coord: Coord) -> Result<(), PlacementError> {
        check_placement(&self.grid, coord, &tile)?;
        self.grid.place(coord, tile);
        self.features.update_features(&self.grid, coord);
        debug!(tiles = self.grid.len(), "placed");
        Ok(())
    }

    /// Whether a meeple may go on `section` of the tile at `coord`.
    #[must_use]
    pub fn can_place_meeple(&self, coord: Coord, section: SectionId) -> bool {
        self.grid
            .tile_at(coord)
            .is_some_and(|tile| self.features.can_place_meeple(&self.grid, tile.section_ref(section)))
    }

    /// Sections of the tile at `coord` that could take a meeple right now.
    #[must_use]
    pub fn claimable_sections(&self, coord: Coord) -> Vec<SectionId> {
        let Some(tile) = self.grid.tile_at(coord) else {
            return Vec::new();
        };
        tile.sections()
            .map(|(id, _)| id)
            .filter(|&id| self.features.can_place_meeple(&self.grid, tile.section_ref(id)))
            .collect()
    }

    /// Take a meeple from `player`'s supply and stand it on a section.
    pub fn place_meeple(
        &mut self,
        player: PlayerId,
        coord: Coord,
        section: SectionId,
    ) -> Result<MeepleId, MeepleError> {
        let tile = self.grid.tile_at(coord).ok_or(MeepleError::NoTile(coord))?;
        if tile.section(section).is_none() {
            return Err(MeepleError::UnknownSection { coord, section });
        }
        if !self.roster.contains(player) {
            return Err(MeepleError::UnknownPlayer(player));
        }

        let target = tile.section_ref(section);
        if !self.features.can_place_meeple(&self.grid, target) {
            return Err(MeepleError::Claimed { coord, section });
        }

        let meeple = self
            .roster
            .take_meeple(player)
            .ok_or(MeepleError::NoMeeplesLeft(player))?;
        self.grid
            .section_mut(target)
            .unwrap_or_else(|| panic!("{} vanished from the board", target))
            .place_meeple(meeple);
        debug!(%player, %meeple, %target, "meeple placed");
        Ok(meeple)
    }

    /// Score everything that is complete and not yet scored.
    pub fn score_features(&mut self) -> Vec<Award> {
        self.features.score_features(&mut self.grid, &mut self.roster)
    }
}
