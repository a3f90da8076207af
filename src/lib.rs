//! # rust-carcassonne
//!
//! Rules engine for a tile-laying board game: tracks how placed tiles join
//! into cities, roads and monasteries, decides when those are complete, and
//! pays out points to the players who claimed them.
//!
//! ## Design Principles
//!
//! 1. **Incremental**: each placement only looks at the new tile and its
//!    neighbours. Features are merged in place, never recomputed.
//!
//! 2. **Caller-Driven**: no turn order, no deck. The caller picks tiles,
//!    players and the moment to score.
//!
//! 3. **Configuration Over Constants**: point values and supply sizes come
//!    from `RulesConfig`.
//!
//! ## Modules
//!
//! - `core`: coordinates, directions, players, meeples, configuration
//! - `tiles`: sections, tiles, the standard tile catalogue
//! - `board`: the grid and the placement check
//! - `features`: city/road graph, monasteries, scoring
//! - `game`: `GameSession`, which keeps all of the above in step
//!
//! ## Example
//!
//! ```
//! use rust_carcassonne::{Coord, GameSession, PlayerId, RulesConfig, TileCatalog, TileKindId};
//!
//! let mut catalog = TileCatalog::standard();
//! let mut session = GameSession::new(catalog.start_tile(), 2, RulesConfig::default());
//!
//! let road = catalog.create(TileKindId(10));
//! let (coord, turns) = session.legal_placements(&road)[0];
//! session.place_tile(road.rotated(turns), coord).unwrap();
//!
//! assert_eq!(session.grid().len(), 2);
//! assert!(session.score_features().is_empty());
//! assert_eq!(session.roster().score(PlayerId::new(0)), 0);
//! ```

pub mod core;
pub mod tiles;
pub mod board;
pub mod features;
pub mod game;

pub use crate::core::{Coord, Direction, MeepleId, MeepleLedger, PlayerId, PlayerMap, PlayerRoster, RulesConfig};

pub use crate::tiles::{Section, SectionId, SectionRef, SectionType, Tile, TileCatalog, TileId, TileKind, TileKindId};

pub use crate::board::{check_placement, is_valid_placement, Grid, PlacementError};

pub use crate::features::{
    Award, CompositeFeatureManager, Feature, FeatureId, FeatureManager, FeatureRef, GraphFeatureManager,
    MonasteryFeatureManager, ScoredFeatures,
};

pub use crate::game::{GameSession, MeepleError};
