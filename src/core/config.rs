//! Scoring and supply configuration.
//!
//! The engine never hardcodes point values. Callers build a `RulesConfig`
//! (the default is the base game) and hand it to the feature managers.
//!
//! ```
//! use rust_carcassonne::core::RulesConfig;
//!
//! let config = RulesConfig::default()
//!     .with_city_points_per_tile(3)
//!     .with_meeples_per_player(5);
//!
//! assert_eq!(config.city_points_per_tile, 3);
//! assert_eq!(config.road_points_per_tile, 1);
//! assert_eq!(config.meeples_per_player, 5);
//! ```

use serde::{Deserialize, Serialize};

/// Point values and meeple supply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Points per distinct tile of a completed road.
    pub road_points_per_tile: u32,

    /// Points per distinct tile of a completed city.
    pub city_points_per_tile: u32,

    /// Extra points per city tile carrying a coat of arms.
    pub coat_of_arms_points: u32,

    /// Points for a completed monastery.
    pub monastery_points: u32,

    /// Size of each player's meeple supply.
    pub meeples_per_player: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            road_points_per_tile: 1,
            city_points_per_tile: 2,
            coat_of_arms_points: 2,
            monastery_points: 9,
            meeples_per_player: 7,
        }
    }
}

impl RulesConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_road_points_per_tile(mut self, points: u32) -> Self {
        self.road_points_per_tile = points;
        self
    }

    #[must_use]
    pub fn with_city_points_per_tile(mut self, points: u32) -> Self {
        self.city_points_per_tile = points;
        self
    }

    #[must_use]
    pub fn with_coat_of_arms_points(mut self, points: u32) -> Self {
        self.coat_of_arms_points = points;
        self
    }

    #[must_use]
    pub fn with_monastery_points(mut self, points: u32) -> Self {
        self.monastery_points = points;
        self
    }

    /// Set the supply size.
    ///
    /// Panics on zero: meeple ids are laid out in per-player blocks.
    #[must_use]
    pub fn with_meeples_per_player(mut self, count: u32) -> Self {
        assert!(count > 0, "Players need at least 1 meeple");
        self.meeples_per_player = count;
        self
    }
}
