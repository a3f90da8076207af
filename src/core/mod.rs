//! Core engine types: coordinates, players, meeples, configuration.
//!
//! These are the leaves every other module builds on. Nothing here knows
//! about tiles or features.

pub mod direction;
pub mod player;
pub mod meeple;
pub mod roster;
pub mod config;

pub use direction::{Coord, Direction};
pub use player::{PlayerId, PlayerMap};
pub use meeple::{MeepleId, MeepleLedger};
pub use roster::{PlayerRecord, PlayerRoster};
pub use config::RulesConfig;
