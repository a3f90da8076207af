//! Game-level facade over the board, feature trackers and players.

pub mod session;

pub use session::{GameSession, MeepleError};
