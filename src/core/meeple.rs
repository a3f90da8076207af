//! Meeple identification and the ownership ledger.
//!
//! ## ID Layout
//!
//! Meeple IDs are allocated in per-player blocks:
//! - `0..per_player`: Player 0's meeples
//! - `per_player..2 * per_player`: Player 1's meeples
//! - and so on
//!
//! The block size comes from `RulesConfig::meeples_per_player`, it is not
//! hardcoded.
//!
//! ```
//! use rust_carcassonne::core::{MeepleId, PlayerId};
//!
//! let per_player = 7;
//! let meeple = MeepleId::for_player(PlayerId::new(2), 3, per_player);
//!
//! assert_eq!(meeple, MeepleId(17));
//! assert_eq!(meeple.owner(per_player), PlayerId::new(2));
//! assert_eq!(meeple.slot(per_player), 3);
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A player-owned marker placed on a section to claim a feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeepleId(pub u32);

impl MeepleId {
    /// The `slot`-th meeple of `player`.
    #[must_use]
    pub const fn for_player(player: PlayerId, slot: u32, per_player: u32) -> Self {
        Self(player.0 as u32 * per_player + slot)
    }

    /// Owner under the block layout.
    #[must_use]
    pub const fn owner(self, per_player: u32) -> PlayerId {
        PlayerId((self.0 / per_player) as u8)
    }

    /// Position within the owner's block.
    #[must_use]
    pub const fn slot(self, per_player: u32) -> u32 {
        self.0 % per_player
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for MeepleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Meeple({})", self.0)
    }
}

/// Capability handed to scoring routines.
///
/// Scoring needs to know who owns a meeple, to credit points and to give a
/// lifted meeple back. The engine never holds a reference to the ledger, it
/// receives one per scoring call.
pub trait MeepleLedger {
    /// Owner of a meeple currently on the board.
    fn owner_of(&self, meeple: MeepleId) -> PlayerId;

    /// Add `points` to a player's running total.
    fn credit(&mut self, player: PlayerId, points: u32);

    /// Put a lifted meeple back into its owner's supply.
    fn return_meeple(&mut self, meeple: MeepleId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_layout() {
        let per_player = 7;
        assert_eq!(MeepleId::for_player(PlayerId::new(0), 0, per_player), MeepleId(0));
        assert_eq!(MeepleId::for_player(PlayerId::new(0), 6, per_player), MeepleId(6));
        assert_eq!(MeepleId::for_player(PlayerId::new(1), 0, per_player), MeepleId(7));
        assert_eq!(MeepleId::for_player(PlayerId::new(4), 2, per_player), MeepleId(30));
    }

    #[test]
    fn test_owner_round_trip() {
        for per_player in [1, 3, 7] {
            for player in PlayerId::all(5) {
                for slot in 0..per_player {
                    let meeple = MeepleId::for_player(player, slot, per_player);
                    assert_eq!(meeple.owner(per_player), player);
                    assert_eq!(meeple.slot(per_player), slot);
                }
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", MeepleId(9)), "Meeple(9)");
    }
}
