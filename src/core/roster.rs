//! Reference `MeepleLedger`: scores and meeple supplies per player.
//!
//! The feature engine only talks to the `MeepleLedger` trait. `PlayerRoster`
//! is the bookkeeping a game session uses behind it: each player has a
//! running score and a pool of meeples not currently on the board.

use serde::{Deserialize, Serialize};

use super::config::RulesConfig;
use super::meeple::{MeepleId, MeepleLedger};
use super::player::{PlayerId, PlayerMap};

/// One player's score and idle meeples.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub score: u32,

    /// Meeples in the supply. The next meeple handed out is the last one.
    supply: Vec<MeepleId>,
}

impl PlayerRecord {
    #[must_use]
    pub fn available(&self) -> usize {
        self.supply.len()
    }
}

/// Scores and supplies for every seat.
///
/// ```
/// use rust_carcassonne::core::{MeepleLedger, PlayerId, PlayerRoster, RulesConfig};
///
/// let mut roster = PlayerRoster::new(2, &RulesConfig::default());
/// let p1 = PlayerId::new(1);
///
/// let meeple = roster.take_meeple(p1).unwrap();
/// assert_eq!(roster.owner_of(meeple), p1);
/// assert_eq!(roster.available_meeples(p1), 6);
///
/// roster.return_meeple(meeple);
/// roster.credit(p1, 4);
/// assert_eq!(roster.available_meeples(p1), 7);
/// assert_eq!(roster.score(p1), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRoster {
    meeples_per_player: u32,
    players: PlayerMap<PlayerRecord>,
}

impl PlayerRoster {
    #[must_use]
    pub fn new(player_count: usize, config: &RulesConfig) -> Self {
        let per_player = config.meeples_per_player;
        let players = PlayerMap::new(player_count, |player| PlayerRecord {
            score: 0,
            supply: (0..per_player)
                .rev()
                .map(|slot| MeepleId::for_player(player, slot, per_player))
                .collect(),
        });

        Self {
            meeples_per_player: per_player,
            players,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.contains(player)
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.players[player].score
    }

    #[must_use]
    pub fn available_meeples(&self, player: PlayerId) -> usize {
        self.players[player].available()
    }

    #[must_use]
    pub fn record(&self, player: PlayerId) -> &PlayerRecord {
        &self.players[player]
    }

    /// Take a meeple out of a player's supply, `None` if it is empty.
    pub fn take_meeple(&mut self, player: PlayerId) -> Option<MeepleId> {
        self.players[player].supply.pop()
    }

    /// Iterate over (PlayerId, score) pairs.
    pub fn scores(&self) -> impl Iterator<Item = (PlayerId, u32)> + '_ {
        self.players.iter().map(|(player, record)| (player, record.score))
    }
}

impl MeepleLedger for PlayerRoster {
    fn owner_of(&self, meeple: MeepleId) -> PlayerId {
        let owner = meeple.owner(self.meeples_per_player);
        assert!(self.players.contains(owner), "{} has no owner in this roster", meeple);
        owner
    }

    fn credit(&mut self, player: PlayerId, points: u32) {
        let record = &mut self.players[player];
        record.score = record.score.saturating_add(points);
    }

    fn return_meeple(&mut self, meeple: MeepleId) {
        let owner = self.owner_of(meeple);
        let supply = &mut self.players[owner].supply;
        assert!(!supply.contains(&meeple), "{} returned while already in supply", meeple);
        supply.push(meeple);
    }
}
