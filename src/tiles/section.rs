//! Tile sections: the edge and center sub-areas of a tile.
//!
//! A section has a terrain type and may hold one meeple. Sections are
//! addressed globally by `SectionRef` (tile + index), which stays valid when
//! the tile rotates.

use serde::{Deserialize, Serialize};

use super::tile::TileId;
use crate::core::MeepleId;

/// Terrain of a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    City,
    Road,
    Field,
    Monastery,
    /// Center filler with no terrain (the town in a crossroads).
    Blank,
}

impl SectionType {
    /// Types the graph feature engine connects across tiles.
    #[must_use]
    pub const fn is_connectable(self) -> bool {
        matches!(self, SectionType::City | SectionType::Road)
    }

    /// Types a meeple may be placed on.
    #[must_use]
    pub const fn is_claimable(self) -> bool {
        matches!(self, SectionType::City | SectionType::Road | SectionType::Monastery)
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SectionType::City => "city",
            SectionType::Road => "road",
            SectionType::Field => "field",
            SectionType::Monastery => "monastery",
            SectionType::Blank => "blank",
        };
        f.write_str(name)
    }
}

/// Index of a section within its tile.
///
/// Edge sections come first in build order (top, left, bottom, right), then
/// center sections. Rotation never changes a section's index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionId(pub u8);

impl SectionId {
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Board-wide address of a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionRef {
    pub tile: TileId,
    pub section: SectionId,
}

impl SectionRef {
    #[must_use]
    pub const fn new(tile: TileId, section: SectionId) -> Self {
        Self { tile, section }
    }
}

impl std::fmt::Display for SectionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.tile, self.section.0)
    }
}

/// A section and its (optional) meeple.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Section {
    kind: SectionType,
    meeple: Option<MeepleId>,
}

impl Section {
    #[must_use]
    pub const fn new(kind: SectionType) -> Self {
        Self { kind, meeple: None }
    }

    #[must_use]
    pub const fn kind(&self) -> SectionType {
        self.kind
    }

    #[must_use]
    pub const fn meeple(&self) -> Option<MeepleId> {
        self.meeple
    }

    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.meeple.is_some()
    }

    /// Put a meeple on this section.
    ///
    /// Panics if the section is already occupied. Callers gate this with
    /// `can_place_meeple`.
    pub fn place_meeple(&mut self, meeple: MeepleId) {
        if let Some(existing) = self.meeple {
            panic!("Section already holds {}, cannot place {}", existing, meeple);
        }
        self.meeple = Some(meeple);
    }

    /// Lift the meeple off this section, if any.
    pub fn take_meeple(&mut self) -> Option<MeepleId> {
        self.meeple.take()
    }
}
