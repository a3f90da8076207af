//! Tiles: four edge sections, any number of center sections.
//!
//! ## Rotation
//!
//! Rotating a tile moves its edge sections around, it does not create new
//! ones. A section keeps its `SectionId` for the tile's whole life, so a
//! `SectionRef` taken before a rotation still names the same section after.
//!
//! ```
//! use rust_carcassonne::core::Direction;
//! use rust_carcassonne::tiles::{SectionType, Tile, TileId, TileKindId};
//!
//! let mut tile = Tile::builder(TileId(1), TileKindId(20))
//!     .top(SectionType::City)
//!     .left(SectionType::Field)
//!     .bottom(SectionType::Field)
//!     .right(SectionType::Field)
//!     .build();
//!
//! let city = tile.edge_id(Direction::Up);
//! tile.rotate_clockwise();
//!
//! assert_eq!(tile.edge_id(Direction::Right), city);
//! assert_eq!(tile.edge(Direction::Right).kind(), SectionType::City);
//! assert_eq!(tile.rotation(), 1);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::section::{Section, SectionId, SectionRef, SectionType};
use crate::core::{Direction, MeepleId};

/// Identity of one physical tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Catalogue kind a tile was built from (several tiles share a kind).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileKindId(pub u8);

impl std::fmt::Display for TileKindId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Kind({})", self.0)
    }
}

/// A placed or placeable tile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    kind: TileKindId,

    /// Edge sections in build order, then center sections.
    sections: SmallVec<[Section; 6]>,

    /// Which section currently sits on each edge, by `Direction::index()`.
    edges: [SectionId; 4],

    coat_of_arms: bool,

    /// Clockwise quarter turns, 0-3. Display only.
    rotation: u8,
}

impl Tile {
    /// Start building a tile.
    #[must_use]
    pub fn builder(id: TileId, kind: TileKindId) -> TileBuilder {
        TileBuilder::new(id, kind)
    }

    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> TileKindId {
        self.kind
    }

    #[must_use]
    pub fn has_coat_of_arms(&self) -> bool {
        self.coat_of_arms
    }

    #[must_use]
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// The section on an edge.
    #[must_use]
    pub fn edge(&self, direction: Direction) -> &Section {
        &self.sections[self.edge_id(direction).index()]
    }

    #[must_use]
    pub fn edge_id(&self, direction: Direction) -> SectionId {
        self.edges[direction.index()]
    }

    #[must_use]
    pub fn edge_ref(&self, direction: Direction) -> SectionRef {
        SectionRef::new(self.id, self.edge_id(direction))
    }

    /// Edge the section currently sits on, `None` for center sections.
    #[must_use]
    pub fn direction_of(&self, section: SectionId) -> Option<Direction> {
        Direction::ALL.into_iter().find(|&d| self.edge_id(d) == section)
    }

    #[must_use]
    pub fn section(&self, section: SectionId) -> Option<&Section> {
        self.sections.get(section.index())
    }

    pub fn section_mut(&mut self, section: SectionId) -> Option<&mut Section> {
        self.sections.get_mut(section.index())
    }

    #[must_use]
    pub fn section_ref(&self, section: SectionId) -> SectionRef {
        SectionRef::new(self.id, section)
    }

    /// All sections with their ids: edges in build order, then centers.
    pub fn sections(&self) -> impl Iterator<Item = (SectionId, &Section)> {
        self.sections
            .iter()
            .enumerate()
            .map(|(i, section)| (SectionId(i as u8), section))
    }

    /// Center sections in build order.
    pub fn centers(&self) -> impl Iterator<Item = (SectionId, &Section)> {
        self.sections().skip(4)
    }

    /// Check whether a center section has the given type.
    #[must_use]
    pub fn has_center(&self, kind: SectionType) -> bool {
        self.centers().any(|(_, section)| section.kind() == kind)
    }

    /// Meeples standing anywhere on this tile.
    pub fn meeples(&self) -> impl Iterator<Item = MeepleId> + '_ {
        self.sections.iter().filter_map(Section::meeple)
    }

    #[must_use]
    pub fn has_meeple(&self) -> bool {
        self.meeples().next().is_some()
    }

    /// Rotate a quarter turn clockwise.
    ///
    /// Top moves to right, right to bottom, bottom to left, left to top.
    pub fn rotate_clockwise(&mut self) {
        let [up, left, down, right] = self.edges;
        self.edges[Direction::Right.index()] = up;
        self.edges[Direction::Down.index()] = right;
        self.edges[Direction::Left.index()] = down;
        self.edges[Direction::Up.index()] = left;

        self.rotation = (self.rotation + 1) % 4;
    }

    /// Consume and return the tile rotated `turns` quarter turns clockwise.
    #[must_use]
    pub fn rotated(mut self, turns: u8) -> Self {
        for _ in 0..turns % 4 {
            self.rotate_clockwise();
        }
        self
    }
}

/// Builder for `Tile`.
///
/// All four edges must be set before `build`.
#[derive(Clone, Debug)]
pub struct TileBuilder {
    id: TileId,
    kind: TileKindId,
    edges: [Option<SectionType>; 4],
    centers: Vec<SectionType>,
    coat_of_arms: bool,
}

impl TileBuilder {
    fn new(id: TileId, kind: TileKindId) -> Self {
        Self {
            id,
            kind,
            edges: [None; 4],
            centers: Vec::new(),
            coat_of_arms: false,
        }
    }

    #[must_use]
    pub fn edge(mut self, direction: Direction, kind: SectionType) -> Self {
        self.edges[direction.index()] = Some(kind);
        self
    }

    #[must_use]
    pub fn top(self, kind: SectionType) -> Self {
        self.edge(Direction::Up, kind)
    }

    #[must_use]
    pub fn left(self, kind: SectionType) -> Self {
        self.edge(Direction::Left, kind)
    }

    #[must_use]
    pub fn bottom(self, kind: SectionType) -> Self {
        self.edge(Direction::Down, kind)
    }

    #[must_use]
    pub fn right(self, kind: SectionType) -> Self {
        self.edge(Direction::Right, kind)
    }

    #[must_use]
    pub fn center(mut self, kind: SectionType) -> Self {
        self.centers.push(kind);
        self
    }

    #[must_use]
    pub fn coat_of_arms(mut self, coat_of_arms: bool) -> Self {
        self.coat_of_arms = coat_of_arms;
        self
    }

    /// Build the tile.
    ///
    /// Panics if an edge was never set.
    #[must_use]
    pub fn build(self) -> Tile {
        let mut sections = SmallVec::new();
        for direction in Direction::ALL {
            let kind = self.edges[direction.index()]
                .unwrap_or_else(|| panic!("{} edge of {} was never set", direction, self.id));
            sections.push(Section::new(kind));
        }
        sections.extend(self.centers.into_iter().map(Section::new));
        assert!(sections.len() <= u8::MAX as usize, "Too many sections on {}", self.id);

        Tile {
            id: self.id,
            kind: self.kind,
            sections,
            edges: [SectionId(0), SectionId(1), SectionId(2), SectionId(3)],
            coat_of_arms: self.coat_of_arms,
            rotation: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn junction() -> Tile {
        Tile::builder(TileId(7), TileKindId(7))
            .top(SectionType::Field)
            .left(SectionType::Road)
            .bottom(SectionType::Road)
            .right(SectionType::Road)
            .center(SectionType::Blank)
            .build()
    }

    fn edge_types(tile: &Tile) -> [SectionType; 4] {
        Direction::ALL.map(|d| tile.edge(d).kind())
    }

    #[test]
    fn test_builder() {
        let tile = junction();
        assert_eq!(tile.id(), TileId(7));
        assert_eq!(tile.kind(), TileKindId(7));
        assert_eq!(tile.sections().count(), 5);
        assert_eq!(tile.centers().count(), 1);
        assert!(tile.has_center(SectionType::Blank));
        assert!(!tile.has_coat_of_arms());
        assert_eq!(tile.rotation(), 0);
    }

    #[test]
    fn test_rotate_clockwise_moves_edges() {
        let mut tile = junction();
        tile.rotate_clockwise();
        // field top -> right
        assert_eq!(
            edge_types(&tile),
            [SectionType::Road, SectionType::Road, SectionType::Road, SectionType::Field]
        );

        tile.rotate_clockwise();
        assert_eq!(
            edge_types(&tile),
            [SectionType::Road, SectionType::Road, SectionType::Field, SectionType::Road]
        );
    }

    #[test]
    fn test_four_rotations_restore() {
        let original = junction();
        let mut tile = original.clone();
        for _ in 0..4 {
            tile.rotate_clockwise();
        }
        assert_eq!(tile, original);
        assert_eq!(original.clone().rotated(5), original.rotated(1));
    }

    #[test]
    fn test_section_ids_survive_rotation() {
        let mut tile = junction();
        let left = tile.edge_id(Direction::Left);
        tile.rotate_clockwise();
        assert_eq!(tile.edge_id(Direction::Up), left);
        assert_eq!(tile.direction_of(left), Some(Direction::Up));
        assert_eq!(tile.direction_of(SectionId(4)), None);
    }

    #[test]
    fn test_meeples_on_tile() {
        let mut tile = junction();
        assert!(!tile.has_meeple());

        let bottom = tile.edge_id(Direction::Down);
        tile.section_mut(bottom).unwrap().place_meeple(MeepleId(2));
        assert!(tile.has_meeple());
        assert_eq!(tile.meeples().collect::<Vec<_>>(), vec![MeepleId(2)]);
    }

    #[test]
    #[should_panic(expected = "was never set")]
    fn test_missing_edge_panics() {
        let _ = Tile::builder(TileId(1), TileKindId(1)).top(SectionType::City).build();
    }

    #[test]
    fn test_serialization() {
        let tile = junction().rotated(3);
        let json = serde_json::to_string(&tile).unwrap();
        let deserialized: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(tile, deserialized);
    }
}
