//! Connectivity nodes for city and road sections.
//!
//! Every city or road section on the board gets one `FeatureNode`. A node
//! has four slots, one per direction, each either still open, closed off,
//! or linked to another node. A graph feature is complete once none of its
//! nodes has an open slot.
//!
//! Nodes live in a flat `NodeArena` and refer to each other by `NodeId`,
//! so links never form reference cycles.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::Direction;
use crate::tiles::SectionRef;

/// Index into the `NodeArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// State of one directional slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// Nothing decided yet; the feature can still grow this way.
    #[default]
    Open,
    /// Nothing will ever connect here.
    Closed,
    Linked(NodeId),
}

impl Slot {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Slot::Open)
    }

    #[must_use]
    pub const fn linked(self) -> Option<NodeId> {
        match self {
            Slot::Linked(node) => Some(node),
            _ => None,
        }
    }
}

/// One section's place in the connectivity graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureNode {
    pub section: SectionRef,
    slots: [Slot; 4],
}

impl FeatureNode {
    #[must_use]
    pub fn new(section: SectionRef) -> Self {
        Self {
            section,
            slots: [Slot::Open; 4],
        }
    }

    #[must_use]
    pub fn slot(&self, direction: Direction) -> Slot {
        self.slots[direction.index()]
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot; 4] {
        &self.slots
    }

    #[must_use]
    pub fn has_open_slot(&self) -> bool {
        self.slots.iter().any(|slot| slot.is_open())
    }

    /// Directions whose slots are still open.
    pub fn open_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.slot(*d).is_open())
    }
}

/// Flat storage for every node the graph manager has created.
///
/// Nodes are never removed. A `SectionRef` maps to at most one node.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NodeArena {
    nodes: Vec<FeatureNode>,
    by_section: FxHashMap<SectionRef, NodeId>,
}

impl NodeArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node for `section`.
    ///
    /// Panics if the section already has a node.
    pub fn alloc(&mut self, section: SectionRef) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        if let Some(existing) = self.by_section.insert(section, id) {
            panic!("{} already has {}", section, existing);
        }
        self.nodes.push(FeatureNode::new(section));
        id
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &FeatureNode {
        &self.nodes[id.0 as usize]
    }

    #[must_use]
    pub fn node_for(&self, section: SectionRef) -> Option<NodeId> {
        self.by_section.get(&section).copied()
    }

    /// Link `a` to `b` through `a`'s `direction` slot and `b`'s opposite slot.
    pub fn link(&mut self, a: NodeId, direction: Direction, b: NodeId) {
        self.set(a, direction, Slot::Linked(b));
        self.set(b, direction.opposite(), Slot::Linked(a));
    }

    pub fn close(&mut self, id: NodeId, direction: Direction) {
        self.set(id, direction, Slot::Closed);
    }

    /// Close a slot only if nothing has been decided for it yet.
    pub fn close_if_open(&mut self, id: NodeId, direction: Direction) {
        if self.get(id).slot(direction).is_open() {
            self.close(id, direction);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn set(&mut self, id: NodeId, direction: Direction, slot: Slot) {
        self.nodes[id.0 as usize].slots[direction.index()] = slot;
    }
}
