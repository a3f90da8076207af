//! The common face of cities, roads and monasteries.

use serde::{Deserialize, Serialize};

use super::graph::GraphFeatureRef;
use super::monastery::MonasteryFeature;
use crate::core::PlayerId;
use crate::tiles::SectionType;

/// Anything that can be completed and scored.
pub trait Feature {
    fn kind(&self) -> SectionType;

    /// Whether the feature can no longer grow.
    fn is_complete(&self) -> bool;

    /// Whether the feature has paid out. Never goes back to false.
    fn is_scored(&self) -> bool;
}

/// A borrowed feature of either family.
#[derive(Clone, Copy, Debug)]
pub enum FeatureRef<'a> {
    Graph(GraphFeatureRef<'a>),
    Monastery(&'a MonasteryFeature),
}

impl<'a> FeatureRef<'a> {
    #[must_use]
    pub fn as_graph(&self) -> Option<GraphFeatureRef<'a>> {
        match self {
            FeatureRef::Graph(feature) => Some(*feature),
            FeatureRef::Monastery(_) => None,
        }
    }

    #[must_use]
    pub fn as_monastery(&self) -> Option<&'a MonasteryFeature> {
        match self {
            FeatureRef::Monastery(monastery) => Some(monastery),
            FeatureRef::Graph(_) => None,
        }
    }
}

impl Feature for FeatureRef<'_> {
    fn kind(&self) -> SectionType {
        match self {
            FeatureRef::Graph(feature) => feature.kind(),
            FeatureRef::Monastery(monastery) => monastery.kind(),
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            FeatureRef::Graph(feature) => feature.is_complete(),
            FeatureRef::Monastery(monastery) => monastery.is_complete(),
        }
    }

    fn is_scored(&self) -> bool {
        match self {
            FeatureRef::Graph(feature) => feature.is_scored(),
            FeatureRef::Monastery(monastery) => monastery.is_scored(),
        }
    }
}

/// Points credited to one player by one scoring feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Award {
    pub player: PlayerId,
    pub points: u32,
    /// City, road or monastery.
    pub kind: SectionType,
}

impl std::fmt::Display for Award {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} +{} ({})", self.player, self.points, self.kind)
    }
}
