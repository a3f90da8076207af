//! Feature tracking: which sections join into cities, roads and
//! monasteries, when those are complete, and who they pay.
//!
//! ## Key Types
//!
//! - `GraphFeatureManager`: cities and roads, built from linked section nodes
//! - `MonasteryFeatureManager`: monasteries and their 3x3 surroundings
//! - `CompositeFeatureManager`: both of the above plus the meeple claim rule
//! - `FeatureManager`: the trait all three implement
//! - `Feature` / `FeatureRef`: read-only view of any tracked feature
//! - `Award`: one player's share of one scoring

pub mod node;
pub mod feature;
pub mod graph;
pub mod monastery;
pub mod manager;
pub mod composite;

pub use node::{FeatureNode, NodeArena, NodeId, Slot};
pub use feature::{Award, Feature, FeatureRef};
pub use graph::{FeatureId, GraphFeature, GraphFeatureManager, GraphFeatureRef};
pub use monastery::{monastery_cell, MonasteryFeature, MonasteryFeatureManager};
pub use manager::FeatureManager;
pub use composite::{CompositeFeatureManager, ScoredFeatures};
