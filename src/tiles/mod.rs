//! Tile model: sections, tiles, and the tile catalogue.
//!
//! ## Key Types
//!
//! - `SectionType`: terrain of a section (city, road, field, monastery, blank)
//! - `Section`: one edge or center area, optionally holding a meeple
//! - `SectionRef`: board-wide section address, stable across rotation
//! - `Tile`: four rotating edge sections plus fixed center sections
//! - `TileCatalog`: registry of tile kinds, allocates `TileId`s

pub mod section;
pub mod tile;
pub mod catalog;

pub use section::{Section, SectionId, SectionRef, SectionType};
pub use tile::{Tile, TileBuilder, TileId, TileKindId};
pub use catalog::{TileCatalog, TileKind, START_KIND};
