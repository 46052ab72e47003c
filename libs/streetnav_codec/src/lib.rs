//! Codecs for the on-disk formats of the panorama pipeline.
//!
//! - [`graph`]: the line-oriented node and link files.
//! - [`route`]: route records, as stored within JSON arrays.
//! - [`json`]: reading and writing route arrays and panorama mappings.

pub mod error;
pub mod graph;
pub mod id;
pub mod json;
pub mod route;

#[cfg(test)]
mod test;

pub use error::CodecError;
pub use graph::{LinkRecord, NodeRecord};
pub use id::PanoId;
pub use json::PanoramaMapping;
pub use route::{
    ChoicePosition, CornerRecord, Direction, GroundTruth, LatLng, PathEntry, Route, RouteId,
    Turn, TurnLabel, Waypoint,
};
