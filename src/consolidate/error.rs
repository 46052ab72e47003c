use codec::PanoId;
use thiserror::Error;

use crate::graph::GraphError;
use crate::impl_err;
use crate::route::OutOfRange;

#[derive(Error, Debug)]
pub enum ConsolidateError {
    #[error("panorama {0} has no canonical identifier")]
    Unmapped(PanoId),

    #[error("canonical panorama {0} is not present in the consolidated graph")]
    MissingNode(PanoId),

    #[error("no link from {from} to {to} in the consolidated graph")]
    MissingLink { from: PanoId, to: PanoId },

    #[error("route has {panoids} panoramas but {waypoints} waypoints")]
    Misaligned { panoids: usize, waypoints: usize },

    #[error("route indices could not be remapped: {0}")]
    Remap(OutOfRange),

    #[error("could not extend the consolidated graph: {0}")]
    Graph(GraphError),
}

impl_err!(OutOfRange, ConsolidateError, Remap);
impl_err!(GraphError, ConsolidateError, Graph);
