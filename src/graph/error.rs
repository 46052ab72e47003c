use codec::{CodecError, PanoId};
use thiserror::Error;

use crate::graph::Heading;
use crate::impl_err;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("node {0} already exists")]
    DuplicateNode(PanoId),

    #[error("node {0} is not present in the graph")]
    MissingNode(PanoId),

    #[error("heading {heading} of {from} already links to {existing}, refusing {replacement}")]
    HeadingCollision {
        from: PanoId,
        heading: Heading,
        existing: PanoId,
        replacement: PanoId,
    },

    #[error("every heading of {0} is already occupied")]
    HeadingsExhausted(PanoId),

    #[error("could not read or write graph: {0}")]
    Codec(CodecError),
}

impl_err!(CodecError, GraphError, Codec);
