use codec::CodecError;
use geometry::GeoError;
use thiserror::Error;

use crate::choice::ChoiceError;
use crate::consolidate::ConsolidateError;
use crate::graph::GraphError;
use crate::impl_err;
use crate::pipeline::StageError;
use crate::route::OutOfRange;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Graph(GraphError),

    #[error(transparent)]
    Codec(CodecError),

    #[error(transparent)]
    Geo(GeoError),

    #[error(transparent)]
    Consolidate(ConsolidateError),

    #[error(transparent)]
    Choice(ChoiceError),

    #[error(transparent)]
    Stage(StageError),

    #[error(transparent)]
    Remap(OutOfRange),
}

pub type Result<T> = std::result::Result<T, Error>;

impl_err!(GraphError, Graph);
impl_err!(CodecError, Codec);
impl_err!(GeoError, Geo);
impl_err!(ConsolidateError, Consolidate);
impl_err!(ChoiceError, Choice);
impl_err!(StageError, Stage);
impl_err!(OutOfRange, Remap);
