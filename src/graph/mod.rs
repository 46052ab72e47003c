//! The directed panorama graph.
//!
//! Nodes are panoramas, keyed by their identifier. Each node holds at
//! most one neighbour per integral heading. The graph is built once
//! from its flat files and is only ever grown, never shrunk.

#[doc(hidden)]
pub mod augment;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod io;
#[doc(hidden)]
pub mod item;


#[doc(inline)]
pub use augment::Augmenter;
#[doc(inline)]
pub use error::GraphError;
#[doc(inline)]
pub use item::{Conflict, FxIndexMap, Graph, Heading, Node};
