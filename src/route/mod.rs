//! Path-index bookkeeping for route records.
//!
//! Any transformation that inserts, removes or merges path steps
//! produces an [`IndexRemap`], which is then applied to every field
//! referring to a step by its index.

#[doc(hidden)]
pub mod remap;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use remap::{Collapsed, IndexRemap, OutOfRange, collapse_consecutive, dedup_path, resample};
