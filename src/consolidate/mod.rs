//! Merges panoramas which an external lookup resolved to the same
//! canonical identifier, and rewrites routes onto the merged graph.

#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod item;
#[doc(hidden)]
pub mod route;


#[doc(inline)]
pub use error::ConsolidateError;
#[doc(inline)]
pub use item::{Consolidation, ConsolidationMode, Consolidator};
