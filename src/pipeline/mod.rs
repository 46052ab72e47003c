//! Resumable, checkpointed execution of route stages.

#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod runner;
#[doc(hidden)]
pub mod stage;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use error::StageError;
#[doc(inline)]
pub use runner::{DEFAULT_CHECKPOINT_EVERY, Runner, Summary};
#[doc(inline)]
pub use stage::{Outcome, Stage};
