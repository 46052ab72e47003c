//! Turn classification at every interior vertex of a path.

#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod detect;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use config::{Classification, TurnConfig};
#[doc(inline)]
pub use detect::{Detection, detect, detect_route};
