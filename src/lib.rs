#![doc = include_str!("../README.md")]

pub mod choice;
pub mod consolidate;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod route;
pub mod stages;
pub mod turn;
pub mod util;

pub use error::{Error, Result};
