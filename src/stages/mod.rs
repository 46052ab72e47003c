//! The per-route stages of the offline pipeline, each runnable
//! through a [`Runner`](crate::pipeline::Runner).
//!
//! Every stage is configured by a parameter struct whose `Default`
//! matches the parameters the published datasets were built with.

#[doc(hidden)]
pub mod augment;
#[doc(hidden)]
pub mod choices;
#[doc(hidden)]
pub mod distances;
#[doc(hidden)]
pub mod path;
#[doc(hidden)]
pub mod stats;
#[doc(hidden)]
pub mod turns;


#[doc(inline)]
pub use augment::AugmentStage;
#[doc(inline)]
pub use choices::{ChoiceStage, Selector};
#[doc(inline)]
pub use distances::{DistanceStage, along_path_distances};
#[doc(inline)]
pub use path::{
    CornerConfig, CornerStage, DedupStage, DensifyConfig, DensifyStage, SmoothConfig, SmoothStage,
};
#[doc(inline)]
pub use stats::{DistanceStats, TurnStats, pair_distance_stats, turn_stats};
#[doc(inline)]
pub use turns::TurnStage;
