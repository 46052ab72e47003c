//! Path geometry over panorama coordinates.
//!
//! All positions are [`geo::Point`]s holding the longitude in `x`
//! and the latitude in `y`, so they interoperate with the GeoRust
//! metric spaces. Headings are degrees clockwise from due-north.

#[doc(hidden)]
pub mod bearing;
#[doc(hidden)]
pub mod densify;
#[doc(hidden)]
pub mod distance;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod simplify;
#[doc(hidden)]
pub mod smooth;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use bearing::{bearing, bearing_delta, circular_distance, normalize, turn_angle};
#[doc(inline)]
pub use densify::{Densified, Subdivision, densify};
#[doc(inline)]
pub use distance::{cumulative_distances, distance, segment_lengths};
#[doc(inline)]
pub use error::GeoError;
#[doc(inline)]
pub use simplify::{Corner, Simplified, corners, simplify};
#[doc(inline)]
pub use smooth::{circular_mean, smooth};
