use geo::Point;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GeoError {
    #[error("smoothing window must be odd and non-zero, given {0}")]
    InvalidWindow(usize),

    #[error("densification spacing must be positive and finite, given {0}")]
    InvalidSpacing(f64),

    #[error("simplification tolerance must be non-negative and finite, given {0}")]
    InvalidTolerance(f64),

    #[error("could not interpolate between {0:?} and {1:?}")]
    Interpolation(Point, Point),
}
