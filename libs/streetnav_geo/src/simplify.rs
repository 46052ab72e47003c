//! Ramer-Douglas-Peucker simplification over raw coordinates.
//!
//! `geo::SimplifyIdx` measures distances against the chord *segment*,
//! whereas panorama paths are simplified against the infinite chord
//! line. The tolerance is applied directly in coordinate units (degrees).

use geo::Point;
use log::debug;

use crate::bearing::{bearing, turn_angle};
use crate::error::GeoError;

/// The retained points of a simplification, alongside their
/// positions within the original sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Simplified {
    pub points: Vec<Point>,

    /// Strictly increasing indices into the original sequence.
    /// Always contains the first and last index of a non-empty input.
    pub indices: Vec<usize>,
}

/// A significant change of direction found by [`corners`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    /// Index of the vertex within the original sequence.
    pub index: usize,

    /// Magnitude of the turn in degrees, within `[0, 180]`.
    pub turn_angle: f64,
}

/// Simplifies `points` with a tolerance of `epsilon`.
///
/// Sequences shorter than three points are returned unchanged.
/// The returned indices allow other per-point fields to be
/// resampled consistently with the simplified path.
pub fn simplify(points: &[Point], epsilon: f64) -> Result<Simplified, GeoError> {
    if !(epsilon.is_finite() && epsilon >= 0.0) {
        return Err(GeoError::InvalidTolerance(epsilon));
    }

    if points.len() < 3 {
        return Ok(Simplified {
            points: points.to_vec(),
            indices: (0..points.len()).collect(),
        });
    }

    let mut indices = vec![0];
    subdivide(points, 0, points.len() - 1, epsilon, &mut indices);
    debug!("Simplified {} points into {}", points.len(), indices.len());

    Ok(Simplified {
        points: indices.iter().map(|index| points[*index]).collect(),
        indices,
    })
}

/// Pushes every retained index within `(first, last]`, in order.
fn subdivide(points: &[Point], first: usize, last: usize, epsilon: f64, kept: &mut Vec<usize>) {
    let (start, end) = (points[first], points[last]);

    let mut farthest = None;
    let mut max_distance = 0.0;
    for (index, point) in points.iter().enumerate().take(last).skip(first + 1) {
        let distance = perpendicular_distance(*point, start, end);
        if distance > max_distance {
            max_distance = distance;
            farthest = Some(index);
        }
    }

    match farthest {
        Some(index) if max_distance > epsilon => {
            subdivide(points, first, index, epsilon, kept);
            subdivide(points, index, last, epsilon, kept);
        }
        _ => kept.push(last),
    }
}

/// Distance from `point` to the infinite line through `start` and `end`.
pub fn perpendicular_distance(point: Point, start: Point, end: Point) -> f64 {
    if start == end {
        return (point.x() - start.x()).hypot(point.y() - start.y());
    }

    let numerator = ((end.y() - start.y()) * point.x() - (end.x() - start.x()) * point.y()
        + end.x() * start.y()
        - end.y() * start.x())
    .abs();

    numerator / (end.y() - start.y()).hypot(end.x() - start.x())
}

/// Finds the vertices where a path turns in a global sense.
///
/// The path is simplified with `epsilon`, and the turn made at each
/// interior retained vertex is measured from the bearings of the
/// simplified segments either side of it.
pub fn corners(points: &[Point], epsilon: f64) -> Result<Vec<Corner>, GeoError> {
    let simplified = simplify(points, epsilon)?;

    Ok(simplified
        .points
        .windows(3)
        .zip(simplified.indices.iter().skip(1))
        .map(|(window, index)| Corner {
            index: *index,
            turn_angle: turn_angle(bearing(window[0], window[1]), bearing(window[1], window[2])),
        })
        .collect())
}
