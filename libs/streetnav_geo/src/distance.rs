use geo::{Distance, Geodesic, Point};

/// Geodesic (WGS-84) distance between two positions, in meters.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    Geodesic.distance(a, b)
}

/// Length of every consecutive segment, one less than the number of points.
pub fn segment_lengths(points: &[Point]) -> Vec<f64> {
    points
        .windows(2)
        .map(|pair| distance(pair[0], pair[1]))
        .collect()
}

/// Distance travelled along the path from the first point up to each point.
///
/// The result has the same length as the input, starting at zero.
pub fn cumulative_distances(points: &[Point]) -> Vec<f64> {
    let mut total = 0.0;
    let mut cumulative = Vec::with_capacity(points.len());

    if !points.is_empty() {
        cumulative.push(total);
    }

    for length in segment_lengths(points) {
        total += length;
        cumulative.push(total);
    }

    cumulative
}
