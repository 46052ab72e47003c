use geo::Point;

/// Computes the initial great-circle bearing from `origin` to `destination`.
///
/// The result is given in degrees relative to due-north, normalised
/// into `[0, 360)`. Every turn and heading computation in the
/// workspace is derived from this value, so the arithmetic is kept
/// to the textbook form: each coordinate is converted to radians
/// individually before the longitudinal delta is taken.
///
/// ### Example
/// ```rust
/// use geo::Point;
/// use streetnav_geo::bearing;
///
/// let origin = Point::new(-74.0, 40.0);
/// let north = Point::new(-74.0, 40.001);
///
/// assert!(bearing(origin, north).abs() < 1e-9);
/// ```
pub fn bearing(origin: Point, destination: Point) -> f64 {
    let (lat_a, lng_a) = (origin.y().to_radians(), origin.x().to_radians());
    let (lat_b, lng_b) = (destination.y().to_radians(), destination.x().to_radians());
    let delta_lng = lng_b - lng_a;

    let x = delta_lng.sin() * lat_b.cos();
    let y = lat_a.cos() * lat_b.sin() - lat_a.sin() * lat_b.cos() * delta_lng.cos();

    (x.atan2(y).to_degrees() + 360.0) % 360.0
}

/// Wraps any heading into `[0, 360)`.
pub fn normalize(heading: f64) -> f64 {
    let wrapped = heading.rem_euclid(360.0);

    // `rem_euclid` rounds tiny negative inputs up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// The clockwise rotation taking heading `from` onto heading `to`, within `[0, 360)`.
pub fn bearing_delta(from: f64, to: f64) -> f64 {
    normalize(to - from + 360.0)
}

/// Shortest angular separation between two headings, within `[0, 180]`.
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let delta = (a - b).abs().rem_euclid(360.0);
    delta.min(360.0 - delta)
}

/// Magnitude of the turn made when moving from heading `before` onto `after`.
pub fn turn_angle(before: f64, after: f64) -> f64 {
    let angle = bearing_delta(before, after);
    if angle > 180.0 { 360.0 - angle } else { angle }
}
