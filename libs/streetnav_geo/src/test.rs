use crate::*;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use geo::{Point, wkt};

fn lat_lng(lat: f64, lng: f64) -> Point {
    Point::new(lng, lat)
}

#[test]
fn cardinal_bearings() {
    let origin = lat_lng(40.0, -74.0);

    assert_abs_diff_eq!(bearing(origin, lat_lng(40.001, -74.0)), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bearing(origin, lat_lng(39.999, -74.0)), 180.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bearing(origin, lat_lng(40.0, -73.999)), 90.0, epsilon = 1e-3);
    assert_abs_diff_eq!(bearing(origin, lat_lng(40.0, -74.001)), 270.0, epsilon = 1e-3);
}

#[test]
fn bearing_is_normalised() {
    let points = wkt! {
        LINESTRING (-118.618 34.166, -118.623 34.164, -118.62 34.17, -118.61 34.16)
    };

    for pair in points.0.windows(2) {
        let heading = bearing(Point(pair[0]), Point(pair[1]));
        assert!((0.0..360.0).contains(&heading), "bearing {heading} out of range");
    }
}

#[test]
fn angular_helpers() {
    assert_relative_eq!(bearing_delta(350.0, 10.0), 20.0);
    assert_relative_eq!(bearing_delta(10.0, 350.0), 340.0);

    assert_relative_eq!(circular_distance(350.0, 10.0), 20.0);
    assert_relative_eq!(circular_distance(90.0, 270.0), 180.0);

    assert_relative_eq!(turn_angle(0.0, 270.0), 90.0);
    assert_relative_eq!(turn_angle(45.0, 45.0), 0.0);

    assert_relative_eq!(normalize(-90.0), 270.0);
    assert_relative_eq!(normalize(720.0), 0.0);
}

#[test]
fn simplify_keeps_the_spike() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(2.0, 1.0),
        Point::new(3.0, 0.0),
        Point::new(4.0, 0.0),
    ];

    let simplified = simplify(&points, 0.5).expect("valid tolerance");
    assert_eq!(simplified.indices, vec![0, 2, 4]);
    assert_eq!(simplified.points, vec![points[0], points[2], points[4]]);
}

#[test]
fn simplify_fidelity() {
    let path = [
        lat_lng(40.733685, -74.00278),
        lat_lng(40.733609, -74.00282),
        lat_lng(40.733587, -74.002799),
        lat_lng(40.733501, -74.002713),
        lat_lng(40.733453, -74.002665),
        lat_lng(40.733348, -74.002634),
        lat_lng(40.733365, -74.002579),
    ];

    let simplified = simplify(&path, 0.00005).expect("valid tolerance");
    assert_eq!(simplified.indices, vec![0, 1, 5, 6]);

    assert_eq!(simplified.indices.first(), Some(&0));
    assert_eq!(simplified.indices.last(), Some(&(path.len() - 1)));
    assert!(simplified.indices.windows(2).all(|w| w[0] < w[1]));

    for (point, index) in simplified.points.iter().zip(&simplified.indices) {
        assert_eq!(*point, path[*index]);
    }

    // Simplifying an already simplified path is a no-op.
    let again = simplify(&simplified.points, 0.00005).expect("valid tolerance");
    assert_eq!(again.points, simplified.points);
    assert_eq!(again.indices, (0..simplified.points.len()).collect::<Vec<_>>());
}

#[test]
fn simplify_short_and_invalid() {
    let pair = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
    let simplified = simplify(&pair, 10.0).expect("valid tolerance");
    assert_eq!(simplified.indices, vec![0, 1]);

    assert_eq!(simplify(&[], 0.1).map(|s| s.indices), Ok(vec![]));
    assert_eq!(simplify(&pair, -1.0), Err(GeoError::InvalidTolerance(-1.0)));
}

#[test]
fn corners_report_original_indices() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.5),
        Point::new(0.0, 1.0),
        Point::new(0.5, 1.0),
        Point::new(1.0, 1.0),
    ];

    let found = corners(&points, 0.1).expect("valid tolerance");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].index, 2);
    assert_abs_diff_eq!(found[0].turn_angle, 90.0, epsilon = 0.1);
}

#[test]
fn densify_fills_gaps() {
    let path = [
        lat_lng(40.0, -74.0),
        lat_lng(40.0005, -74.0),
        lat_lng(40.001, -74.0),
    ];

    let dense = densify(&path, 90.0, 50.0, Subdivision::Ceil).expect("valid spacing");

    assert_eq!(dense.points.len(), 5);
    assert_eq!(dense.headings.len(), dense.points.len());
    assert_eq!(dense.origins, vec![0, 2, 4]);

    for (index, origin) in dense.origins.iter().enumerate() {
        assert_eq!(dense.points[*origin], path[index]);
    }

    for pair in dense.points.windows(2) {
        assert!(distance(pair[0], pair[1]) <= 50.0);
    }

    assert!(dense.is_inserted(1));
    assert!(!dense.is_inserted(2));

    assert_abs_diff_eq!(dense.headings[1], 0.0, epsilon = 1e-9);
    assert_relative_eq!(*dense.headings.last().unwrap(), 90.0);
}

#[test]
fn densify_never_exceeds_original_gap() {
    let path = [
        lat_lng(40.733685, -74.00278),
        lat_lng(40.7331, -74.0031),
        lat_lng(40.7322, -74.0011),
        lat_lng(40.7322, -74.0010),
    ];

    let gaps = segment_lengths(&path);
    let dense = densify(&path, 0.0, 10.0, Subdivision::Ceil).expect("valid spacing");

    for (segment, gap) in dense.origins.windows(2).zip(gaps) {
        for pair in dense.points[segment[0]..=segment[1]].windows(2) {
            assert!(distance(pair[0], pair[1]) <= gap + 1e-6);
        }
    }
}

#[test]
fn densify_floor_subdivision() {
    let path = [lat_lng(40.0, -74.0), lat_lng(40.0005, -74.0)];

    let dense = densify(&path, 0.0, 50.0, Subdivision::Floor).expect("valid spacing");
    assert_eq!(dense.points.len(), 2);

    let dense = densify(&path, 0.0, 10.0, Subdivision::Floor).expect("valid spacing");
    assert_eq!(dense.points.len(), 6);
}

#[test]
fn densify_degenerate() {
    let single = [lat_lng(40.0, -74.0)];
    let dense = densify(&single, 45.0, 10.0, Subdivision::Ceil).expect("valid spacing");
    assert_eq!(dense.headings, vec![45.0]);

    assert_eq!(
        densify(&single, 0.0, 0.0, Subdivision::Ceil),
        Err(GeoError::InvalidSpacing(0.0))
    );
}

#[test]
fn cumulative_distance_grows() {
    let path = [lat_lng(40.0, -74.0), lat_lng(40.0005, -74.0), lat_lng(40.001, -74.0)];
    let cumulative = cumulative_distances(&path);

    assert_eq!(cumulative.len(), 3);
    assert_relative_eq!(cumulative[0], 0.0);
    assert_abs_diff_eq!(cumulative[2], distance(path[0], path[2]), epsilon = 1e-6);
}

#[test]
fn smoothing_wraps_through_north() {
    let smoothed = smooth(&[350.0, 10.0], 3).expect("odd window");
    for heading in smoothed {
        assert!(circular_distance(heading, 0.0) < 1e-9);
    }

    let smoothed = smooth(&[0.0, 90.0, 180.0, 90.0, 0.0], 3).expect("odd window");
    assert_abs_diff_eq!(smoothed[0], 45.0, epsilon = 1e-9);
    assert_abs_diff_eq!(smoothed[2], 2f64.atan2(-1.0).to_degrees(), epsilon = 1e-9);
    assert_abs_diff_eq!(smoothed[4], 45.0, epsilon = 1e-9);
}

#[test]
fn smoothing_window_validation() {
    assert_eq!(smooth(&[1.0, 2.0], 2), Err(GeoError::InvalidWindow(2)));
    assert_eq!(smooth(&[1.0, 2.0], 0), Err(GeoError::InvalidWindow(0)));
    assert_eq!(smooth(&[], 5), Ok(vec![]));

    let single = smooth(&[42.0], 1).expect("odd window");
    assert_abs_diff_eq!(single[0], 42.0, epsilon = 1e-9);
}
