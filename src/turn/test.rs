use crate::turn::*;

use codec::json::read_routes;
use codec::{PanoId, Turn, TurnLabel};
use fixtures::{ROUTES, fixture_path};
use geo::Point;
use std::error::Error;

fn lat_lng(lat: f64, lng: f64) -> Point {
    Point::new(lng, lat)
}

#[test]
fn classify_thresholds() {
    let binary = TurnConfig::default();
    assert_eq!(binary.classify(44.9), TurnLabel::Forward);
    assert_eq!(binary.classify(315.1), TurnLabel::Forward);
    assert_eq!(binary.classify(45.0), TurnLabel::Turn);
    assert_eq!(binary.classify(315.0), TurnLabel::Turn);
    assert_eq!(binary.classify(180.0), TurnLabel::Turn);

    let ternary = TurnConfig {
        classification: Classification::Ternary,
        ..TurnConfig::default()
    };
    assert_eq!(ternary.classify(90.0), TurnLabel::Right);
    assert_eq!(ternary.classify(180.0), TurnLabel::Right);
    assert_eq!(ternary.classify(270.0), TurnLabel::Left);

    let loose = TurnConfig {
        classification: Classification::Ternary,
        forward_threshold: 10.0,
        ..TurnConfig::default()
    };
    assert_eq!(loose.classify(12.0), TurnLabel::Left);
    assert_eq!(loose.classify(15.0), TurnLabel::Right);
}

#[test]
fn straight_path_has_no_turns() {
    let points = (0..6)
        .map(|step| lat_lng(40.0 + step as f64 * 0.0002, -74.0))
        .collect::<Vec<_>>();

    let detection = detect(&points, &[], &TurnConfig::default());
    assert_eq!(detection.directions.len(), 4);
    assert!(detection.turns.is_empty());
    assert!(detection.directions.iter().all(|d| d.panoid_middle.is_none()));
}

#[test]
fn short_paths_have_no_directions() {
    let points = [lat_lng(40.0, -74.0), lat_lng(40.001, -74.0)];
    assert_eq!(detect(&points, &[], &TurnConfig::default()), Detection::default());
    assert_eq!(detect(&[], &[], &TurnConfig::default()), Detection::default());
}

#[test]
fn left_and_right_turns() {
    // North, then west, then north again.
    let points = [
        lat_lng(40.0, -74.0),
        lat_lng(40.001, -74.0),
        lat_lng(40.001, -74.001),
        lat_lng(40.002, -74.001),
    ];

    let config = TurnConfig {
        classification: Classification::Ternary,
        ..TurnConfig::default()
    };

    let detection = detect(&points, &[], &config);
    assert_eq!(
        detection.turns,
        vec![
            Turn { index: 1, label: TurnLabel::Left },
            Turn { index: 2, label: TurnLabel::Right },
        ]
    );
}

#[test]
fn fixture_route_turns() -> Result<(), Box<dyn Error>> {
    let mut route = read_routes(&fixture_path(ROUTES))?.remove(0);

    let count = detect_route(&mut route, &TurnConfig::default());
    assert_eq!(count, 2);
    assert_eq!(
        route.turns,
        Some(vec![
            Turn { index: 2, label: TurnLabel::Turn },
            Turn { index: 3, label: TurnLabel::Turn },
        ])
    );

    let corner = &route.directions[1];
    assert_eq!(corner.vertex, 2);
    assert_eq!(corner.panoid_start, Some(PanoId::from("n2")));
    assert_eq!(corner.panoid_middle, Some(PanoId::from("n3")));
    assert_eq!(corner.panoid_end, Some(PanoId::from("n4")));
    assert!(corner.bearing_1.abs() < 1e-9);
    assert!((corner.bearing_2 - 90.0).abs() < 0.01);

    Ok(())
}
