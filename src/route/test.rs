use crate::route::*;

use codec::json::read_routes;
use codec::{LatLng, PanoId, Route, RouteId};
use fixtures::{ROUTES, fixture_path};
use std::error::Error;

#[test]
fn collapse_runs() {
    let collapsed = collapse_consecutive(&["a", "a", "b", "c", "c", "c", "a"]);

    assert_eq!(collapsed.kept, vec![0, 2, 3, 6]);
    assert_eq!(
        (0..7).map(|i| collapsed.remap.get(i)).collect::<Result<Vec<_>, _>>(),
        Ok(vec![0, 0, 1, 2, 2, 2, 3])
    );
    assert_eq!(
        collapsed.remap.get(7),
        Err(OutOfRange { index: 7, len: 7 })
    );

    let empty = collapse_consecutive::<u8>(&[]);
    assert!(empty.kept.is_empty());
    assert!(empty.remap.is_empty());
}

#[test]
fn resample_skips_missing() {
    assert_eq!(resample(&[10, 20, 30], &[0, 2, 5]), vec![10, 30]);
}

#[test]
fn remap_choice_and_truth_indices() -> Result<(), Box<dyn Error>> {
    let mut route = read_routes(&fixture_path(ROUTES))?.remove(0);

    IndexRemap::from_table(vec![0, 0, 1, 2, 3]).apply(&mut route)?;

    let truth = route.ground_truth_position.as_ref().expect("fixture has a ground truth");
    assert_eq!(truth.path_index, 3);

    let indices = route
        .multiple_choice_positions
        .iter()
        .map(|choice| choice.path_index)
        .collect::<Vec<_>>();
    assert_eq!(indices, vec![Some(0), Some(2), None]);

    Ok(())
}

#[test]
fn failed_remap_leaves_route_untouched() -> Result<(), Box<dyn Error>> {
    let mut route = read_routes(&fixture_path(ROUTES))?.remove(0);
    let original = route.clone();

    assert!(IndexRemap::identity(2).apply(&mut route).is_err());
    assert_eq!(route, original);
    Ok(())
}

#[test]
fn dedup_collapses_repeated_waypoints() {
    let mut route = Route::new(RouteId::Number(1));
    route.lat_lng_path = vec![
        LatLng::new(1.0, 1.0),
        LatLng::new(1.0, 1.0),
        LatLng::new(2.0, 2.0),
        LatLng::new(2.0, 2.0),
        LatLng::new(3.0, 3.0),
    ];
    route.route_panoids = ["a", "b", "c", "d", "e"].map(PanoId::from).to_vec();
    route.headings = vec![0.0, 1.0, 2.0, 3.0, 4.0];

    assert_eq!(dedup_path(&mut route), 2);

    assert_eq!(route.lat_lng_path.len(), 3);
    assert_eq!(route.route_panoids, ["a", "c", "e"].map(PanoId::from).to_vec());
    assert_eq!(route.headings, vec![0.0, 2.0, 4.0]);
    assert!(route.ground_truth_position.is_none());
    assert!(route.multiple_choice_positions.is_empty());

    // Already unique paths are left as they are.
    assert_eq!(dedup_path(&mut route), 0);
}
