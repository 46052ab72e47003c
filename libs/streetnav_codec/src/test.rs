use crate::graph::{Record, read_records, write_records};
use crate::json::{read_mapping, read_routes, write_routes};
use crate::*;

use fixtures::{
    DANGLING_LINKS, GRAPH_LINKS, GRAPH_NODES, PANORAMA_MAPPING, ROUTES, fixture_path, scratch_dir,
};
use std::error::Error;
use std::fs;

#[test_log::test]
fn read_fixture_graph() -> Result<(), Box<dyn Error>> {
    let nodes: Vec<NodeRecord> = read_records(&fixture_path(GRAPH_NODES))?;
    let links: Vec<LinkRecord> = read_records(&fixture_path(GRAPH_LINKS))?;

    assert_eq!(nodes.len(), 5);
    assert_eq!(links.len(), 6);

    assert_eq!(
        nodes[3],
        NodeRecord {
            id: PanoId::from("n4"),
            yaw: 95,
            lat: 40.7304,
            lng: -73.9997
        }
    );
    assert_eq!(links[3].to_string(), "n3,90,n4");

    Ok(())
}

#[test]
fn parse_fractional_angles() {
    let node = NodeRecord::parse("abc,271.8,40.5,-74").expect("valid line");
    assert_eq!(node.yaw, 271);
    assert_eq!(node.to_string(), "abc,271,40.5,-74.0");

    let link = LinkRecord::parse("a,-12.5,b").expect("valid line");
    assert_eq!(link.heading, -12);
}

#[test]
fn reject_malformed_lines() -> Result<(), Box<dyn Error>> {
    let dir = scratch_dir("codec-malformed");
    let path = dir.join("nodes.txt");
    fs::write(&path, "a,10,40.0,-74.0\n\nb,north,40.1,-74.0\n")?;

    match read_records::<NodeRecord>(&path) {
        Err(CodecError::Malformed { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected a malformed line, got {other:?}"),
    }

    assert!(LinkRecord::parse("a,10").is_err());
    assert!(LinkRecord::parse("a,10,b,c").is_err());
    Ok(())
}

#[test]
fn write_and_reread_records() -> Result<(), Box<dyn Error>> {
    let dir = scratch_dir("codec-records");
    let path = dir.join("links.txt");

    let links: Vec<LinkRecord> = read_records(&fixture_path(DANGLING_LINKS))?;
    assert_eq!(write_records(&path, &links)?, 2);

    let reread: Vec<LinkRecord> = read_records(&path)?;
    assert_eq!(reread, links);
    Ok(())
}

#[test]
fn refuse_unrepresentable_ids() {
    let dir = scratch_dir("codec-unrepresentable");
    let link = LinkRecord {
        from: PanoId::from("a,b"),
        heading: 0,
        to: PanoId::from("c"),
    };

    match write_records(&dir.join("links.txt"), [&link]) {
        Err(CodecError::UnrepresentableId(id)) => assert_eq!(id, "a,b"),
        other => panic!("expected the id to be refused, got {other:?}"),
    }
}

#[test_log::test]
fn read_fixture_routes() -> Result<(), Box<dyn Error>> {
    let routes = read_routes(&fixture_path(ROUTES))?;
    assert_eq!(routes.len(), 2);

    let first = &routes[0];
    assert_eq!(first.route_id, RouteId::Number(7));
    assert_eq!(first.lat_lng_path.len(), 5);
    assert!(first.is_aligned());
    assert_eq!(first.lat_lng_path[1], LatLng::new(40.7302, -74.0));
    assert_eq!(first.end_heading, Some(180.0));

    let truth = first.ground_truth_position.as_ref().expect("fixture carries a ground truth");
    assert_eq!(truth.path_index, 4);
    assert_eq!(truth.panoid, Some(PanoId::from("n5")));

    let off_path = &first.multiple_choice_positions[2];
    assert!(!off_path.on_path);
    assert_eq!(off_path.panoid, None);
    assert_eq!(off_path.path_index, None);

    assert!(first.extra.contains_key("navigation_text"));

    let second = &routes[1];
    assert_eq!(second.route_id, RouteId::Text("r-8".to_string()));
    assert_eq!(second.lat_lng_path[0], LatLng::new(40.73, -74.0));
    assert_eq!(second.route_id.to_string(), "r-8");

    Ok(())
}

#[test]
fn routes_preserve_unknown_keys() -> Result<(), Box<dyn Error>> {
    let dir = scratch_dir("codec-routes");
    let path = dir.join("routes.json");

    let routes = read_routes(&fixture_path(ROUTES))?;
    write_routes(&path, &routes)?;

    assert!(!dir.join("routes.json.partial").exists());

    let reread = read_routes(&path)?;
    assert_eq!(reread, routes);
    assert_eq!(
        reread[0].extra.get("navigation_text").and_then(|text| text.as_str()),
        Some("Head north, turn right at the corner.")
    );

    Ok(())
}

#[test]
fn turns_are_index_label_pairs() -> Result<(), Box<dyn Error>> {
    let turns: Vec<Turn> = serde_json::from_str(r#"[[3, "Turn"], [7, "Right"]]"#)?;
    assert_eq!(
        turns,
        vec![
            Turn { index: 3, label: TurnLabel::Turn },
            Turn { index: 7, label: TurnLabel::Right },
        ]
    );

    assert_eq!(serde_json::to_string(&turns)?, r#"[[3,"Turn"],[7,"Right"]]"#);
    Ok(())
}

#[test]
fn lat_lng_representations() -> Result<(), Box<dyn Error>> {
    let points: Vec<LatLng> = serde_json::from_str(
        r#"[[1.5, 2.5], {"lat": 1.5, "lng": 2.5}, {"lat": 0.0, "lng": 0.0, "pano_lat": 1.5, "pano_lng": 2.5}]"#,
    )?;

    assert!(points.iter().all(|point| *point == LatLng::new(1.5, 2.5)));
    assert_eq!(serde_json::to_string(&points[0])?, "[1.5,2.5]");

    let point = geo::Point::from(points[0]);
    assert_eq!((point.x(), point.y()), (2.5, 1.5));
    Ok(())
}

#[test]
fn waypoints_prefer_path_entries() -> Result<(), Box<dyn Error>> {
    let route: Route = serde_json::from_str(
        r#"{
            "route_id": 1,
            "lat_lng_path": [[0.0, 0.0]],
            "route_panoids": ["a"],
            "path": [
                {"pano_id": "x", "lat": 1.0, "lng": 1.0, "pano_lat": 1.1, "pano_lng": 1.2},
                {"pano_id": null, "lat": 2.0, "lng": 2.0}
            ]
        }"#,
    )?;

    let waypoints = route.waypoints();
    assert_eq!(waypoints.len(), 2);
    assert_eq!(waypoints[0].panoid, Some(PanoId::from("x")));
    assert_eq!(waypoints[0].position, LatLng::new(1.1, 1.2));
    assert_eq!(waypoints[1].position, LatLng::new(2.0, 2.0));

    Ok(())
}

#[test]
fn mapping_keeps_file_order() -> Result<(), Box<dyn Error>> {
    let mapping = read_mapping(&fixture_path(PANORAMA_MAPPING))?;

    let keys = mapping.keys().map(PanoId::as_str).collect::<Vec<_>>();
    assert_eq!(keys, vec!["n1", "n2", "n3", "n4", "n5"]);
    assert_eq!(mapping.get("n4"), Some(&PanoId::from("P3")));
    Ok(())
}

#[test]
fn synthetic_ids_are_positional() {
    let id = PanoId::synthetic(40.5, -74.0);
    assert_eq!(id.as_str(), "panoid_40.5_-74.0");
    assert!(id.is_representable());
}
