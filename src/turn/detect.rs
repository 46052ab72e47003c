use codec::{Direction, PanoId, Route, Turn, TurnLabel};
use geo::Point;
use geometry::{bearing, bearing_delta};
use log::debug;

use crate::turn::TurnConfig;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    /// One entry per interior vertex, in path order.
    pub directions: Vec<Direction>,

    /// The non-forward vertices, by path index.
    pub turns: Vec<Turn>,
}

/// Classifies every interior vertex of `points`.
///
/// Panorama identifiers are attached to each direction only when
/// `panoids` is index-aligned with the path.
pub fn detect(points: &[Point], panoids: &[PanoId], config: &TurnConfig) -> Detection {
    let aligned = panoids.len() == points.len();
    let panoid = |index: usize| aligned.then(|| panoids[index].clone());

    let directions = points
        .windows(3)
        .enumerate()
        .map(|(offset, window)| {
            let vertex = offset + 1;
            let bearing_1 = bearing(window[0], window[1]);
            let bearing_2 = bearing(window[1], window[2]);

            Direction {
                vertex,
                direction: config.classify(bearing_delta(bearing_1, bearing_2)),
                bearing_1,
                bearing_2,
                panoid_start: panoid(vertex - 1),
                panoid_middle: panoid(vertex),
                panoid_end: panoid(vertex + 1),
            }
        })
        .collect::<Vec<_>>();

    let turns = directions
        .iter()
        .filter(|direction| direction.direction != TurnLabel::Forward)
        .map(|direction| Turn {
            index: direction.vertex,
            label: direction.direction,
        })
        .collect();

    Detection { directions, turns }
}

/// Stores the directions and turns of the route's path upon it,
/// returning the number of turns.
pub fn detect_route(route: &mut Route, config: &TurnConfig) -> usize {
    let Detection { directions, turns } = detect(&route.points(), &route.route_panoids, config);
    debug!("Route {} has {} turns", route.route_id, turns.len());

    let count = turns.len();
    route.directions = directions;
    route.turns = Some(turns);
    count
}
