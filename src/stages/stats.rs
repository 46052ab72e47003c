use codec::{Route, RouteId, TurnLabel};
use geometry::distance;
use itertools::{Itertools, MinMaxResult};
use log::warn;
use std::fmt::{Display, Formatter};

use crate::graph::Graph;

/// Distance in meters above which a step between panoramas is suspicious.
pub const DEFAULT_PAIR_WARNING: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TurnStats {
    pub routes: usize,

    /// Routes holding at least one non-forward vertex, in input order.
    pub with_turns: Vec<RouteId>,

    pub mean: f64,
    pub min: usize,
    pub max: usize,
}

impl Display for TurnStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Found {} routes with at least one turn from {}",
            self.with_turns.len(),
            self.routes
        )?;
        writeln!(f, "Average number of turns per route: {:.2}", self.mean)?;
        writeln!(f, "Maximum number of turns in a route: {}", self.max)?;
        write!(f, "Minimum number of turns in a route: {}", self.min)
    }
}

/// The number of non-forward vertices of a route, from its directions
/// where classified and otherwise from its turn list.
fn turn_count(route: &Route) -> usize {
    match route.directions.is_empty() {
        true => route.turn_list().len(),
        false => route
            .directions
            .iter()
            .filter(|direction| direction.direction != TurnLabel::Forward)
            .count(),
    }
}

/// Turn statistics over the routes, or `None` without any route.
pub fn turn_stats(routes: &[Route]) -> Option<TurnStats> {
    let counts = routes.iter().map(turn_count).collect::<Vec<_>>();

    let (min, max) = match counts.iter().copied().minmax() {
        MinMaxResult::NoElements => return None,
        MinMaxResult::OneElement(count) => (count, count),
        MinMaxResult::MinMax(min, max) => (min, max),
    };

    let with_turns = routes
        .iter()
        .zip(&counts)
        .filter(|(_, count)| **count > 0)
        .map(|(route, _)| route.route_id.clone())
        .collect();

    Some(TurnStats {
        routes: routes.len(),
        with_turns,
        mean: counts.iter().sum::<usize>() as f64 / counts.len() as f64,
        min,
        max,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceStats {
    pub pairs: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,

    /// Pairs further apart than the warning distance.
    pub suspicious: usize,
}

impl Display for DistanceStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Distances between {} consecutive panoramas", self.pairs)?;
        writeln!(f, "Average distance: {:.2} meters", self.mean)?;
        writeln!(f, "Max distance: {:.2} meters", self.max)?;
        writeln!(f, "Min distance: {:.2} meters", self.min)?;
        write!(f, "Unusually large distances: {}", self.suspicious)
    }
}

/// Statistics of the geodesic distance between consecutive panoramas of
/// every route, positioned by the graph. Pairs with a panorama missing
/// from the graph are logged and left out.
pub fn pair_distance_stats(routes: &[Route], graph: &Graph, warning: f64) -> Option<DistanceStats> {
    let mut distances = Vec::new();
    let mut suspicious = 0;

    for route in routes {
        for pair in route.route_panoids.windows(2) {
            let (Some(start), Some(end)) = (graph.position(&pair[0]), graph.position(&pair[1])) else {
                warn!(
                    "Route {}: panoramas {} or {} are not in the graph",
                    route.route_id, pair[0], pair[1]
                );
                continue;
            };

            let gap = distance(start, end);
            if gap > warning {
                warn!(
                    "Route {}: distance between {} and {} is unusually large: {gap:.2} meters",
                    route.route_id, pair[0], pair[1]
                );
                suspicious += 1;
            }

            distances.push(gap);
        }
    }

    if distances.is_empty() {
        return None;
    }

    Some(DistanceStats {
        pairs: distances.len(),
        mean: distances.iter().sum::<f64>() / distances.len() as f64,
        min: distances.iter().copied().fold(f64::INFINITY, f64::min),
        max: distances.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        suspicious,
    })
}
