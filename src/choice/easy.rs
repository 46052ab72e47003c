use codec::{ChoicePosition, GroundTruth, LatLng, Route, Waypoint};
use geo::Point;
use geometry::distance;
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::Map;

use crate::choice::{ChoiceError, check_count};

pub const DEFAULT_POSITIONS: usize = 3;
pub const DEFAULT_MIN_DISTANCE: f64 = 50.0;
pub const DEFAULT_MAX_OFFPATH_ATTEMPTS: usize = 1000;

/// Paths of this many waypoints or fewer are never offered.
const MIN_WAYPOINTS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct EasyConfig {
    /// Number of choices offered, the ground truth included.
    pub num_positions: usize,

    /// Smallest geodesic distance in meters between any two choices.
    pub min_distance_m: f64,

    pub max_offpath_attempts: usize,
}

impl Default for EasyConfig {
    fn default() -> Self {
        EasyConfig {
            num_positions: DEFAULT_POSITIONS,
            min_distance_m: DEFAULT_MIN_DISTANCE,
            max_offpath_attempts: DEFAULT_MAX_OFFPATH_ATTEMPTS,
        }
    }
}

/// A random offset in degrees, north or east of the origin within
/// `[0.0003, 0.001]`, or south or west within `[0.0004, 0.001]`.
fn offset<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.gen_bool(0.5) {
        rng.gen_range(0.0003..=0.001)
    } else {
        -rng.gen_range(0.0004..=0.001)
    }
}

fn separated(position: LatLng, others: &[LatLng], min_distance: f64) -> bool {
    others
        .iter()
        .all(|other| distance(Point::from(position), Point::from(*other)) >= min_distance)
}

/// Indices taken evenly across `0..len`, rounded down.
fn spread(len: usize, count: usize) -> Vec<usize> {
    match count {
        0 => vec![],
        1 => vec![0],
        _ => (0..count)
            .map(|step| (step * (len - 1)) / (count - 1))
            .collect(),
    }
}

/// Picks the on-path waypoints offered as choices, one from each stretch
/// of the path between turns, separated by at least the minimum distance.
fn on_path<'a, R: Rng + ?Sized>(
    waypoints: &'a [Waypoint],
    turns: &[usize],
    config: &EasyConfig,
    rng: &mut R,
) -> Result<Vec<&'a Waypoint>, ChoiceError> {
    let last = waypoints.len() - 1;
    let mut bounds = turns
        .iter()
        .copied()
        .filter(|turn| *turn < last)
        .collect::<Vec<_>>();
    bounds.sort_unstable();
    bounds.push(last);

    let mut previous = 1;
    let mut candidates: Vec<&Waypoint> = Vec::new();
    for bound in bounds {
        if bound > previous + 1 {
            let index = rng.gen_range(previous..bound);
            candidates.push(&waypoints[index]);
            previous = bound;
        }
    }

    let mut kept: Vec<&Waypoint> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let positions = kept.iter().map(|waypoint| waypoint.position).collect::<Vec<_>>();
        if separated(candidate.position, &positions, config.min_distance_m) {
            kept.push(candidate);
        }
    }

    let needed = config.num_positions.saturating_sub(1);
    if kept.len() < needed {
        return Err(ChoiceError::TooFewCandidates {
            found: kept.len(),
            needed,
        });
    }

    if kept.len() > config.num_positions {
        kept = spread(kept.len(), config.num_positions)
            .into_iter()
            .map(|index| kept[index])
            .collect();
    }

    Ok(kept)
}

/// Stores a ground truth and shuffled, labelled choice positions upon
/// the route. Choices are drawn on the path between its turns, and
/// completed with positions offset around the ground truth.
pub fn select_easy<R: Rng + ?Sized>(
    route: &mut Route,
    config: &EasyConfig,
    rng: &mut R,
) -> Result<(), ChoiceError> {
    check_count(config.num_positions)?;

    let waypoints = route.waypoints();
    if waypoints.len() <= MIN_WAYPOINTS {
        return Err(ChoiceError::TooShort {
            len: waypoints.len(),
            min: MIN_WAYPOINTS + 1,
        });
    }

    let turns = route.turn_list().iter().map(|turn| turn.index).collect::<Vec<_>>();
    if turns.is_empty() {
        return Err(ChoiceError::NoTurns);
    }

    let chosen = on_path(&waypoints, &turns, config, rng)?;
    let truth = chosen
        .choose(rng)
        .copied()
        .ok_or(ChoiceError::TooFewCandidates {
            found: 0,
            needed: 1,
        })?;

    let mut positions = chosen
        .iter()
        .map(|waypoint| ChoicePosition {
            panoid: waypoint.panoid.clone(),
            latitude: waypoint.position.lat,
            longitude: waypoint.position.lng,
            on_path: true,
            mc_num: 0,
            path_index: Some(waypoint.index),
            distance_from_correct: None,
            extra: Map::new(),
        })
        .collect::<Vec<_>>();

    let mut attempts = 0;
    while positions.len() < config.num_positions {
        if attempts == config.max_offpath_attempts {
            return Err(ChoiceError::OffPathExhausted(attempts));
        }
        attempts += 1;

        let candidate = LatLng::new(
            truth.position.lat + offset(rng),
            truth.position.lng + offset(rng),
        );

        let placed = positions.iter().map(ChoicePosition::position).collect::<Vec<_>>();
        if separated(candidate, &placed, config.min_distance_m) {
            positions.push(ChoicePosition {
                panoid: None,
                latitude: candidate.lat,
                longitude: candidate.lng,
                on_path: false,
                mc_num: 0,
                path_index: None,
                distance_from_correct: None,
                extra: Map::new(),
            });
        }
    }

    debug!(
        "Route {} placed {} off-path choices in {attempts} attempts",
        route.route_id,
        positions.iter().filter(|position| !position.on_path).count()
    );

    let origin = Point::from(truth.position);
    for position in positions.iter_mut() {
        position.distance_from_correct = Some(distance(Point::from(position.position()), origin));
    }

    positions.shuffle(rng);

    let mut truth_label = None;
    for (label, position) in positions.iter_mut().enumerate() {
        position.mc_num = label as u8 + 1;
        if position.path_index == Some(truth.index) {
            truth_label = Some(position.mc_num);
        }
    }

    route.ground_truth_position = Some(GroundTruth {
        path_index: truth.index,
        panoid: truth.panoid.clone(),
        latitude: truth.position.lat,
        longitude: truth.position.lng,
        mc_index: truth_label,
        extra: Map::new(),
    });
    route.multiple_choice_positions = positions;

    Ok(())
}
