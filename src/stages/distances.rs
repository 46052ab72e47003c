use codec::{ChoicePosition, Route};
use geo::Point;
use geometry::{cumulative_distances, segment_lengths};
use serde_json::Value;

use crate::pipeline::{Outcome, Stage, StageError};
use crate::route::OutOfRange;

const DISTANCE_TO: &str = "distance_to_";
const STALE_DISTANCE: &str = "distance_from_";

/// Stores the along-path distances of every route and of its choices.
///
/// Routes with a `path` record the distance to each neighbouring entry
/// upon the entries. Otherwise the cumulative distance of every
/// waypoint is stored upon the route.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceStage;

impl Stage for DistanceStage {
    fn name(&self) -> &'static str {
        "distances"
    }

    fn apply(&mut self, mut route: Route) -> crate::Result<Outcome> {
        let cumulative = match route.path.is_empty() {
            false => {
                let points = route
                    .path
                    .iter()
                    .map(|entry| Point::from(entry.position()))
                    .collect::<Vec<_>>();

                let segments = segment_lengths(&points);
                for (index, entry) in route.path.iter_mut().enumerate() {
                    entry.distance_to_prev = index.checked_sub(1).map(|prev| segments[prev]);
                    entry.distance_to_next = segments.get(index).copied();
                }

                cumulative_distances(&points)
            }
            true if route.lat_lng_path.is_empty() => return Err(StageError::EmptyPath.into()),
            true => {
                route.cumulative_distances = cumulative_distances(&route.points());
                route.cumulative_distances.clone()
            }
        };

        along_path_distances(&mut route.multiple_choice_positions, &cumulative)?;
        Ok(Outcome::Keep(route))
    }
}

/// Records `distance_to_{label}` upon every on-path choice, the distance
/// along the path to each other on-path choice. Previously recorded
/// straight-line `distance_from_*` keys are removed.
pub fn along_path_distances(
    choices: &mut [ChoicePosition],
    cumulative: &[f64],
) -> Result<(), OutOfRange> {
    let travelled = |index: usize| {
        cumulative.get(index).copied().ok_or(OutOfRange {
            index,
            len: cumulative.len(),
        })
    };

    let placed = choices
        .iter()
        .filter_map(|choice| choice.path_index.map(|index| (choice.mc_num, index)))
        .map(|(label, index)| travelled(index).map(|distance| (label, distance)))
        .collect::<Result<Vec<_>, _>>()?;

    for choice in choices.iter_mut() {
        let Some(index) = choice.path_index else {
            continue;
        };

        let own = travelled(index)?;
        choice.extra.retain(|key, _| !key.starts_with(STALE_DISTANCE));

        for (label, distance) in &placed {
            if *label != choice.mc_num {
                choice
                    .extra
                    .insert(format!("{DISTANCE_TO}{label}"), Value::from((distance - own).abs()));
            }
        }
    }

    Ok(())
}
