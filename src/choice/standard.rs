use codec::{ChoicePosition, Route, Turn};
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::Map;

use crate::choice::{ChoiceError, check_count};

pub const DEFAULT_MIN_PATH_LEN: usize = 20;
pub const DEFAULT_CHOICES: usize = 3;

/// Nearest distance, in steps, a gap-filling candidate keeps from the
/// lower and upper candidate of its gap.
const GAP_LOWER_MARGIN: usize = 5;
const GAP_UPPER_MARGIN: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct StandardConfig {
    pub min_path_len: usize,
    pub choices: usize,
}

impl Default for StandardConfig {
    fn default() -> Self {
        StandardConfig {
            min_path_len: DEFAULT_MIN_PATH_LEN,
            choices: DEFAULT_CHOICES,
        }
    }
}

/// Picks the sorted step indices offered as choices on a path of `len` steps.
///
/// One candidate always lies within the last four steps. The step
/// preceding each turn follows, latest turn first, unless a candidate
/// is already adjacent to it. Paths without turns take steps at a third
/// and two thirds of their length instead. Remaining slots are filled
/// inside the widest gap between candidates.
pub fn candidate_indices<R: Rng + ?Sized>(
    turns: &[Turn],
    len: usize,
    choices: usize,
    rng: &mut R,
) -> Result<Vec<usize>, ChoiceError> {
    if len == 0 {
        return Err(ChoiceError::TooShort { len, min: 1 });
    }

    let mut candidates = vec![len.saturating_sub(rng.gen_range(1..=4))];

    if turns.is_empty() {
        candidates.extend(
            [0.33, 0.66].map(|fraction| (len as f64 * fraction).round_ties_even() as usize),
        );
    } else {
        for turn in turns.iter().rev() {
            let index = turn.index.saturating_sub(1);
            let adjacent = candidates.iter().any(|chosen| chosen.abs_diff(index) <= 1);

            if index < len && !adjacent {
                candidates.push(index);
            }
        }
    }

    candidates.sort_unstable();
    candidates.dedup();

    while candidates.len() < choices {
        let widest = candidates
            .iter()
            .enumerate()
            .map(|(position, index)| match position {
                0 => *index,
                _ => index - candidates[position - 1],
            })
            .enumerate()
            .fold((0, 0), |(best, width), (position, gap)| {
                if gap > width { (position, gap) } else { (best, width) }
            })
            .0;

        let lower = match widest {
            0 => 0,
            _ => candidates[widest - 1],
        };
        let upper = candidates[widest];

        let (first, last) = (lower + GAP_LOWER_MARGIN, upper.saturating_sub(GAP_UPPER_MARGIN));
        if first > last {
            return Err(ChoiceError::NoRoom { lower, upper });
        }

        let index = rng.gen_range(first..=last);
        debug!("Filling gap between {lower} and {upper} with {index}");

        if let Err(position) = candidates.binary_search(&index) {
            candidates.insert(position, index);
        }
    }

    Ok(candidates.split_off(candidates.len() - choices.min(candidates.len())))
}

/// Stores three shuffled, labelled choice positions upon the route.
pub fn select_standard<R: Rng + ?Sized>(
    route: &mut Route,
    config: &StandardConfig,
    rng: &mut R,
) -> Result<(), ChoiceError> {
    check_count(config.choices)?;

    let waypoints = route.waypoints();
    if waypoints.len() < config.min_path_len {
        return Err(ChoiceError::TooShort {
            len: waypoints.len(),
            min: config.min_path_len,
        });
    }

    let mut indices = candidate_indices(route.turn_list(), waypoints.len(), config.choices, rng)?;
    indices.shuffle(rng);

    route.multiple_choice_positions = indices
        .into_iter()
        .enumerate()
        .map(|(label, index)| {
            let waypoint = &waypoints[index];
            ChoicePosition {
                panoid: waypoint.panoid.clone(),
                latitude: waypoint.position.lat,
                longitude: waypoint.position.lng,
                on_path: true,
                mc_num: label as u8 + 1,
                path_index: Some(index),
                distance_from_correct: None,
                extra: Map::new(),
            }
        })
        .collect();

    Ok(())
}
