use codec::Route;
use log::debug;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("path index {index} lies outside a path of {len} steps")]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Maps each step index of a path onto its index after a transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRemap {
    table: Vec<usize>,
}

impl IndexRemap {
    pub fn identity(len: usize) -> Self {
        IndexRemap {
            table: (0..len).collect(),
        }
    }

    /// A remap where old index `i` becomes `table[i]`.
    pub fn from_table(table: Vec<usize>) -> Self {
        IndexRemap { table }
    }

    pub fn get(&self, old: usize) -> Result<usize, OutOfRange> {
        self.table.get(old).copied().ok_or(OutOfRange {
            index: old,
            len: self.table.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Rewrites every field of the route that refers to a step by its
    /// index: the ground truth, on-path choice positions, turns,
    /// directions and corners. Off-path positions are untouched.
    ///
    /// The route is left unmodified if any index is out of range.
    pub fn apply(&self, route: &mut Route) -> Result<(), OutOfRange> {
        let truth = route
            .ground_truth_position
            .as_ref()
            .map(|truth| self.get(truth.path_index))
            .transpose()?;

        let choices = route
            .multiple_choice_positions
            .iter()
            .map(|choice| choice.path_index.map(|index| self.get(index)).transpose())
            .collect::<Result<Vec<_>, _>>()?;

        let turns = self.all(route.turn_list().iter().map(|turn| turn.index))?;
        let vertices = self.all(route.directions.iter().map(|direction| direction.vertex))?;
        let corners = self.all(route.corners.iter().flatten().map(|corner| corner.index))?;

        if let (Some(position), Some(index)) = (route.ground_truth_position.as_mut(), truth) {
            position.path_index = index;
        }

        for (choice, index) in route.multiple_choice_positions.iter_mut().zip(choices) {
            choice.path_index = index;
        }

        for (turn, index) in route.turns.iter_mut().flatten().zip(turns) {
            turn.index = index;
        }

        for (direction, index) in route.directions.iter_mut().zip(vertices) {
            direction.vertex = index;
        }

        for (corner, index) in route.corners.iter_mut().flatten().zip(corners) {
            corner.index = index;
        }

        Ok(())
    }

    fn all(&self, indices: impl Iterator<Item = usize>) -> Result<Vec<usize>, OutOfRange> {
        indices.map(|index| self.get(index)).collect()
    }
}

/// The outcome of collapsing consecutive repeats out of a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collapsed {
    /// Index of the first element of each run, in order.
    pub kept: Vec<usize>,

    /// Every element's run, as an index into `kept`.
    pub remap: IndexRemap,
}

pub fn collapse_consecutive<T: PartialEq>(items: &[T]) -> Collapsed {
    let mut kept: Vec<usize> = Vec::with_capacity(items.len());
    let mut table = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let repeated = kept.last().is_some_and(|last| items[*last] == *item);
        if !repeated {
            kept.push(index);
        }

        table.push(kept.len() - 1);
    }

    Collapsed {
        kept,
        remap: IndexRemap::from_table(table),
    }
}

/// The elements of `values` at each of the `kept` indices, skipping
/// any index past its end.
pub fn resample<T: Clone>(values: &[T], kept: &[usize]) -> Vec<T> {
    kept.iter()
        .filter_map(|index| values.get(*index))
        .cloned()
        .collect()
}

/// Collapses consecutive repeated waypoints of a route.
///
/// Per-step fields are resampled alongside the path. The ground truth
/// and choice positions are dropped, and fields derived from the path
/// shape are cleared so they are recomputed downstream. Returns the
/// number of removed steps.
pub fn dedup_path(route: &mut Route) -> usize {
    let steps = route.lat_lng_path.len();
    let Collapsed { kept, .. } = collapse_consecutive(&route.lat_lng_path);

    if kept.len() == steps {
        return 0;
    }

    route.lat_lng_path = resample(&route.lat_lng_path, &kept);
    route.route_panoids = resample(&route.route_panoids, &kept);

    if route.headings.len() == steps {
        route.headings = resample(&route.headings, &kept);
    }

    if route.path.len() == steps {
        route.path = resample(&route.path, &kept);
    }

    if route.image_list.len() == steps {
        route.image_list = resample(&route.image_list, &kept);
    }

    route.ground_truth_position = None;
    route.multiple_choice_positions.clear();

    route.directions.clear();
    route.turns = None;
    route.corners = None;
    route.cumulative_distances.clear();

    let removed = steps - kept.len();
    debug!("Route {} lost {removed} repeated steps", route.route_id);
    removed
}
