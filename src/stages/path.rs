use codec::{CornerRecord, LatLng, PanoId, PathEntry, Route};
use geometry::{Subdivision, bearing, corners, densify, smooth};
use log::debug;

use crate::pipeline::{Outcome, Stage, StageError};
use crate::route::{IndexRemap, dedup_path};

pub const DEFAULT_DENSIFY_SPACING: f64 = 10.0;
pub const DEFAULT_CORNER_EPSILON: f64 = 5e-5;
pub const DEFAULT_SMOOTH_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensifyConfig {
    /// Largest gap in meters left between consecutive waypoints.
    pub spacing: f64,
    pub subdivision: Subdivision,
}

impl Default for DensifyConfig {
    fn default() -> Self {
        DensifyConfig {
            spacing: DEFAULT_DENSIFY_SPACING,
            subdivision: Subdivision::default(),
        }
    }
}

/// Interpolates waypoints into the wide steps of every route, storing
/// the heading of each resulting step.
#[derive(Debug, Clone, Default)]
pub struct DensifyStage {
    config: DensifyConfig,
}

impl DensifyStage {
    pub fn new(config: DensifyConfig) -> Self {
        DensifyStage { config }
    }
}

impl Stage for DensifyStage {
    fn name(&self) -> &'static str {
        "densify"
    }

    fn apply(&mut self, mut route: Route) -> crate::Result<Outcome> {
        let steps = route.lat_lng_path.len();
        if steps == 0 {
            return Err(StageError::EmptyPath.into());
        }

        let panoids = !route.route_panoids.is_empty();
        if panoids && !route.is_aligned() {
            return Err(StageError::Misaligned {
                panoids: route.route_panoids.len(),
                waypoints: steps,
            }
            .into());
        }

        let points = route.points();
        let end_heading = route.end_heading.unwrap_or_else(|| match points.len() {
            0 | 1 => 0.0,
            len => bearing(points[len - 2], points[len - 1]),
        });

        let dense = densify(&points, end_heading, self.config.spacing, self.config.subdivision)?;
        IndexRemap::from_table(dense.origins.clone()).apply(&mut route)?;

        if panoids {
            let mut originals = route.route_panoids.iter();
            route.route_panoids = dense
                .points
                .iter()
                .enumerate()
                .filter_map(|(index, point)| match dense.is_inserted(index) {
                    true => Some(PanoId::synthetic(point.y(), point.x())),
                    false => originals.next().cloned(),
                })
                .collect();
        }

        if route.path.len() == steps {
            let mut originals = std::mem::take(&mut route.path).into_iter();
            route.path = dense
                .points
                .iter()
                .enumerate()
                .filter_map(|(index, point)| match dense.is_inserted(index) {
                    true => Some(PathEntry::interpolated(
                        PanoId::synthetic(point.y(), point.x()),
                        LatLng::from(*point),
                        index,
                    )),
                    false => originals.next().map(|entry| entry.reindexed(index)),
                })
                .collect();
        }

        debug!(
            "Route {} densified from {steps} to {} steps",
            route.route_id,
            dense.points.len()
        );

        route.lat_lng_path = dense.points.into_iter().map(LatLng::from).collect();
        route.headings = dense.headings;
        route.directions.clear();
        route.cumulative_distances.clear();
        route.image_list.clear();

        Ok(Outcome::Keep(route))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerConfig {
    /// Simplification tolerance, in degrees.
    pub epsilon: f64,
}

impl Default for CornerConfig {
    fn default() -> Self {
        CornerConfig {
            epsilon: DEFAULT_CORNER_EPSILON,
        }
    }
}

/// Stores the significant corners of every route's path.
#[derive(Debug, Clone, Default)]
pub struct CornerStage {
    config: CornerConfig,
}

impl CornerStage {
    pub fn new(config: CornerConfig) -> Self {
        CornerStage { config }
    }
}

impl Stage for CornerStage {
    fn name(&self) -> &'static str {
        "corners"
    }

    fn apply(&mut self, mut route: Route) -> crate::Result<Outcome> {
        if route.lat_lng_path.is_empty() {
            return Err(StageError::EmptyPath.into());
        }

        let found = corners(&route.points(), self.config.epsilon)?;
        route.corners = Some(
            found
                .into_iter()
                .map(|corner| CornerRecord {
                    index: corner.index,
                    turn_angle: corner.turn_angle,
                })
                .collect(),
        );

        Ok(Outcome::Keep(route))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothConfig {
    /// Odd number of headings averaged around each step.
    pub window: usize,
}

impl Default for SmoothConfig {
    fn default() -> Self {
        SmoothConfig {
            window: DEFAULT_SMOOTH_WINDOW,
        }
    }
}

/// Replaces the headings of every route with their circular moving average.
#[derive(Debug, Clone, Default)]
pub struct SmoothStage {
    config: SmoothConfig,
}

impl SmoothStage {
    pub fn new(config: SmoothConfig) -> Self {
        SmoothStage { config }
    }
}

impl Stage for SmoothStage {
    fn name(&self) -> &'static str {
        "smooth"
    }

    fn apply(&mut self, mut route: Route) -> crate::Result<Outcome> {
        if route.headings.is_empty() {
            debug!("Route {} has no headings to smooth", route.route_id);
        }

        route.headings = smooth(&route.headings, self.config.window)?;
        Ok(Outcome::Keep(route))
    }
}

/// Collapses consecutive repeated waypoints of every route.
#[derive(Debug, Clone, Copy, Default)]
pub struct DedupStage;

impl Stage for DedupStage {
    fn name(&self) -> &'static str {
        "dedup"
    }

    fn apply(&mut self, mut route: Route) -> crate::Result<Outcome> {
        dedup_path(&mut route);
        Ok(Outcome::Keep(route))
    }
}
