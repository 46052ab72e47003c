use codec::{LatLng, PanoId, PathEntry, Route};
use geometry::bearing;
use log::debug;

use crate::consolidate::{ConsolidateError, Consolidator};
use crate::graph::{Graph, Heading};
use crate::route::{Collapsed, collapse_consecutive, resample};

impl Consolidator<'_> {
    fn translate(&self, original: &PanoId) -> Result<PanoId, ConsolidateError> {
        self.canonical(original)
            .cloned()
            .ok_or_else(|| ConsolidateError::Unmapped(original.clone()))
    }

    /// Moves the route onto canonical identifiers, collapsing the
    /// consecutive repeats introduced by merged panoramas. Every index
    /// and per-step field is resampled to match, and per-step fields not
    /// covering every step are cleared. Returns the kept indices of the
    /// original steps.
    fn collapse(&self, route: &mut Route) -> Result<Vec<usize>, ConsolidateError> {
        let translated = route
            .route_panoids
            .iter()
            .map(|panoid| self.translate(panoid))
            .collect::<Result<Vec<_>, _>>()?;

        let Collapsed { kept, remap } = collapse_consecutive(&translated);

        let truth = route
            .ground_truth_position
            .as_ref()
            .and_then(|truth| truth.panoid.as_ref())
            .map(|panoid| self.translate(panoid))
            .transpose()?;

        let choices = route
            .multiple_choice_positions
            .iter()
            .map(|choice| choice.panoid.as_ref().map(|panoid| self.translate(panoid)).transpose())
            .collect::<Result<Vec<_>, _>>()?;

        remap.apply(route)?;

        if let Some(position) = route.ground_truth_position.as_mut() {
            position.panoid = truth;
        }

        for (choice, panoid) in route.multiple_choice_positions.iter_mut().zip(choices) {
            choice.panoid = panoid;
        }

        match route.headings.len() == translated.len() {
            true => route.headings = resample(&route.headings, &kept),
            false => route.headings.clear(),
        }

        route.route_panoids = resample(&translated, &kept);

        match route.path.len() == translated.len() {
            true => {
                route.path = resample(&route.path, &kept)
                    .into_iter()
                    .zip(&route.route_panoids)
                    .enumerate()
                    .map(|(index, (entry, panoid))| PathEntry {
                        pano_id: Some(panoid.clone()),
                        ..entry.reindexed(index)
                    })
                    .collect();
            }
            false => route.path.clear(),
        }

        route.directions.clear();
        route.corners = None;
        route.cumulative_distances.clear();

        Ok(kept)
    }

    /// Rewrites a route onto the consolidated `graph`.
    ///
    /// Waypoints are taken from the consolidated nodes, and every step
    /// must be linked to the next within the graph.
    pub fn rewrite_route(&self, mut route: Route, graph: &Graph) -> Result<Route, ConsolidateError> {
        self.collapse(&mut route)?;

        route.lat_lng_path = route
            .route_panoids
            .iter()
            .map(|panoid| {
                graph
                    .position(panoid)
                    .map(LatLng::from)
                    .ok_or_else(|| ConsolidateError::MissingNode(panoid.clone()))
            })
            .collect::<Result<_, _>>()?;

        place_path(&mut route);
        route.image_list = image_list(&route.route_panoids, graph)?;
        Ok(route)
    }

    /// Rewrites a route and adds its steps into `graph`.
    ///
    /// Waypoints keep the route's recorded positions. Nodes take the yaw
    /// of their representative within `old`, and each step is linked at
    /// the integral bearing between its waypoints.
    pub fn derive_route(
        &self,
        mut route: Route,
        old: &Graph,
        graph: &mut Graph,
    ) -> Result<Route, ConsolidateError> {
        let steps = route.route_panoids.len();
        if !route.is_aligned() {
            return Err(ConsolidateError::Misaligned {
                panoids: steps,
                waypoints: route.lat_lng_path.len(),
            });
        }

        let positions = route.lat_lng_path.clone();
        let kept = self.collapse(&mut route)?;
        route.lat_lng_path = resample(&positions, &kept);
        place_path(&mut route);

        for (panoid, position) in route.route_panoids.iter().zip(&route.lat_lng_path) {
            if graph.contains(panoid) {
                continue;
            }

            let yaw = self
                .representative(panoid, old)
                .map(|node| node.yaw)
                .ok_or_else(|| ConsolidateError::MissingNode(panoid.clone()))?;

            graph.add_node(panoid.clone(), yaw, position.lat, position.lng)?;
        }

        let points = route.points();
        for (index, pair) in route.route_panoids.windows(2).enumerate() {
            let heading = Heading::from_bearing(bearing(points[index], points[index + 1]));
            graph.add_edge(&pair[0], &pair[1], heading)?;
        }

        route.image_list = image_list(&route.route_panoids, graph)?;
        debug!("Derived {} steps from route {}", steps, route.route_id);
        Ok(route)
    }
}

/// Positions the panorama of every path entry at its waypoint.
fn place_path(route: &mut Route) {
    for (entry, position) in route.path.iter_mut().zip(&route.lat_lng_path) {
        entry.pano_lat = Some(position.lat);
        entry.pano_lng = Some(position.lng);
    }
}

/// The `{panoid}_{heading}` image key of every step.
///
/// Each step is keyed by the heading linking it to the next. The final
/// step takes its linked heading closest to the previous transition,
/// or to its own yaw on a single-step route, and keeps the target
/// heading when it has no links.
pub(crate) fn image_list(panoids: &[PanoId], graph: &Graph) -> Result<Vec<String>, ConsolidateError> {
    let mut images = Vec::with_capacity(panoids.len());
    let mut previous: Option<Heading> = None;

    for (index, panoid) in panoids.iter().enumerate() {
        let heading = match panoids.get(index + 1) {
            Some(next) => graph.heading_to(panoid, next).ok_or_else(|| {
                ConsolidateError::MissingLink {
                    from: panoid.clone(),
                    to: next.clone(),
                }
            })?,
            None => {
                let target = match previous {
                    Some(heading) => heading,
                    None => graph
                        .node(panoid)
                        .map(|node| node.yaw)
                        .ok_or_else(|| ConsolidateError::MissingNode(panoid.clone()))?,
                };

                graph
                    .closest_heading(panoid, f64::from(target))
                    .unwrap_or(target)
            }
        };

        images.push(format!("{panoid}_{heading}"));
        previous = Some(heading);
    }

    Ok(images)
}
