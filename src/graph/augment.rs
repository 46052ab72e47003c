//! Fills wide gaps between consecutive route panoramas with synthetic
//! nodes, so that every step of an augmented route is short.

use codec::{LatLng, PanoId, PathEntry, Route};
use geometry::{Subdivision, densify, distance};
use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::graph::{Graph, GraphError, Heading};
use crate::route::IndexRemap;

pub const DEFAULT_SPACING: f64 = 10.0;
pub const DEFAULT_MIN_GAP: f64 = 15.0;

/// Inserts interpolated panoramas into a graph, one route at a time.
///
/// Samples are cached per `(start, end)` pair for the lifetime of the
/// augmenter, so routes sharing a step also share its synthetic nodes.
#[derive(Debug)]
pub struct Augmenter {
    graph: Graph,
    spacing: f64,
    min_gap: f64,
    samples: FxHashMap<(PanoId, PanoId), Vec<PanoId>>,
}

impl Augmenter {
    pub fn new(graph: Graph, spacing: f64, min_gap: f64) -> Self {
        Augmenter {
            graph,
            spacing,
            min_gap,
            samples: FxHashMap::default(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        info!(
            "Augmented graph holds {} nodes after bridging {} steps",
            self.graph.len(),
            self.samples.len()
        );
        self.graph
    }

    /// The synthetic nodes placed between `start` and `end`, creating
    /// and linking them on first request. Steps shorter than the minimum
    /// gap have no samples.
    pub fn bridge(&mut self, start: &PanoId, end: &PanoId) -> crate::Result<Vec<PanoId>> {
        if start == end {
            return Ok(vec![]);
        }

        let key = (start.clone(), end.clone());
        if let Some(samples) = self.samples.get(&key) {
            return Ok(samples.clone());
        }

        let origin = self
            .graph
            .position(start)
            .ok_or_else(|| GraphError::MissingNode(start.clone()))?;
        let destination = self
            .graph
            .position(end)
            .ok_or_else(|| GraphError::MissingNode(end.clone()))?;

        if distance(origin, destination) < self.min_gap {
            self.samples.insert(key, vec![]);
            return Ok(vec![]);
        }

        let dense = densify(&[origin, destination], 0.0, self.spacing, Subdivision::Ceil)?;
        let heading = Heading::from_bearing(dense.headings[0]);

        let mut samples = Vec::with_capacity(dense.points.len().saturating_sub(2));
        let mut current = start.clone();

        for point in &dense.points[1..dense.points.len() - 1] {
            let id = PanoId::synthetic(point.y(), point.x());
            if !self.graph.contains(&id) {
                self.graph.add_node(id.clone(), heading, point.y(), point.x())?;
            }

            self.graph.add_edge_free_heading(&current, &id, heading)?;
            samples.push(id.clone());
            current = id;
        }

        self.graph.add_edge_free_heading(&current, end, heading)?;
        debug!("Bridged {start} to {end} with {} samples", samples.len());

        self.samples.insert(key, samples.clone());
        Ok(samples)
    }

    /// Rewrites the route to step through every sample between its
    /// panoramas. Path entries of the original steps are kept, samples
    /// get bare entries. Returns the number of inserted steps.
    pub fn augment(&mut self, route: &mut Route) -> crate::Result<usize> {
        let Some(first) = route.route_panoids.first().cloned() else {
            return Ok(0);
        };

        let mut panoids = vec![first];
        let mut path = vec![self.waypoint(route, 0)?];
        let mut table = vec![0];

        for (index, pair) in route.route_panoids.windows(2).enumerate() {
            for sample in self.bridge(&pair[0], &pair[1])? {
                let position = self
                    .graph
                    .position(&sample)
                    .ok_or_else(|| GraphError::MissingNode(sample.clone()))?;

                path.push(LatLng::from(position));
                panoids.push(sample);
            }

            table.push(panoids.len());
            panoids.push(pair[1].clone());
            path.push(self.waypoint(route, index + 1)?);
        }

        let inserted = panoids.len() - route.route_panoids.len();

        IndexRemap::from_table(table.clone()).apply(route)?;

        match route.path.len() == route.route_panoids.len() {
            true => {
                let mut originals = std::mem::take(&mut route.path).into_iter();
                let mut anchors = table.into_iter().peekable();

                route.path = panoids
                    .iter()
                    .zip(&path)
                    .enumerate()
                    .filter_map(|(index, (panoid, position))| match anchors.next_if_eq(&index) {
                        Some(_) => originals.next().map(|entry| entry.reindexed(index)),
                        None => Some(PathEntry::interpolated(panoid.clone(), *position, index)),
                    })
                    .collect();
            }
            false => route.path.clear(),
        }

        route.headings.clear();
        route.directions.clear();
        route.cumulative_distances.clear();
        route.image_list.clear();
        route.route_panoids = panoids;
        route.lat_lng_path = path;
        Ok(inserted)
    }

    /// The recorded position of a route step, falling back to the graph.
    fn waypoint(&self, route: &Route, index: usize) -> crate::Result<LatLng> {
        if let Some(position) = route.lat_lng_path.get(index) {
            return Ok(*position);
        }

        let id = &route.route_panoids[index];
        self.graph
            .position(id)
            .map(LatLng::from)
            .ok_or_else(|| GraphError::MissingNode(id.clone()).into())
    }
}
