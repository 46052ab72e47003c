use codec::{PanoId, PanoramaMapping, Route};
use indexmap::IndexSet;
use log::{debug, info, warn};
use measure_time::info_time;
use rustc_hash::FxHasher;
use strum::{Display, EnumString};

use std::hash::BuildHasherDefault;

use crate::graph::{Conflict, FxIndexMap, Graph, Heading, Node};

type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;

/// Where the consolidated graph takes its links from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ConsolidationMode {
    /// Merge the links of every original node onto its canonical node.
    #[default]
    Graph,

    /// Build a graph holding only the steps walked by the routes.
    RouteDerived,
}

#[derive(Debug)]
pub struct Consolidation {
    pub graph: Graph,
    pub routes: Vec<Route>,

    /// Routes excluded from the output, by identifier.
    pub skipped: Vec<String>,
}

/// Consolidates graphs and routes under a panorama mapping.
pub struct Consolidator<'a> {
    pub(crate) mapping: &'a PanoramaMapping,

    /// Canonical identifier to its original identifiers, both in
    /// order of first appearance within the mapping.
    pub(crate) groups: FxIndexMap<PanoId, Vec<PanoId>>,
}

impl<'a> Consolidator<'a> {
    pub fn new(mapping: &'a PanoramaMapping) -> Self {
        let mut groups: FxIndexMap<PanoId, Vec<PanoId>> = FxIndexMap::default();
        for (original, canonical) in mapping {
            groups
                .entry(canonical.clone())
                .or_default()
                .push(original.clone());
        }

        debug!("Mapping folds {} panoramas into {}", mapping.len(), groups.len());
        Consolidator { mapping, groups }
    }

    pub fn groups(&self) -> &FxIndexMap<PanoId, Vec<PanoId>> {
        &self.groups
    }

    pub fn canonical(&self, original: &PanoId) -> Option<&PanoId> {
        self.mapping.get(original)
    }

    /// The first original node of a canonical group present in `graph`.
    pub(crate) fn representative<'g>(&self, canonical: &PanoId, graph: &'g Graph) -> Option<&'g Node> {
        self.groups
            .get(canonical)?
            .iter()
            .find_map(|member| graph.node(member))
    }

    /// Builds the consolidated graph from every node of `old`.
    ///
    /// Each canonical node takes the yaw and position of its
    /// representative, and the union of its members' links re-resolved
    /// through the mapping. Links into the same canonical node are dropped.
    pub fn consolidate_graph(&self, old: &Graph) -> Graph {
        info_time!("Consolidating graph of {} nodes", old.len());
        let mut graph = Graph::with_conflict(Conflict::Overwrite);

        for canonical in self.groups.keys() {
            match self.representative(canonical, old) {
                Some(node) => {
                    if let Err(err) = graph.add_node(canonical.clone(), node.yaw, node.lat(), node.lng()) {
                        warn!("Could not add canonical panorama {canonical}: {err}");
                    }
                }
                None => warn!("No member of canonical panorama {canonical} is in the graph"),
            }
        }

        let mut dropped = 0;
        for (canonical, members) in &self.groups {
            if !graph.contains(canonical) {
                continue;
            }

            let mut candidates: FxIndexMap<PanoId, FxIndexSet<Heading>> = FxIndexMap::default();
            for node in members.iter().filter_map(|member| old.node(member)) {
                for (heading, neighbor) in &node.neighbors {
                    match self.mapping.get(neighbor) {
                        Some(target) if target == canonical => {}
                        Some(target) => {
                            candidates.entry(target.clone()).or_default().insert(*heading);
                        }
                        None => {
                            debug!("Dropping link {} -> {neighbor}, target is unmapped", node.id);
                            dropped += 1;
                        }
                    }
                }
            }

            for (target, headings) in candidates {
                for heading in headings {
                    if let Err(err) = graph.add_edge(canonical, &target, heading) {
                        warn!("Dropping link {canonical} -> {target}: {err}");
                        dropped += 1;
                    }
                }
            }
        }

        if dropped > 0 {
            warn!("Dropped {dropped} links with no consolidated target");
        }

        info!(
            "Consolidated graph holds {} nodes and {} edges",
            graph.len(),
            graph.edge_count()
        );
        graph
    }

    /// Consolidates the graph and every route. Routes which cannot
    /// be rewritten are logged and excluded.
    pub fn run(&self, old: &Graph, routes: Vec<Route>, mode: ConsolidationMode) -> Consolidation {
        info_time!("Consolidating {} routes ({mode})", routes.len());

        let mut graph = match mode {
            ConsolidationMode::Graph => self.consolidate_graph(old),
            ConsolidationMode::RouteDerived => Graph::with_conflict(Conflict::Overwrite),
        };

        let mut consolidated = Vec::with_capacity(routes.len());
        let mut skipped = Vec::new();

        for route in routes {
            let route_id = route.route_id.to_string();
            let outcome = match mode {
                ConsolidationMode::Graph => self.rewrite_route(route, &graph),
                ConsolidationMode::RouteDerived => self.derive_route(route, old, &mut graph),
            };

            match outcome {
                Ok(route) => consolidated.push(route),
                Err(err) => {
                    warn!("Skipping route {route_id}: {err}");
                    skipped.push(route_id);
                }
            }
        }

        info!(
            "Consolidated {} routes, skipped {}",
            consolidated.len(),
            skipped.len()
        );

        Consolidation {
            graph,
            routes: consolidated,
            skipped,
        }
    }
}
