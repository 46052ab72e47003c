use codec::PanoId;
use geo::Point;
use indexmap::IndexMap;
use log::warn;
use rustc_hash::FxHasher;
use strum::{Display, EnumString};

use std::fmt::{Debug, Formatter};
use std::hash::BuildHasherDefault;

use crate::graph::GraphError;

pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// An integral heading in degrees clockwise from due-north, within `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Heading(u16);

impl Heading {
    pub fn new(degrees: i32) -> Self {
        Heading(degrees.rem_euclid(360) as u16)
    }

    /// The heading of a floating bearing, rounded down.
    pub fn from_bearing(bearing: f64) -> Self {
        Heading::new(bearing.floor() as i32)
    }

    pub fn degrees(&self) -> u16 {
        self.0
    }

    /// The adjacent heading, one degree clockwise.
    pub fn next(&self) -> Self {
        Heading::new(self.0 as i32 + 1)
    }
}

impl From<Heading> for f64 {
    fn from(value: Heading) -> Self {
        value.0 as f64
    }
}

impl std::fmt::Display for Heading {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How an insertion that would replace existing data is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Conflict {
    /// Replace the existing data, logging a warning.
    #[default]
    Overwrite,

    /// Refuse the insertion with an error.
    Reject,
}

#[derive(Clone, PartialEq)]
pub struct Node {
    pub id: PanoId,
    pub yaw: Heading,

    /// Position of the panorama, longitude in `x` and latitude in `y`.
    pub position: Point,

    /// Outgoing links, in order of insertion.
    pub neighbors: FxIndexMap<Heading, PanoId>,
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Node {} ({}, {}) with {} neighbors",
            self.id,
            self.lat(),
            self.lng(),
            self.neighbors.len()
        )
    }
}

impl Node {
    pub fn new(id: PanoId, yaw: Heading, lat: f64, lng: f64) -> Self {
        Node {
            id,
            yaw,
            position: Point::new(lng, lat),
            neighbors: FxIndexMap::default(),
        }
    }

    pub fn lat(&self) -> f64 {
        self.position.y()
    }

    pub fn lng(&self) -> f64 {
        self.position.x()
    }
}

/// Panorama graph.
///
/// Owns every node, in order of insertion. Edges refer to their
/// target by identifier, and every target is itself a node.
#[derive(Clone, Default)]
pub struct Graph {
    pub(crate) nodes: FxIndexMap<PanoId, Node>,
    pub(crate) conflict: Conflict,
}

impl Debug for Graph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Graph with Nodes: {}, Edges: {}",
            self.nodes.len(),
            self.edge_count()
        )
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    pub fn with_conflict(conflict: Conflict) -> Self {
        Graph {
            nodes: FxIndexMap::default(),
            conflict,
        }
    }

    pub fn conflict(&self) -> Conflict {
        self.conflict
    }

    /// Inserts a node.
    ///
    /// Re-adding an identifier under [`Conflict::Overwrite`] replaces its
    /// yaw and position, retaining the neighbours already attached to it.
    pub fn add_node(
        &mut self,
        id: PanoId,
        yaw: Heading,
        lat: f64,
        lng: f64,
    ) -> Result<(), GraphError> {
        match self.nodes.get_mut(&id) {
            Some(_) if self.conflict == Conflict::Reject => Err(GraphError::DuplicateNode(id)),
            Some(existing) => {
                warn!("Overwriting attributes of duplicate node {id}");
                existing.yaw = yaw;
                existing.position = Point::new(lng, lat);
                Ok(())
            }
            None => {
                self.nodes.insert(id.clone(), Node::new(id, yaw, lat, lng));
                Ok(())
            }
        }
    }

    /// Links `from` to `to` at the given heading.
    pub fn add_edge(&mut self, from: &PanoId, to: &PanoId, heading: Heading) -> Result<(), GraphError> {
        if !self.nodes.contains_key(to) {
            return Err(GraphError::MissingNode(to.clone()));
        }

        let conflict = self.conflict;
        let node = self
            .nodes
            .get_mut(from)
            .ok_or_else(|| GraphError::MissingNode(from.clone()))?;

        match node.neighbors.get(&heading) {
            Some(existing) if existing != to => {
                if conflict == Conflict::Reject {
                    return Err(GraphError::HeadingCollision {
                        from: from.clone(),
                        heading,
                        existing: existing.clone(),
                        replacement: to.clone(),
                    });
                }

                warn!("Heading {heading} of {from} relinked from {existing} to {to}");
                node.neighbors.insert(heading, to.clone());
            }
            Some(_) => {}
            None => {
                node.neighbors.insert(heading, to.clone());
            }
        }

        Ok(())
    }

    /// Links `from` to `to` at the first heading, starting from `heading`
    /// and moving clockwise one degree at a time, which is either vacant
    /// or already links to `to`. Returns the heading used.
    pub fn add_edge_free_heading(
        &mut self,
        from: &PanoId,
        to: &PanoId,
        heading: Heading,
    ) -> Result<Heading, GraphError> {
        let node = self
            .nodes
            .get(from)
            .ok_or_else(|| GraphError::MissingNode(from.clone()))?;

        let free = std::iter::successors(Some(heading), |current| Some(current.next()))
            .take(360)
            .find(|candidate| match node.neighbors.get(candidate) {
                Some(existing) => existing == to,
                None => true,
            })
            .ok_or_else(|| GraphError::HeadingsExhausted(from.clone()))?;

        self.add_edge(from, to, free)?;
        Ok(free)
    }

    #[inline]
    pub fn node(&self, id: &PanoId) -> Option<&Node> {
        self.nodes.get(id)
    }

    #[inline]
    pub fn position(&self, id: &PanoId) -> Option<Point> {
        self.nodes.get(id).map(|node| node.position)
    }

    #[inline]
    pub fn contains(&self, id: &PanoId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.neighbors.len()).sum()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Every `(from, heading, to)` link, nodes in insertion order and
    /// each node's links in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&PanoId, Heading, &PanoId)> {
        self.nodes.values().flat_map(|node| {
            node.neighbors
                .iter()
                .map(move |(heading, to)| (&node.id, *heading, to))
        })
    }

    /// The first heading of `from` which links to `to`.
    pub fn heading_to(&self, from: &PanoId, to: &PanoId) -> Option<Heading> {
        self.nodes
            .get(from)?
            .neighbors
            .iter()
            .find_map(|(heading, neighbor)| (neighbor == to).then_some(*heading))
    }

    /// The linked heading of `id` circularly nearest to `target` degrees.
    pub fn closest_heading(&self, id: &PanoId, target: f64) -> Option<Heading> {
        self.nodes.get(id)?.neighbors.keys().copied().min_by(|a, b| {
            let a = geometry::circular_distance(f64::from(*a), target);
            let b = geometry::circular_distance(f64::from(*b), target);
            a.total_cmp(&b)
        })
    }
}
