//! Route records, as exchanged between pipeline stages.
//!
//! Only the keys read or written by a stage are modelled. Every other
//! key of a record is kept in an `extra` map and written back as-is,
//! so stages can be chained over records produced by external tools.

use geo::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use strum::{Display as StrumDisplay, EnumString};

use crate::id::PanoId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteId {
    Number(i64),
    Text(String),
}

impl Display for RouteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteId::Number(id) => write!(f, "{id}"),
            RouteId::Text(id) => f.write_str(id),
        }
    }
}

/// A waypoint coordinate. Written as a `[lat, lng]` pair, read from
/// either a pair or an object keyed by `pano_lat`/`pano_lng` or `lat`/`lng`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "LatLngRepr", into = "(f64, f64)")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LatLngRepr {
    Pair(f64, f64),
    Panorama { pano_lat: f64, pano_lng: f64 },
    Plain { lat: f64, lng: f64 },
}

impl From<LatLngRepr> for LatLng {
    fn from(value: LatLngRepr) -> Self {
        match value {
            LatLngRepr::Pair(lat, lng) => LatLng { lat, lng },
            LatLngRepr::Panorama { pano_lat, pano_lng } => LatLng {
                lat: pano_lat,
                lng: pano_lng,
            },
            LatLngRepr::Plain { lat, lng } => LatLng { lat, lng },
        }
    }
}

impl From<LatLng> for (f64, f64) {
    fn from(value: LatLng) -> Self {
        (value.lat, value.lng)
    }
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }
}

impl From<LatLng> for Point {
    fn from(value: LatLng) -> Self {
        Point::new(value.lng, value.lat)
    }
}

impl From<Point> for LatLng {
    fn from(value: Point) -> Self {
        LatLng {
            lat: value.y(),
            lng: value.x(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay, EnumString)]
pub enum TurnLabel {
    Forward,
    Turn,
    Left,
    Right,
}

/// A non-forward vertex of a path, written as `[index, "Label"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, TurnLabel)", into = "(usize, TurnLabel)")]
pub struct Turn {
    pub index: usize,
    pub label: TurnLabel,
}

impl From<(usize, TurnLabel)> for Turn {
    fn from((index, label): (usize, TurnLabel)) -> Self {
        Turn { index, label }
    }
}

impl From<Turn> for (usize, TurnLabel) {
    fn from(value: Turn) -> Self {
        (value.index, value.label)
    }
}

/// The classification of a single interior path vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    pub vertex: usize,
    pub direction: TurnLabel,
    pub bearing_1: f64,
    pub bearing_2: f64,
    pub panoid_start: Option<PanoId>,
    pub panoid_middle: Option<PanoId>,
    pub panoid_end: Option<PanoId>,
}

/// A per-step entry of the richer `path` representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEntry {
    pub pano_id: Option<PanoId>,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pano_lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pano_lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idx: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_to_prev: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_to_next: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PathEntry {
    /// A bare entry for a synthetic step at `position`.
    pub fn interpolated(pano_id: PanoId, position: LatLng, idx: usize) -> Self {
        PathEntry {
            pano_id: Some(pano_id),
            lat: position.lat,
            lng: position.lng,
            pano_lat: None,
            pano_lng: None,
            idx: Some(idx),
            distance_to_prev: None,
            distance_to_next: None,
            extra: Map::new(),
        }
    }

    /// The entry moved to step `index`. Its neighbour distances no
    /// longer hold and are dropped.
    pub fn reindexed(self, index: usize) -> Self {
        PathEntry {
            idx: self.idx.map(|_| index),
            distance_to_prev: None,
            distance_to_next: None,
            ..self
        }
    }

    /// The panorama position where known, else the requested position.
    pub fn position(&self) -> LatLng {
        match (self.pano_lat, self.pano_lng) {
            (Some(lat), Some(lng)) => LatLng::new(lat, lng),
            _ => LatLng::new(self.lat, self.lng),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoicePosition {
    #[serde(alias = "pano_id")]
    pub panoid: Option<PanoId>,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng")]
    pub longitude: f64,
    #[serde(default = "on_path_default")]
    pub on_path: bool,
    pub mc_num: u8,
    #[serde(default, alias = "idx", skip_serializing_if = "Option::is_none")]
    pub path_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_correct: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn on_path_default() -> bool {
    true
}

impl ChoicePosition {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruth {
    pub path_index: usize,
    pub panoid: Option<PanoId>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_index: Option<u8>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GroundTruth {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerRecord {
    pub index: usize,
    pub turn_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub route_id: RouteId,
    #[serde(default)]
    pub lat_lng_path: Vec<LatLng>,
    #[serde(default)]
    pub route_panoids: Vec<PanoId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_heading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_heading: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headings: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directions: Vec<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turns: Option<Vec<Turn>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corners: Option<Vec<CornerRecord>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cumulative_distances: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub multiple_choice_positions: Vec<ChoicePosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_truth_position: Option<GroundTruth>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_list: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single step of a route, regardless of its representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub index: usize,
    pub panoid: Option<PanoId>,
    pub position: LatLng,
}

impl Route {
    pub fn new(route_id: RouteId) -> Self {
        Route {
            route_id,
            lat_lng_path: vec![],
            route_panoids: vec![],
            path: vec![],
            start_heading: None,
            end_heading: None,
            headings: vec![],
            directions: vec![],
            turns: None,
            corners: None,
            cumulative_distances: vec![],
            multiple_choice_positions: vec![],
            ground_truth_position: None,
            image_list: vec![],
            extra: Map::new(),
        }
    }

    /// The route's steps, taken from `path` when present and otherwise
    /// from `lat_lng_path` paired with `route_panoids`.
    pub fn waypoints(&self) -> Vec<Waypoint> {
        if !self.path.is_empty() {
            return self
                .path
                .iter()
                .enumerate()
                .map(|(index, entry)| Waypoint {
                    index,
                    panoid: entry.pano_id.clone(),
                    position: entry.position(),
                })
                .collect();
        }

        self.lat_lng_path
            .iter()
            .enumerate()
            .map(|(index, position)| Waypoint {
                index,
                panoid: self.route_panoids.get(index).cloned(),
                position: *position,
            })
            .collect()
    }

    /// The waypoint positions as `(lng, lat)` points.
    pub fn points(&self) -> Vec<Point> {
        self.lat_lng_path.iter().copied().map(Point::from).collect()
    }

    /// Whether `route_panoids` and `lat_lng_path` describe the same steps.
    pub fn is_aligned(&self) -> bool {
        self.route_panoids.len() == self.lat_lng_path.len()
    }

    pub fn turn_list(&self) -> &[Turn] {
        self.turns.as_deref().unwrap_or(&[])
    }
}
