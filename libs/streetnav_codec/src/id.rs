use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

/// Identifier of a panorama, either as crawled or as canonicalised
/// by the external lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanoId(String);

impl PanoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier for a point interpolated between two panoramas,
    /// keyed by its position.
    pub fn synthetic(lat: f64, lng: f64) -> Self {
        Self(format!("panoid_{lat:?}_{lng:?}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier can be written into a flat graph file.
    pub fn is_representable(&self) -> bool {
        !self.0.contains([',', '\n', '\r'])
    }
}

impl Display for PanoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PanoId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PanoId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PanoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
