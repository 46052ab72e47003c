use codec::TurnLabel;
use std::ops::RangeInclusive;
use strum::{Display, EnumString};

pub const DEFAULT_FORWARD_THRESHOLD: f64 = 45.0;
pub const DEFAULT_RIGHT_BAND: RangeInclusive<f64> = 15.0..=180.0;

/// The label set used for non-forward vertices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Classification {
    /// Every non-forward vertex is a `Turn`.
    #[default]
    Binary,

    /// Non-forward vertices are split into `Left` and `Right`.
    Ternary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnConfig {
    pub classification: Classification,

    /// Clockwise deltas below this, or above its complement, are `Forward`.
    pub forward_threshold: f64,

    /// Clockwise deltas labelled `Right` under [`Classification::Ternary`].
    pub right_band: RangeInclusive<f64>,
}

impl Default for TurnConfig {
    fn default() -> Self {
        TurnConfig {
            classification: Classification::default(),
            forward_threshold: DEFAULT_FORWARD_THRESHOLD,
            right_band: DEFAULT_RIGHT_BAND,
        }
    }
}

impl TurnConfig {
    /// Labels the clockwise delta between an incoming and outgoing bearing.
    pub fn classify(&self, delta: f64) -> TurnLabel {
        if delta < self.forward_threshold || delta > 360.0 - self.forward_threshold {
            return TurnLabel::Forward;
        }

        match self.classification {
            Classification::Binary => TurnLabel::Turn,
            Classification::Ternary if self.right_band.contains(&delta) => TurnLabel::Right,
            Classification::Ternary => TurnLabel::Left,
        }
    }
}
