use codec::Route;

use crate::pipeline::{Outcome, Stage, StageError};
use crate::turn::{TurnConfig, detect_route};

/// Stores the directions and turn list of every route.
#[derive(Debug, Clone, Default)]
pub struct TurnStage {
    config: TurnConfig,
}

impl TurnStage {
    pub fn new(config: TurnConfig) -> Self {
        TurnStage { config }
    }
}

impl Stage for TurnStage {
    fn name(&self) -> &'static str {
        "turns"
    }

    fn apply(&mut self, mut route: Route) -> crate::Result<Outcome> {
        if route.lat_lng_path.is_empty() {
            return Err(StageError::EmptyPath.into());
        }

        detect_route(&mut route, &self.config);
        Ok(Outcome::Keep(route))
    }
}
