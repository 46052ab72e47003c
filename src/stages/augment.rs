use codec::Route;
use log::debug;
use std::path::PathBuf;

use crate::graph::Augmenter;
use crate::pipeline::{Outcome, Stage};

/// Bridges the wide steps of every route through an [`Augmenter`],
/// writing the grown graph once all routes are processed.
#[derive(Debug)]
pub struct AugmentStage {
    augmenter: Augmenter,
    nodes: PathBuf,
    links: PathBuf,
}

impl AugmentStage {
    pub fn new(augmenter: Augmenter, nodes: PathBuf, links: PathBuf) -> Self {
        AugmentStage {
            augmenter,
            nodes,
            links,
        }
    }

    pub fn augmenter(&self) -> &Augmenter {
        &self.augmenter
    }
}

impl Stage for AugmentStage {
    fn name(&self) -> &'static str {
        "augment"
    }

    fn apply(&mut self, mut route: Route) -> crate::Result<Outcome> {
        let inserted = self.augmenter.augment(&mut route)?;
        debug!("Route {} gained {inserted} steps", route.route_id);

        Ok(Outcome::Keep(route))
    }

    fn finish(&mut self) -> crate::Result<()> {
        self.augmenter.graph().write(&self.nodes, &self.links)?;
        Ok(())
    }
}
