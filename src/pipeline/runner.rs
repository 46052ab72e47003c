use codec::json::{read_routes, write_routes};
use codec::{Route, RouteId};
use log::{debug, info, warn};
use measure_time::info_time;
use rustc_hash::FxHashSet;
use std::path::Path;

use crate::pipeline::{Outcome, Stage, StageError};

pub const DEFAULT_CHECKPOINT_EVERY: usize = 10;

/// Counts of a single stage run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Routes carried over from a previous, interrupted run.
    pub resumed: usize,
    pub kept: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn processed(&self) -> usize {
        self.kept + self.skipped + self.failed
    }
}

/// Drives a [`Stage`] over a JSON array of routes, one route at a time.
///
/// Routes already present in the output, by identifier, are carried
/// over as-is and never reprocessed, so an interrupted run resumes
/// where its last checkpoint left off.
#[derive(Debug, Clone)]
pub struct Runner {
    checkpoint_every: usize,
}

impl Default for Runner {
    fn default() -> Self {
        Runner {
            checkpoint_every: DEFAULT_CHECKPOINT_EVERY,
        }
    }
}

impl Runner {
    /// A runner rewriting its output every `checkpoint_every` routes.
    pub fn new(checkpoint_every: usize) -> Result<Self, StageError> {
        if checkpoint_every == 0 {
            return Err(StageError::InvalidCheckpoint);
        }

        Ok(Runner { checkpoint_every })
    }

    pub fn checkpoint_every(&self) -> usize {
        self.checkpoint_every
    }

    pub fn run<S: Stage + ?Sized>(
        &self,
        stage: &mut S,
        input: &Path,
        output: &Path,
    ) -> crate::Result<Summary> {
        info_time!("Running {} over {}", stage.name(), input.display());

        let routes = read_routes(input)?;
        let mut written = match output.exists() {
            true => read_routes(output)?,
            false => vec![],
        };

        let completed = written
            .iter()
            .map(|route| route.route_id.clone())
            .collect::<FxHashSet<RouteId>>();

        let mut summary = Summary {
            resumed: written.len(),
            ..Summary::default()
        };

        if summary.resumed > 0 {
            info!("Resuming {} with {} completed routes", stage.name(), summary.resumed);
        }

        let pending = routes
            .into_iter()
            .filter(|route| !completed.contains(&route.route_id));

        for route in pending {
            self.process(stage, route, &mut written, &mut summary);

            if summary.processed() % self.checkpoint_every == 0 {
                write_routes(output, &written)?;
                debug!("Checkpointed {} routes", written.len());
            }
        }

        write_routes(output, &written)?;
        stage.finish()?;

        info!(
            "{} kept {} routes, skipped {} and failed {} ({} resumed)",
            stage.name(),
            summary.kept,
            summary.skipped,
            summary.failed,
            summary.resumed
        );

        Ok(summary)
    }

    fn process<S: Stage + ?Sized>(
        &self,
        stage: &mut S,
        route: Route,
        written: &mut Vec<Route>,
        summary: &mut Summary,
    ) {
        let id = route.route_id.clone();

        match stage.apply(route) {
            Ok(Outcome::Keep(route)) => {
                written.push(route);
                summary.kept += 1;
            }
            Ok(Outcome::Skip(reason)) => {
                info!("Skipping route {id}: {reason}");
                summary.skipped += 1;
            }
            Err(err) => {
                warn!("Route {id} failed in {}: {err}", stage.name());
                summary.failed += 1;
            }
        }
    }
}
