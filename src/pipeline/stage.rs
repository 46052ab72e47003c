use codec::Route;

/// What a stage decided for a single route.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The transformed route, written to the output.
    Keep(Route),

    /// The route is left out of the output for the given reason.
    Skip(String),
}

/// A transformation applied to one route at a time.
///
/// Errors are fatal to the route only, the runner logs and excludes it.
pub trait Stage {
    fn name(&self) -> &'static str;

    fn apply(&mut self, route: Route) -> crate::Result<Outcome>;

    /// Called once every route has been processed and written.
    fn finish(&mut self) -> crate::Result<()> {
        Ok(())
    }
}
