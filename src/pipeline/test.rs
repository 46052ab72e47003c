use crate::pipeline::*;

use codec::json::{read_routes, write_routes};
use codec::{Route, RouteId};
use fixtures::{ROUTES, fixture_path, scratch_dir};
use std::error::Error;

/// Marks every route it keeps, remembering which routes it saw.
#[derive(Default)]
struct Marker {
    seen: Vec<RouteId>,
    finished: bool,
}

impl Stage for Marker {
    fn name(&self) -> &'static str {
        "marker"
    }

    fn apply(&mut self, mut route: Route) -> crate::Result<Outcome> {
        self.seen.push(route.route_id.clone());
        route.image_list = vec!["marked".to_string()];
        Ok(Outcome::Keep(route))
    }

    fn finish(&mut self) -> crate::Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// Skips numbered routes and fails every other.
struct Picky;

impl Stage for Picky {
    fn name(&self) -> &'static str {
        "picky"
    }

    fn apply(&mut self, route: Route) -> crate::Result<Outcome> {
        match route.route_id {
            RouteId::Number(_) => Ok(Outcome::Skip("numbered".to_string())),
            RouteId::Text(_) => Err(StageError::EmptyPath.into()),
        }
    }
}

#[test_log::test]
fn runs_every_route() -> Result<(), Box<dyn Error>> {
    let output = scratch_dir("runs_every_route").join("out.json");
    let mut stage = Marker::default();

    let summary = Runner::default().run(&mut stage, &fixture_path(ROUTES), &output)?;
    assert_eq!(summary.kept, 2);
    assert_eq!(summary.resumed, 0);
    assert!(stage.finished);

    let routes = read_routes(&output)?;
    assert_eq!(routes.len(), 2);
    assert!(routes.iter().all(|route| route.image_list == ["marked"]));
    Ok(())
}

#[test_log::test]
fn resumes_from_completed_routes() -> Result<(), Box<dyn Error>> {
    let output = scratch_dir("resumes_from_completed_routes").join("out.json");

    let mut completed = read_routes(&fixture_path(ROUTES))?;
    completed.truncate(1);
    completed[0].image_list = vec!["earlier".to_string()];
    write_routes(&output, &completed)?;

    let mut stage = Marker::default();
    let summary = Runner::new(1)?.run(&mut stage, &fixture_path(ROUTES), &output)?;

    assert_eq!(stage.seen, vec![RouteId::Text("r-8".to_string())]);
    assert_eq!(summary.resumed, 1);
    assert_eq!(summary.kept, 1);

    let routes = read_routes(&output)?;
    assert_eq!(routes[0].route_id, RouteId::Number(7));
    assert_eq!(routes[0].image_list, ["earlier"]);
    assert_eq!(routes[1].image_list, ["marked"]);
    Ok(())
}

#[test_log::test]
fn excludes_skipped_and_failed_routes() -> Result<(), Box<dyn Error>> {
    let output = scratch_dir("excludes_skipped_and_failed_routes").join("out.json");

    let summary = Runner::default().run(&mut Picky, &fixture_path(ROUTES), &output)?;
    assert_eq!(
        summary,
        Summary {
            resumed: 0,
            kept: 0,
            skipped: 1,
            failed: 1,
        }
    );

    assert!(read_routes(&output)?.is_empty());
    Ok(())
}

#[test]
fn rejects_empty_checkpoint_interval() {
    assert_eq!(Runner::new(0).err(), Some(StageError::InvalidCheckpoint));
    assert_eq!(Runner::default().checkpoint_every(), DEFAULT_CHECKPOINT_EVERY);
}
