use codec::Route;
use rand::Rng;

use crate::choice::{EasyConfig, StandardConfig, select_easy, select_standard};
use crate::pipeline::{Outcome, Stage};

/// The selector placing the choices of a route.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    Standard(StandardConfig),
    Easy(EasyConfig),
}

impl Default for Selector {
    fn default() -> Self {
        Selector::Standard(StandardConfig::default())
    }
}

/// Places multiple-choice positions upon every route.
///
/// Routes the selector cannot serve are skipped rather than failed,
/// the selection itself being the reason for the run.
#[derive(Debug)]
pub struct ChoiceStage<R> {
    selector: Selector,
    rng: R,
}

impl<R: Rng> ChoiceStage<R> {
    pub fn new(selector: Selector, rng: R) -> Self {
        ChoiceStage { selector, rng }
    }
}

impl<R: Rng> Stage for ChoiceStage<R> {
    fn name(&self) -> &'static str {
        match self.selector {
            Selector::Standard(_) => "standard choices",
            Selector::Easy(_) => "easy choices",
        }
    }

    fn apply(&mut self, mut route: Route) -> crate::Result<Outcome> {
        let selected = match &self.selector {
            Selector::Standard(config) => select_standard(&mut route, config, &mut self.rng),
            Selector::Easy(config) => select_easy(&mut route, config, &mut self.rng),
        };

        Ok(match selected {
            Ok(()) => Outcome::Keep(route),
            Err(err) => Outcome::Skip(err.to_string()),
        })
    }
}
