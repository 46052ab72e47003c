use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChoiceError {
    #[error("route has {len} waypoints, at least {min} are required")]
    TooShort { len: usize, min: usize },

    #[error("route has no turns")]
    NoTurns,

    #[error("no room for a candidate between indices {lower} and {upper}")]
    NoRoom { lower: usize, upper: usize },

    #[error("only {found} candidates are well separated, {needed} are required")]
    TooFewCandidates { found: usize, needed: usize },

    #[error("{requested} choices were requested, labels allow at most {max}")]
    TooManyChoices { requested: usize, max: usize },

    #[error("no off-path position found within {0} attempts")]
    OffPathExhausted(usize),
}
