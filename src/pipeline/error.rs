use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    #[error("route has no waypoints")]
    EmptyPath,

    #[error("route has {panoids} panoramas for {waypoints} waypoints")]
    Misaligned { panoids: usize, waypoints: usize },

    #[error("checkpoint interval must be positive")]
    InvalidCheckpoint,
}
