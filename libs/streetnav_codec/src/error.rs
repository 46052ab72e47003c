use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("i/o failure: {0}")]
    IOError(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("malformed line {line} of {}: {reason}", file.display())]
    Malformed {
        file: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("identifier {0:?} cannot be stored in a comma separated file")]
    UnrepresentableId(String),
}
