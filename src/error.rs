use thiserror::Error;

/// Errors produced by the octospace toolkit.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid ship action {field}: {value}")]
    InvalidShipAction { field: &'static str, value: i64 },

    #[error("Construction order {0} is outside 0..=10")]
    InvalidConstruction(i64),

    #[error("Action index {0} is outside the action table")]
    InvalidActionIndex(usize),

    #[error("Dataset index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Dataset columns have mismatched lengths: ids={ids}, imgs={imgs}, labels={labels}")]
    ColumnMismatch {
        ids: usize,
        imgs: usize,
        labels: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),

    #[cfg(feature = "rl-nn")]
    #[error("Torch error: {0}")]
    Torch(#[from] tch::TchError),
}

pub type Result<T> = std::result::Result<T, Error>;
