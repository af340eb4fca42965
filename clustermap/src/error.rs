//! Diagram error types.

use thiserror::Error;

use crate::primitives::Size;

pub type Result<T> = std::result::Result<T, DiagramError>;

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("index {index} is out of bounds for a {columns}x{rows} grid")]
    OutOfBounds {
        index: usize,
        columns: usize,
        rows: usize,
    },

    #[error(
        "size ratio of {name} ({requested}: {requested_ratio:.3}) does not match image ratio ({image}: {image_ratio:.3})"
    )]
    AspectRatioViolation {
        name: String,
        requested: Size,
        requested_ratio: f64,
        image: Size,
        image_ratio: f64,
    },

    #[error("size must be set for {name}")]
    MissingSize { name: String },

    #[error("layout invariant violated: {0}")]
    InvariantViolation(String),

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("layout expects {expected} objects, got {actual}")]
    ObjectCountMismatch { expected: usize, actual: usize },

    #[error("unsupported rotation: {0} degrees (only quarter turns)")]
    UnsupportedRotation(i32),

    #[error("font error: {0}")]
    Font(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}
