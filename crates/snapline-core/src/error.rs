//! Error types.

use thiserror::Error;

/// Errors raised while constructing or configuring the snap component.
///
/// Once a [`Snap`](crate::snap::Snap) has been built, none of its runtime
/// operations fail: missing data simply means "nothing to snap to".
#[derive(Debug, Error)]
pub enum SnapError {
    #[error("tree layer is required")]
    MissingTree,
    #[error("editor is required")]
    MissingEditor,
    #[error("sky layer is required")]
    MissingSky,
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for SnapError {
    fn from(err: serde_json::Error) -> Self {
        SnapError::Config(err.to_string())
    }
}

/// Result type for snap operations.
pub type SnapResult<T> = Result<T, SnapError>;
