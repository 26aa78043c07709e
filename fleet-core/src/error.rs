//! Error types for fleet-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from vessel construction, registry
/// operations, and persistence.
#[derive(Debug, Error)]
pub enum FleetError {
    /// A constructor argument was malformed, missing, or out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// An operation referenced a vessel that is not in the expected fleet.
    #[error("{name} not found in this fleet")]
    Membership { name: String },

    /// Underlying I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error (save path).
    #[error("fleet document JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON parse error on load — includes the file path for context.
    #[error("failed to parse fleet data at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience constructor for [`FleetError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> FleetError {
    FleetError::Io {
        path: path.into(),
        source,
    }
}

/// Convenience constructor for [`FleetError::Validation`].
pub(crate) fn validation(msg: impl Into<String>) -> FleetError {
    FleetError::Validation(msg.into())
}
