//! Error types for selecta-widgets.

use thiserror::Error;

/// Errors surfaced by the select widgets.
///
/// Lookup misses (unknown uuids or values) are not errors; they are no-ops.
#[derive(Debug, Error)]
pub enum SelectError {
    /// The deferred option loader reported a failure.
    #[error("failed to load options: {0}")]
    LoadFailed(String),

    /// Settings could not be parsed.
    #[error("invalid select settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}
