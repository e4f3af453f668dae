//! Decision store error types.

use thiserror::Error;

/// Errors that can occur while persisting the decision log.
///
/// The decision log is the only record of the operator's progress, so a
/// failed write is fatal to the session rather than something to shrug
/// off the way a cache write failure is.
#[derive(Debug, Error)]
pub enum DecisionStoreError {
    /// Failed to write the decision log.
    #[error("Failed to write decision log '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode the decision log as JSON.
    #[error("Failed to encode decision log: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}
