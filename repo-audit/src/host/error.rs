//! Remote API error types.

use thiserror::Error;

/// Errors that can occur while talking to the repository host.
#[derive(Debug, Error)]
pub enum HostError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHub(#[from] octocrab::Error),

    /// The API answered with a non-success status and no parseable body.
    #[error("GitHub API returned status {status}")]
    Status { status: u16 },

    /// A remote failure carrying only a message. Produced by test doubles
    /// and by hosts that cannot attach a richer error.
    #[error("{message}")]
    Remote { message: String },
}

impl HostError {
    /// Builds a plain-message remote error.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// Whether this failure means the repository is already archived
    /// upstream. GitHub rejects writes to archived repositories with a
    /// "Repository was archived so is read-only" message; converging on
    /// that response is treated as success by the archive action.
    pub fn indicates_already_archived(&self) -> bool {
        self.to_string().to_lowercase().contains("was archived")
    }
}
