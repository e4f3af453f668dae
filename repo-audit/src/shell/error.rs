//! Shell error types.

use thiserror::Error;

/// Errors surfaced by shell prompts.
///
/// `Interrupted` is the operator pressing Ctrl-C inside a prompt; it is
/// not a fault but a request to stop, and callers unwind to the final
/// decision-log flush when they see it.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The operator interrupted the session.
    #[error("interrupted by operator")]
    Interrupted,

    /// Terminal IO failure.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<dialoguer::Error> for ShellError {
    fn from(error: dialoguer::Error) -> Self {
        match error {
            // The console backend reports Ctrl-C during a prompt as an
            // interrupted read.
            dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
                Self::Interrupted
            }
            dialoguer::Error::IO(io) => Self::Io(io),
        }
    }
}
