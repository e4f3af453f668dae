//! One end-to-end session: load the directory, walk it, flush decisions.
//!
//! Interruption is caught at two granularities. During the initial
//! directory load nothing has been decided yet, so Ctrl-C discards
//! everything and exits cleanly. Once the traversal has started, any
//! exit path, including completion, interruption, and a broken terminal,
//! goes through exactly one decision-log flush.

use crate::decisions::{DecisionState, DecisionStoreError, DECISIONS_FILE};
use crate::directory::{self, SNAPSHOT_FILE};
use crate::host::{HostError, RepositoryHost};
use crate::shell::{Shell, ShellError};
use crate::summary::SessionSummary;
use crate::traversal::Traversal;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Where the session keeps its files and how it traverses.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory holding the repository snapshot and the decision log.
    pub data_dir: PathBuf,
    /// Whether archived repositories take part in the traversal.
    pub include_archived: bool,
}

impl SessionConfig {
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE)
    }

    pub fn decisions_path(&self) -> PathBuf {
        self.data_dir.join(DECISIONS_FILE)
    }
}

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every owner was visited.
    Completed,
    /// The operator interrupted mid-traversal; progress was persisted.
    Interrupted,
    /// The operator interrupted while the directory was still loading;
    /// nothing was persisted because nothing had been decided.
    AbortedDuringLoad,
}

/// Outcome plus this session's accounting.
#[derive(Debug)]
pub struct SessionReport {
    pub outcome: SessionOutcome,
    pub summary: SessionSummary,
}

/// Errors that end a session abnormally.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Fetching the repository listing failed.
    #[error(transparent)]
    Host(#[from] HostError),

    /// The decision log could not be written. Fatal: the log is the only
    /// record of the operator's progress.
    #[error(transparent)]
    Store(#[from] DecisionStoreError),

    /// The terminal broke mid-session.
    #[error(transparent)]
    Shell(#[from] ShellError),
}

/// Orchestrates one session against a host and a shell.
pub struct Session<'a, H> {
    host: &'a H,
    shell: &'a dyn Shell,
    config: SessionConfig,
}

impl<'a, H: RepositoryHost> Session<'a, H> {
    pub fn new(host: &'a H, shell: &'a dyn Shell, config: SessionConfig) -> Self {
        Self {
            host,
            shell,
            config,
        }
    }

    /// Runs the session to completion or interruption.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] on a failed directory fetch, a failed
    /// decision-log write, or a terminal fault. Operator interruption is
    /// not an error.
    pub async fn run(&self) -> Result<SessionReport, SessionError> {
        self.shell.frame("Finding repositories");
        let snapshot_path = self.config.snapshot_path();
        let directory = tokio::select! {
            result = directory::load(self.host, &snapshot_path) => result?,
            _ = tokio::signal::ctrl_c() => {
                self.shell.note("Ok, nothing to save yet, bye!");
                return Ok(SessionReport {
                    outcome: SessionOutcome::AbortedDuringLoad,
                    summary: SessionSummary::default(),
                });
            }
        };
        let repo_count: usize = directory.values().map(|repos| repos.len()).sum();
        self.shell.note(&format!(
            "Found {repo_count} repositories across {} owner(s)",
            directory.len()
        ));
        self.shell
            .note("You can now press Ctrl-C at any time to save your progress.");

        let decisions_path = self.config.decisions_path();
        let mut state = DecisionState::load(&decisions_path);
        let mut summary = SessionSummary::default();
        let traversal = Traversal::new(self.host, self.shell, self.config.include_archived);

        let result = tokio::select! {
            result = traversal.run(&directory, &mut state, &mut summary) => result,
            _ = tokio::signal::ctrl_c() => Err(ShellError::Interrupted),
        };

        if matches!(result, Err(ShellError::Interrupted)) {
            self.shell
                .note("Ok, saving your current decisions for later... bye!");
        }

        // The one guaranteed flush of the session. Runs on completion,
        // interruption, and terminal faults alike.
        state.persist(&decisions_path)?;

        match result {
            Ok(()) => {
                info!("Traversal complete");
                Ok(SessionReport {
                    outcome: SessionOutcome::Completed,
                    summary,
                })
            }
            Err(ShellError::Interrupted) => Ok(SessionReport {
                outcome: SessionOutcome::Interrupted,
                summary,
            }),
            Err(error) => Err(error.into()),
        }
    }
}
