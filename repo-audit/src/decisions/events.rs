//! Audit log event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository-level action recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepoAction {
    Archive,
    Delete,
    CloseIssues,
    Skip,
}

/// One entry in a repository's append-only decision log.
///
/// An event records intent: for remote actions it is appended before the
/// API call is made, so a failed call still leaves a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoEvent {
    pub action: RepoAction,
    pub time: DateTime<Utc>,
    /// Issue numbers a close-all-issues run attempted to close.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_issues: Option<Vec<u64>>,
}

impl RepoEvent {
    pub(crate) fn now(action: RepoAction) -> Self {
        Self {
            action,
            time: Utc::now(),
            closed_issues: None,
        }
    }
}

/// Owner-level action recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnerAction {
    /// The operator agreed to walk this owner's repositories.
    Process,
    /// The operator declined; the owner is permanently skipped.
    Skipped,
}

/// One entry in an owner's append-only decision log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerEvent {
    pub action: OwnerAction,
    pub time: DateTime<Utc>,
}

impl OwnerEvent {
    pub(crate) fn now(action: OwnerAction) -> Self {
        Self {
            action,
            time: Utc::now(),
        }
    }
}
