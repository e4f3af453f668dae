//! Durable record of what the operator decided, per owner and repository.
//!
//! The store is loaded once at startup, mutated in memory for the whole
//! session, and flushed exactly once at the end (including on
//! interruption). Terminal flags are monotonic: once a repository is
//! archived, deleted, or skipped it stays that way, and the traversal
//! never presents it again.

mod error;
mod events;

pub use error::DecisionStoreError;
pub use events::{OwnerAction, OwnerEvent, RepoAction, RepoEvent};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Decision log filename under the data directory.
pub const DECISIONS_FILE: &str = "decisions.json";

fn is_false(value: &bool) -> bool {
    !*value
}

/// Decisions recorded for a single repository.
///
/// The flags are terminal and sticky; the event log is append-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoDecision {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    decisions: Vec<RepoEvent>,
    #[serde(skip_serializing_if = "is_false")]
    archived: bool,
    #[serde(skip_serializing_if = "is_false")]
    deleted: bool,
    #[serde(skip_serializing_if = "is_false")]
    skipped: bool,
}

impl RepoDecision {
    /// Appends an event to the audit log.
    pub fn log(&mut self, action: RepoAction) {
        self.decisions.push(RepoEvent::now(action));
    }

    /// Appends a close-issues event carrying the attempted issue numbers.
    pub fn log_closed_issues(&mut self, issues: Vec<u64>) {
        let mut event = RepoEvent::now(RepoAction::CloseIssues);
        event.closed_issues = Some(issues);
        self.decisions.push(event);
    }

    pub fn mark_archived(&mut self) {
        self.archived = true;
    }

    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    pub fn mark_skipped(&mut self) {
        self.skipped = true;
    }

    pub fn archived(&self) -> bool {
        self.archived
    }

    pub fn deleted(&self) -> bool {
        self.deleted
    }

    pub fn skipped(&self) -> bool {
        self.skipped
    }

    /// Whether any terminal flag is set; a terminal repository is never
    /// presented again.
    pub fn is_terminal(&self) -> bool {
        self.archived || self.deleted || self.skipped
    }

    /// The append-only audit log.
    pub fn events(&self) -> &[RepoEvent] {
        &self.decisions
    }
}

/// Decisions recorded for a single owner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerDecisions {
    #[serde(skip_serializing_if = "is_false")]
    skipped: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    decisions: Vec<OwnerEvent>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    repos: BTreeMap<String, RepoDecision>,
}

impl OwnerDecisions {
    /// Whether the operator permanently skipped this owner.
    pub fn skipped(&self) -> bool {
        self.skipped
    }

    /// Records the decline of the whole-owner confirmation: sets the
    /// sticky flag and logs a `Skipped` event.
    pub fn mark_skipped(&mut self) {
        self.skipped = true;
        self.decisions.push(OwnerEvent::now(OwnerAction::Skipped));
    }

    /// Logs the operator's agreement to process this owner.
    pub fn log_processing(&mut self) {
        self.decisions.push(OwnerEvent::now(OwnerAction::Process));
    }

    pub fn repo(&self, name: &str) -> Option<&RepoDecision> {
        self.repos.get(name)
    }

    /// Returns the repository's decision record, creating an empty one on
    /// first visit.
    pub fn repo_mut(&mut self, name: &str) -> &mut RepoDecision {
        self.repos.entry(name.to_string()).or_default()
    }

    /// The append-only audit log.
    pub fn events(&self) -> &[OwnerEvent] {
        &self.decisions
    }
}

/// The full decision log: owner login → decisions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionState {
    owners: BTreeMap<String, OwnerDecisions>,
}

impl DecisionState {
    /// Loads the persisted state, treating a missing or malformed file as
    /// an empty store.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => {
                debug!(path = %path.display(), "No decision log yet, starting empty");
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => {
                info!(path = %path.display(), "Loaded decision log");
                state
            }
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Decision log is malformed, starting empty"
                );
                Self::default()
            }
        }
    }

    /// Rewrites the whole document. Written to a sibling temp file first
    /// and renamed into place, so a crash mid-write never loses the
    /// previous log.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionStoreError`]; the caller treats this as fatal.
    pub fn persist(&self, path: &Path) -> Result<(), DecisionStoreError> {
        let body = serde_json::to_string_pretty(self)
            .map_err(|source| DecisionStoreError::Encode { source })?;

        let write = |source: std::io::Error| DecisionStoreError::Write {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write)?;
        }
        let staging = path.with_extension("json.tmp");
        std::fs::write(&staging, body).map_err(write)?;
        std::fs::rename(&staging, path).map_err(write)?;

        info!(path = %path.display(), owners = self.owners.len(), "Persisted decision log");
        Ok(())
    }

    pub fn owner(&self, login: &str) -> Option<&OwnerDecisions> {
        self.owners.get(login)
    }

    /// Returns the owner's decisions, creating an empty record on first
    /// visit.
    pub fn owner_mut(&mut self, login: &str) -> &mut OwnerDecisions {
        self.owners.entry(login.to_string()).or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_object_parses_as_empty_decision() {
        let decision: RepoDecision = serde_json::from_str("{}").unwrap();
        assert!(!decision.is_terminal());
        assert!(decision.events().is_empty());
    }

    #[test]
    fn terminal_flags_are_sticky() {
        let mut decision = RepoDecision::default();
        decision.mark_archived();
        decision.mark_archived();
        assert!(decision.archived());
        assert!(decision.is_terminal());
    }

    #[test]
    fn log_is_append_only() {
        let mut decision = RepoDecision::default();
        decision.log(RepoAction::Archive);
        decision.log_closed_issues(vec![3, 5]);
        decision.log(RepoAction::Skip);

        let events = decision.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].action, RepoAction::Archive);
        assert_eq!(events[1].closed_issues.as_deref(), Some(&[3, 5][..]));
        assert_eq!(events[2].action, RepoAction::Skip);
    }

    #[test]
    fn owner_skip_sets_flag_and_logs_event() {
        let mut owner = OwnerDecisions::default();
        owner.mark_skipped();

        assert!(owner.skipped());
        assert_eq!(owner.events().len(), 1);
        assert_eq!(owner.events()[0].action, OwnerAction::Skipped);
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let temp = TempDir::new().unwrap();
        let state = DecisionState::load(&temp.path().join(DECISIONS_FILE));
        assert!(state.is_empty());
    }

    #[test]
    fn malformed_file_loads_as_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DECISIONS_FILE);
        std::fs::write(&path, "[1, 2,").unwrap();

        assert!(DecisionState::load(&path).is_empty());
    }

    #[test]
    fn persist_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DECISIONS_FILE);

        let mut state = DecisionState::default();
        let owner = state.owner_mut("acme");
        owner.log_processing();
        let repo = owner.repo_mut("web");
        repo.log(RepoAction::Skip);
        repo.mark_skipped();

        state.persist(&path).unwrap();
        let reloaded = DecisionState::load(&path);

        assert_eq!(reloaded, state);
        assert!(reloaded.owner("acme").unwrap().repo("web").unwrap().skipped());
    }

    #[test]
    fn untouched_repo_serializes_as_empty_object() {
        let mut state = DecisionState::default();
        state.owner_mut("acme").repo_mut("web");

        let body = serde_json::to_value(&state).unwrap();
        assert_eq!(body["acme"]["repos"]["web"], serde_json::json!({}));
    }
}
