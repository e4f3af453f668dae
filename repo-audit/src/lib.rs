#![doc = include_str!("../README.md")]

pub mod actions;
pub mod decisions;
pub mod directory;
pub mod host;
pub mod session;
pub mod shell;
pub mod summary;
pub mod traversal;

pub use actions::{handle_choice, ActionOutcome, MenuChoice};
pub use decisions::{
    DecisionState, DecisionStoreError, OwnerAction, OwnerDecisions, OwnerEvent, RepoAction,
    RepoDecision, RepoEvent, DECISIONS_FILE,
};
pub use directory::{group_by_owner, Directory, RepoRecord, SNAPSHOT_FILE};
pub use host::{GithubHost, HostError, IssueRef, RepositoryHost};
pub use session::{Session, SessionConfig, SessionError, SessionOutcome, SessionReport};
pub use shell::{Shell, ShellError, TaskHandle, TerminalShell};
pub use summary::SessionSummary;
pub use traversal::Traversal;
