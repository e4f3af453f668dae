//! Remote repository-hosting API boundary.
//!
//! Everything the rest of the crate needs from GitHub goes through the
//! [`RepositoryHost`] trait, so the traversal and action code can be
//! exercised against a scripted host in tests. [`GithubHost`] is the
//! production implementation.

mod error;
mod github;

pub use error::HostError;
pub use github::GithubHost;

use crate::directory::RepoRecord;

/// An open issue, reduced to what the close-all-issues action needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    /// Issue number within its repository.
    pub number: u64,
    /// Issue title, shown next to the close spinner.
    pub title: String,
}

/// Operations the decision engine performs against the remote host.
#[allow(async_fn_in_trait)]
pub trait RepositoryHost {
    /// Lists every repository the credential can access, across all owners.
    async fn list_repositories(&self) -> Result<Vec<RepoRecord>, HostError>;

    /// Sets the archived flag on a repository.
    async fn archive_repository(&self, owner: &str, name: &str) -> Result<(), HostError>;

    /// Deletes a repository. Irreversible.
    async fn delete_repository(&self, owner: &str, name: &str) -> Result<(), HostError>;

    /// Lists a repository's open issues, excluding pull requests.
    async fn list_open_issues(&self, owner: &str, name: &str)
        -> Result<Vec<IssueRef>, HostError>;

    /// Closes a single issue by number.
    async fn close_issue(&self, owner: &str, name: &str, number: u64) -> Result<(), HostError>;
}
