//! Cached repository metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A snapshot of one repository, taken when the directory was fetched.
///
/// Records are reference data: decisions never mutate them, and they are
/// only refreshed by deleting the snapshot file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoRecord {
    /// Host-assigned numeric id, unique within an owner.
    pub id: u64,

    /// Owner (user or organization) login.
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// Whether the repository is a fork.
    #[serde(default)]
    pub fork: bool,

    /// Whether the repository was already archived when the snapshot was
    /// taken.
    #[serde(default)]
    pub archived: bool,

    /// Whether the repository is private.
    #[serde(default)]
    pub private: bool,

    /// Browser URL, used by the open-in-browser action.
    pub url: String,

    /// Stargazer count at snapshot time.
    #[serde(default)]
    pub stars: u32,

    /// Subscriber (watcher) count at snapshot time.
    #[serde(default)]
    pub subscribers: u32,

    /// Open issue count at snapshot time.
    #[serde(default)]
    pub open_issues: u32,

    /// Last push timestamp.
    #[serde(default)]
    pub last_push: Option<DateTime<Utc>>,

    /// Last metadata update timestamp.
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
}

impl RepoRecord {
    /// "owner/name" form used in prompts and log messages.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}
