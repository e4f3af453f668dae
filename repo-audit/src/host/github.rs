//! Octocrab-backed [`RepositoryHost`] implementation.

use super::{HostError, IssueRef, RepositoryHost};
use crate::directory::RepoRecord;
use octocrab::models::{IssueState, Repository};
use octocrab::params::State;
use octocrab::Octocrab;
use serde_json::json;
use tracing::{debug, info};

/// GitHub client working on behalf of a personal access token.
pub struct GithubHost {
    inner: Octocrab,
}

impl GithubHost {
    /// Builds a client from a personal access token.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the underlying client cannot be constructed.
    pub fn new(token: impl Into<String>) -> Result<Self, HostError> {
        let inner = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(Self { inner })
    }
}

impl RepositoryHost for GithubHost {
    async fn list_repositories(&self) -> Result<Vec<RepoRecord>, HostError> {
        info!("Fetching the full repository listing");

        let page = self
            .inner
            .current()
            .list_repos_for_authenticated_user()
            .type_("all")
            .per_page(100)
            .send()
            .await?;
        let repositories = self.inner.all_pages::<Repository>(page).await?;

        debug!(count = repositories.len(), "Repository listing fetched");
        Ok(repositories
            .into_iter()
            .filter_map(record_from_repository)
            .collect())
    }

    async fn archive_repository(&self, owner: &str, name: &str) -> Result<(), HostError> {
        debug!(repo = %format!("{owner}/{name}"), "Archiving repository");
        let _updated: Repository = self
            .inner
            .patch(
                format!("/repos/{owner}/{name}"),
                Some(&json!({ "archived": true })),
            )
            .await?;
        Ok(())
    }

    async fn delete_repository(&self, owner: &str, name: &str) -> Result<(), HostError> {
        debug!(repo = %format!("{owner}/{name}"), "Deleting repository");
        let response = self
            .inner
            ._delete(format!("/repos/{owner}/{name}"), None::<&()>)
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(HostError::Status {
                status: response.status().as_u16(),
            })
        }
    }

    async fn list_open_issues(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Vec<IssueRef>, HostError> {
        let page = self
            .inner
            .issues(owner, name)
            .list()
            .state(State::Open)
            .per_page(100)
            .send()
            .await?;
        let issues = self.inner.all_pages(page).await?;

        // The issues endpoint also returns pull requests; those are not
        // issues the operator asked to close.
        Ok(issues
            .into_iter()
            .filter(|issue| issue.pull_request.is_none())
            .map(|issue| IssueRef {
                number: issue.number,
                title: issue.title,
            })
            .collect())
    }

    async fn close_issue(&self, owner: &str, name: &str, number: u64) -> Result<(), HostError> {
        self.inner
            .issues(owner, name)
            .update(number)
            .state(IssueState::Closed)
            .send()
            .await?;
        Ok(())
    }
}

/// Maps an API repository onto the cached record shape.
///
/// Repositories without an owner login (a shape the API does not produce
/// in practice) are dropped rather than invented.
fn record_from_repository(repository: Repository) -> Option<RepoRecord> {
    let owner = repository.owner.as_ref()?.login.clone();
    let url = repository
        .html_url
        .as_ref()
        .map(|url| url.to_string())
        .unwrap_or_else(|| format!("https://github.com/{owner}/{}", repository.name));

    Some(RepoRecord {
        id: repository.id.0,
        owner,
        name: repository.name,
        fork: repository.fork.unwrap_or(false),
        archived: repository.archived.unwrap_or(false),
        private: repository.private.unwrap_or(false),
        url,
        stars: repository.stargazers_count.unwrap_or_default() as u32,
        subscribers: repository.subscribers_count.unwrap_or_default() as u32,
        open_issues: repository.open_issues_count.unwrap_or_default() as u32,
        last_push: repository.pushed_at,
        last_update: repository.updated_at,
    })
}
