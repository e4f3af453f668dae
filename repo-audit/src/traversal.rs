//! Owner-by-owner, repository-by-repository walk.
//!
//! The controller consults the decision store before every prompt, so
//! anything already resolved (a skipped owner, or an archived, deleted, or
//! skipped repository) is never presented again, across any number of
//! sessions.

use crate::actions::{self, ActionOutcome, MenuChoice};
use crate::decisions::{DecisionState, RepoDecision};
use crate::directory::{Directory, RepoRecord};
use crate::host::RepositoryHost;
use crate::shell::{Shell, ShellError};
use crate::summary::SessionSummary;
use std::collections::BTreeMap;
use tracing::debug;

/// Walks the directory, prompting the operator for every open unit of
/// work and recording outcomes in the decision store.
pub struct Traversal<'a, H> {
    host: &'a H,
    shell: &'a dyn Shell,
    include_archived: bool,
}

impl<'a, H: RepositoryHost> Traversal<'a, H> {
    pub fn new(host: &'a H, shell: &'a dyn Shell, include_archived: bool) -> Self {
        Self {
            host,
            shell,
            include_archived,
        }
    }

    /// Visits every owner in the directory's stored order.
    ///
    /// # Errors
    ///
    /// Only [`ShellError`] propagates; an `Interrupted` error means the
    /// operator asked to stop and the store should be flushed as-is.
    pub async fn run(
        &self,
        directory: &Directory,
        state: &mut DecisionState,
        summary: &mut SessionSummary,
    ) -> Result<(), ShellError> {
        self.shell.frame("Processing by owner");
        for (login, repos) in directory.iter() {
            self.visit_owner(login, repos, state, summary).await?;
        }
        Ok(())
    }

    async fn visit_owner(
        &self,
        login: &str,
        repos: &BTreeMap<u64, RepoRecord>,
        state: &mut DecisionState,
        summary: &mut SessionSummary,
    ) -> Result<(), ShellError> {
        let owner = state.owner_mut(login);

        if owner.skipped() {
            self.shell.note(&format!(
                "{login} is marked as skipped in the decision log, skipping."
            ));
            return Ok(());
        }

        let candidates: Vec<&RepoRecord> = repos
            .values()
            .filter(|record| self.include_archived || !record.archived)
            .collect();

        // Re-evaluated every run rather than cached: the snapshot may
        // have gained repositories since the owner was last handled.
        if candidates
            .iter()
            .all(|record| is_resolved(owner.repo(&record.name), record))
        {
            self.shell.note(&format!(
                "Everything in {login} is already archived, deleted, or skipped; skipping this owner."
            ));
            return Ok(());
        }

        self.shell.frame(login);
        if !self.shell.confirm(&format!(
            "Do you want to process {} repository(ies) in {login}?",
            candidates.len()
        ))? {
            owner.mark_skipped();
            summary.owners_skipped += 1;
            debug!(owner = login, "Owner skipped");
            return Ok(());
        }
        owner.log_processing();
        summary.owners_processed += 1;

        for record in candidates {
            let decision = owner.repo_mut(&record.name);
            if is_resolved(Some(decision), record) {
                continue;
            }
            self.visit_repository(record, decision, summary).await?;
        }
        Ok(())
    }

    /// Prompts for one repository until a handler reports something other
    /// than `Retry`.
    async fn visit_repository(
        &self,
        record: &RepoRecord,
        decision: &mut RepoDecision,
        summary: &mut SessionSummary,
    ) -> Result<(), ShellError> {
        self.shell.frame(&record.name);
        loop {
            let choice = MenuChoice::prompt(self.shell)?;
            match actions::handle_choice(self.host, self.shell, choice, record, decision).await? {
                ActionOutcome::Retry => continue,
                ActionOutcome::Resolved => {
                    match choice {
                        MenuChoice::Archive => summary.repos_archived += 1,
                        MenuChoice::Delete => summary.repos_deleted += 1,
                        MenuChoice::Skip => summary.repos_skipped += 1,
                        MenuChoice::CloseIssues | MenuChoice::Open => {}
                    }
                    return Ok(());
                }
                ActionOutcome::Unresolved => {
                    summary.repos_unresolved += 1;
                    return Ok(());
                }
            }
        }
    }
}

/// Whether a repository needs no further attention.
///
/// A repository that was already archived when the snapshot was taken
/// counts as resolved even without a decision record; with
/// include-archived mode on, such repositories show up in owner counts
/// but are never prompted.
fn is_resolved(decision: Option<&RepoDecision>, record: &RepoRecord) -> bool {
    record.archived || decision.is_some_and(RepoDecision::is_terminal)
}
