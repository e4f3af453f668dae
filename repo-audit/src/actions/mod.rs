//! Per-repository action handling.
//!
//! Every handler follows the same confirm, record, call, interpret
//! sequence, and reports what the traversal should do next via
//! [`ActionOutcome`] instead of unwinding. Remote failures never leave
//! this module: they become operator-visible messages, and the
//! repository is either re-prompted or left for a future session.

mod menu;

pub use menu::MenuChoice;

use crate::decisions::{RepoAction, RepoDecision};
use crate::directory::RepoRecord;
use crate::host::{HostError, RepositoryHost};
use crate::shell::{Shell, ShellError};
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

/// Concurrent close calls inside one close-all-issues batch.
const CLOSE_ISSUE_CONCURRENCY: usize = 8;

/// What the traversal should do with the repository after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A terminal flag was set; advance to the next repository.
    Resolved,
    /// Re-present the menu for the same repository.
    Retry,
    /// Nothing terminal happened (a remote call failed); advance and let
    /// a future session retry.
    Unresolved,
}

/// Runs one chosen action against one repository.
///
/// # Errors
///
/// Only [`ShellError`] propagates (operator interruption or a broken
/// terminal); remote failures are reported and folded into the outcome.
pub async fn handle_choice<H: RepositoryHost>(
    host: &H,
    shell: &dyn Shell,
    choice: MenuChoice,
    record: &RepoRecord,
    decision: &mut RepoDecision,
) -> Result<ActionOutcome, ShellError> {
    match choice {
        MenuChoice::Archive => archive(host, shell, record, decision).await,
        MenuChoice::Delete => delete(host, shell, record, decision).await,
        MenuChoice::CloseIssues => close_issues(host, shell, record, decision).await,
        MenuChoice::Open => open_in_browser(shell, record),
        MenuChoice::Skip => {
            decision.log(RepoAction::Skip);
            decision.mark_skipped();
            info!(repo = %record.full_name(), "Repository skipped");
            Ok(ActionOutcome::Resolved)
        }
    }
}

async fn archive<H: RepositoryHost>(
    host: &H,
    shell: &dyn Shell,
    record: &RepoRecord,
    decision: &mut RepoDecision,
) -> Result<ActionOutcome, ShellError> {
    if record.archived || decision.archived() {
        shell.note("This repository is already archived.");
        return Ok(ActionOutcome::Retry);
    }
    if !shell.confirm("Are you sure you want to archive this repository?")? {
        return Ok(ActionOutcome::Retry);
    }

    // Intent goes into the log before the call, so a failed call still
    // leaves a trace in the audit trail.
    decision.log(RepoAction::Archive);

    match host.archive_repository(&record.owner, &record.name).await {
        Ok(()) => {
            decision.mark_archived();
            shell.success("Archived.");
            info!(repo = %record.full_name(), "Repository archived");
            Ok(ActionOutcome::Resolved)
        }
        Err(error) if error.indicates_already_archived() => {
            decision.mark_archived();
            shell.success("Repository was already archived upstream.");
            Ok(ActionOutcome::Resolved)
        }
        Err(error) => {
            shell.failure(&format!("Failed to archive: {error}"));
            warn!(repo = %record.full_name(), error = %error, "Archive failed");
            Ok(ActionOutcome::Unresolved)
        }
    }
}

async fn delete<H: RepositoryHost>(
    host: &H,
    shell: &dyn Shell,
    record: &RepoRecord,
    decision: &mut RepoDecision,
) -> Result<ActionOutcome, ShellError> {
    if !shell.confirm("Are you sure you want to delete this repository? This cannot be undone.")? {
        return Ok(ActionOutcome::Retry);
    }

    decision.log(RepoAction::Delete);

    match host.delete_repository(&record.owner, &record.name).await {
        Ok(()) => {
            decision.mark_deleted();
            shell.success("Deleted.");
            info!(repo = %record.full_name(), "Repository deleted");
            Ok(ActionOutcome::Resolved)
        }
        Err(error) => {
            shell.failure(&format!("Failed to delete: {error}"));
            warn!(repo = %record.full_name(), error = %error, "Delete failed");
            Ok(ActionOutcome::Unresolved)
        }
    }
}

/// Closes every open issue, fanning the close calls out concurrently and
/// waiting for the whole batch. Closing issues is not a terminal
/// disposition, so the repository is always re-prompted afterwards.
async fn close_issues<H: RepositoryHost>(
    host: &H,
    shell: &dyn Shell,
    record: &RepoRecord,
    decision: &mut RepoDecision,
) -> Result<ActionOutcome, ShellError> {
    if !shell.confirm("Close every open issue in this repository?")? {
        return Ok(ActionOutcome::Retry);
    }

    let issues = match host.list_open_issues(&record.owner, &record.name).await {
        Ok(issues) => issues,
        Err(error) => {
            shell.failure(&format!("Failed to list issues: {error}"));
            return Ok(ActionOutcome::Retry);
        }
    };
    shell.note(&format!(
        "Found {} open issue(s) for {}",
        issues.len(),
        record.full_name()
    ));

    let attempted: Vec<u64> = issues.iter().map(|issue| issue.number).collect();
    let results: Vec<(u64, Result<(), HostError>)> = stream::iter(issues)
        .map(|issue| {
            let task = shell.task(&format!("Closing [#{}] {}", issue.number, issue.title));
            async move {
                let result = host
                    .close_issue(&record.owner, &record.name, issue.number)
                    .await;
                match &result {
                    Ok(()) => task.complete(),
                    Err(error) => task.fail(&error.to_string()),
                }
                (issue.number, result)
            }
        })
        .buffer_unordered(CLOSE_ISSUE_CONCURRENCY)
        .collect()
        .await;

    decision.log_closed_issues(attempted);

    let failed = results
        .iter()
        .filter(|(_, result)| result.is_err())
        .count();
    if failed > 0 {
        shell.failure(&format!("{failed} issue(s) could not be closed."));
    } else {
        shell.success("Done.");
    }

    Ok(ActionOutcome::Retry)
}

/// Opens the repository in the operator's browser. A pure side effect:
/// nothing is recorded and the menu is shown again.
fn open_in_browser(shell: &dyn Shell, record: &RepoRecord) -> Result<ActionOutcome, ShellError> {
    if let Err(error) = open::that(&record.url) {
        shell.failure(&format!("Could not open a browser: {error}"));
    }
    Ok(ActionOutcome::Retry)
}
