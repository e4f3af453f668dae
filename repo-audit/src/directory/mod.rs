//! Repository directory cache.
//!
//! The directory is a point-in-time snapshot of every repository the
//! credential can access, grouped by owner login. It is fetched once,
//! persisted next to the decision log, and then reused verbatim on
//! later runs. There is no refresh policy beyond deleting the file.

mod record;

pub use record::RepoRecord;

use crate::host::{HostError, RepositoryHost};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Snapshot filename, versioned so schema changes don't collide with
/// caches written by older builds.
pub const SNAPSHOT_FILE: &str = "repos.v2.json";

/// Owner login to repository id to record, in stored (sorted) order.
pub type Directory = BTreeMap<String, BTreeMap<u64, RepoRecord>>;

/// Loads the directory, fetching from the host only when no usable
/// snapshot exists.
///
/// A missing, malformed, or empty snapshot file is treated identically:
/// the full listing is fetched and a fresh snapshot written. A snapshot
/// that fails to write is reported and otherwise ignored; the fetched
/// directory is still returned.
///
/// # Errors
///
/// Returns [`HostError`] if the listing has to be fetched and the fetch
/// fails.
pub async fn load<H: RepositoryHost>(host: &H, path: &Path) -> Result<Directory, HostError> {
    if let Some(directory) = read_snapshot(path) {
        info!(
            path = %path.display(),
            owners = directory.len(),
            "Loaded repository snapshot"
        );
        return Ok(directory);
    }

    let records = host.list_repositories().await?;
    let directory = group_by_owner(records);

    if let Err(error) = write_snapshot(path, &directory) {
        warn!(
            path = %path.display(),
            error = %error,
            "Failed to persist repository snapshot, continuing without one"
        );
    }

    Ok(directory)
}

/// Groups a flat listing by owner login, keyed by repository id.
pub fn group_by_owner(records: Vec<RepoRecord>) -> Directory {
    let mut directory = Directory::new();
    for record in records {
        directory
            .entry(record.owner.clone())
            .or_default()
            .insert(record.id, record);
    }
    directory
}

fn read_snapshot(path: &Path) -> Option<Directory> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<Directory>(&raw) {
        Ok(directory) if !directory.is_empty() => Some(directory),
        // An empty snapshot carries no information; refetch.
        Ok(_) => None,
        Err(error) => {
            warn!(
                path = %path.display(),
                error = %error,
                "Repository snapshot is malformed, refetching"
            );
            None
        }
    }
}

fn write_snapshot(path: &Path, directory: &Directory) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(directory).map_err(std::io::Error::other)?;
    std::fs::write(path, body)
}
