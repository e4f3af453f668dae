//! Per-session accounting, printed by the cli at exit.

/// What happened during one session.
///
/// Counts only this session's activity; the decision log is the durable
/// record across sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Owners the operator agreed to process.
    pub owners_processed: usize,

    /// Owners the operator declined (now permanently skipped).
    pub owners_skipped: usize,

    /// Repositories archived this session.
    pub repos_archived: usize,

    /// Repositories deleted this session.
    pub repos_deleted: usize,

    /// Repositories skipped this session.
    pub repos_skipped: usize,

    /// Repositories left open after a failed remote call.
    pub repos_unresolved: usize,
}

impl SessionSummary {
    /// Whether anything at all happened this session.
    #[must_use]
    pub fn has_activity(&self) -> bool {
        self.owners_processed > 0
            || self.owners_skipped > 0
            || self.repos_archived > 0
            || self.repos_deleted > 0
            || self.repos_skipped > 0
            || self.repos_unresolved > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_summary_has_no_activity() {
        assert!(!SessionSummary::default().has_activity());
    }

    #[test]
    fn any_counter_counts_as_activity() {
        let summary = SessionSummary {
            repos_skipped: 1,
            ..SessionSummary::default()
        };
        assert!(summary.has_activity());
    }
}
