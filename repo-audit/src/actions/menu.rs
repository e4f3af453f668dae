//! The per-repository action menu.

use crate::shell::{Shell, ShellError};

/// The fixed set of actions offered for every open repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Archive,
    Delete,
    CloseIssues,
    Open,
    Skip,
}

impl MenuChoice {
    /// Menu labels, in presentation order.
    pub const LABELS: [&'static str; 5] = [
        "Archive",
        "Delete",
        "Close all issues",
        "Open in browser",
        "Skip",
    ];

    /// Presents the menu and returns the operator's choice.
    pub fn prompt(shell: &dyn Shell) -> Result<Self, ShellError> {
        let index = shell.select("What do you want to do?", &Self::LABELS)?;
        Ok(match index {
            0 => Self::Archive,
            1 => Self::Delete,
            2 => Self::CloseIssues,
            3 => Self::Open,
            4 => Self::Skip,
            _ => unreachable!("unexpected menu index"),
        })
    }
}
