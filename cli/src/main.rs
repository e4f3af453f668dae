//! Interactive cleanup walk over every GitHub repository you can access.
//!
//! Walks owner by owner, repository by repository, asking what to do
//! with each one and recording every decision so an interrupted run
//! picks up where it left off.

use anyhow::Context;
use clap::Parser;
use repo_audit::{
    GithubHost, Session, SessionConfig, SessionOutcome, SessionReport, Shell, ShellError,
    TerminalShell,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Walk your repositories and archive, delete, or skip each one.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub Personal Access Token. Provisioned interactively when absent.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Also walk repositories that are already archived.
    #[arg(long, env = "INCLUDE_ARCHIVED")]
    include_archived: bool,

    /// Directory holding the repository snapshot and the decision log.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Env file a newly provided token is appended to.
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let shell = TerminalShell::new();

    match run(args, &shell).await {
        Ok(code) => code,
        Err(error) if is_interruption(&error) => {
            shell.note("Ok, bye!");
            ExitCode::SUCCESS
        }
        Err(error) => {
            error!(error = %error, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Compact single-line output without module target paths; log level
/// filtering via `RUST_LOG` (defaults to "info").
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args, shell: &TerminalShell) -> anyhow::Result<ExitCode> {
    let token = match args.token.clone() {
        Some(token) => token,
        None => provision_token(shell, &args.env_file)?,
    };

    if !welcome(shell)? {
        return Ok(ExitCode::SUCCESS);
    }

    let host = GithubHost::new(token).context("failed to build the GitHub client")?;
    let config = SessionConfig {
        data_dir: args.data_dir,
        include_archived: args.include_archived,
    };
    let report = Session::new(&host, shell, config).run().await?;

    print_summary(&report);
    Ok(ExitCode::SUCCESS)
}

/// Asks for a token and appends it to the env file for the next run.
fn provision_token(shell: &TerminalShell, env_file: &Path) -> anyhow::Result<String> {
    shell.frame("No GitHub token found");
    shell.note("No token was found in the environment or the env file.");
    shell.note("Go to https://github.com/settings/tokens and generate a token");
    shell.note("with the repo and delete_repo scopes.");
    shell.note(&format!(
        "The token will be stored in {}; keep that file out of version control.",
        env_file.display()
    ));

    let token = shell.input("What is your token?")?;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(env_file)
        .with_context(|| format!("failed to open {}", env_file.display()))?;
    writeln!(file, "GITHUB_TOKEN={token}")
        .with_context(|| format!("failed to write {}", env_file.display()))?;

    Ok(token)
}

/// Explains what the walk does and asks whether to start.
fn welcome(shell: &TerminalShell) -> Result<bool, ShellError> {
    shell.frame("Getting started");
    shell.note("This walk takes you through every repository you have access to,");
    shell.note("helping you archive or delete the ones you no longer want.");
    shell.note("Yes/No questions can be answered with the y and n keys.");
    shell.note("Menus are navigated with the arrow keys; enter selects.");
    shell.note("Press Ctrl-C at any time after the repositories load to save your progress.");
    shell.confirm("Are you ready to get started?")
}

fn is_interruption(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<ShellError>(),
        Some(ShellError::Interrupted)
    )
}

/// Prints the final session summary.
fn print_summary(report: &SessionReport) {
    if report.outcome == SessionOutcome::AbortedDuringLoad || !report.summary.has_activity() {
        return;
    }

    let summary = &report.summary;
    println!("\nSession summary:");
    println!("  Owners processed: {}", summary.owners_processed);
    println!("  Owners skipped: {}", summary.owners_skipped);
    println!("  Repositories archived: {}", summary.repos_archived);
    println!("  Repositories deleted: {}", summary.repos_deleted);
    println!("  Repositories skipped: {}", summary.repos_skipped);
    if summary.repos_unresolved > 0 {
        println!(
            "  Repositories left unresolved: {}",
            summary.repos_unresolved
        );
    }
}
