//! Subprocess wrappers around the external `git` binary.
//!
//! The version-control client is an opaque collaborator: each call spawns
//! `git`, inherits its stdout/stderr so diagnostics reach the user
//! unchanged, and maps a nonzero exit status to an error. No timeout is
//! imposed; a hung transfer hangs the run.

use eyre::{eyre, Result, WrapErr};
use std::path::Path;
use tokio::process::Command;

/// Clone `remote` into the `mirror` directory.
pub async fn clone(remote: &str, mirror: &Path) -> Result<()> {
    run_git(None, &["clone", remote, &mirror.to_string_lossy()]).await
}

/// Pull the latest changes for `branch` into an existing `mirror`.
///
/// The mirror is not checked to be a valid repository first; if it is
/// not, git reports that and the error propagates.
pub async fn pull(mirror: &Path, remote_name: &str, branch: &str) -> Result<()> {
    run_git(Some(mirror), &["pull", remote_name, branch]).await
}

/// Whether a runnable `git` binary is on PATH.
pub async fn available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .await
        .is_ok_and(|output| output.status.success())
}

async fn run_git(cwd: Option<&Path>, args: &[&str]) -> Result<()> {
    let mut command = Command::new("git");
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let status = command
        .status()
        .await
        .wrap_err("Failed to launch git. Is it installed and on PATH?")?;

    if !status.success() {
        let subcommand = args.first().copied().unwrap_or_default();
        return Err(eyre!("`git {}` {}", subcommand, status));
    }
    Ok(())
}
