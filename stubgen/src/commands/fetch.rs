//! Fetch step: clone the proto source mirror, or update it in place.

use eyre::{Result, WrapErr};
use tracing::info;

use crate::config::PipelineConfig;
use crate::git;

/// Remote name the pull tracks; `git clone` sets it up.
const REMOTE_NAME: &str = "origin";

/// Ensure the local mirror exists and reflects the remote's latest state
/// on the tracked branch.
///
/// A missing mirror is cloned first, and a clone failure is an error in
/// its own right rather than something deferred to the pull. The pull
/// then runs unconditionally, so a fresh clone and an existing mirror go
/// through the same update path.
pub async fn call_fetch(config: &PipelineConfig) -> Result<()> {
    if !config.mirror_dir().exists() {
        info!(
            "Cloning {} into {}",
            config.remote(),
            config.mirror_dir().display()
        );
        git::clone(config.remote(), config.mirror_dir())
            .await
            .wrap_err_with(|| format!("Failed to clone {}", config.remote()))?;
    }

    info!(
        "Updating {} from {}/{}",
        config.mirror_dir().display(),
        REMOTE_NAME,
        config.branch()
    );
    git::pull(config.mirror_dir(), REMOTE_NAME, config.branch())
        .await
        .wrap_err_with(|| {
            format!(
                "Failed to update the mirror at {}",
                config.mirror_dir().display()
            )
        })
}
