//! Command line interface for rolling_release.
//!
//! Parses inputs, resolves the run configuration, builds the GitHub client and
//! hands off to the release pipeline. Fatal errors are reported here.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::config::RunConfig;
use crate::error::{ReleaseError, Result};
use crate::github::GitHubClient;
use crate::release::run_release;

/// Main CLI entry point
pub async fn run() -> i32 {
    let args = Args::parse_args();
    let output = OutputManager::new(false);
    execute(&args, &output).await
}

/// Run the release for parsed arguments and map the outcome to an exit code
pub async fn execute(args: &Args, output: &OutputManager) -> i32 {
    match execute_release(args, output).await {
        Ok(()) => 0,
        Err(e) => {
            report_failure(&e, output);
            1
        }
    }
}

async fn execute_release(args: &Args, output: &OutputManager) -> Result<()> {
    let config = RunConfig::from_args(args)?;
    output.info(&format!(
        "owner: {}, repo: {}, sha: {}",
        config.target.owner, config.target.repo, config.target.sha
    ));

    let client = GitHubClient::new(&config.client)?;
    let release = run_release(&client, &config.target, &config.assets, output).await?;

    output.set_output(
        config.output_file.as_deref(),
        "release_id",
        &release.id.to_string(),
    )?;
    Ok(())
}

fn report_failure(error: &ReleaseError, output: &OutputManager) {
    log::debug!("release failed: {:?}", error);
    output.error(&error.to_string());

    let suggestions = error.recovery_suggestions();
    if !suggestions.is_empty() {
        output.info("\n💡 Recovery suggestions:");
        for suggestion in suggestions {
            output.indent(&suggestion);
        }
    }
}
