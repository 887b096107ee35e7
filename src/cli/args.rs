//! Command line argument parsing.
//!
//! Every flag falls back to the variable the GitHub Actions runner sets, so the
//! binary runs unchanged as an action step or by hand with explicit flags.

use crate::github::DEFAULT_API_URL;
use clap::Parser;
use std::path::PathBuf;

/// Recreate a rolling GitHub release at the current commit
#[derive(Parser, Debug, Clone)]
#[command(
    name = "rolling_release",
    version,
    about = "Recreate a rolling GitHub release at the current commit",
    long_about = "Deletes any release and tag named TAG, re-creates the tag at the current commit,
creates a draft release, uploads the listed files and publishes the release.

Usage:
  rolling_release --tag-name nightly --files dist/app.tar.gz,dist/app.zip
  INPUT_TAG_NAME=nightly INPUT_FILES=dist/app.zip rolling_release"
)]
pub struct Args {
    /// Tag (and release) to recreate
    #[arg(long, env = "INPUT_TAG_NAME", value_name = "TAG")]
    pub tag_name: Option<String>,

    /// Release title
    #[arg(long, env = "INPUT_RELEASE_NAME", default_value = "")]
    pub release_name: String,

    /// Comma-separated list of files to upload
    #[arg(long, env = "INPUT_FILES", default_value = "")]
    pub files: String,

    /// GitHub token
    #[arg(long = "github-token", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Repository in owner/repo form, used when the event payload has none
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Path of the workflow event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Commit to tag
    #[arg(long, env = "GITHUB_SHA")]
    pub sha: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// File step outputs are appended to
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output_file: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
