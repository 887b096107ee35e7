//! # Rolling Release
//!
//! Keeps a single "rolling" GitHub release (such as `nightly` or `latest`) pointed
//! at the current commit.
//!
//! Each run deletes any release and tag with the given name, re-creates the tag
//! at the triggering commit, creates a draft release, uploads the build
//! artifacts and finally publishes the release.
//!
//! ## Usage
//!
//! ```bash
//! rolling_release --tag-name nightly --release-name "Nightly" --files dist/app.tar.gz,dist/app.zip
//! ```
//!
//! Inside a GitHub Actions step the same inputs are read from `INPUT_TAG_NAME`,
//! `INPUT_RELEASE_NAME` and `INPUT_FILES`, the repository and commit from the
//! run context, and the token from `GITHUB_TOKEN`. The created release id is
//! written to the `release_id` step output.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod release;

pub use cli::{Args, OutputManager};
pub use config::{ReleaseTarget, RunConfig};
pub use error::{ApiError, ConfigError, ReleaseError, Result};
pub use github::{GitHubClient, ReleaseApi};
pub use release::run_release;
