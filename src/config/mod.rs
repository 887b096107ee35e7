//! Run configuration resolved once at startup.
//!
//! Everything the pipeline needs is read from [`Args`] (CLI flags backed by the
//! runner's `INPUT_*` and `GITHUB_*` variables) into a [`RunConfig`], which is then
//! passed by reference into each phase. Nothing is read from the environment
//! after this point.

mod event;

pub use event::{Repository, repository_from_event};

use crate::cli::Args;
use crate::error::{ConfigError, Result};
use crate::github::ClientConfig;
use std::path::PathBuf;
use url::Url;

/// Notes attached to every release
pub const RELEASE_BODY: &str = "Automatic latest release by GitHub Actions";

/// What to release and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTarget {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Commit the tag is (re)created at
    pub sha: String,
    /// Tag name, e.g. `nightly`
    pub tag: String,
    /// Release title
    pub release_name: String,
    /// Release notes
    pub body: String,
}

impl ReleaseTarget {
    /// Reference path used by the get/delete ref endpoints, `tags/<tag>`
    pub fn tag_ref(&self) -> String {
        format!("tags/{}", self.tag)
    }

    /// Fully qualified reference used when creating the tag, `refs/tags/<tag>`
    pub fn full_tag_ref(&self) -> String {
        format!("refs/tags/{}", self.tag)
    }
}

/// Everything one run needs, read once from the inputs
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Release target
    pub target: ReleaseTarget,
    /// Files to upload, in order
    pub assets: Vec<PathBuf>,
    /// API connection settings
    pub client: ClientConfig,
    /// File the `release_id` output is appended to
    pub output_file: Option<PathBuf>,
}

impl RunConfig {
    /// Resolve the run configuration
    ///
    /// The token is checked first so a missing credential fails before any other
    /// input is looked at, and long before any network call.
    pub fn from_args(args: &Args) -> Result<Self> {
        let token = non_empty(args.token.as_deref()).ok_or(ConfigError::MissingToken)?;

        let tag = non_empty(args.tag_name.as_deref()).ok_or_else(|| ConfigError::MissingInput {
            input: "tag_name".to_string(),
        })?;

        let repository = resolve_repository(args)?;

        let sha = non_empty(args.sha.as_deref()).ok_or_else(|| ConfigError::MissingInput {
            input: "GITHUB_SHA".to_string(),
        })?;

        let api_url = Url::parse(&args.api_url).map_err(|e| ConfigError::InvalidApiUrl {
            value: args.api_url.clone(),
            reason: e.to_string(),
        })?;

        let target = ReleaseTarget {
            owner: repository.owner.clone(),
            repo: repository.name.clone(),
            sha: sha.to_string(),
            tag: tag.to_string(),
            release_name: args.release_name.clone(),
            body: RELEASE_BODY.to_string(),
        };

        Ok(Self {
            target,
            assets: parse_file_list(&args.files),
            client: ClientConfig {
                api_url,
                token: token.to_string(),
                owner: repository.owner,
                repo: repository.name,
            },
            output_file: args.output_file.clone(),
        })
    }
}

/// Split the `files` input on commas, dropping empty entries
///
/// Entries are kept verbatim, so `"a.zip, b.zip"` yields `" b.zip"` as the
/// second path.
pub fn parse_file_list(files: &str) -> Vec<PathBuf> {
    files
        .split(',')
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Event payload first, then `GITHUB_REPOSITORY` / `--repository`
fn resolve_repository(args: &Args) -> Result<Repository> {
    if let Some(path) = &args.event_path
        && let Some(repository) = repository_from_event(path)?
    {
        return Ok(repository);
    }

    match non_empty(args.repository.as_deref()) {
        Some(slug) => Ok(Repository::parse(slug)?),
        None => Err(ConfigError::MissingRepository {
            reason: "no repository in the event payload and GITHUB_REPOSITORY is not set"
                .to_string(),
        }
        .into()),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;
    use crate::github::DEFAULT_API_URL;

    fn args() -> Args {
        Args {
            tag_name: Some("nightly".to_string()),
            release_name: "Nightly build".to_string(),
            files: "dist/app.tar.gz,dist/app.zip".to_string(),
            token: Some("ghs_test".to_string()),
            repository: Some("octo/widgets".to_string()),
            event_path: None,
            sha: Some("0123456789abcdef0123456789abcdef01234567".to_string()),
            api_url: DEFAULT_API_URL.to_string(),
            output_file: None,
        }
    }

    #[test]
    fn test_parse_file_list() {
        assert!(parse_file_list("").is_empty());
        assert_eq!(
            parse_file_list("a.zip,,b/c.tar.gz,"),
            vec![PathBuf::from("a.zip"), PathBuf::from("b/c.tar.gz")]
        );
        assert_eq!(parse_file_list("a, b")[1], PathBuf::from(" b"));
    }

    #[test]
    fn test_from_args_builds_target() {
        let config = RunConfig::from_args(&args()).unwrap();
        assert_eq!(config.target.owner, "octo");
        assert_eq!(config.target.repo, "widgets");
        assert_eq!(config.target.tag, "nightly");
        assert_eq!(config.target.body, RELEASE_BODY);
        assert_eq!(config.target.tag_ref(), "tags/nightly");
        assert_eq!(config.target.full_tag_ref(), "refs/tags/nightly");
        assert_eq!(config.assets.len(), 2);
        assert_eq!(config.client.owner, "octo");
    }

    #[test]
    fn test_missing_token_checked_first() {
        let mut a = args();
        a.token = Some(String::new());
        a.tag_name = None;
        a.repository = None;
        let err = RunConfig::from_args(&a).unwrap_err();
        assert!(matches!(err, ReleaseError::Config(ConfigError::MissingToken)));
    }

    #[test]
    fn test_missing_tag() {
        let mut a = args();
        a.tag_name = Some(String::new());
        let err = RunConfig::from_args(&a).unwrap_err();
        assert!(matches!(
            err,
            ReleaseError::Config(ConfigError::MissingInput { ref input }) if input == "tag_name"
        ));
    }

    #[test]
    fn test_missing_repository() {
        let mut a = args();
        a.repository = None;
        let err = RunConfig::from_args(&a).unwrap_err();
        assert!(matches!(err, ReleaseError::Config(ConfigError::MissingRepository { .. })));
    }

    #[test]
    fn test_event_payload_wins_over_repository_variable() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("event.json");
        std::fs::write(
            &path,
            r#"{"repository": {"name": "fork", "owner": {"login": "someone"}}}"#,
        )
        .unwrap();

        let mut a = args();
        a.event_path = Some(path);
        let config = RunConfig::from_args(&a).unwrap();
        assert_eq!(config.target.owner, "someone");
        assert_eq!(config.target.repo, "fork");
    }

    #[test]
    fn test_invalid_api_url() {
        let mut a = args();
        a.api_url = "not a url".to_string();
        let err = RunConfig::from_args(&a).unwrap_err();
        assert!(matches!(err, ReleaseError::Config(ConfigError::InvalidApiUrl { .. })));
    }
}
