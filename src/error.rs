//! Error types for rolling release operations.
//!
//! Fatal phase failures carry the tag (or asset path) they were working on so the
//! top-level handler can report exactly which step aborted the run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rolling release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all rolling release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Input or environment resolution errors
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Errors talking to the GitHub API outside a named phase
    #[error("GitHub error: {0}")]
    Api(#[from] ApiError),

    /// Creating the tag reference failed
    #[error("Failed to create tag '{tag}': {source}")]
    TagCreation {
        /// Tag name
        tag: String,
        /// Underlying API error
        #[source]
        source: ApiError,
    },

    /// Creating the draft release failed
    #[error("Failed to create release '{tag}': {source}")]
    ReleaseCreation {
        /// Tag name
        tag: String,
        /// Underlying API error
        #[source]
        source: ApiError,
    },

    /// Uploading a release asset failed
    #[error("Failed to upload asset '{}': {source}", .path.display())]
    AssetUpload {
        /// Path of the asset as given in the file list
        path: PathBuf,
        /// Underlying API or IO error
        #[source]
        source: ApiError,
    },

    /// Flipping the release out of draft failed
    #[error("Failed to mark release '{tag}' as published: {source}")]
    Publish {
        /// Tag name
        tag: String,
        /// Underlying API error
        #[source]
        source: ApiError,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Input and environment errors, all raised before any network call
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Authentication token missing from the environment
    #[error("GITHUB_TOKEN is not defined in the environment variables")]
    MissingToken,

    /// Required input missing or empty
    #[error("Input required and not supplied: {input}")]
    MissingInput {
        /// Input name as declared for the action
        input: String,
    },

    /// Repository could not be determined from the event payload or GITHUB_REPOSITORY
    #[error("Could not determine the target repository: {reason}")]
    MissingRepository {
        /// Reason for the error
        reason: String,
    },

    /// Repository slug not in owner/repo form
    #[error("Invalid repository '{value}'. Expected: owner/repo")]
    InvalidRepository {
        /// Value that failed to parse
        value: String,
    },

    /// Event payload unreadable or malformed
    #[error("Failed to read event payload {}: {reason}", .path.display())]
    EventPayload {
        /// Payload path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// API base URL not a valid URL
    #[error("Invalid API URL '{value}': {reason}")]
    InvalidApiUrl {
        /// Value that failed to parse
        value: String,
        /// Reason for the error
        reason: String,
    },
}

/// Errors from a single GitHub API call
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status returned by the API
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// GitHub's `message` field, or the raw body
        message: String,
    },

    /// Local file could not be read for upload
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built from the configuration
    #[error("Failed to initialise GitHub client: {0}")]
    Init(String),

    /// Response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status code, when the API answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the API reported the resource as absent
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        let api_status = match self {
            ReleaseError::Api(e)
            | ReleaseError::TagCreation { source: e, .. }
            | ReleaseError::ReleaseCreation { source: e, .. }
            | ReleaseError::AssetUpload { source: e, .. }
            | ReleaseError::Publish { source: e, .. } => e.status(),
            _ => None,
        };

        match (self, api_status) {
            (ReleaseError::Config(ConfigError::MissingToken), _) => vec![
                "Pass the token to the step: env: GITHUB_TOKEN: ${{ secrets.GITHUB_TOKEN }}"
                    .to_string(),
            ],
            (ReleaseError::Config(ConfigError::MissingRepository { .. }), _) => vec![
                "Set GITHUB_REPOSITORY or pass --repository owner/repo".to_string(),
            ],
            (_, Some(401)) => vec!["Verify GITHUB_TOKEN is valid and not expired".to_string()],
            (_, Some(403)) => vec![
                "Grant the workflow 'contents: write' permission".to_string(),
                "Check whether the API rate limit has been exceeded".to_string(),
            ],
            (ReleaseError::TagCreation { .. }, Some(422)) => vec![
                "Verify GITHUB_SHA names a commit that exists in the repository".to_string(),
                "A tag with this name may still exist; check the cleanup warnings above"
                    .to_string(),
            ],
            (ReleaseError::AssetUpload { .. }, _) => vec![
                "Check that every path in 'files' exists relative to the working directory"
                    .to_string(),
                "The draft release was left in place; re-run the job to recreate it".to_string(),
            ],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ApiError {
        ApiError::Status {
            status: code,
            message: "Reference already exists".to_string(),
        }
    }

    #[test]
    fn test_phase_errors_name_the_tag() {
        let err = ReleaseError::TagCreation {
            tag: "nightly".to_string(),
            source: status(422),
        };
        assert_eq!(
            err.to_string(),
            "Failed to create tag 'nightly': HTTP 422: Reference already exists"
        );

        let err = ReleaseError::Publish {
            tag: "nightly".to_string(),
            source: status(500),
        };
        assert!(err.to_string().starts_with("Failed to mark release 'nightly' as published"));
    }

    #[test]
    fn test_not_found_detection() {
        assert!(status(404).is_not_found());
        assert!(!status(422).is_not_found());
        assert!(!ApiError::Decode("x".to_string()).is_not_found());
    }

    #[test]
    fn test_suggestions_for_invalid_sha() {
        let err = ReleaseError::TagCreation {
            tag: "nightly".to_string(),
            source: status(422),
        };
        let suggestions = err.recovery_suggestions();
        assert!(suggestions.iter().any(|s| s.contains("GITHUB_SHA")));
    }

    #[test]
    fn test_missing_token_message() {
        let err = ReleaseError::from(ConfigError::MissingToken);
        assert_eq!(
            err.to_string(),
            "GITHUB_TOKEN is not defined in the environment variables"
        );
        assert_eq!(err.recovery_suggestions().len(), 1);
    }
}
