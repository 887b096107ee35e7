//! Repository identity from the workflow run context.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Owner and name of the repository being released
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Owner login
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl Repository {
    /// Parse an `owner/repo` slug as found in `GITHUB_REPOSITORY`
    pub fn parse(slug: &str) -> Result<Self, ConfigError> {
        match slug.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(ConfigError::InvalidRepository {
                value: slug.to_string(),
            }),
        }
    }
}

#[derive(Deserialize)]
struct EventPayload {
    repository: Option<PayloadRepository>,
}

#[derive(Deserialize)]
struct PayloadRepository {
    name: String,
    owner: PayloadOwner,
}

#[derive(Deserialize)]
struct PayloadOwner {
    login: String,
}

/// Read the repository from the event payload written by the runner
///
/// Returns `Ok(None)` for events that carry no repository (e.g. some
/// `workflow_dispatch` payloads on older runners).
pub fn repository_from_event(path: &Path) -> Result<Option<Repository>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::EventPayload {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let payload: EventPayload =
        serde_json::from_str(&raw).map_err(|e| ConfigError::EventPayload {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(payload.repository.map(|r| Repository {
        owner: r.owner.login,
        name: r.name,
    }))
}
