//! The slice of the GitHub REST API a rolling release needs.
//!
//! Every call is scoped to the repository the implementation was built for.
//! Phases depend on [`ReleaseApi`] rather than the HTTP client so the pipeline can
//! run against any backend that honours these contracts.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A release as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Platform-assigned identifier
    pub id: u64,
    /// Tag the release is bound to
    pub tag_name: String,
    /// Whether the release is still a draft
    #[serde(default)]
    pub draft: bool,
    /// Web URL of the release
    #[serde(default)]
    pub html_url: String,
    /// Hypermedia upload URL, e.g. `https://uploads.github.com/.../assets{?name,label}`
    #[serde(default)]
    pub upload_url: String,
}

/// A git reference as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitRef {
    /// Fully qualified name, e.g. `refs/tags/nightly`
    #[serde(rename = "ref")]
    pub name: String,
    /// Object the reference points at
    pub object: GitObject,
}

/// Target object of a git reference
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitObject {
    /// Object SHA
    pub sha: String,
}

/// Body for creating a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRelease {
    /// Tag to bind the release to
    pub tag_name: String,
    /// Display title
    pub name: String,
    /// Release notes
    pub body: String,
    /// Create as draft
    pub draft: bool,
    /// Mark as prerelease
    pub prerelease: bool,
}

/// A local file prepared for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUpload {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Asset name shown on the release (the file's base name)
    pub name: String,
    /// File size in bytes, sent as `content-length`
    pub size: u64,
}

/// An asset as returned after upload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedAsset {
    /// Platform-assigned identifier
    pub id: u64,
    /// Asset name
    pub name: String,
    /// Size in bytes as recorded by the platform
    #[serde(default)]
    pub size: u64,
}

/// Release and reference operations against one repository
#[allow(async_fn_in_trait)]
pub trait ReleaseApi {
    /// List every release of the repository
    async fn list_releases(&self) -> Result<Vec<Release>, ApiError>;

    /// Delete a release by id
    async fn delete_release(&self, release_id: u64) -> Result<(), ApiError>;

    /// Fetch a reference such as `tags/nightly`; `Ok(None)` when it does not exist
    async fn get_ref(&self, reference: &str) -> Result<Option<GitRef>, ApiError>;

    /// Delete a reference such as `tags/nightly`
    async fn delete_ref(&self, reference: &str) -> Result<(), ApiError>;

    /// Create a fully qualified reference such as `refs/tags/nightly` at `sha`
    async fn create_ref(&self, full_ref: &str, sha: &str) -> Result<GitRef, ApiError>;

    /// Create a release
    async fn create_release(&self, release: &NewRelease) -> Result<Release, ApiError>;

    /// Stream a file to the release as a binary asset
    async fn upload_asset(
        &self,
        release: &Release,
        asset: &AssetUpload,
    ) -> Result<UploadedAsset, ApiError>;

    /// Set the draft flag of a release
    async fn set_draft(&self, release_id: u64, draft: bool) -> Result<Release, ApiError>;
}
