//! GitHub integration for rolling release operations

mod api;
mod client;

pub use api::{AssetUpload, GitObject, GitRef, NewRelease, Release, ReleaseApi, UploadedAsset};
pub use client::{ClientConfig, DEFAULT_API_URL, GitHubClient};
