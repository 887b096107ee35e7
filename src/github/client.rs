//! `reqwest`-backed GitHub REST client for one repository

use super::api::{AssetUpload, GitRef, NewRelease, Release, ReleaseApi, UploadedAsset};
use crate::error::ApiError;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio_util::io::ReaderStream;
use url::Url;

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("rolling_release/", env!("CARGO_PKG_VERSION"));
const PER_PAGE: u32 = 100;

/// Connection settings for [`GitHubClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, e.g. `https://api.github.com` or `https://ghe.example.com/api/v3`
    pub api_url: Url,
    /// Bearer token
    pub token: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
}

/// GitHub REST client scoped to a single repository
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: Url,
    owner: String,
    repo: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl GitHubClient {
    /// Build an authenticated client
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| ApiError::Init("token contains characters not allowed in a header".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Init(e.to_string()))?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
        })
    }

    fn repo_url(&self, path: &[&str]) -> Result<Url, ApiError> {
        let mut segments = vec!["repos", self.owner.as_str(), self.repo.as_str()];
        segments.extend_from_slice(path);
        join_segments(&self.api_url, &segments)
    }

    /// URL under `git/<endpoint>` for a reference such as `tags/nightly`
    ///
    /// Each component of the reference becomes its own escaped path segment, so
    /// characters git allows in ref names (`#`, `?`, `%`) stay part of the path.
    fn ref_url(&self, endpoint: &str, reference: &str) -> Result<Url, ApiError> {
        let mut path = vec!["git", endpoint];
        path.extend(reference.split('/'));
        self.repo_url(&path)
    }

    /// Upload endpoint for a release, from its hypermedia `upload_url` when present
    fn upload_endpoint(&self, release: &Release) -> Result<Url, ApiError> {
        let advertised = release
            .upload_url
            .split_once('{')
            .map_or(release.upload_url.as_str(), |(base, _)| base);

        if !advertised.is_empty() {
            return Url::parse(advertised)
                .map_err(|e| ApiError::Decode(format!("invalid upload_url '{advertised}': {e}")));
        }

        let base = Url::parse(&uploads_base(self.api_url.as_str()))
            .map_err(|e| ApiError::Init(e.to_string()))?;
        let id = release.id.to_string();
        join_segments(
            &base,
            &["repos", &self.owner, &self.repo, "releases", id.as_str(), "assets"],
        )
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        log::debug!("{} {}", response.status(), response.url());
        Self::check(response).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl ReleaseApi for GitHubClient {
    async fn list_releases(&self) -> Result<Vec<Release>, ApiError> {
        let url = self.repo_url(&["releases"])?;
        let mut releases = Vec::new();

        for page in 1u32.. {
            let batch: Vec<Release> = self
                .send_json(self.http.get(url.clone()).query(&[("per_page", PER_PAGE), ("page", page)]))
                .await?;
            let last = batch.len() < PER_PAGE as usize;
            releases.extend(batch);
            if last {
                break;
            }
        }

        log::debug!("listed {} release(s)", releases.len());
        Ok(releases)
    }

    async fn delete_release(&self, release_id: u64) -> Result<(), ApiError> {
        let id = release_id.to_string();
        let url = self.repo_url(&["releases", id.as_str()])?;
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn get_ref(&self, reference: &str) -> Result<Option<GitRef>, ApiError> {
        let url = self.ref_url("ref", reference)?;
        match self.send_json(self.http.get(url)).await {
            Ok(found) => Ok(Some(found)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn delete_ref(&self, reference: &str) -> Result<(), ApiError> {
        let url = self.ref_url("refs", reference)?;
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn create_ref(&self, full_ref: &str, sha: &str) -> Result<GitRef, ApiError> {
        let url = self.repo_url(&["git", "refs"])?;
        let body = serde_json::json!({ "ref": full_ref, "sha": sha });
        self.send_json(self.http.post(url).json(&body)).await
    }

    async fn create_release(&self, release: &NewRelease) -> Result<Release, ApiError> {
        let url = self.repo_url(&["releases"])?;
        self.send_json(self.http.post(url).json(release)).await
    }

    async fn upload_asset(
        &self,
        release: &Release,
        asset: &AssetUpload,
    ) -> Result<UploadedAsset, ApiError> {
        let url = self.upload_endpoint(release)?;
        let file = tokio::fs::File::open(&asset.path).await?;
        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));

        let request = self
            .http
            .post(url)
            .query(&[("name", asset.name.as_str())])
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_LENGTH, asset.size)
            .body(body);

        self.send_json(request).await
    }

    async fn set_draft(&self, release_id: u64, draft: bool) -> Result<Release, ApiError> {
        let id = release_id.to_string();
        let url = self.repo_url(&["releases", id.as_str()])?;
        let body = serde_json::json!({ "draft": draft });
        self.send_json(self.http.patch(url).json(&body)).await
    }
}

/// Append percent-encoded path segments to `base`
fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::Init(format!("'{base}' cannot be used as an API base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Upload host matching an API base URL
///
/// github.com serves uploads from a separate host; Enterprise Server mounts them
/// next to the REST API under `/api/uploads`.
fn uploads_base(api_url: &str) -> String {
    let api_url = api_url.trim_end_matches('/');
    if api_url == DEFAULT_API_URL {
        return "https://uploads.github.com".to_string();
    }
    match api_url.strip_suffix("/api/v3") {
        Some(server) => format!("{server}/api/uploads"),
        None => api_url.to_string(),
    }
}
