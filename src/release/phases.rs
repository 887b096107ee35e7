//! Individual release phases.
//!
//! Cleanup phases return the bare [`ApiError`] so the caller can log and move
//! on. Every other phase wraps its failure in a [`ReleaseError`] naming the
//! tag or asset and is meant to be propagated.

use crate::error::{ApiError, ReleaseError, Result};
use crate::github::{NewRelease, Release, ReleaseApi, UploadedAsset};
use std::path::PathBuf;

use super::assets::prepare_asset;
use super::context::ReleasePhaseContext;

/// Delete every release bound to the target tag, returning how many were removed
pub async fn delete_releases<A: ReleaseApi>(
    ctx: &ReleasePhaseContext<'_, A>,
) -> std::result::Result<usize, ApiError> {
    let tag = &ctx.target.tag;
    ctx.output.info(&format!("Deleting releases for '{}'...", tag));

    let releases = ctx.api.list_releases().await?;
    let matching: Vec<&Release> = releases.iter().filter(|r| &r.tag_name == tag).collect();

    if matching.is_empty() {
        ctx.output.info(&format!("'{}' related release does not exist", tag));
        return Ok(0);
    }

    for release in &matching {
        ctx.api.delete_release(release.id).await?;
        ctx.output
            .info(&format!("Deleted release {} for '{}'", release.id, release.tag_name));
    }

    Ok(matching.len())
}

/// Delete the target tag reference, returning whether one existed
pub async fn delete_tag<A: ReleaseApi>(
    ctx: &ReleasePhaseContext<'_, A>,
) -> std::result::Result<bool, ApiError> {
    let tag = &ctx.target.tag;
    let tag_ref = ctx.target.tag_ref();
    ctx.output.info(&format!("Deleting tag '{}'...", tag));

    match ctx.api.get_ref(&tag_ref).await? {
        Some(_) => {
            ctx.api.delete_ref(&tag_ref).await?;
            ctx.output.info(&format!("Deleted tag '{}'", tag));
            Ok(true)
        }
        None => {
            ctx.output.info(&format!("Tag '{}' does not exist", tag));
            Ok(false)
        }
    }
}

/// Create the tag reference at the target commit
pub async fn create_tag<A: ReleaseApi>(ctx: &ReleasePhaseContext<'_, A>) -> Result<()> {
    let tag = &ctx.target.tag;
    ctx.output.info(&format!("Creating tag '{}'...", tag));

    ctx.api
        .create_ref(&ctx.target.full_tag_ref(), &ctx.target.sha)
        .await
        .map_err(|source| ReleaseError::TagCreation {
            tag: tag.clone(),
            source,
        })?;

    ctx.output.success(&format!("Created tag '{}'", tag));
    Ok(())
}

/// Create the draft release bound to the tag
pub async fn create_release<A: ReleaseApi>(ctx: &ReleasePhaseContext<'_, A>) -> Result<Release> {
    let tag = &ctx.target.tag;
    ctx.output.info(&format!("Creating release '{}'...", tag));

    let new_release = NewRelease {
        tag_name: tag.clone(),
        name: ctx.target.release_name.clone(),
        body: ctx.target.body.clone(),
        draft: true,
        prerelease: false,
    };

    let release = ctx
        .api
        .create_release(&new_release)
        .await
        .map_err(|source| ReleaseError::ReleaseCreation {
            tag: tag.clone(),
            source,
        })?;

    ctx.output
        .success(&format!("Created release '{}' (id {})", tag, release.id));
    Ok(release)
}

/// Upload every asset in order, one request at a time
pub async fn upload_assets<A: ReleaseApi>(
    ctx: &ReleasePhaseContext<'_, A>,
    release: &Release,
    assets: &[PathBuf],
) -> Result<Vec<UploadedAsset>> {
    ctx.output
        .info(&format!("Uploading assets for '{}'...", ctx.target.tag));

    let mut uploaded = Vec::with_capacity(assets.len());

    for path in assets {
        ctx.output.info(&format!("Uploading asset '{}'...", path.display()));

        let fail = |source: ApiError| ReleaseError::AssetUpload {
            path: path.clone(),
            source,
        };

        let upload = prepare_asset(path).map_err(|e| fail(e.into()))?;
        log::debug!("{} -> {} ({} bytes)", path.display(), upload.name, upload.size);

        let asset = ctx.api.upload_asset(release, &upload).await.map_err(fail)?;
        ctx.output.indent(&format!(
            "✓ Uploaded asset '{}' with ID {}",
            asset.name, asset.id
        ));
        uploaded.push(asset);
    }

    Ok(uploaded)
}

/// Flip the release out of draft
pub async fn publish_release<A: ReleaseApi>(
    ctx: &ReleasePhaseContext<'_, A>,
    release: &Release,
) -> Result<Release> {
    let tag = &ctx.target.tag;
    ctx.output
        .info(&format!("Marking release '{}' as published...", tag));

    let published = ctx
        .api
        .set_draft(release.id, false)
        .await
        .map_err(|source| ReleaseError::Publish {
            tag: tag.clone(),
            source,
        })?;

    ctx.output
        .success(&format!("Marked release '{}' as published", tag));
    Ok(published)
}
