//! Rolling release pipeline.
//!
//! Phases run strictly in order and every API call is awaited before the next
//! one is issued:
//! - cleanup: delete releases bound to the tag, then the tag itself (tolerated failures)
//! - provisioning: create the tag at the target commit, then a draft release
//! - upload: stream each asset to the draft
//! - finalization: publish the draft

mod assets;
mod context;
mod phases;

pub use assets::prepare_asset;
pub use context::ReleasePhaseContext;
pub use phases::{
    create_release, create_tag, delete_releases, delete_tag, publish_release, upload_assets,
};

use crate::cli::OutputManager;
use crate::config::ReleaseTarget;
use crate::error::Result;
use crate::github::{Release, ReleaseApi};
use std::path::PathBuf;

/// Recreate the release for `target` and return it once published
///
/// No retries and no rollback: if a fatal phase fails, whatever was already
/// created (tag, draft release, uploaded assets) stays on the platform.
pub async fn run_release<A: ReleaseApi>(
    api: &A,
    target: &ReleaseTarget,
    assets: &[PathBuf],
    output: &OutputManager,
) -> Result<Release> {
    let ctx = ReleasePhaseContext {
        api,
        target,
        output,
    };

    if let Err(e) = delete_releases(&ctx).await {
        output.warn(&format!("Failed to delete release '{}': {}", target.tag, e));
    }

    // Reported through the logger only, without an annotation.
    if let Err(e) = delete_tag(&ctx).await {
        log::warn!("Failed to delete tag '{}': {}", target.tag, e);
    }

    create_tag(&ctx).await?;
    let release = create_release(&ctx).await?;
    upload_assets(&ctx, &release, assets).await?;
    let published = publish_release(&ctx, &release).await?;

    output.success(&format!(
        "Published release '{}' with {} asset(s)",
        target.tag,
        assets.len()
    ));
    Ok(published)
}
