//! Local artifact preparation for upload.

use crate::github::AssetUpload;
use path_absolutize::Absolutize;
use std::io::{Error, ErrorKind};
use std::path::Path;

/// Resolve a file-list entry into an upload description
///
/// The path is made absolute against the current directory, the size is read
/// from the file's metadata and the asset name is the base file name, whatever
/// directory the entry points into.
pub fn prepare_asset(path: &Path) -> std::io::Result<AssetUpload> {
    let absolute = path.absolutize()?.into_owned();

    let metadata = std::fs::metadata(&absolute)?;
    if !metadata.is_file() {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!("{} is not a regular file", absolute.display()),
        ));
    }

    let name = absolute
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::new(ErrorKind::InvalidInput, "path has no file name"))?;

    Ok(AssetUpload {
        path: absolute,
        name,
        size: metadata.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_asset_uses_base_name_and_size() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let nested = dir.path().join("target").join("dist");
        fs::create_dir_all(&nested).unwrap();
        let file = nested.join("app-x86_64.tar.gz");
        fs::write(&file, b"0123456789").unwrap();

        let asset = prepare_asset(&file).unwrap();
        assert_eq!(asset.name, "app-x86_64.tar.gz");
        assert_eq!(asset.size, 10);
        assert!(asset.path.is_absolute());
    }

    #[test]
    fn test_prepare_asset_normalizes_dot_segments() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("app.zip"), b"zip").unwrap();

        let asset = prepare_asset(&dir.path().join("a").join("..").join("app.zip")).unwrap();
        assert_eq!(asset.name, "app.zip");
        assert_eq!(asset.path, dir.path().join("app.zip"));
    }

    #[test]
    fn test_prepare_asset_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let err = prepare_asset(&dir.path().join("nope.zip")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_prepare_asset_rejects_directory() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let err = prepare_asset(dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
