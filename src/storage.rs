//! Local filesystem helpers for the download directory

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::downloader::DownloadError;

/// Permissions for a newly created output directory (rwxr-xr-x)
pub const OUTPUT_DIR_MODE: u32 = 0o755;

/// Whether `path` is an existing directory
pub async fn directory_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// Create the output directory if it does not exist yet.
///
/// Returns `true` when the directory was created by this call.
pub async fn ensure_output_dir(path: &Path) -> Result<bool> {
    if directory_exists(path).await {
        return Ok(false);
    }

    if tokio::fs::metadata(path).await.is_ok() {
        anyhow::bail!("Output path exists but is not a directory: {}", path.display());
    }

    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(OUTPUT_DIR_MODE);
    builder
        .create(path)
        .await
        .with_context(|| format!("Cannot create output directory: {}", path.display()))?;

    info!("Created output directory: {}", path.display());
    Ok(true)
}

/// Whether a regular file exists at `path`. Stat failures count as absent.
pub async fn file_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

pub fn document_path(output_dir: &Path, file_name: &str) -> PathBuf {
    output_dir.join(file_name)
}

/// Create (or truncate) `path` and write `content` to it
pub async fn write_document(path: &Path, content: &[u8]) -> Result<(), DownloadError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|source| DownloadError::Create {
            path: path.to_path_buf(),
            source,
        })?;

    let write_err = |source: std::io::Error| DownloadError::Write {
        path: path.to_path_buf(),
        source,
    };
    file.write_all(content).await.map_err(write_err)?;
    file.flush().await.map_err(write_err)?;

    Ok(())
}
