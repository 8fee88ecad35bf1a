//! Single document download

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::catalog::{CatalogApi, FileRequest};
use crate::downloader::DownloadError;
use crate::models::Record;
use crate::storage;

/// What happened to one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Document fetched and written
    Saved { path: PathBuf, bytes: usize },
    /// A file with the target name was already present; nothing was requested
    Skipped { path: PathBuf },
}

/// Reject identifiers that would not name a file directly inside the output directory
pub fn validate_identifier(sub_id: &str) -> Result<(), DownloadError> {
    let invalid = sub_id.is_empty()
        || sub_id == "."
        || sub_id == ".."
        || sub_id.contains('/')
        || sub_id.contains('\\')
        || sub_id.contains('\0');

    if invalid {
        return Err(DownloadError::InvalidIdentifier(sub_id.to_string()));
    }
    Ok(())
}

/// Download the document for `record` into `output_dir/file_name`.
///
/// An existing regular file at the target path is left untouched and no
/// request is sent. A partially written file is not cleaned up on failure.
pub async fn fetch_and_save_document<A>(
    api: &A,
    record: &Record,
    output_dir: &Path,
    file_name: &str,
) -> Result<DownloadOutcome, DownloadError>
where
    A: CatalogApi + ?Sized,
{
    validate_identifier(&record.sub_id)?;

    let path = storage::document_path(output_dir, file_name);

    if storage::file_exists(&path).await {
        info!("File already exists: {}; skipping download", path.display());
        return Ok(DownloadOutcome::Skipped { path });
    }

    let request = FileRequest::for_record(record);
    debug!("Requesting document {} (recn {})", request.spec, request.recn);
    let content = api.get_file(&request).await?;

    storage::write_document(&path, &content).await?;

    Ok(DownloadOutcome::Saved {
        path,
        bytes: content.len(),
    })
}
