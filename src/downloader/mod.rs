use anyhow::{Context, Result};
use std::path::Path;
use tracing::{error, info, warn};

use crate::catalog::{self, CatalogApi};
use crate::config::Config;
use crate::models::{Record, RunSummary};
use crate::storage;

pub mod document;
pub mod errors;

pub use document::{fetch_and_save_document, DownloadOutcome};
pub use errors::DownloadError;

/// Run the whole pipeline: prepare the output directory, fetch and decode the
/// listing, then download every record in turn.
///
/// Only a failed listing request aborts the run; per-record failures are
/// logged and counted.
pub async fn run<A>(api: &A, config: &Config) -> Result<RunSummary>
where
    A: CatalogApi + ?Sized,
{
    storage::ensure_output_dir(&config.output_dir).await?;

    let body = catalog::fetch_listing(api, &config.filter)
        .await
        .context("Catalog listing request failed")?;

    let records = catalog::extract_records(&body);
    let listed = records.len();
    info!("Catalog listing contains {} records", listed);

    let records = if config.dedupe {
        catalog::dedupe_records(records)
    } else {
        records
    };

    let mut summary = download_all(api, &records, &config.output_dir).await;
    summary.listed = listed;
    Ok(summary)
}

/// Download each record sequentially into `output_dir`
pub async fn download_all<A>(api: &A, records: &[Record], output_dir: &Path) -> RunSummary
where
    A: CatalogApi + ?Sized,
{
    let mut summary = RunSummary {
        listed: records.len(),
        unique: records.len(),
        ..RunSummary::default()
    };

    for (index, record) in records.iter().enumerate() {
        info!(
            "Record {}/{}: SubID={} Recn={} Language={} SbgVid={}",
            index + 1,
            records.len(),
            record.sub_id,
            record.recn,
            record.language,
            record.group_id
        );

        let file_name = record.file_name();
        match fetch_and_save_document(api, record, output_dir, &file_name).await {
            Ok(DownloadOutcome::Saved { path, bytes }) => {
                summary.saved += 1;
                info!("✓ PDF saved successfully as {} ({} bytes)", path.display(), bytes);
            }
            Ok(DownloadOutcome::Skipped { .. }) => {
                summary.skipped += 1;
            }
            Err(e @ DownloadError::InvalidIdentifier(_)) => {
                summary.failed += 1;
                warn!("✗ Skipping record: {}", e);
            }
            Err(e) => {
                summary.failed += 1;
                error!("✗ Failed to download document {}: {}", record.sub_id, e);
            }
        }
    }

    info!(
        "Run finished: {} saved, {} skipped, {} failed",
        summary.saved, summary.skipped, summary.failed
    );
    summary
}
