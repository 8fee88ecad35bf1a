//! SDS catalog API module
//!
//! This module talks to the remote catalog: it requests the record listing,
//! decodes the response envelope into [`Record`]s and exposes the HTTP seam
//! used by the downloader to fetch individual documents.

pub mod api;
pub mod errors;
pub mod extractor;
pub mod fetcher;
pub mod types;

pub use api::{CatalogApi, CatalogEndpoints, HttpCatalogApi};
pub use errors::CatalogError;
pub use extractor::{dedupe_records, extract_records, parse_records};
pub use fetcher::fetch_listing;
pub use types::{DetailsRequest, FileRequest};

use crate::models::Record;
use tracing::info;

/// Fetch and decode the listing for `filter`, optionally dropping repeated identifiers.
///
/// A failed request is an error; an unreadable response decodes to an empty list.
pub async fn fetch_records<A>(api: &A, filter: &str, dedupe: bool) -> Result<Vec<Record>, CatalogError>
where
    A: CatalogApi + ?Sized,
{
    let body = fetch_listing(api, filter).await?;
    let records = extract_records(&body);
    info!("Decoded {} records from catalog listing", records.len());

    if dedupe {
        let unique = dedupe_records(records);
        info!("{} unique records after deduplication", unique.len());
        Ok(unique)
    } else {
        Ok(records)
    }
}
