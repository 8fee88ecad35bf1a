//! Decoding of the listing envelope into records

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::catalog::CatalogError;
use crate::models::{CatalogEnvelope, Record};

/// Decode a listing response body.
///
/// A body without a `data` key decodes to an empty list.
pub fn parse_records(body: &[u8]) -> Result<Vec<Record>, CatalogError> {
    let envelope: CatalogEnvelope = serde_json::from_slice(body).map_err(CatalogError::Decode)?;
    Ok(envelope.data)
}

/// Decode a listing response body, logging and returning an empty list when it is unreadable
pub fn extract_records(body: &[u8]) -> Vec<Record> {
    match parse_records(body) {
        Ok(records) => records,
        Err(e) => {
            warn!("{}", e);
            Vec::new()
        }
    }
}

/// Drop records whose identifier was already seen. First occurrence wins; order is kept.
pub fn dedupe_records(records: Vec<Record>) -> Vec<Record> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(records.len());

    for record in records {
        if seen.insert(record.sub_id.clone()) {
            unique.push(record);
        } else {
            debug!("Dropping duplicate record {} (recn {})", record.sub_id, record.recn);
        }
    }

    unique
}
