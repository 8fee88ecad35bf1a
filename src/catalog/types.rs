//! Request bodies sent to the catalog API

use serde::Serialize;
use crate::models::Record;

/// Client identifier the portal expects from app traffic
pub const CLIENT_ID: &str = "app";
pub const COUNTRY: &str = "USA";
pub const LISTING_LANGUAGE: &str = "English";
/// Content disposition requested for document downloads
pub const CONTENT_DISPOSITION: &str = "attachment";

/// Body of a `get_details` listing request.
///
/// Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsRequest {
    pub client: String,
    pub country: String,
    pub spec: String,
    /// Free-text filter; "*" matches all records
    pub desc: String,
    pub lang: String,
}

impl DetailsRequest {
    pub fn for_filter(filter: &str) -> Self {
        Self {
            client: CLIENT_ID.to_string(),
            country: COUNTRY.to_string(),
            spec: String::new(),
            desc: filter.to_string(),
            lang: LISTING_LANGUAGE.to_string(),
        }
    }
}

/// Body of a `get_file` document download request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRequest {
    pub client: String,
    /// Record identifier (subid)
    pub spec: String,
    pub recn: i64,
    pub langu: String,
    pub sbgvid: String,
    pub content: String,
}

impl FileRequest {
    pub fn for_record(record: &Record) -> Self {
        Self {
            client: CLIENT_ID.to_string(),
            spec: record.sub_id.clone(),
            recn: record.recn,
            langu: record.language.clone(),
            sbgvid: record.group_id.clone(),
            content: CONTENT_DISPOSITION.to_string(),
        }
    }
}
