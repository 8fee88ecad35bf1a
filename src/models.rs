use serde::{Deserialize, Deserializer, Serialize};

/// A single catalog entry, as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Product sub id, also the stem of the downloaded file name
    #[serde(rename = "subid", default, deserialize_with = "null_as_default")]
    pub sub_id: String,
    /// Record number
    #[serde(default, deserialize_with = "null_as_default")]
    pub recn: i64,
    /// Language code
    #[serde(rename = "langu", default, deserialize_with = "null_as_default")]
    pub language: String,
    /// GHS group id
    #[serde(rename = "sbgvid", default, deserialize_with = "null_as_default")]
    pub group_id: String,
}

/// Missing and `null` fields decode to the type's zero value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Record {
    /// Name of the local file this record is saved under
    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.sub_id)
    }
}

/// Top-level listing response envelope
#[derive(Debug, Deserialize)]
pub struct CatalogEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Record>,
}

/// Counters reported at the end of a download run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records in the listing response
    pub listed: usize,
    /// Records left after deduplication
    pub unique: usize,
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Csv => "csv",
        }
    }
}
