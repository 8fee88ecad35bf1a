//! Catalog API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Error sending request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Catalog API error (status {status_code}): {message}")]
    Server {
        status_code: u16,
        message: String,
    },

    #[error("Error reading response: {0}")]
    BodyRead(#[source] reqwest::Error),

    #[error("Error parsing catalog response: {0}")]
    Decode(#[source] serde_json::Error),
}
