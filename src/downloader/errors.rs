//! Document download error types

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Invalid record identifier '{0}': must be usable as a file name")]
    InvalidIdentifier(String),

    #[error(transparent)]
    Api(#[from] CatalogError),

    #[error("Error creating file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error writing to file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
