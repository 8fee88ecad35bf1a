//! sdsfetch library
//!
//! Lists safety data sheet records from an SDS catalog API and downloads the
//! PDF document for each record into a local directory.

pub mod catalog;
pub mod config;
pub mod downloader;
pub mod models;
pub mod storage;
