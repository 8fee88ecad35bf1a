//! Centralized configuration management for sdsfetch

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Result, Context};

pub const DEFAULT_ENDPOINT_BASE: &str = "https://sdsportal.ext.colpal.cloud";
pub const DEFAULT_OUTPUT_DIR: &str = "PDFs";
pub const DEFAULT_FILTER: &str = "*";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the catalog API (scheme and host, no trailing slash)
    pub endpoint_base: String,
    /// Directory downloaded PDFs are written to
    pub output_dir: PathBuf,
    /// Listing query; "*" matches every record
    pub filter: String,
    /// Drop repeated identifiers before downloading
    pub dedupe: bool,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 60,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_base: DEFAULT_ENDPOINT_BASE.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            filter: DEFAULT_FILTER.to_string(),
            dedupe: true,
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint_base = lookup("SDSFETCH_ENDPOINT_BASE")
            .unwrap_or_else(|| DEFAULT_ENDPOINT_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let output_dir = lookup("SDSFETCH_OUTPUT_DIR")
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string())
            .into();

        let filter = lookup("SDSFETCH_FILTER").unwrap_or_else(|| DEFAULT_FILTER.to_string());

        let dedupe = parse_var(&lookup, "SDSFETCH_DEDUPE")?.unwrap_or(true);

        let http = HttpConfig {
            timeout_seconds: parse_var(&lookup, "SDSFETCH_HTTP_TIMEOUT_SECONDS")?.unwrap_or(60),
            user_agent: lookup("SDSFETCH_USER_AGENT").unwrap_or_else(default_user_agent),
        };

        Ok(Config {
            endpoint_base,
            output_dir,
            filter,
            dedupe,
            http,
        })
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.endpoint_base.is_empty() {
            anyhow::bail!("Endpoint base URL is empty");
        }

        if !self.endpoint_base.starts_with("http://") && !self.endpoint_base.starts_with("https://") {
            anyhow::bail!(
                "Endpoint base URL must start with http:// or https://: {}",
                self.endpoint_base
            );
        }

        if self.http.timeout_seconds == 0 {
            anyhow::bail!("HTTP timeout must be greater than zero");
        }

        Ok(())
    }
}

fn default_user_agent() -> String {
    format!("sdsfetch/{}", env!("CARGO_PKG_VERSION"))
}

/// Helper function to parse a looked-up variable as a specific type
fn parse_var<T, F>(lookup: &F, var_name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match lookup(var_name) {
        Some(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        None => Ok(None),
    }
}
