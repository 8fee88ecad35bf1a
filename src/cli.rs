use clap::{Parser, Subcommand};
use sdsfetch::config::Config;
use sdsfetch::models::OutputFormat;

#[derive(Parser)]
#[command(name = "sdsfetch")]
#[command(about = "Download safety data sheet PDFs from an SDS catalog API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the catalog listing and download a PDF for every record
    Download {
        /// Listing filter ("*" matches all records)
        #[arg(short, long)]
        filter: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<String>,

        /// Catalog API base URL
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Keep records with repeated identifiers
        #[arg(long)]
        no_dedupe: bool,
    },

    /// Fetch the catalog listing and print the records without downloading
    List {
        /// Listing filter ("*" matches all records)
        #[arg(short, long)]
        filter: Option<String>,

        /// Catalog API base URL
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Output format (table, csv)
        #[arg(long, default_value = "table")]
        format: String,

        /// Keep records with repeated identifiers
        #[arg(long)]
        no_dedupe: bool,
    },
}

impl Commands {
    pub fn parse_output_format(format: &str) -> Result<OutputFormat, anyhow::Error> {
        match format.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(anyhow::anyhow!("Unsupported output format: {}. Supported formats: table, csv", other)),
        }
    }

    /// Apply command-line overrides on top of the environment configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        let (filter, endpoint, no_dedupe) = match self {
            Commands::Download { filter, output, endpoint, no_dedupe } => {
                if let Some(output) = output {
                    config.output_dir = output.into();
                }
                (filter, endpoint, *no_dedupe)
            }
            Commands::List { filter, endpoint, no_dedupe, .. } => (filter, endpoint, *no_dedupe),
        };

        if let Some(filter) = filter {
            config.filter = filter.clone();
        }
        if let Some(endpoint) = endpoint {
            config.endpoint_base = endpoint.trim_end_matches('/').to_string();
        }
        if no_dedupe {
            config.dedupe = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_download_overrides() {
        let cli = Cli::try_parse_from([
            "sdsfetch", "download", "--filter", "soap", "--output", "out", "--endpoint",
            "http://localhost:8080/", "--no-dedupe",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.command.apply_overrides(&mut config);
        assert_eq!(config.filter, "soap");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.endpoint_base, "http://localhost:8080");
        assert!(!config.dedupe);
    }

    #[test]
    fn test_list_keeps_defaults() {
        let cli = Cli::try_parse_from(["sdsfetch", "list"]).unwrap();

        let mut config = Config::default();
        cli.command.apply_overrides(&mut config);
        assert_eq!(config.filter, "*");
        assert!(config.dedupe);
        assert_eq!(config.output_dir, PathBuf::from("PDFs"));
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(Commands::parse_output_format("CSV").unwrap(), OutputFormat::Csv);
        assert_eq!(Commands::parse_output_format("table").unwrap(), OutputFormat::Table);
        assert!(Commands::parse_output_format("xml").is_err());
    }
}
