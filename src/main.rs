use clap::Parser;
use anyhow::{Context, Result};
use tracing::info;

use sdsfetch::catalog::{self, HttpCatalogApi};
use sdsfetch::config::Config;
use sdsfetch::downloader;
use sdsfetch::models::{OutputFormat, Record};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "sdsfetch=info");
    }

    // Initialize logging to both console and file
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let file_appender = tracing_appender::rolling::never(".", "sdsfetch.log");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_default_env())
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env())
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    cli.command.apply_overrides(&mut config);
    config.validate()?;

    let api = HttpCatalogApi::new(&config)?;

    match &cli.command {
        Commands::Download { .. } => {
            info!("Starting download into: {}", config.output_dir.display());

            let summary = downloader::run(&api, &config).await?;
            println!(
                "Listed {} records ({} unique): {} saved, {} skipped, {} failed",
                summary.listed, summary.unique, summary.saved, summary.skipped, summary.failed
            );
        }

        Commands::List { format, .. } => {
            let format = Commands::parse_output_format(format)?;
            info!("Listing catalog records as {}", format.as_str());
            let records = catalog::fetch_records(&api, &config.filter, config.dedupe).await?;
            print_records(&records, format)?;
        }
    }

    Ok(())
}

fn print_records(records: &[Record], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for record in records {
                writer.serialize(record).context("Failed to write CSV row")?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            println!("Found {} records:", records.len());
            for record in records {
                println!("---");
                println!("SubID    : {}", record.sub_id);
                println!("Recn     : {}", record.recn);
                println!("Language : {}", record.language);
                println!("SbgVid   : {}", record.group_id);
            }
            if !records.is_empty() {
                println!("---");
            }
        }
    }
    Ok(())
}
