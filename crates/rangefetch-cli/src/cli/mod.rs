//! CLI for the rangefetch chunked downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rangefetch_core::config;
use std::path::PathBuf;

use commands::{run_config, run_get, run_probe, run_range, GetArgs};

/// Top-level CLI for rangefetch.
#[derive(Debug, Parser)]
#[command(name = "rangefetch")]
#[command(about = "rangefetch: sequential chunked HTTP downloader using byte ranges", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a URL chunk by chunk with Range requests.
    Get {
        /// Direct HTTP/HTTPS URL to download.
        url: String,

        /// Output file (default: last path segment of the URL).
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Attempts per chunk, including the first (overrides config).
        #[arg(long, value_name = "N")]
        max_attempts: Option<u32>,

        /// Number of chunks to split the resource into (overrides config).
        #[arg(long, value_name = "N")]
        chunks: Option<u64>,

        /// Download to `<PATH>.part` and rename on success.
        #[arg(long)]
        stage: bool,
    },

    /// Print the size and range support reported by a HEAD request.
    Probe {
        /// Direct HTTP/HTTPS URL.
        url: String,
    },

    /// Fetch a single inclusive byte range without retries.
    Range {
        /// Direct HTTP/HTTPS URL.
        url: String,
        /// First byte (inclusive).
        first: u64,
        /// Last byte (inclusive).
        last: u64,
        /// Write the body here instead of stdout.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Show the config file path and effective settings.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Get {
                url,
                output,
                max_attempts,
                chunks,
                stage,
            } => {
                let args = GetArgs {
                    url,
                    output,
                    max_attempts,
                    chunks,
                    stage,
                };
                run_get(&cfg, args).await?
            }
            CliCommand::Probe { url } => run_probe(&cfg, &url).await?,
            CliCommand::Range {
                url,
                first,
                last,
                output,
            } => run_range(&cfg, &url, first, last, output.as_deref()).await?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
