//! `rangefetch get <url>`: full chunked download.

use anyhow::{bail, Context, Result};
use rangefetch_core::config::RangefetchConfig;
use rangefetch_core::storage;
use rangefetch_core::{ChunkedDownloader, DownloadEvent, DownloadOutcome};
use std::path::PathBuf;
use url::Url;

/// Used when the URL path has no usable last segment.
const FALLBACK_NAME: &str = "download.bin";

#[derive(Debug)]
pub struct GetArgs {
    pub url: String,
    pub output: Option<PathBuf>,
    pub max_attempts: Option<u32>,
    pub chunks: Option<u64>,
    pub stage: bool,
}

/// Last non-empty path segment of `url`, or `download.bin`.
pub fn default_output(url: &Url) -> PathBuf {
    let name = url
        .path_segments()
        .and_then(|mut segs| segs.next_back())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..");
    PathBuf::from(name.unwrap_or(FALLBACK_NAME))
}

/// Prints retry diagnostics to stderr and whole-percent progress to stdout.
fn report(last_percent: &mut Option<u64>, event: &DownloadEvent<'_>) {
    match event {
        DownloadEvent::Started {
            expected,
            chunk_size,
        } => {
            println!("{} bytes in chunks of {}", expected, chunk_size);
        }
        DownloadEvent::ChunkWritten { progress, .. } => {
            let pct = progress.percent().floor() as u64;
            if *last_percent != Some(pct) {
                *last_percent = Some(pct);
                println!(
                    "{:>3}%  {} / {} bytes  {:.0} B/s",
                    pct,
                    progress.downloaded,
                    progress.expected,
                    progress.bytes_per_sec()
                );
            }
        }
        DownloadEvent::Retrying { error, attempt, .. } => {
            eprintln!("I/O error has occurred: {}", error);
            eprintln!("Going to do attempt {}", attempt);
        }
        DownloadEvent::AttemptsExceeded { window, attempts } => {
            eprintln!(
                "A file could not be downloaded. Number of attempts are exceeded ({} for range {}).",
                attempts, window
            );
        }
        DownloadEvent::Finished { .. } => {}
    }
}

pub async fn run_get(cfg: &RangefetchConfig, args: GetArgs) -> Result<()> {
    let url = Url::parse(&args.url).with_context(|| format!("invalid URL: {}", args.url))?;
    let final_path = args.output.clone().unwrap_or_else(|| default_output(&url));
    let target = if args.stage {
        storage::temp_path(&final_path)
    } else {
        final_path.clone()
    };

    let mut downloader = ChunkedDownloader::with_curl(cfg.curl_options())
        .with_policy(cfg.retry_policy())
        .with_chunk_count(args.chunks.unwrap_or(cfg.chunk_count));
    if let Some(n) = args.max_attempts {
        downloader.set_max_attempts(n);
    }
    tracing::info!(
        url = %url,
        target = %target.display(),
        chunks = downloader.chunk_count(),
        max_attempts = downloader.max_attempts(),
        "get"
    );

    let outcome = tokio::task::spawn_blocking({
        let uri = url.to_string();
        let target = target.clone();
        move || {
            let mut last_percent = None;
            downloader.download_with(&uri, &target, |event| report(&mut last_percent, event))
        }
    })
    .await
    .context("download task join")??;

    match outcome {
        DownloadOutcome::Success { bytes_written } => {
            if args.stage {
                storage::promote(&target, &final_path)?;
            }
            println!("saved {} bytes to {}", bytes_written, final_path.display());
            Ok(())
        }
        DownloadOutcome::Failure(reason) => {
            bail!("{}; incomplete file left at {}", reason, target.display())
        }
    }
}
