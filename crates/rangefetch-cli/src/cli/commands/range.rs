//! `rangefetch range <url> <first> <last>`: one raw ranged GET.

use anyhow::{Context, Result};
use rangefetch_core::config::RangefetchConfig;
use rangefetch_core::ChunkedDownloader;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub async fn run_range(
    cfg: &RangefetchConfig,
    url: &str,
    first: u64,
    last: u64,
    output: Option<&Path>,
) -> Result<()> {
    let downloader = ChunkedDownloader::with_curl(cfg.curl_options());
    let (status, body) = tokio::task::spawn_blocking({
        let url = url.to_string();
        move || {
            let mut resp = downloader.fetch_range(&url, first, last)?;
            let hint = last.saturating_sub(first).saturating_add(1).min(1 << 20) as usize;
            let body = resp.read_body(hint)?;
            Ok::<_, rangefetch_core::FetchError>((resp.status(), body))
        }
    })
    .await
    .context("range task join")?
    .with_context(|| format!("range {}-{} of {}", first, last, url))?;

    eprintln!("HTTP {} ({} bytes)", status, body.len());
    if status != 206 {
        eprintln!("warning: server did not answer with 206 Partial Content");
    }

    match output {
        Some(path) => {
            fs::write(path, &body).with_context(|| format!("writing {}", path.display()))?;
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(&body)?;
            out.flush()?;
        }
    }
    Ok(())
}
