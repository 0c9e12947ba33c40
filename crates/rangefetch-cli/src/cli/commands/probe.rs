//! `rangefetch probe <url>`: HEAD the resource and print what the server reports.

use anyhow::{Context, Result};
use rangefetch_core::config::RangefetchConfig;
use rangefetch_core::{ChunkedDownloader, ProbeResult};

fn print_probe(url: &str, result: &ProbeResult) {
    println!("url:            {}", url);
    match result.content_length {
        Some(len) => println!("content-length: {}", len),
        None => println!("content-length: unknown (download would be empty)"),
    }
    println!(
        "accept-ranges:  {}",
        if result.accept_ranges { "bytes" } else { "not advertised" }
    );
    if let Some(etag) = &result.etag {
        println!("etag:           {}", etag);
    }
    if let Some(lm) = &result.last_modified {
        println!("last-modified:  {}", lm);
    }
}

pub async fn run_probe(cfg: &RangefetchConfig, url: &str) -> Result<()> {
    let downloader = ChunkedDownloader::with_curl(cfg.curl_options());
    let result = tokio::task::spawn_blocking({
        let url = url.to_string();
        move || downloader.probe(&url)
    })
    .await
    .context("probe task join")?
    .with_context(|| format!("probe failed for {}", url))?;
    print_probe(url, &result);
    Ok(())
}
