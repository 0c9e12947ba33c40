//! libcurl-backed transport (blocking `Easy` handle per request).

use std::cell::Cell;
use std::io;
use std::str;
use std::time::Duration;

use curl::easy::{Easy, HttpVersion, List};
use url::Url;

use super::body::BufferedBody;
use super::headers::ResponseHeaders;
use super::{ChunkResponse, HeadResponse, Transport, HTTP_PARTIAL_CONTENT, MAX_PREALLOC};
use crate::retry::{classify_curl_error, ErrorKind, FetchError};
use crate::segmenter::RangeWindow;

/// Per-request libcurl options.
#[derive(Debug, Clone)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    /// Hard wall-clock limit for one request.
    pub timeout: Duration,
    /// Abort when throughput stays below `low_speed_limit` bytes/s for `low_speed_time`.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    /// Ask for HTTP/2 on TLS connections; libcurl falls back to HTTP/1.1.
    pub prefer_http2: bool,
    pub follow_redirects: bool,
    pub max_redirections: u32,
    pub user_agent: Option<String>,
    /// Extra request headers (name, value).
    pub headers: Vec<(String, String)>,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(3600),
            low_speed_limit: 1024,
            low_speed_time: Duration::from_secs(60),
            prefer_http2: true,
            follow_redirects: true,
            max_redirections: 10,
            user_agent: None,
            headers: Vec::new(),
        }
    }
}

/// Blocking transport: one libcurl `Easy` handle per request.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    options: CurlOptions,
}

impl CurlTransport {
    pub fn new(options: CurlOptions) -> Self {
        Self { options }
    }

    fn configure(&self, easy: &mut Easy, url: &Url) -> Result<(), FetchError> {
        let opts = &self.options;
        easy.url(url.as_str())?;
        easy.follow_location(opts.follow_redirects)?;
        easy.max_redirections(opts.max_redirections)?;
        easy.connect_timeout(opts.connect_timeout)?;
        easy.low_speed_limit(opts.low_speed_limit)?;
        easy.low_speed_time(opts.low_speed_time)?;
        easy.timeout(opts.timeout)?;

        if opts.prefer_http2 {
            // Rejected when libcurl was built without nghttp2; HTTP/1.1 is fine then.
            if let Err(e) = easy.http_version(HttpVersion::V2TLS) {
                tracing::debug!("HTTP/2 not available, using libcurl default: {}", e);
            }
        }
        if let Some(ua) = &opts.user_agent {
            easy.useragent(ua)?;
        }

        if !opts.headers.is_empty() {
            let mut list = List::new();
            for (k, v) in &opts.headers {
                list.append(&format!("{}: {}", k.trim(), v.trim()))?;
            }
            easy.http_headers(list)?;
        }
        Ok(())
    }
}

impl Transport for CurlTransport {
    fn head(&self, url: &Url) -> Result<HeadResponse, FetchError> {
        let mut easy = Easy::new();
        self.configure(&mut easy, url)?;
        easy.nobody(true)?;

        let mut headers = ResponseHeaders::new();
        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(line) = str::from_utf8(data) {
                    headers.push_line(line);
                }
                true
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()? as u16;
        Ok(HeadResponse { status, headers })
    }

    fn get_range(&self, url: &Url, window: &RangeWindow) -> Result<ChunkResponse, FetchError> {
        let mut easy = Easy::new();
        self.configure(&mut easy, url)?;
        // libcurl sends `Range: bytes=<first>-<last>` from "first-last".
        easy.range(&window.curl_range())?;
        tracing::trace!(url = %url, range = %window.range_header_value(), "ranged GET");

        let mut headers = ResponseHeaders::new();
        let mut headers_done = false;
        // Status of the latest response line; the body is only kept for a 206.
        let status = Cell::new(0u16);
        let skipped = Cell::new(false);
        let mut body = Vec::with_capacity(window.len().min(MAX_PREALLOC) as usize);
        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(line) = str::from_utf8(data) {
                    if line.trim().is_empty() {
                        headers_done = true;
                    } else {
                        if let Some(code) = parse_status_line(line) {
                            status.set(code);
                            headers_done = false;
                        }
                        headers.push_line(line);
                    }
                }
                true
            })?;
            transfer.write_function(|data| {
                if status.get() != HTTP_PARTIAL_CONTENT {
                    // Returning short aborts the transfer with a write error.
                    skipped.set(true);
                    return Ok(0);
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()
        };

        match performed {
            Ok(()) => {
                let status = easy.response_code()? as u16;
                Ok(ChunkResponse::new(status, headers, BufferedBody::complete(body)))
            }
            // Non-206 body refused on purpose: hand back the status with an empty body.
            Err(_) if skipped.get() => {
                let status = status.get();
                tracing::debug!(range = %window, status, "non-partial response, body not transferred");
                Ok(ChunkResponse::new(status, headers, BufferedBody::complete(Vec::new())))
            }
            // The request went through and the body broke off: a read failure.
            Err(e) if headers_done && classify_curl_error(&e) != ErrorKind::Fatal => {
                let status = easy.response_code().unwrap_or(0) as u16;
                tracing::debug!(
                    range = %window,
                    received = body.len(),
                    "body transfer failed after headers: {}",
                    e
                );
                let err = io::Error::new(io::ErrorKind::Other, e);
                Ok(ChunkResponse::new(status, headers, BufferedBody::failed(body, err)))
            }
            Err(e) => Err(FetchError::Curl(e)),
        }
    }
}

/// Status code from an `HTTP/1.1 206 Partial Content` / `HTTP/2 200` line.
fn parse_status_line(line: &str) -> Option<u16> {
    let rest = line.trim().strip_prefix("HTTP/")?;
    rest.split_whitespace().nth(1)?.parse().ok()
}
