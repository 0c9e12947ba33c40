//! Size probe: HTTP HEAD metadata request.
//!
//! Confirms `Content-Length` before the chunk loop starts and records
//! `Accept-Ranges`, ETag and Last-Modified for diagnostics.

use url::Url;

use crate::retry::FetchError;
use crate::transport::Transport;

/// Metadata returned by the probe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    /// Total size in bytes, if `Content-Length` is present and valid.
    pub content_length: Option<u64>,
    /// True if server sent `Accept-Ranges: bytes`.
    pub accept_ranges: bool,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
}

impl ProbeResult {
    /// Expected download length. A missing `Content-Length` reads as 0, which
    /// the downloader reports as an empty resource rather than guessing.
    pub fn expected_length(&self) -> u64 {
        self.content_length.unwrap_or(0)
    }
}

/// Performs a HEAD request and returns parsed metadata.
///
/// Transport failures are returned as-is and never retried here. A non-2xx
/// status is an error.
pub fn probe<T: Transport + ?Sized>(transport: &T, url: &Url) -> Result<ProbeResult, FetchError> {
    let resp = transport.head(url)?;
    if !(200..300).contains(&resp.status) {
        return Err(FetchError::HttpStatus(resp.status));
    }

    let headers = &resp.headers;
    let result = ProbeResult {
        content_length: headers.content_length(),
        accept_ranges: headers.accepts_byte_ranges(),
        etag: headers.get("etag").map(|v| v.trim_matches('"').to_string()),
        last_modified: headers.get("last-modified").map(str::to_string),
    };

    tracing::debug!(
        url = %url,
        content_length = ?result.content_length,
        accept_ranges = result.accept_ranges,
        "probe complete"
    );
    if result.content_length.is_none() {
        tracing::warn!(url = %url, "no Content-Length in HEAD response, treating length as 0");
    } else if !result.accept_ranges {
        tracing::debug!(url = %url, "server did not advertise Accept-Ranges: bytes");
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::RangeWindow;
    use crate::transport::{ChunkResponse, HeadResponse, ResponseHeaders};

    struct HeadOnly(Result<HeadResponse, &'static str>);

    impl Transport for HeadOnly {
        fn head(&self, _url: &Url) -> Result<HeadResponse, FetchError> {
            self.0.clone().map_err(FetchError::transport)
        }

        fn get_range(&self, _url: &Url, _w: &RangeWindow) -> Result<ChunkResponse, FetchError> {
            unreachable!("probe never issues GET")
        }
    }

    fn head(status: u16, lines: &[&str]) -> HeadOnly {
        HeadOnly(Ok(HeadResponse {
            status,
            headers: ResponseHeaders::from_lines(lines),
        }))
    }

    fn url() -> Url {
        Url::parse("https://example.com/file.bin").unwrap()
    }

    #[test]
    fn probe_reads_content_length() {
        let t = head(200, &["Content-Length: 12345", "Accept-Ranges: bytes"]);
        let r = probe(&t, &url()).unwrap();
        assert_eq!(r.content_length, Some(12345));
        assert_eq!(r.expected_length(), 12345);
        assert!(r.accept_ranges);
    }

    #[test]
    fn probe_etag_and_last_modified() {
        let t = head(
            200,
            &[
                "ETag: \"abc-123\"",
                "Last-Modified: Wed, 21 Oct 2015 07:28:00 GMT",
            ],
        );
        let r = probe(&t, &url()).unwrap();
        assert_eq!(r.etag.as_deref(), Some("abc-123"));
        assert_eq!(
            r.last_modified.as_deref(),
            Some("Wed, 21 Oct 2015 07:28:00 GMT")
        );
    }

    #[test]
    fn missing_length_reads_as_zero() {
        let t = head(200, &["Accept-Ranges: bytes"]);
        let r = probe(&t, &url()).unwrap();
        assert!(r.content_length.is_none());
        assert_eq!(r.expected_length(), 0);
    }

    #[test]
    fn transport_failure_is_surfaced() {
        let t = HeadOnly(Err("connection refused"));
        let err = probe(&t, &url()).unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[test]
    fn non_success_status_is_error() {
        let t = head(404, &["Content-Length: 162"]);
        let err = probe(&t, &url()).unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus(404)));
    }
}
