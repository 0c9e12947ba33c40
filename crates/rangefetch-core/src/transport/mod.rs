//! HTTP transport seam.
//!
//! The download loop talks to the network only through [`Transport`]: one
//! metadata (HEAD) request for the probe and one ranged GET per chunk. The
//! production implementation is [`CurlTransport`] (libcurl via the `curl`
//! crate); tests plug in scripted transports.

mod body;
mod curl_transport;
mod headers;

pub use self::body::BufferedBody;
pub use self::curl_transport::{CurlOptions, CurlTransport};
pub use self::headers::ResponseHeaders;

use std::fmt;
use std::io::Read;

use url::Url;

use crate::retry::FetchError;
use crate::segmenter::RangeWindow;

/// Status confirming the server honored a byte-range request.
pub const HTTP_PARTIAL_CONTENT: u16 = 206;

/// Upper bound on a body buffer preallocated from the window length.
pub(crate) const MAX_PREALLOC: u64 = 8 * 1024 * 1024;

/// Blocking HTTP client used by the probe and the chunk loop.
pub trait Transport {
    /// Metadata-only request (no body).
    fn head(&self, url: &Url) -> Result<HeadResponse, FetchError>;

    /// GET with `Range: bytes=<first>-<last>` for `window`.
    /// Returns once the status and headers are known; the body is read by the caller.
    fn get_range(&self, url: &Url, window: &RangeWindow) -> Result<ChunkResponse, FetchError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn head(&self, url: &Url) -> Result<HeadResponse, FetchError> {
        (**self).head(url)
    }

    fn get_range(&self, url: &Url, window: &RangeWindow) -> Result<ChunkResponse, FetchError> {
        (**self).get_range(url, window)
    }
}

/// Status and headers of a HEAD request.
#[derive(Debug, Clone)]
pub struct HeadResponse {
    pub status: u16,
    pub headers: ResponseHeaders,
}

/// Response to one ranged GET.
///
/// Owns the body stream; dropping the response releases it. The body can be
/// read once and is not restartable.
pub struct ChunkResponse {
    status: u16,
    headers: ResponseHeaders,
    body: Box<dyn Read + Send>,
}

impl ChunkResponse {
    pub fn new<R>(status: u16, headers: ResponseHeaders, body: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self {
            status,
            headers,
            body: Box::new(body),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &ResponseHeaders {
        &self.headers
    }

    /// True for 206 Partial Content.
    pub fn is_partial(&self) -> bool {
        self.status == HTTP_PARTIAL_CONTENT
    }

    /// Drain the body into memory. `size_hint` preallocates the buffer.
    pub fn read_body(&mut self, size_hint: usize) -> Result<Vec<u8>, FetchError> {
        let mut buf = Vec::with_capacity(size_hint);
        self.body.read_to_end(&mut buf).map_err(FetchError::Read)?;
        Ok(buf)
    }

    /// Give up the headers and take the body stream.
    pub fn into_body(self) -> Box<dyn Read + Send> {
        self.body
    }
}

impl fmt::Debug for ChunkResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
