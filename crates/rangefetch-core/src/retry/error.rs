//! Error type for a single HTTP exchange (probe or ranged fetch).

use std::io;

use super::classify;
use super::policy::ErrorKind;

/// Boxed source error for transport failures that do not come from curl
/// (custom transports, test doubles).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned by one request/response exchange.
/// Classified into an [`ErrorKind`] so the download loop can decide whether to retry.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Libcurl failed before a response was received (DNS, refused, timeout, TLS).
    #[error("transport error: {0}")]
    Curl(#[source] curl::Error),

    /// Non-curl transport failure while sending the request.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Draining the response body failed, or the body did not match the requested range.
    #[error("read error: {0}")]
    Read(#[source] io::Error),

    /// A ranged GET answered with something other than 206 Partial Content.
    #[error("expected 206 Partial Content, got HTTP {0}")]
    NonPartial(u16),

    /// A metadata request returned a non-success status.
    #[error("HTTP {0}")]
    HttpStatus(u16),

    /// The URI could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Unrecoverable setup error (bad option, unsupported scheme).
    #[error("{0}")]
    Fatal(String),
}

impl FetchError {
    /// Wrap any error as a transient transport failure.
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        FetchError::Transport(err.into())
    }

    /// Body length differs from the window that was requested.
    pub fn partial_transfer(expected: u64, received: u64) -> Self {
        FetchError::Read(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("partial transfer: expected {} bytes, got {}", expected, received),
        ))
    }

    pub fn kind(&self) -> ErrorKind {
        classify::classify(self)
    }

    /// True when the download loop may retry the same window after this error.
    pub fn is_retryable(&self) -> bool {
        self.kind() != ErrorKind::Fatal
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Curl(e)
    }
}
