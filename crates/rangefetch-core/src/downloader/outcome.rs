//! Download results, events and errors.

use std::fmt;
use std::io;
use std::path::PathBuf;

use super::progress::DownloadProgress;
use crate::retry::FetchError;
use crate::segmenter::RangeWindow;

/// Terminal result of a download that was not aborted by a fatal error.
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    /// Every byte reported by the probe was written.
    Success { bytes_written: u64 },
    /// The download stopped early; whatever was written stays on disk.
    Failure(FailureReason),
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Success { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// One window failed `attempts` consecutive times.
    AttemptsExceeded {
        window: RangeWindow,
        attempts: u32,
        bytes_written: u64,
        last_error: Option<String>,
    },
    /// The probe reported (or defaulted to) a length of 0; nothing was requested.
    EmptyResource,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::AttemptsExceeded {
                window,
                attempts,
                last_error,
                ..
            } => {
                write!(f, "attempts exceeded ({} attempts for range {})", attempts, window)?;
                if let Some(e) = last_error {
                    write!(f, ": {}", e)?;
                }
                Ok(())
            }
            FailureReason::EmptyResource => {
                write!(f, "resource length is 0 (missing Content-Length?)")
            }
        }
    }
}

/// Notifications emitted while a download runs.
#[derive(Debug)]
pub enum DownloadEvent<'a> {
    /// Probe finished and the sink is open.
    Started { expected: u64, chunk_size: u64 },
    /// A 206 chunk was written and the window advanced.
    ChunkWritten {
        window: RangeWindow,
        progress: DownloadProgress,
    },
    /// An attempt failed and `window` will be requested again as attempt `attempt`.
    Retrying {
        window: RangeWindow,
        attempt: u32,
        max_attempts: u32,
        error: &'a FetchError,
    },
    /// The attempt budget for `window` is spent; the download stops.
    AttemptsExceeded { window: RangeWindow, attempts: u32 },
    /// All bytes written and synced.
    Finished { bytes_written: u64 },
}

/// Errors that abort a download without a `DownloadOutcome`.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HEAD request failed; never retried.
    #[error("size probe failed: {0}")]
    Probe(#[source] FetchError),

    /// Opening or writing the destination failed; not retried.
    #[error("storage error on {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A non-retryable error while fetching a chunk.
    #[error("unrecoverable error fetching range {window}: {source}")]
    Fatal {
        window: RangeWindow,
        #[source]
        source: FetchError,
    },
}
