//! Chunked range downloader.
//!
//! Probes the resource length, splits it into `chunk_count` windows, and
//! fetches them one at a time with HTTP Range GETs. Each confirmed 206 chunk
//! is appended to the destination; failed attempts are retried on the same
//! window until the per-window attempt budget is spent.

mod chunk;
mod outcome;
mod progress;
mod session;
mod target;

pub use outcome::{DownloadError, DownloadEvent, DownloadOutcome, FailureReason};
pub use progress::DownloadProgress;
pub use session::DownloadSession;
pub use target::DownloadTarget;

use std::path::Path;

use url::Url;

use crate::probe::{self, ProbeResult};
use crate::retry::{FetchError, RetryDecision, RetryPolicy};
use crate::segmenter::{chunk_size_for, RangeWindow, DEFAULT_CHUNK_COUNT};
use crate::storage::SinkWriter;
use crate::transport::{ChunkResponse, CurlOptions, CurlTransport, Transport};

/// Sequential chunked downloader over a [`Transport`].
///
/// Holds only configuration; all per-download state lives in a
/// [`DownloadSession`] created by each call, so one downloader can serve
/// several downloads (including from different threads when `T: Sync`).
#[derive(Debug, Clone)]
pub struct ChunkedDownloader<T = CurlTransport> {
    transport: T,
    policy: RetryPolicy,
    chunk_count: u64,
}

impl ChunkedDownloader<CurlTransport> {
    pub fn with_curl(options: CurlOptions) -> Self {
        Self::new(CurlTransport::new(options))
    }
}

impl<T: Transport> ChunkedDownloader<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            policy: RetryPolicy::default(),
            chunk_count: DEFAULT_CHUNK_COUNT,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self.policy.max_attempts = self.policy.max_attempts.max(1);
        self
    }

    /// Number of chunks the resource is split into (default 100).
    pub fn with_chunk_count(mut self, chunk_count: u64) -> Self {
        self.chunk_count = chunk_count.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.policy.max_attempts
    }

    /// Attempt budget per window for subsequent downloads (clamped to at least 1).
    pub fn set_max_attempts(&mut self, max_attempts: u32) {
        self.policy.max_attempts = max_attempts.max(1);
    }

    pub fn chunk_count(&self) -> u64 {
        self.chunk_count
    }

    /// HEAD the resource and report its metadata.
    pub fn probe(&self, uri: &str) -> Result<ProbeResult, FetchError> {
        let url = Url::parse(uri)?;
        probe::probe(&self.transport, &url)
    }

    /// Single ranged GET for `[first, last]` (inclusive), for callers doing their own chunking.
    ///
    /// No retries and no status check: the caller owns the response and its body.
    pub fn fetch_range(&self, uri: &str, first: u64, last: u64) -> Result<ChunkResponse, FetchError> {
        let url = Url::parse(uri)?;
        let window = RangeWindow::new(first, last)
            .ok_or_else(|| FetchError::Fatal(format!("invalid range {}-{}", first, last)))?;
        self.transport.get_range(&url, &window)
    }

    /// Download `uri` into `destination`.
    pub fn download(&self, uri: &str, destination: &Path) -> Result<DownloadOutcome, DownloadError> {
        self.download_with(uri, destination, |_| {})
    }

    /// Download `uri` into `destination`, reporting progress and retries to `observer`.
    ///
    /// Attempt exhaustion is an `Ok(DownloadOutcome::Failure)`, not an error; the
    /// partial file is left on disk. `Err` means the download was aborted by an
    /// invalid URL, a failed probe, a storage failure, or a non-retryable fetch error.
    pub fn download_with<F>(
        &self,
        uri: &str,
        destination: &Path,
        mut observer: F,
    ) -> Result<DownloadOutcome, DownloadError>
    where
        F: FnMut(&DownloadEvent<'_>),
    {
        let target = DownloadTarget::parse(uri, destination)?;
        let url = &target.url;
        let expected = probe::probe(&self.transport, url)
            .map_err(DownloadError::Probe)?
            .expected_length();

        let mut sink =
            SinkWriter::create(&target.destination).map_err(|source| DownloadError::Storage {
                path: target.destination.clone(),
                source,
            })?;

        let chunk_size = chunk_size_for(expected, self.chunk_count);
        let Some(window) = RangeWindow::initial(expected, chunk_size) else {
            tracing::warn!(url = %url, "resource length is 0, nothing to download");
            finish_sink(sink)?;
            return Ok(DownloadOutcome::Failure(FailureReason::EmptyResource));
        };

        tracing::info!(
            target = %target,
            expected,
            chunk_size,
            max_attempts = self.policy.max_attempts,
            "starting chunked download"
        );
        observer(&DownloadEvent::Started {
            expected,
            chunk_size,
        });

        let mut session = DownloadSession::new(window, expected, self.policy.max_attempts);
        self.run_chunks(url, &mut session, &mut sink, &mut observer)?;

        let bytes_written = finish_sink(sink)?;
        if session.is_complete() {
            tracing::info!(url = %url, bytes_written, "download complete");
            observer(&DownloadEvent::Finished { bytes_written });
            return Ok(DownloadOutcome::Success { bytes_written });
        }

        let window = session.window();
        let attempts = session.attempts().max();
        tracing::error!(
            url = %url,
            range = %window,
            attempts,
            bytes_written,
            "A file could not be downloaded. Number of attempts are exceeded."
        );
        observer(&DownloadEvent::AttemptsExceeded { window, attempts });
        Ok(DownloadOutcome::Failure(FailureReason::AttemptsExceeded {
            window,
            attempts,
            bytes_written,
            last_error: session.last_error().map(str::to_string),
        }))
    }

    /// The chunk loop. Runs until every byte is written or the attempt budget
    /// for the current window is spent.
    fn run_chunks<F>(
        &self,
        url: &Url,
        session: &mut DownloadSession,
        sink: &mut SinkWriter,
        observer: &mut F,
    ) -> Result<(), DownloadError>
    where
        F: FnMut(&DownloadEvent<'_>),
    {
        while session.in_progress() {
            let window = session.window();
            match chunk::fetch_chunk(&self.transport, url, &window) {
                Ok(bytes) => {
                    let offset = sink.append(&bytes).map_err(|source| DownloadError::Storage {
                        path: sink.path().to_path_buf(),
                        source,
                    })?;
                    session.complete_chunk(bytes.len() as u64);
                    let progress = session.progress();
                    tracing::debug!(
                        range = %window,
                        offset,
                        percent = progress.percent(),
                        "chunk written"
                    );
                    observer(&DownloadEvent::ChunkWritten { window, progress });
                }
                Err(err) => {
                    if !err.is_retryable() {
                        return Err(DownloadError::Fatal {
                            window,
                            source: err,
                        });
                    }
                    let failed = session.attempts().current();
                    let decision = self.policy.decide(failed, err.kind());
                    let next = session.fail_attempt(err.to_string());
                    tracing::warn!(range = %window, attempt = failed, "I/O error has occurred: {}", err);

                    if let RetryDecision::RetryAfter(delay) = decision {
                        tracing::info!(range = %window, "Going to do attempt {}", next);
                        observer(&DownloadEvent::Retrying {
                            window,
                            attempt: next,
                            max_attempts: self.policy.max_attempts,
                            error: &err,
                        });
                        if !delay.is_zero() {
                            std::thread::sleep(delay);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn finish_sink(sink: SinkWriter) -> Result<u64, DownloadError> {
    let path = sink.path().to_path_buf();
    sink.finish()
        .map_err(|source| DownloadError::Storage { path, source })
}

#[cfg(test)]
mod tests;
