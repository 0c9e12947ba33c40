//! Sequential chunked HTTP downloads over byte-range requests.
//!
//! [`ChunkedDownloader`] probes a resource's length, splits it into fixed
//! windows, and fetches them one after another, retrying each window up to a
//! configurable number of attempts.

pub mod config;
pub mod downloader;
pub mod logging;
pub mod probe;
pub mod retry;
pub mod segmenter;
pub mod storage;
pub mod transport;

pub use downloader::{
    ChunkedDownloader, DownloadError, DownloadEvent, DownloadOutcome, DownloadProgress,
    DownloadTarget, FailureReason,
};
pub use probe::ProbeResult;
pub use retry::{FetchError, RetryPolicy};
pub use segmenter::RangeWindow;
pub use transport::{ChunkResponse, CurlOptions, CurlTransport, Transport};
