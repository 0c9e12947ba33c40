//! Chunk loop tests against a scripted transport (split to keep each file short).

use std::path::{Path, PathBuf};

use super::{ChunkedDownloader, DownloadEvent};
use crate::retry::RetryPolicy;


use mock::MockTransport;

const URI: &str = "https://example.com/files/data.bin";

/// Owned summary of a `DownloadEvent` for assertions.
#[derive(Debug, Clone, PartialEq)]
enum Seen {
    Started { expected: u64, chunk_size: u64 },
    Chunk { first: u64, last: u64, fraction: f64 },
    Retrying { attempt: u32 },
    Exceeded { attempts: u32 },
    Finished { bytes_written: u64 },
}

fn recorder(events: &mut Vec<Seen>) -> impl FnMut(&DownloadEvent<'_>) + '_ {
    move |event| {
        let seen = match event {
            DownloadEvent::Started {
                expected,
                chunk_size,
            } => Seen::Started {
                expected: *expected,
                chunk_size: *chunk_size,
            },
            DownloadEvent::ChunkWritten { window, progress } => Seen::Chunk {
                first: window.first,
                last: window.last,
                fraction: progress.fraction(),
            },
            DownloadEvent::Retrying { attempt, .. } => Seen::Retrying { attempt: *attempt },
            DownloadEvent::AttemptsExceeded { attempts, .. } => Seen::Exceeded {
                attempts: *attempts,
            },
            DownloadEvent::Finished { bytes_written } => Seen::Finished {
                bytes_written: *bytes_written,
            },
        };
        events.push(seen);
    }
}

fn downloader(mock: &MockTransport, max_attempts: u32) -> ChunkedDownloader<&MockTransport> {
    ChunkedDownloader::new(mock).with_policy(RetryPolicy::immediate(max_attempts))
}

fn dest(dir: &Path) -> PathBuf {
    dir.join("out.bin")
}
