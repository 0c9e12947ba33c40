//! Mutable state of one download: range window, attempt counter, progress.

use std::time::Instant;

use super::progress::DownloadProgress;
use crate::retry::AttemptCounter;
use crate::segmenter::RangeWindow;

/// Per-download state, owned by a single `download` call and passed by
/// reference through the chunk loop. Independent downloads never share it.
#[derive(Debug)]
pub struct DownloadSession {
    window: RangeWindow,
    attempts: AttemptCounter,
    expected: u64,
    downloaded: u64,
    chunks_done: u64,
    last_error: Option<String>,
    started: Instant,
}

impl DownloadSession {
    pub fn new(window: RangeWindow, expected: u64, max_attempts: u32) -> Self {
        Self {
            window,
            attempts: AttemptCounter::new(max_attempts),
            expected,
            downloaded: 0,
            chunks_done: 0,
            last_error: None,
            started: Instant::now(),
        }
    }

    /// Loop condition: bytes outstanding and attempt budget not spent.
    pub fn in_progress(&self) -> bool {
        !self.is_complete() && !self.attempts.exhausted()
    }

    pub fn is_complete(&self) -> bool {
        self.downloaded >= self.expected
    }

    pub fn window(&self) -> RangeWindow {
        self.window
    }

    pub fn attempts(&self) -> &AttemptCounter {
        &self.attempts
    }

    pub fn downloaded(&self) -> u64 {
        self.downloaded
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// A confirmed chunk of `len` bytes was written: count it, advance the
    /// window and reset the attempt counter.
    pub fn complete_chunk(&mut self, len: u64) {
        self.downloaded += len;
        self.chunks_done += 1;
        self.attempts.reset();
        if let Some(next) = self.window.next(self.expected) {
            self.window = next;
        }
    }

    /// The current attempt failed; the window stays put. Returns the next attempt number.
    pub fn fail_attempt(&mut self, error: String) -> u32 {
        self.last_error = Some(error);
        self.attempts.record_failure()
    }

    pub fn progress(&self) -> DownloadProgress {
        DownloadProgress {
            downloaded: self.downloaded,
            expected: self.expected,
            chunks_done: self.chunks_done,
            elapsed_secs: self.started.elapsed().as_secs_f64(),
        }
    }
}
