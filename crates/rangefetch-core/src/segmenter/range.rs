//! Range window type and chunk sizing.

use std::fmt;

/// Number of chunks a resource is split into by default.
pub const DEFAULT_CHUNK_COUNT: u64 = 100;

/// Inclusive byte range `[first, last]` currently being requested.
///
/// Invariant: `first <= last` and `chunk_size >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeWindow {
    /// First byte position (inclusive).
    pub first: u64,
    /// Last byte position (inclusive).
    pub last: u64,
    /// Stride used when advancing to the next window.
    pub chunk_size: u64,
}

impl RangeWindow {
    /// Single window for an explicit `[first, last]`. Returns None if `first > last`
    /// or the window spans the whole `u64` space (its length would not fit).
    pub fn new(first: u64, last: u64) -> Option<Self> {
        let chunk_size = last.checked_sub(first)?.checked_add(1)?;
        Some(Self {
            first,
            last,
            chunk_size,
        })
    }

    /// First window of a download: `[0, min(chunk_size, expected) - 1]`.
    /// Returns None for an empty resource.
    pub fn initial(expected: u64, chunk_size: u64) -> Option<Self> {
        if expected == 0 {
            return None;
        }
        let chunk_size = chunk_size.max(1);
        Some(Self {
            first: 0,
            last: chunk_size.min(expected) - 1,
            chunk_size,
        })
    }

    /// Number of bytes covered by this window.
    pub fn len(&self) -> u64 {
        (self.last - self.first).saturating_add(1)
    }

    /// The window following this one, clamped to `expected - 1`.
    /// Returns None once this window already ends at the last byte.
    pub fn next(&self, expected: u64) -> Option<Self> {
        let end = expected.checked_sub(1)?;
        if self.last >= end {
            return None;
        }
        Some(Self {
            first: self.last + 1,
            last: self.last.saturating_add(self.chunk_size).min(end),
            chunk_size: self.chunk_size,
        })
    }

    /// HTTP Range header value (inclusive end): `bytes=first-last`.
    pub fn range_header_value(&self) -> String {
        format!("bytes={}-{}", self.first, self.last)
    }

    /// Range spec as libcurl expects it: `first-last`, without the unit.
    pub fn curl_range(&self) -> String {
        format!("{}-{}", self.first, self.last)
    }
}

impl fmt::Display for RangeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.first, self.last)
    }
}

/// Chunk size for a resource of `expected` bytes split into `chunk_count` chunks.
///
/// Floor division, clamped to at least one byte so resources smaller than
/// `chunk_count` still make progress.
pub fn chunk_size_for(expected: u64, chunk_count: u64) -> u64 {
    (expected / chunk_count.max(1)).max(1)
}
