//! Range math and chunk planning.
//!
//! Derives the chunk size from the probed length, computes inclusive HTTP
//! Range bounds, and advances the window one chunk at a time.

mod range;

pub use range::{chunk_size_for, RangeWindow, DEFAULT_CHUNK_COUNT};
