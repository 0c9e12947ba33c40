//! Retry and backoff policy.
//!
//! Error classification (timeouts, throttling, connection and read failures,
//! discarded non-partial responses), the per-window attempt counter, and the
//! backoff decision shared by the download loop.

mod attempts;
mod classify;
mod error;
mod policy;

pub use attempts::AttemptCounter;
pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::{BoxError, FetchError};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
