//! One ranged GET: request, validate, drain.

use std::io;

use url::Url;

use crate::retry::FetchError;
use crate::segmenter::RangeWindow;
use crate::transport::{Transport, MAX_PREALLOC};

/// Fetches `window` and returns its bytes only if the server confirmed the range.
///
/// The response is owned by this call and dropped before it returns, on every
/// path, so the body stream never outlives the iteration that requested it.
/// - request failure: `FetchError::Curl` / `FetchError::Transport`
/// - body failure or a 206 body of the wrong length: `FetchError::Read`
/// - any status other than 206: the body is drained and discarded, `FetchError::NonPartial`
pub(super) fn fetch_chunk<T: Transport + ?Sized>(
    transport: &T,
    url: &Url,
    window: &RangeWindow,
) -> Result<Vec<u8>, FetchError> {
    let mut response = transport.get_range(url, window)?;

    if !response.is_partial() {
        let status = response.status();
        let discarded = io::copy(&mut response.into_body(), &mut io::sink())
            .map_err(FetchError::Read)?;
        tracing::debug!(range = %window, status, discarded, "discarding non-partial response");
        return Err(FetchError::NonPartial(status));
    }

    let body = response.read_body(window.len().min(MAX_PREALLOC) as usize)?;
    let received = body.len() as u64;
    if received != window.len() {
        return Err(FetchError::partial_transfer(window.len(), received));
    }
    Ok(body)
}
