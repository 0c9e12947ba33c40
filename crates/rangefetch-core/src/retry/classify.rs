//! Classify HTTP status and curl errors into retry policy error kinds.

use super::error::FetchError;
use super::policy::ErrorKind;

/// Classify an HTTP status code for retry decisions.
pub fn classify_http_status(code: u16) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Http5xx(code),
        _ => ErrorKind::Fatal,
    }
}

/// Classify a curl error for retry decisions.
///
/// Setup errors (bad URL, unsupported scheme, rejected option) can never succeed on
/// a second try; everything that happens on the wire is treated as transient.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_url_malformed()
        || e.is_unsupported_protocol()
        || e.is_unknown_option()
        || e.is_bad_function_argument()
        || e.is_failed_init()
    {
        return ErrorKind::Fatal;
    }
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    ErrorKind::Connection
}

/// Classify a fetch error into an ErrorKind.
pub fn classify(e: &FetchError) -> ErrorKind {
    match e {
        FetchError::Curl(ce) => classify_curl_error(ce),
        FetchError::Transport(_) => ErrorKind::Connection,
        FetchError::Read(_) => ErrorKind::Read,
        // A discarded range response always gets another attempt; throttling
        // statuses additionally back off.
        FetchError::NonPartial(code) => match classify_http_status(*code) {
            ErrorKind::Fatal => ErrorKind::NonPartial,
            kind => kind,
        },
        FetchError::HttpStatus(code) => classify_http_status(*code),
        FetchError::InvalidUrl(_) | FetchError::Fatal(_) => ErrorKind::Fatal,
    }
}
