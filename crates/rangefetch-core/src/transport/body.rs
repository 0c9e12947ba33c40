//! In-memory response body with an optional deferred read failure.

use std::io::{self, Cursor, Read};

/// Body bytes received by libcurl, replayed through `Read`.
///
/// When the connection broke after the headers arrived, the bytes received so
/// far are returned first and the failure surfaces once they are exhausted, the
/// same way a streaming body would fail mid-read.
pub struct BufferedBody {
    data: Cursor<Vec<u8>>,
    deferred: Option<io::Error>,
}

impl BufferedBody {
    pub fn complete(data: Vec<u8>) -> Self {
        Self {
            data: Cursor::new(data),
            deferred: None,
        }
    }

    pub fn failed(data: Vec<u8>, err: io::Error) -> Self {
        Self {
            data: Cursor::new(data),
            deferred: Some(err),
        }
    }
}

impl Read for BufferedBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.data.read(buf)?;
        if n == 0 && !buf.is_empty() {
            if let Some(err) = self.deferred.take() {
                return Err(err);
            }
        }
        Ok(n)
    }
}
