//! Sequential buffered writer for the download destination.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output sink for one download. Bytes are appended in window order.
///
/// The file is opened in truncate-and-write mode. Dropping the writer closes
/// the file (best-effort flush); call [`SinkWriter::finish`] to flush, fsync
/// and observe errors.
pub struct SinkWriter {
    out: BufWriter<File>,
    path: PathBuf,
    written: u64,
}

impl SinkWriter {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(SinkWriter {
            out: BufWriter::new(file),
            path: path.to_path_buf(),
            written: 0,
        })
    }

    /// Append `data` at the current write offset. Returns the offset it was written at.
    pub fn append(&mut self, data: &[u8]) -> io::Result<u64> {
        let offset = self.written;
        self.out.write_all(data)?;
        self.written += data.len() as u64;
        Ok(offset)
    }

    /// Bytes appended so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush buffered bytes and sync file data to disk. Consumes the writer and
    /// closes the file. Returns the total bytes written.
    pub fn finish(mut self) -> io::Result<u64> {
        self.out.flush()?;
        self.out.get_ref().sync_all()?;
        Ok(self.written)
    }
}
