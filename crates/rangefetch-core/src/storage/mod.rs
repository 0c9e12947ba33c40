//! Disk I/O for the download destination.
//!
//! The core writes straight to the destination path (truncate, then append
//! confirmed chunks in order) and leaves partial files in place on failure.
//! Callers that need atomicity stage into a `.part` file and [`promote`] it.

mod writer;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use writer::SinkWriter;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `file.iso` → `file.iso.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Atomically rename a staged file to its final path.
/// Fails if `final_path` is on a different filesystem.
pub fn promote(temp_path: &Path, final_path: &Path) -> Result<()> {
    std::fs::rename(temp_path, final_path).with_context(|| {
        format!(
            "failed to rename {} to {}",
            temp_path.display(),
            final_path.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("file.iso"));
        assert_eq!(p.to_string_lossy(), "file.iso.part");
        let p2 = temp_path(Path::new("/tmp/archive.zip"));
        assert_eq!(p2.to_string_lossy(), "/tmp/archive.zip.part");
    }

    #[test]
    fn append_in_order_and_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.bin");

        let mut sink = SinkWriter::create(&path).unwrap();
        assert_eq!(sink.append(b"hello").unwrap(), 0);
        assert_eq!(sink.append(b" ").unwrap(), 5);
        assert_eq!(sink.append(b"world").unwrap(), 6);
        assert_eq!(sink.written(), 11);
        assert_eq!(sink.path(), path.as_path());
        assert_eq!(sink.finish().unwrap(), 11);

        assert_eq!(fs::read(&path).unwrap(), b"hello world");
    }

    #[test]
    fn create_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.bin");
        fs::write(&path, b"previous contents that are longer").unwrap();

        let mut sink = SinkWriter::create(&path).unwrap();
        sink.append(b"new").unwrap();
        sink.finish().unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn drop_flushes_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.bin");
        {
            let mut sink = SinkWriter::create(&path).unwrap();
            sink.append(b"abc").unwrap();
        }
        assert_eq!(fs::read(&path).unwrap(), b"abc");
    }

    #[test]
    fn stage_then_promote() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("out.bin");
        let tp = temp_path(&final_path);

        let mut sink = SinkWriter::create(&tp).unwrap();
        sink.append(b"data").unwrap();
        sink.finish().unwrap();
        promote(&tp, &final_path).unwrap();

        assert!(!tp.exists());
        assert_eq!(fs::read(&final_path).unwrap(), b"data");
    }
}
