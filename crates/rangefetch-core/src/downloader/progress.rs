//! Progress reporting for a download (bytes done, rate, ETA).
//!
//! Consumers can compute rate = downloaded / elapsed_secs and
//! ETA = (expected - downloaded) / rate.

/// Snapshot of download progress (CLI-friendly).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownloadProgress {
    /// Bytes confirmed by 206 responses and written to the sink.
    pub downloaded: u64,
    /// Total size reported by the probe.
    pub expected: u64,
    /// Number of chunks written.
    pub chunks_done: u64,
    /// Elapsed time since the chunk loop started (seconds).
    pub elapsed_secs: f64,
}

impl DownloadProgress {
    /// Total download rate in bytes per second (0 if elapsed is 0).
    pub fn bytes_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.downloaded as f64 / self.elapsed_secs
    }

    /// Estimated seconds remaining (None if rate is 0 and work remains).
    pub fn eta_secs(&self) -> Option<f64> {
        let remaining = self.expected.saturating_sub(self.downloaded);
        if remaining == 0 {
            return Some(0.0);
        }
        let rate = self.bytes_per_sec();
        if rate <= 0.0 {
            return None;
        }
        Some(remaining as f64 / rate)
    }

    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.expected == 0 {
            return 1.0;
        }
        (self.downloaded as f64 / self.expected as f64).min(1.0)
    }

    /// Fraction as a percentage in [0.0, 100.0].
    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(downloaded: u64, expected: u64, elapsed_secs: f64) -> DownloadProgress {
        DownloadProgress {
            downloaded,
            expected,
            chunks_done: 0,
            elapsed_secs,
        }
    }

    #[test]
    fn fraction_is_bytes_over_expected() {
        let p = progress(250, 1000, 1.0);
        assert!((p.fraction() - 0.25).abs() < 1e-9);
        assert!((p.percent() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn fraction_uneven_chunking() {
        // 1099 bytes in chunks of 10: after 100 chunks the download is not done.
        let p = progress(1000, 1099, 1.0);
        assert!(p.fraction() < 1.0);
        assert!((p.percent() - 90.99).abs() < 0.01);
    }

    #[test]
    fn rate_and_eta() {
        let p = progress(500, 1000, 2.0);
        assert!((p.bytes_per_sec() - 250.0).abs() < 1e-9);
        assert!((p.eta_secs().unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn zero_elapsed_has_no_eta() {
        let p = progress(0, 1000, 0.0);
        assert_eq!(p.bytes_per_sec(), 0.0);
        assert!(p.eta_secs().is_none());
        assert_eq!(progress(1000, 1000, 0.0).eta_secs(), Some(0.0));
    }
}
