//! What to download and where to put it.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

/// Source URL and destination path of one download. Fixed once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: Url,
    pub destination: PathBuf,
}

impl DownloadTarget {
    /// Parses `uri`. A malformed URI fails before anything touches the network or disk.
    pub fn parse(uri: &str, destination: &Path) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(uri)?,
            destination: destination.to_path_buf(),
        })
    }
}

impl fmt::Display for DownloadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.url, self.destination.display())
    }
}
