use crate::error::SearchError;
use crate::format::{FileFormat, detect_path};
use crate::policy::ScanOptions;
use crate::record::Match;
use crate::scanner::Scanner;

use std::path::{Path, PathBuf};

/// A file with a known layout, ready to be searched any number of times.
///
/// Every call to [`search`](Self::search) re-opens the file, so repeated
/// searches are independent and yield identical results for identical input.
#[derive(Debug, Clone)]
pub struct SequenceSearcher {
    path: PathBuf,
    format: FileFormat,
    opts: ScanOptions,
}

impl SequenceSearcher {
    /// Check that `path` can be opened and detect its format.
    pub fn open<P: AsRef<Path>>(path: P, opts: ScanOptions) -> Result<Self, SearchError> {
        let path = path.as_ref();
        std::fs::metadata(path).map_err(|e| SearchError::open_err(e, path))?;
        let format = detect_path(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            format,
            opts,
        })
    }

    /// Skip detection and use `format`.
    pub fn with_format<P: AsRef<Path>>(path: P, format: FileFormat, opts: ScanOptions) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format,
            opts,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn options(&self) -> &ScanOptions {
        &self.opts
    }

    /// Lazy scan for headers containing `query`.
    pub fn search(&self, query: &str) -> Result<Scanner, SearchError> {
        Scanner::from_path(&self.path, self.format, query, &self.opts)
    }

    /// Drain [`search`](Self::search) into a list.
    pub fn search_all(&self, query: &str) -> Result<Vec<Match>, SearchError> {
        self.search(query)?.collect()
    }
}
