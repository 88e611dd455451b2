use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Position of the scanner in its source when something went wrong.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IoContext {
    pub byte_pos: u64,
    pub line_num: u64,
}

impl fmt::Display for IoContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, byte {}", self.line_num, self.byte_pos)
    }
}

/// Fatal failures. Anything that reaches the caller is one of these.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("File '{}' not found", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read {origin} at {ctx}: {source}")]
    Unreadable {
        origin: String,
        #[source]
        source: io::Error,
        ctx: IoContext,
    },
    #[error("Cannot determine file type for {origin}")]
    UnknownFormat { origin: String },
}

impl SearchError {
    /// Classify a failed `open`: a missing path is `NotFound`, anything else
    /// (permissions, a directory, ...) is `Unreadable`.
    pub(crate) fn open_err(source: io::Error, path: &std::path::Path) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
                source,
            }
        } else {
            Self::Unreadable {
                origin: path.display().to_string(),
                source,
                ctx: IoContext::default(),
            }
        }
    }

    pub(crate) fn read_err(source: io::Error, origin: &str, ctx: IoContext) -> Self {
        Self::Unreadable {
            origin: origin.to_string(),
            source,
            ctx,
        }
    }
}

/// Why a record was dropped. Recoverable: the scanner logs it and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum MalformedRecord {
    #[error("blank line where the {0} line was expected")]
    BlankLine(&'static str),
    #[error("missing '+' separator line")]
    MissingSeparator,
    #[error("record interrupted by the next header before its {0} line")]
    Interrupted(&'static str),
    #[error("unexpected end of input before the {0} line")]
    UnexpectedEof(&'static str),
}
