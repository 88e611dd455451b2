//! Streaming search of FASTA/FASTQ files by partial record name.
//!
//! - Format detection by extension, falling back to the first content line.
//! - Single forward pass; records are assembled line by line and only kept
//!   when their header contains the query (case-sensitive, byte-wise).
//! - Line numbers count every physical line, blank ones included.
//! - Malformed or truncated records are logged and skipped, never emitted.
//! - Streaming, whole-buffer, and (with `mmap`) memory-mapped acquisition.
//! - Optional async API behind `async` feature.

pub mod error;
pub mod format;
mod machine;
pub mod policy;
pub mod record;
pub mod report;
pub mod scanner;
pub mod search;
mod util;

#[cfg(feature = "async")]
pub mod async_scanner;

pub use crate::error::{IoContext, SearchError};
pub use crate::format::{FileFormat, detect_path};
pub use crate::policy::{ScanOptions, Strategy};
pub use crate::record::Match;
pub use crate::report::write_report;
pub use crate::scanner::{Scanner, Source, scan};
pub use crate::search::SequenceSearcher;

#[cfg(feature = "async")]
pub use crate::async_scanner::AsyncScanner;
