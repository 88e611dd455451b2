use crate::error::{IoContext, SearchError};
use crate::util::{open_file, read_line, trim};

use std::fmt;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

/// Record layout of a source. Fixed for the whole scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FileFormat {
    Fasta,
    Fastq,
}

impl FileFormat {
    /// First byte of a header line.
    #[inline]
    pub fn sentinel(self) -> u8 {
        match self {
            FileFormat::Fasta => b'>',
            FileFormat::Fastq => b'@',
        }
    }

    /// Physical lines in one complete record.
    #[inline]
    pub fn lines_per_record(self) -> usize {
        match self {
            FileFormat::Fasta => 2,
            FileFormat::Fastq => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FileFormat::Fasta => "fasta",
            FileFormat::Fastq => "fastq",
        }
    }

    /// `.fa`/`.fasta` and `.fq`/`.fastq`, case-insensitive.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "fa" | "fasta" => Some(FileFormat::Fasta),
            "fq" | "fastq" => Some(FileFormat::Fastq),
            _ => None,
        }
    }

    /// Classify by the sentinel of the first non-empty content line.
    pub fn from_first_line(line: &[u8]) -> Option<Self> {
        match trim(line).first()? {
            b'>' => Some(FileFormat::Fasta),
            b'@' => Some(FileFormat::Fastq),
            _ => None,
        }
    }

    /// Pure detection: extension first, then the peeked line if any.
    pub fn detect(path: &Path, peek: Option<&[u8]>) -> Option<Self> {
        Self::from_extension(path).or_else(|| peek.and_then(Self::from_first_line))
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fasta" | "fa" => Ok(FileFormat::Fasta),
            "fastq" | "fq" => Ok(FileFormat::Fastq),
            other => Err(format!("unknown format '{other}' (expected fasta or fastq)")),
        }
    }
}

/// Detect the format of a file on disk.
///
/// The extension decides when it is recognized and the file is never opened.
/// Otherwise the file is opened, its first non-empty line is peeked, and the
/// handle is dropped again, so nothing is consumed from the source a later
/// scan will read.
pub fn detect_path<P: AsRef<Path>>(path: P) -> Result<FileFormat, SearchError> {
    let path = path.as_ref();
    if let Some(fmt) = FileFormat::from_extension(path) {
        log::debug!("{}: {fmt} by extension", path.display());
        return Ok(fmt);
    }

    let f = open_file(path).map_err(|e| SearchError::open_err(e, path))?;
    let mut rdr = BufReader::new(f);
    let mut line = Vec::with_capacity(128);
    let mut ctx = IoContext::default();
    let found = loop {
        let n = read_line(&mut rdr, &mut line).map_err(|e| {
            SearchError::read_err(e, &path.display().to_string(), ctx)
        })?;
        if n == 0 {
            break false;
        }
        ctx.line_num += 1;
        ctx.byte_pos += n as u64;
        if !trim(&line).is_empty() {
            break true;
        }
    };
    let peek = found.then_some(line.as_slice());

    let fmt = FileFormat::detect(path, peek).ok_or_else(|| SearchError::UnknownFormat {
        origin: path.display().to_string(),
    })?;
    log::debug!("{}: {fmt} by content", path.display());
    Ok(fmt)
}
