use crate::error::{IoContext, SearchError};
use crate::format::FileFormat;
use crate::machine::{RecordMachine, Step};
use crate::policy::{ScanOptions, Strategy};
use crate::record::Match;
use crate::util::{open_file, read_line, strip_line_ending};

use std::fmt;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub enum Source {
    Path(PathBuf),
    Reader,
    Buffer,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Reader => f.write_str("input stream"),
            Source::Buffer => f.write_str("in-memory buffer"),
        }
    }
}

/// Yields physical lines, line ending stripped.
pub(crate) trait LineSource: Send {
    /// Bytes consumed including the terminator; 0 at EOF.
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize>;
}

struct StreamSource<R>(R);

impl<R: BufRead + Send> LineSource for StreamSource<R> {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        read_line(&mut self.0, buf)
    }
}

/// Whole content already in memory (a `Vec`, a static slice, a mapping).
struct SliceSource<B> {
    data: B,
    pos: usize,
}

impl<B: AsRef<[u8]> + Send> LineSource for SliceSource<B> {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        buf.clear();
        let rest = &self.data.as_ref()[self.pos..];
        let n = match memchr::memchr(b'\n', rest) {
            Some(i) => i + 1,
            None => rest.len(),
        };
        buf.extend_from_slice(&rest[..n]);
        self.pos += n;
        strip_line_ending(buf);
        Ok(n)
    }
}

/// Pull-based search over one source.
///
/// Yields each complete record whose header contains the query, in source
/// order. Malformed records are logged and skipped. A read failure is
/// returned once and ends the scan.
pub struct Scanner {
    src: Source,
    rdr: Box<dyn LineSource>,
    machine: RecordMachine,
    line: Vec<u8>,
    line_num: u64,
    byte_pos: u64,
    done: bool,
}

impl Scanner {
    fn new(src: Source, rdr: Box<dyn LineSource>, format: FileFormat, query: &str) -> Self {
        log::debug!("scanning {src} as {format} for '{query}'");
        Self {
            src,
            rdr,
            machine: RecordMachine::new(format, query),
            line: Vec::with_capacity(256),
            line_num: 0,
            byte_pos: 0,
            done: false,
        }
    }

    /// Wrap an arbitrary `BufRead` (stdin, a socket, ...).
    pub fn from_bufread<R: BufRead + Send + 'static>(
        reader: R,
        format: FileFormat,
        query: &str,
    ) -> Self {
        Self::new(Source::Reader, Box::new(StreamSource(reader)), format, query)
    }

    /// Scan content that is already in memory.
    pub fn from_bytes<B: AsRef<[u8]> + Send + 'static>(
        data: B,
        format: FileFormat,
        query: &str,
    ) -> Self {
        let src = SliceSource { data, pos: 0 };
        Self::new(Source::Buffer, Box::new(src), format, query)
    }

    /// Open a file with the acquisition strategy from `opts`.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        format: FileFormat,
        query: &str,
        opts: &ScanOptions,
    ) -> Result<Self, SearchError> {
        let path = path.as_ref();
        let rdr: Box<dyn LineSource> = match opts.strategy {
            Strategy::Stream => {
                let f = open_file(path).map_err(|e| SearchError::open_err(e, path))?;
                Box::new(StreamSource(BufReader::with_capacity(opts.capacity, f)))
            }
            Strategy::Buffer => {
                let data = std::fs::read(path).map_err(|e| SearchError::open_err(e, path))?;
                Box::new(SliceSource { data, pos: 0 })
            }
            Strategy::Mmap => {
                #[cfg(feature = "mmap")]
                {
                    use memmap2::Mmap;
                    let f = open_file(path).map_err(|e| SearchError::open_err(e, path))?;
                    // The mapping is read-only and lives as long as the scanner.
                    let data = unsafe { Mmap::map(&f) }
                        .map_err(|e| SearchError::open_err(e, path))?;
                    Box::new(SliceSource { data, pos: 0 })
                }
                #[cfg(not(feature = "mmap"))]
                {
                    log::warn!("built without the `mmap` feature, reading the whole file instead");
                    let data = std::fs::read(path).map_err(|e| SearchError::open_err(e, path))?;
                    Box::new(SliceSource { data, pos: 0 })
                }
            }
        };
        Ok(Self::new(Source::Path(path.to_path_buf()), rdr, format, query))
    }

    #[inline]
    pub fn format(&self) -> FileFormat {
        self.machine.format()
    }

    #[inline]
    pub fn source(&self) -> &Source {
        &self.src
    }

    /// Physical lines consumed so far.
    #[inline]
    pub fn line_num(&self) -> u64 {
        self.line_num
    }

    /// Iterator-style `next` match.
    pub fn next_match(&mut self) -> Option<Result<Match, SearchError>> {
        if self.done {
            return None;
        }
        loop {
            let line_start = self.byte_pos;
            let n = match self.rdr.read_line(&mut self.line) {
                Ok(n) => n,
                Err(e) => {
                    self.done = true;
                    let origin = self.src.to_string();
                    return Some(Err(SearchError::read_err(e, &origin, self.ctx())));
                }
            };
            if n == 0 {
                self.done = true;
                if let Some(step) = self.machine.finish() {
                    self.report(step);
                }
                return None;
            }
            self.line_num += 1;
            self.byte_pos += n as u64;

            match self.machine.feed(&self.line, self.line_num, line_start) {
                Step::Emit(rec) => return Some(Ok(rec)),
                Step::Continue => {}
                step => self.report(step),
            }
        }
    }

    fn report(&self, step: Step) {
        if let Step::Discard {
            line_number,
            reason,
        } = step
        {
            log::warn!(
                "{}: skipping malformed record at line {line_number}: {reason}",
                self.src
            );
        }
    }

    #[inline]
    fn ctx(&self) -> IoContext {
        IoContext {
            byte_pos: self.byte_pos,
            line_num: self.line_num,
        }
    }
}

impl Iterator for Scanner {
    type Item = Result<Match, SearchError>;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_match()
    }
}

impl std::iter::FusedIterator for Scanner {}

/// Scan a buffered reader for records whose header contains `query`.
pub fn scan<R: BufRead + Send + 'static>(reader: R, format: FileFormat, query: &str) -> Scanner {
    Scanner::from_bufread(reader, format, query)
}
