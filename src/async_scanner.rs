#![cfg(feature = "async")]

use crate::error::{IoContext, SearchError};
use crate::format::FileFormat;
use crate::machine::{RecordMachine, Step};
use crate::record::Match;
use crate::scanner::Source;
use crate::util::strip_line_ending;

use std::path::Path;
use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};

/// Async counterpart of [`Scanner`](crate::Scanner), same record rules.
pub struct AsyncScanner {
    src: Source,
    rdr: Box<dyn AsyncBufRead + Unpin + Send>,
    machine: RecordMachine,
    line: Vec<u8>,
    line_num: u64,
    byte_pos: u64,
    done: bool,
}

impl AsyncScanner {
    /// Open async from path.
    pub async fn from_path<P: AsRef<Path>>(
        path: P,
        format: FileFormat,
        query: &str,
    ) -> Result<Self, SearchError> {
        let path = path.as_ref();
        let f = File::open(path)
            .await
            .map_err(|e| SearchError::open_err(e, path))?;
        let rdr = Box::new(BufReader::with_capacity(256 * 1024, f));
        Ok(Self::new(Source::Path(path.to_path_buf()), rdr, format, query))
    }

    /// Wrap any async `AsyncBufRead`.
    pub fn from_async_bufread<R>(reader: R, format: FileFormat, query: &str) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        Self::new(Source::Reader, Box::new(reader), format, query)
    }

    fn new(
        src: Source,
        rdr: Box<dyn AsyncBufRead + Unpin + Send>,
        format: FileFormat,
        query: &str,
    ) -> Self {
        log::debug!("scanning {src} as {format} for '{query}' (async)");
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

    #[inline]
    pub fn format(&self) -> FileFormat {
        self.machine.format()
    }

    #[inline]
    pub fn line_num(&self) -> u64 {
        self.line_num
    }

    /// Fetch next match (async).
    pub async fn next_match(&mut self) -> Option<Result<Match, SearchError>> {
        if self.done {
            return None;
        }
        loop {
            let line_start = self.byte_pos;
            let n = match self.read_line().await {
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

    /// Drain the remaining matches.
    pub async fn collect_all(mut self) -> Result<Vec<Match>, SearchError> {
        let mut out = Vec::new();
        while let Some(rec) = self.next_match().await {
            out.push(rec?);
        }
        Ok(out)
    }

    async fn read_line(&mut self) -> io::Result<usize> {
        self.line.clear();
        let n = self.rdr.read_until(b'\n', &mut self.line).await?;
        strip_line_ending(&mut self.line);
        Ok(n)
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
