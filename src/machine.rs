//! Record-boundary state machine shared by the sync and async scanners.
//!
//! The machine is fed one physical line at a time (line ending already
//! stripped) together with that line's number and byte offset. It never reads
//! on its own, so the driver decides how lines are acquired and the line
//! counter cannot drift from what was physically read.

use crate::error::MalformedRecord;
use crate::format::FileFormat;
use crate::record::Match;
use crate::util::{into_string, trim};

use memchr::memmem::Finder;
use std::mem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SeekHeader,
    Sequence,
    Separator,
    Quality,
}

impl State {
    fn expected(self) -> &'static str {
        match self {
            State::SeekHeader => "header",
            State::Sequence => "sequence",
            State::Separator => "separator",
            State::Quality => "quality",
        }
    }
}

#[derive(Debug)]
pub(crate) enum Step {
    /// Line absorbed, nothing to report.
    Continue,
    Emit(Match),
    /// The record whose header sat on `line_number` was dropped.
    Discard {
        line_number: u64,
        reason: MalformedRecord,
    },
}

pub(crate) struct RecordMachine {
    format: FileFormat,
    finder: Finder<'static>,
    state: State,
    line_number: u64,
    byte_offset: u64,
    // header matched the query; sequence and quality are only kept if so
    keep: bool,
    header: Vec<u8>,
    sequence: Vec<u8>,
}

impl RecordMachine {
    pub(crate) fn new(format: FileFormat, query: &str) -> Self {
        Self {
            format,
            finder: Finder::new(query.as_bytes()).into_owned(),
            state: State::SeekHeader,
            line_number: 0,
            byte_offset: 0,
            keep: false,
            header: Vec::with_capacity(128),
            sequence: Vec::with_capacity(256),
        }
    }

    #[inline]
    pub(crate) fn format(&self) -> FileFormat {
        self.format
    }

    pub(crate) fn feed(&mut self, line: &[u8], line_number: u64, byte_offset: u64) -> Step {
        let line = trim(line);
        let sentinel = self.format.sentinel();
        let is_header = line.first() == Some(&sentinel);

        match self.state {
            State::SeekHeader => {
                if is_header {
                    self.start(line, line_number, byte_offset);
                }
                Step::Continue
            }
            State::Sequence | State::Separator if is_header => {
                let step = self.discard(MalformedRecord::Interrupted(self.state.expected()));
                self.start(line, line_number, byte_offset);
                step
            }
            _ if line.is_empty() => self.discard(MalformedRecord::BlankLine(self.state.expected())),
            State::Sequence => {
                if self.keep {
                    self.sequence.clear();
                    self.sequence.extend_from_slice(line);
                }
                match self.format {
                    FileFormat::Fasta => self.complete(b""),
                    FileFormat::Fastq => {
                        self.state = State::Separator;
                        Step::Continue
                    }
                }
            }
            State::Separator => {
                if line[0] == b'+' {
                    self.state = State::Quality;
                    Step::Continue
                } else {
                    self.discard(MalformedRecord::MissingSeparator)
                }
            }
            // '@' is a legal quality character, so no header check here
            State::Quality => self.complete(line),
        }
    }

    /// End of input. Reports a record that was still waiting for lines.
    pub(crate) fn finish(&mut self) -> Option<Step> {
        match self.state {
            State::SeekHeader => None,
            state => Some(self.discard(MalformedRecord::UnexpectedEof(state.expected()))),
        }
    }

    fn start(&mut self, line: &[u8], line_number: u64, byte_offset: u64) {
        let header = trim(&line[1..]);
        self.state = State::Sequence;
        self.line_number = line_number;
        self.byte_offset = byte_offset;
        self.keep = self.finder.find(header).is_some();
        self.header.clear();
        if self.keep {
            self.header.extend_from_slice(header);
        }
    }

    fn discard(&mut self, reason: MalformedRecord) -> Step {
        self.state = State::SeekHeader;
        Step::Discard {
            line_number: self.line_number,
            reason,
        }
    }

    fn complete(&mut self, quality: &[u8]) -> Step {
        self.state = State::SeekHeader;
        if !self.keep {
            return Step::Continue;
        }
        Step::Emit(Match {
            line_number: self.line_number,
            byte_offset: self.byte_offset,
            header: into_string(mem::take(&mut self.header)),
            sequence: into_string(mem::take(&mut self.sequence)),
            quality: into_string(quality.to_vec()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(format: FileFormat, query: &str, input: &str) -> (Vec<Match>, Vec<(u64, MalformedRecord)>) {
        let mut m = RecordMachine::new(format, query);
        let mut found = Vec::new();
        let mut dropped = Vec::new();
        let mut offset = 0u64;
        let mut steps = Vec::new();
        for (i, line) in input.split_inclusive('\n').enumerate() {
            let body = line.trim_end_matches('\n').trim_end_matches('\r');
            steps.push(m.feed(body.as_bytes(), i as u64 + 1, offset));
            offset += line.len() as u64;
        }
        steps.extend(m.finish());
        for step in steps {
            match step {
                Step::Emit(rec) => found.push(rec),
                Step::Discard {
                    line_number,
                    reason,
                } => dropped.push((line_number, reason)),
                Step::Continue => {}
            }
        }
        (found, dropped)
    }

    #[test]
    fn fasta_header_interrupting_sequence_starts_new_record() {
        let (found, dropped) = run(FileFormat::Fasta, "", ">a\n>b\nACGT\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].header, "b");
        assert_eq!(found[0].line_number, 2);
        assert_eq!(found[0].byte_offset, 3);
        assert_eq!(dropped, vec![(1, MalformedRecord::Interrupted("sequence"))]);
    }

    #[test]
    fn fastq_header_in_separator_slot_is_reused() {
        let (found, dropped) = run(FileFormat::Fastq, "r", "@r1\nACGT\n@r2\nGG\n+\nHH\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].header, "r2");
        assert_eq!(found[0].line_number, 3);
        assert_eq!(dropped, vec![(1, MalformedRecord::Interrupted("separator"))]);
    }

    #[test]
    fn quality_may_start_with_at_sign() {
        let (found, dropped) = run(FileFormat::Fastq, "x", "@x\nAC\n+\n@I\n");
        assert!(dropped.is_empty());
        assert_eq!(found[0].quality, "@I");
    }

    #[test]
    fn blank_inside_record_drops_it() {
        let (found, dropped) = run(FileFormat::Fastq, "", "@a\nAC\n\n+\nII\n@b\nGG\n+\nHH\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].header, "b");
        assert_eq!(found[0].line_number, 6);
        assert_eq!(dropped, vec![(1, MalformedRecord::BlankLine("separator"))]);
    }

    #[test]
    fn non_plus_separator_is_reported() {
        let (found, dropped) = run(FileFormat::Fastq, "", "@a\nAC\n-\nII\n");
        assert!(found.is_empty());
        assert_eq!(dropped, vec![(1, MalformedRecord::MissingSeparator)]);
    }

    #[test]
    fn truncated_tail_reports_missing_line() {
        let (found, dropped) = run(FileFormat::Fastq, "r", "@r1\nACGT\n+\n");
        assert!(found.is_empty());
        assert_eq!(dropped, vec![(1, MalformedRecord::UnexpectedEof("quality"))]);
    }

    #[test]
    fn non_matching_records_still_walk_every_line() {
        let (found, _) = run(FileFormat::Fastq, "hit", "@miss\nACGT\n+\n@@@@\n@hit\nAC\n+\nII\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line_number, 5);
        assert_eq!(found[0].sequence, "AC");
    }
}
