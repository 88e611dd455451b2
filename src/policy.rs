use std::fmt;
use std::str::FromStr;

/// How the source bytes are acquired for a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// Buffered line-by-line reads; memory bounded by the longest line.
    #[default]
    Stream,
    /// Read the whole file into memory first, then scan the buffer.
    Buffer,
    /// Memory-map the file and scan the mapping (`mmap` feature).
    Mmap,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Stream => "stream",
            Strategy::Buffer => "buffer",
            Strategy::Mmap => "mmap",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stream" => Ok(Strategy::Stream),
            "buffer" => Ok(Strategy::Buffer),
            "mmap" => Ok(Strategy::Mmap),
            other => Err(format!(
                "unknown strategy '{other}' (expected stream, buffer or mmap)"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub strategy: Strategy,
    /// `BufReader` capacity for the streaming strategy.
    pub capacity: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Stream,
            capacity: 256 * 1024,
        }
    }
}
