/// A complete record whose header contained the query.
///
/// `quality` is empty for FASTA.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    /// 1-based physical line of the header, blank lines included.
    pub line_number: u64,
    /// Offset of the first byte of the header line.
    pub byte_offset: u64,
    pub header: String,
    pub sequence: String,
    pub quality: String,
}

impl Match {
    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
    #[inline]
    pub fn has_quality(&self) -> bool {
        !self.quality.is_empty()
    }
}
