//! Byte offset → 1-indexed line lookup.
//!
//! Lines break on `\n` only. This agrees with `str::lines()`, which also
//! splits on `\n` (dropping a trailing `\r`), so offset-based and
//! enumeration-based line numbers match on LF and CRLF files alike.

/// Precomputed line start offsets for one file.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    /// Newlines preceding `offset`, plus one.
    pub fn line_of(&self, offset: usize) -> u32 {
        self.starts.partition_point(|&start| start <= offset) as u32
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}
