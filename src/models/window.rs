use std::ops::Range;

use super::CandidateLine;

/// Configuration for splitting candidate lines into model-sized chunks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Maximum number of candidate lines sent in one model call
    pub window_size: usize,
    /// Number of candidate lines shared by consecutive chunks
    pub overlap: usize,
    /// Lines this close to an internal chunk edge are not judged by that chunk
    pub boundary_margin: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            window_size: 30,
            overlap: 10,
            boundary_margin: 5,
        }
    }
}

impl ChunkConfig {
    /// Distance between the starts of consecutive chunks
    pub fn stride(&self) -> usize {
        self.window_size.saturating_sub(self.overlap).max(1)
    }

    /// Check the settings leave every candidate line judgeable by some chunk
    pub fn validate(&self) -> Result<(), String> {
        if self.window_size == 0 {
            return Err("window size must be at least 1".to_string());
        }
        if self.overlap >= self.window_size {
            return Err(format!(
                "window overlap ({}) must be smaller than window size ({})",
                self.overlap, self.window_size
            ));
        }
        if self.boundary_margin * 2 > self.overlap {
            return Err(format!(
                "boundary margin ({}) must be at most half the window overlap ({})",
                self.boundary_margin, self.overlap
            ));
        }
        Ok(())
    }
}

/// A contiguous run of candidate lines sent to the model in one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Position of this chunk in the split
    pub chunk_id: usize,
    /// Candidate lines shown to the model
    pub lines: &'a [CandidateLine],
    /// Positions within `lines` whose boundaries this chunk may report
    pub eligible: Range<usize>,
}

impl Chunk<'_> {
    /// Number of candidate lines in the chunk
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if a transcript index may be reported as a boundary by this chunk
    pub fn is_eligible(&self, index: usize) -> bool {
        self.lines[self.eligible.clone()]
            .iter()
            .any(|line| line.index == index)
    }

    /// Transcript index range covered, first and last inclusive
    pub fn index_span(&self) -> Option<(usize, usize)> {
        Some((self.lines.first()?.index, self.lines.last()?.index))
    }
}
