use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{BackendError, ParagraphError};
use crate::llm::{ModelBackend, TARGET_PARAGRAPH_CHARS, build_boundary_prompt, parse_line_numbers};
use crate::models::{BoundarySet, CandidateLine, Chunk, ChunkConfig};

/// One detection pass over a candidate line sequence
///
/// Implementations may be stochastic; repeated calls on the same input are
/// allowed to disagree.
#[async_trait]
pub trait BoundaryDetector: Send + Sync {
    /// Return the transcript indices judged to start a new paragraph
    async fn detect(&self, candidates: &[CandidateLine]) -> Result<BoundarySet, BackendError>;
}

/// Configuration for LLM boundary detection
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// How candidate lines are split across model calls
    pub chunking: ChunkConfig,
    /// Model calls per chunk before an unparseable reply counts as no boundaries
    pub max_attempts: u32,
    /// Paragraph length the model is asked to aim for, in characters
    pub target_paragraph_chars: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            chunking: ChunkConfig::default(),
            max_attempts: 5,
            target_paragraph_chars: TARGET_PARAGRAPH_CHARS,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<(), ParagraphError> {
        self.chunking.validate().map_err(ParagraphError::InvalidConfig)?;
        if self.max_attempts == 0 {
            return Err(ParagraphError::InvalidConfig(
                "max attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Split candidate lines into overlapping chunks of at most `window_size` lines
///
/// Chunks advance by `window_size - overlap`. Within each chunk, lines closer
/// than `boundary_margin` to an edge shared with a neighbouring chunk are not
/// eligible; the outer edges of the first and last chunk are.
pub fn split_into_chunks<'a>(candidates: &'a [CandidateLine], config: &ChunkConfig) -> Vec<Chunk<'a>> {
    let total = candidates.len();
    if total == 0 {
        return Vec::new();
    }

    let window_size = config.window_size.max(1);
    let mut starts = Vec::new();
    let mut start = 0;
    loop {
        starts.push(start);
        if start + window_size >= total {
            break;
        }
        start += config.stride();
    }

    let last_chunk = starts.len() - 1;
    starts
        .into_iter()
        .enumerate()
        .map(|(chunk_id, start)| {
            let end = (start + window_size).min(total);
            let len = end - start;
            let lower = if chunk_id == 0 {
                0
            } else {
                config.boundary_margin.min(len)
            };
            let upper = if chunk_id == last_chunk {
                len
            } else {
                len.saturating_sub(config.boundary_margin)
            };
            Chunk {
                chunk_id,
                lines: &candidates[start..end],
                eligible: lower..upper.max(lower),
            }
        })
        .collect()
}

/// Boundary detector that asks a generative model, chunk by chunk
pub struct LlmBoundaryDetector {
    backend: Arc<dyn ModelBackend>,
    config: DetectorConfig,
}

impl LlmBoundaryDetector {
    pub fn new(backend: Arc<dyn ModelBackend>, config: DetectorConfig) -> Result<Self, ParagraphError> {
        config.validate()?;
        Ok(Self { backend, config })
    }

    /// Ask the model about one chunk, re-asking while the reply is unparseable
    async fn detect_chunk(&self, chunk: &Chunk<'_>) -> Result<BoundarySet, BackendError> {
        let prompt = build_boundary_prompt(chunk.lines, self.config.target_paragraph_chars);

        for attempt in 1..=self.config.max_attempts {
            let reply = self.backend.complete(&prompt).await?;
            debug!(chunk = chunk.chunk_id, attempt, reply = ?reply, "Model reply");

            match parse_line_numbers(&reply) {
                Some(numbers) => {
                    let proposed = numbers.len();
                    let accepted: BoundarySet = numbers
                        .into_iter()
                        .filter(|&index| chunk.is_eligible(index))
                        .collect();
                    if accepted.len() < proposed {
                        debug!(
                            chunk = chunk.chunk_id,
                            "Discarded {} line numbers outside the eligible range",
                            proposed - accepted.len()
                        );
                    }
                    return Ok(accepted);
                }
                None => {
                    warn!(
                        "Chunk {}: unparseable reply (attempt {} of {})",
                        chunk.chunk_id, attempt, self.config.max_attempts
                    );
                }
            }
        }

        warn!(
            "Chunk {}: no usable reply after {} attempts, treating as no boundaries",
            chunk.chunk_id, self.config.max_attempts
        );
        Ok(BoundarySet::new())
    }
}

#[async_trait]
impl BoundaryDetector for LlmBoundaryDetector {
    async fn detect(&self, candidates: &[CandidateLine]) -> Result<BoundarySet, BackendError> {
        let chunks = split_into_chunks(candidates, &self.config.chunking);
        let chunk_count = chunks.len();
        let mut boundaries = BoundarySet::new();

        for chunk in &chunks {
            if let Some((first, last)) = chunk.index_span() {
                info!(
                    "Chunk {}/{}: lines {}-{} ({} candidates) via {}",
                    chunk.chunk_id + 1,
                    chunk_count,
                    first,
                    last,
                    chunk.line_count(),
                    self.backend.model_name()
                );
            }
            boundaries.extend(self.detect_chunk(chunk).await?);
        }

        Ok(boundaries)
    }
}
