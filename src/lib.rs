pub mod error;
pub mod io;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod stages;

pub use error::{BackendError, ParagraphError};
pub use io::{InputSource, OutputTarget, derive_output_path, read_transcript, write_output};
pub use llm::{AnthropicClient, AnthropicConfig, ModelBackend, OllamaClient, OllamaConfig};
pub use models::{BoundarySet, CandidateLine, ChunkConfig, Transcript, VoteTally};
pub use pipeline::{PipelineConfig, PipelineOutput, run_pipeline};
pub use stages::{
    AggregateConfig, AggregateResult, BoundaryDetector, DetectorConfig, LlmBoundaryDetector,
    execute_trials, filter_candidates, majority_vote, reconstruct, split_into_chunks,
};
