use tracing::info;

use crate::error::ParagraphError;
use crate::models::Transcript;
use crate::stages::{
    AggregateConfig, AggregateResult, BoundaryDetector, execute_trials, filter_candidates,
    reconstruct,
};

/// Settings for one paragraphing run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Lines starting with any of these are never judged as paragraph starts
    pub skip_line_prefixes: Vec<String>,
    /// Number of detection trials merged by majority vote
    pub trials: usize,
    /// Detection trials allowed in flight at once
    pub max_concurrent_trials: usize,
    /// Log the per-trial and final boundary sets
    pub verbose: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            skip_line_prefixes: Vec::new(),
            trials: 1,
            max_concurrent_trials: 1,
            verbose: false,
        }
    }
}

impl PipelineConfig {
    fn aggregate_config(&self) -> AggregateConfig {
        AggregateConfig {
            trials: self.trials,
            max_concurrent_trials: self.max_concurrent_trials,
        }
    }

    pub fn validate(&self) -> Result<(), ParagraphError> {
        self.aggregate_config().validate()?;
        if self.skip_line_prefixes.iter().any(String::is_empty) {
            return Err(ParagraphError::InvalidConfig(
                "skip line prefixes must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a paragraphing run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Transcript lines with blank lines inserted at paragraph starts
    pub lines: Vec<String>,
    /// Number of lines shown to the detector
    pub candidate_count: usize,
    /// Per-trial results, vote tally and final boundaries
    pub aggregate: AggregateResult,
}

/// Paragraph a transcript: filter, detect over several trials, vote, reconstruct
///
/// Configuration and empty-input errors are raised before any detection call.
pub async fn run_pipeline<D>(
    transcript: &Transcript,
    detector: &D,
    config: &PipelineConfig,
) -> Result<PipelineOutput, ParagraphError>
where
    D: BoundaryDetector + ?Sized,
{
    config.validate()?;
    if transcript.is_empty() {
        return Err(ParagraphError::EmptyTranscript);
    }

    let candidates = filter_candidates(transcript, &config.skip_line_prefixes);
    info!(
        "{} of {} lines are candidates for paragraph starts",
        candidates.len(),
        transcript.len()
    );

    let aggregate = execute_trials(detector, &candidates, &config.aggregate_config()).await?;

    if config.verbose {
        for (trial, boundaries) in aggregate.trials.iter().enumerate() {
            info!("Trial {} boundaries: {:?}", trial + 1, boundaries);
        }
        info!("Final paragraph starts: {:?}", aggregate.boundaries);
    }

    let lines = reconstruct(transcript, &aggregate.boundaries);

    Ok(PipelineOutput {
        lines,
        candidate_count: candidates.len(),
        aggregate,
    })
}
