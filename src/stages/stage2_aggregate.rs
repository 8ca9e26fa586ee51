use std::collections::HashSet;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use crate::error::ParagraphError;
use crate::models::{BoundarySet, CandidateLine, VoteTally};
use crate::stages::BoundaryDetector;

/// Configuration for the trial aggregator
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    /// Number of independent detection passes
    pub trials: usize,
    /// Detection passes allowed in flight at once
    pub max_concurrent_trials: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            trials: 1,
            max_concurrent_trials: 1,
        }
    }
}

impl AggregateConfig {
    pub fn validate(&self) -> Result<(), ParagraphError> {
        if self.trials == 0 {
            return Err(ParagraphError::InvalidConfig(
                "trials must be at least 1".to_string(),
            ));
        }
        if self.max_concurrent_trials == 0 {
            return Err(ParagraphError::InvalidConfig(
                "concurrent trials must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of aggregating all trials
#[derive(Debug, Clone)]
pub struct AggregateResult {
    /// Boundary set from each trial, in trial order
    pub trials: Vec<BoundarySet>,
    /// Votes per proposed line index
    pub tally: VoteTally,
    /// Indices confirmed by a strict majority of trials
    pub boundaries: BoundarySet,
}

/// Keep the indices proposed by strictly more than half of `trials`
///
/// With an even trial count an index seen in exactly half the trials is dropped.
pub fn majority_vote(tally: &VoteTally, trials: usize) -> BoundarySet {
    tally.above(trials / 2)
}

/// Run every detection trial, then merge the results by majority vote
///
/// Trials run concurrently up to `max_concurrent_trials`. The first failing
/// trial fails the whole run; trials still in flight are dropped and no
/// partial result is produced.
pub async fn execute_trials<D>(
    detector: &D,
    candidates: &[CandidateLine],
    config: &AggregateConfig,
) -> Result<AggregateResult, ParagraphError>
where
    D: BoundaryDetector + ?Sized,
{
    config.validate()?;

    let eligible: HashSet<usize> = candidates.iter().map(|line| line.index).collect();

    let trials: Vec<BoundarySet> = stream::iter(1..=config.trials)
        .map(|trial| {
            let eligible = &eligible;
            async move {
                info!("Trial {}/{}: detecting boundaries", trial, config.trials);
                let proposed = detector.detect(candidates).await?;
                let kept: BoundarySet = proposed
                    .iter()
                    .copied()
                    .filter(|index| eligible.contains(index))
                    .collect();
                if kept.len() < proposed.len() {
                    debug!(
                        trial,
                        "Discarded {} indices that were not candidate lines",
                        proposed.len() - kept.len()
                    );
                }
                debug!(trial, boundaries = ?kept, "Trial complete");
                Ok::<_, ParagraphError>(kept)
            }
        })
        .buffered(config.max_concurrent_trials)
        .try_collect()
        .await?;

    let tally = VoteTally::from_trials(&trials);
    let boundaries = majority_vote(&tally, config.trials);

    info!(
        "{} trials proposed {} distinct boundaries, {} confirmed by majority",
        config.trials,
        tally.len(),
        boundaries.len()
    );

    Ok(AggregateResult {
        trials,
        tally,
        boundaries,
    })
}
