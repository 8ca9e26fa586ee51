use std::collections::{BTreeMap, BTreeSet};

/// Transcript line indices (1-based) at which a new paragraph starts
pub type BoundarySet = BTreeSet<usize>;

/// Number of trials that marked each line index as a boundary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTally {
    votes: BTreeMap<usize, usize>,
}

impl VoteTally {
    /// Count votes over a set of trial results
    pub fn from_trials(trials: &[BoundarySet]) -> Self {
        let mut tally = Self::default();
        for trial in trials {
            tally.record(trial);
        }
        tally
    }

    /// Add one vote for every index in a trial result
    pub fn record(&mut self, trial: &BoundarySet) {
        for &index in trial {
            *self.votes.entry(index).or_insert(0) += 1;
        }
    }

    /// Votes cast for a line index
    pub fn votes(&self, index: usize) -> usize {
        self.votes.get(&index).copied().unwrap_or(0)
    }

    /// Indices whose vote count is strictly greater than `threshold`
    pub fn above(&self, threshold: usize) -> BoundarySet {
        self.votes
            .iter()
            .filter(|&(_, &count)| count > threshold)
            .map(|(&index, _)| index)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.votes.iter().map(|(&index, &count)| (index, count))
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_each_trial_once() {
        let trials = vec![
            BoundarySet::from([3]),
            BoundarySet::from([3, 4]),
            BoundarySet::from([2]),
        ];
        let tally = VoteTally::from_trials(&trials);

        assert_eq!(tally.len(), 3);
        assert_eq!(tally.votes(2), 1);
        assert_eq!(tally.votes(3), 2);
        assert_eq!(tally.votes(4), 1);
        assert_eq!(tally.votes(5), 0);
    }

    #[test]
    fn test_above_is_strict() {
        let tally = VoteTally::from_trials(&[BoundarySet::from([1, 2]), BoundarySet::from([2])]);

        assert_eq!(tally.above(1), BoundarySet::from([2]));
        assert_eq!(tally.above(0), BoundarySet::from([1, 2]));
        assert!(tally.above(2).is_empty());
    }
}
