//! Greedy score-based heuristic selection.

use rand::Rng;

use crate::error::{Error, Result};

/// A candidate with its running score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate<T> {
    pub candidate: T,
    pub score: i64,
}

/// Picks the best-scoring candidate, breaking ties uniformly at random.
///
/// The caller rewards a candidate whose move was accepted and penalizes
/// one whose move was rejected. There is no exploration bonus: a
/// candidate that falls behind is only tried again once the leaders have
/// dropped to its score.
#[derive(Debug, Clone)]
pub struct HeuristicSelector<T> {
    candidates: Vec<ScoredCandidate<T>>,
}

impl<T> HeuristicSelector<T> {
    /// Creates a selector with every score at zero.
    ///
    /// # Errors
    /// Returns [`Error::EmptyCandidateSet`] if `candidates` is empty.
    pub fn new(candidates: Vec<T>) -> Result<Self> {
        Self::with_scores(candidates.into_iter().map(|c| (c, 0)).collect())
    }

    /// Creates a selector with explicit starting scores.
    pub fn with_scores(candidates: Vec<(T, i64)>) -> Result<Self> {
        if candidates.is_empty() {
            return Err(Error::EmptyCandidateSet);
        }
        Ok(Self {
            candidates: candidates
                .into_iter()
                .map(|(candidate, score)| ScoredCandidate { candidate, score })
                .collect(),
        })
    }

    /// Index of a maximum-score candidate, uniform among ties.
    pub fn select<R: Rng>(&self, rng: &mut R) -> usize {
        let best = self
            .candidates
            .iter()
            .map(|c| c.score)
            .max()
            .unwrap_or_default();
        let leaders: Vec<usize> = self
            .candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.score == best)
            .map(|(i, _)| i)
            .collect();
        leaders[rng.random_range(0..leaders.len())]
    }

    /// Adds one to a candidate's score.
    pub fn reward(&mut self, index: usize) {
        self.candidates[index].score += 1;
    }

    /// Subtracts one from a candidate's score.
    pub fn penalize(&mut self, index: usize) {
        self.candidates[index].score -= 1;
    }

    pub fn candidate(&self, index: usize) -> &T {
        &self.candidates[index].candidate
    }

    pub fn score(&self, index: usize) -> i64 {
        self.candidates[index].score
    }

    pub fn scores(&self) -> Vec<i64> {
        self.candidates.iter().map(|c| c.score).collect()
    }

    pub fn candidates(&self) -> &[ScoredCandidate<T>] {
        &self.candidates
    }

    /// Consumes the selector, returning candidates with their final scores.
    pub fn into_candidates(self) -> Vec<ScoredCandidate<T>> {
        self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always `false`: construction rejects empty candidate sets.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_empty_candidate_set() {
        let result = HeuristicSelector::<u8>::new(Vec::new());
        assert!(matches!(result, Err(Error::EmptyCandidateSet)));
    }

    #[test]
    fn test_ties_split_evenly() {
        let selector =
            HeuristicSelector::with_scores(vec![('a', 3), ('b', 5), ('c', 5), ('d', 1)]).unwrap();
        let mut rng = create_rng(42);
        let mut counts = [0usize; 4];
        for _ in 0..10_000 {
            counts[selector.select(&mut rng)] += 1;
        }
        assert_eq!(counts[0], 0);
        assert_eq!(counts[3], 0);
        assert!(counts[1] > 4_500 && counts[1] < 5_500, "{counts:?}");
        assert!(counts[2] > 4_500 && counts[2] < 5_500, "{counts:?}");
    }

    #[test]
    fn test_reward_and_penalize() {
        let mut selector = HeuristicSelector::new(vec!["x", "y"]).unwrap();
        selector.reward(1);
        selector.penalize(0);
        assert_eq!(selector.scores(), vec![-1, 1]);
        let mut rng = create_rng(0);
        for _ in 0..20 {
            assert_eq!(selector.select(&mut rng), 1);
        }
        assert_eq!(*selector.candidate(1), "y");
        assert_eq!(selector.len(), 2);
    }
}
