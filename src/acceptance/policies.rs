//! Accept/reject policies over `(hard, soft)` violation pairs.

use super::config::ThresholdConfig;
use crate::evaluator::{evaluate, Violations};
use crate::model::Schedule;

/// Decides whether a perturbed schedule replaces the current one.
///
/// Comparisons are lexicographic on [`Violations`], hard first. Policies
/// may keep state between calls (an iteration counter); each instance
/// belongs to exactly one search loop.
pub trait MoveAcceptance {
    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;

    /// Returns `true` if `candidate` should replace `current`.
    fn accept(&mut self, current: Violations, candidate: Violations) -> bool;

    /// Evaluates both schedules and applies [`accept`](Self::accept).
    fn accept_schedules(&mut self, current: &Schedule, candidate: &Schedule) -> bool {
        self.accept(evaluate(current), evaluate(candidate))
    }
}

/// Accepts strict improvements only.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptImproving;

impl MoveAcceptance for AcceptImproving {
    fn name(&self) -> &str {
        "AI"
    }

    fn accept(&mut self, current: Violations, candidate: Violations) -> bool {
        candidate < current
    }
}

/// Accepts improvements and sideways moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptEqualOrImproving;

impl MoveAcceptance for AcceptEqualOrImproving {
    fn name(&self) -> &str {
        "AEI"
    }

    fn accept(&mut self, current: Violations, candidate: Violations) -> bool {
        candidate <= current
    }
}

/// Iterated Limited Threshold Acceptance.
///
/// Improvements are always accepted. After `max_iterations` consecutive
/// rejections, a candidate with the same hard cost and a soft cost at most
/// `threshold` above the current one is accepted as well. Every acceptance
/// resets the rejection counter.
///
/// # References
///
/// Misir, Verbeeck, De Causmaecker & Vanden Berghe (2009), "Hyper-heuristics
/// with a dynamic heuristic set for the home care scheduling problem"
#[derive(Debug, Clone)]
pub struct IteratedLimitedThresholdAcceptance {
    max_iterations: usize,
    threshold: usize,
    iterations: usize,
}

impl IteratedLimitedThresholdAcceptance {
    pub fn new(max_iterations: usize, threshold: usize) -> Self {
        Self {
            max_iterations,
            threshold,
            iterations: 0,
        }
    }

    pub fn from_config(config: &ThresholdConfig) -> Self {
        Self::new(config.max_iterations, config.threshold)
    }

    /// Consecutive rejections since the last acceptance.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl Default for IteratedLimitedThresholdAcceptance {
    fn default() -> Self {
        Self::from_config(&ThresholdConfig::default())
    }
}

impl MoveAcceptance for IteratedLimitedThresholdAcceptance {
    fn name(&self) -> &str {
        "ILTA"
    }

    fn accept(&mut self, current: Violations, candidate: Violations) -> bool {
        let within_threshold = candidate.hard == current.hard
            && candidate.soft <= current.soft.saturating_add(self.threshold);
        if candidate < current || (self.iterations >= self.max_iterations && within_threshold) {
            self.iterations = 0;
            true
        } else {
            self.iterations += 1;
            false
        }
    }
}
