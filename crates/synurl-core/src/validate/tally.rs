use super::{FailureReason, SetValidation, ValidationOutcome};

/// Per-host outcome counters over all validated reduced URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationTally {
    pub matched: usize,
    pub no_match: usize,
    /// Fetch attempts exhausted.
    pub failed: usize,
    /// Not fetched because the set's sanity check failed.
    pub sanity_untested: usize,
}

impl ValidationTally {
    pub fn record(&mut self, outcome: &ValidationOutcome) {
        match outcome {
            ValidationOutcome::Matched { .. } => self.matched += 1,
            ValidationOutcome::NoMatch => self.no_match += 1,
            ValidationOutcome::Failed {
                reason: FailureReason::Exhausted,
            } => self.failed += 1,
            ValidationOutcome::Failed {
                reason: FailureReason::Sanity,
            } => self.sanity_untested += 1,
        }
    }

    pub fn record_set(&mut self, set: &SetValidation) {
        for (_, outcome) in &set.outcomes {
            self.record(outcome);
        }
    }

    pub fn total(&self) -> usize {
        self.matched + self.no_match + self.failed + self.sanity_untested
    }
}
