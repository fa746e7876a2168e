//! Weighted similarity between two segment sequences.
//!
//! Every position contributes its kind's weight to the maximum score (2 for
//! netloc labels, 1 for everything else). A position earns that weight when
//! both sides agree on kind and text. Two `param` segments that differ only
//! after the first `=` earn 1. Query and fragment segments get no such
//! partial credit; that asymmetry is deliberate and pinned by a test.

use crate::segment::{Segment, SegmentKind, SegmentSequence};

/// Default similarity threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.60;

/// Whether segment kinds take part in the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindCheck {
    /// Kinds must match for a position to earn credit.
    #[default]
    Strict,
    /// Only texts are compared; weights follow the candidate's kinds.
    Ignore,
}

/// Raw score of one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub earned: u32,
    pub max: u32,
}

impl Score {
    pub fn ratio(&self) -> f64 {
        if self.max == 0 {
            return 1.0;
        }
        f64::from(self.earned) / f64::from(self.max)
    }

    pub fn meets(&self, threshold: f64) -> bool {
        self.ratio() >= threshold
    }
}

/// Scores `candidate` against `reference` with kind checking.
///
/// Returns `None` when the lengths differ; sequences of different length are
/// never similar.
pub fn score(reference: &SegmentSequence, candidate: &SegmentSequence) -> Option<Score> {
    score_with(reference, candidate, KindCheck::Strict)
}

pub fn score_with(
    reference: &SegmentSequence,
    candidate: &SegmentSequence,
    check: KindCheck,
) -> Option<Score> {
    if reference.len() != candidate.len() {
        return None;
    }
    let mut total = Score { earned: 0, max: 0 };
    for (r, c) in reference.iter().zip(candidate) {
        let weight = c.kind.weight();
        total.max += weight;
        total.earned += position_credit(r, c, weight, check);
    }
    Some(total)
}

fn position_credit(r: &Segment, c: &Segment, weight: u32, check: KindCheck) -> u32 {
    let kinds_agree = match check {
        KindCheck::Strict => r.kind == c.kind,
        KindCheck::Ignore => true,
    };
    if kinds_agree && r.text == c.text {
        return weight;
    }
    let both_params = match check {
        KindCheck::Strict => r.kind == SegmentKind::Param && c.kind == SegmentKind::Param,
        KindCheck::Ignore => c.kind == SegmentKind::Param,
    };
    if both_params && r.param_key() == c.param_key() {
        return 1;
    }
    0
}

/// True if the sequences have equal length and score at least `threshold`.
pub fn similar(a: &SegmentSequence, b: &SegmentSequence, threshold: f64) -> bool {
    similar_with(a, b, threshold, KindCheck::Strict)
}

pub fn similar_with(
    a: &SegmentSequence,
    b: &SegmentSequence,
    threshold: f64,
    check: KindCheck,
) -> bool {
    score_with(a, b, check).is_some_and(|s| s.meets(threshold))
}
