//! Greedy intersection reduction of a synonym set.

use crate::segment::{reconstruct, segment, Segment, SegmentError, SegmentKind, SegmentSequence};
use crate::similarity::similar;

use super::SynonymSet;

/// Reduces a synonym set to generalized URL strings.
///
/// Members are folded in sorted order into the first reduced template they
/// are similar to and intersect with; positions where they disagree lose
/// their text. Blanked positions are stripped before reconstruction, so the
/// output is not guaranteed to be fetchable as-is.
pub fn reduce(set: &SynonymSet, threshold: f64) -> Result<Vec<String>, SegmentError> {
    let members = set
        .urls()
        .map(segment)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(reduce_sequences(&members, threshold)
        .iter()
        .map(|template| reconstruct(&template.compact()))
        .collect())
}

/// Folds `members` into reduced templates. Blanked positions keep empty text.
pub fn reduce_sequences(members: &[SegmentSequence], threshold: f64) -> Vec<SegmentSequence> {
    let Some(first) = members.first() else {
        return Vec::new();
    };
    let mut reduced = vec![first.clone()];
    for member in members {
        let folded = reduced
            .iter_mut()
            .any(|template| fold(template, member, threshold));
        if !folded {
            reduced.push(member.clone());
        }
    }
    reduced
}

fn fold(template: &mut SegmentSequence, member: &SegmentSequence, threshold: f64) -> bool {
    if !similar(template, member, threshold) {
        return false;
    }
    match intersect(template, member) {
        Some(merged) => {
            *template = merged;
            true
        }
        None => false,
    }
}

/// Pointwise intersection of two sequences.
///
/// Returns `None` ("cannot merge") when lengths differ, when any position's
/// kind differs, or when a netloc label differs; host labels are never
/// discarded. Otherwise differing texts become empty.
pub fn intersect(a: &SegmentSequence, b: &SegmentSequence) -> Option<SegmentSequence> {
    if a.len() != b.len() {
        return None;
    }
    let mut merged = Vec::with_capacity(a.len());
    for (x, y) in a.iter().zip(b) {
        if x.kind != y.kind {
            return None;
        }
        if x.text == y.text {
            merged.push(x.clone());
        } else if x.kind == SegmentKind::NetLoc {
            return None;
        } else {
            merged.push(Segment::new(x.position, "", x.kind));
        }
    }
    Some(SegmentSequence::from_segments(merged))
}
