//! Segment sequence → URL string.

use super::{SegmentKind, SegmentSequence, UrlParts, WILDCARD};

/// Rebuilds a URL from its segments.
///
/// Segments are grouped back by kind and re-joined with their part's
/// separator. Wildcard segments are rendered as the marker followed by their
/// position (`##!!##4`), so the output is readable but not fetchable until
/// wildcards are removed.
pub fn reconstruct(seq: &SegmentSequence) -> String {
    let bounds = seq.boundaries();
    let join = |kind: SegmentKind| -> String {
        seq.segments()[bounds.range(kind)]
            .iter()
            .map(|s| {
                if s.is_wildcard() {
                    format!("{}{}", WILDCARD, s.position)
                } else {
                    s.text.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(kind.separator())
    };

    let path = join(SegmentKind::Path);
    let parts = UrlParts {
        scheme: join(SegmentKind::Scheme),
        authority: join(SegmentKind::NetLoc),
        path: if path.is_empty() { path } else { format!("/{}", path) },
        params: join(SegmentKind::Param),
        query: join(SegmentKind::Query),
        fragment: join(SegmentKind::Fragment),
    };
    parts.to_string()
}
