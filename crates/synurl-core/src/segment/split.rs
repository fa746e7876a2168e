//! URL string → segment sequence.

use super::{SegmentError, SegmentKind, SegmentSequence, UrlParts};

/// Tokenizes `url` into a typed, positional segment sequence.
///
/// Authority is split on `.`, path on `/`, params on `;`, query and fragment
/// on `&`. Empty tokens are dropped before positions are assigned, so the
/// scheme is always position 0.
pub fn segment(url: &str) -> Result<SegmentSequence, SegmentError> {
    let parts = UrlParts::parse(url)?;
    Ok(sequence_of(&parts))
}

pub(crate) fn sequence_of(parts: &UrlParts) -> SegmentSequence {
    let sections = [
        (SegmentKind::NetLoc, parts.authority.as_str()),
        (SegmentKind::Path, parts.path.as_str()),
        (SegmentKind::Param, parts.params.as_str()),
        (SegmentKind::Query, parts.query.as_str()),
        (SegmentKind::Fragment, parts.fragment.as_str()),
    ];
    let tokens = std::iter::once((SegmentKind::Scheme, parts.scheme.as_str())).chain(
        sections
            .into_iter()
            .flat_map(|(kind, text)| text.split(kind.separator()).map(move |t| (kind, t))),
    );
    SegmentSequence::from_tokens(tokens)
}
