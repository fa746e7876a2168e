//! URL segmentation.
//!
//! A URL is decomposed into the six standard parts (scheme, authority, path,
//! params, query, fragment) and each part is split on its own separator into
//! typed, positional segments. The resulting [`SegmentSequence`] is what the
//! similarity scorer, the similarity table and the synonym reducer work on.

mod error;
mod parts;
mod rebuild;
mod split;

use std::ops::Range;

pub use error::SegmentError;
pub use parts::UrlParts;
pub use rebuild::reconstruct;
pub use split::segment;

/// Text stored in generalized positions of a template.
pub const WILDCARD: &str = "##!!##";

/// Structural origin of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SegmentKind {
    Scheme,
    NetLoc,
    Path,
    Param,
    Query,
    Fragment,
}

impl SegmentKind {
    /// All kinds in the order their parts appear in a URL.
    pub const ALL: [SegmentKind; 6] = [
        SegmentKind::Scheme,
        SegmentKind::NetLoc,
        SegmentKind::Path,
        SegmentKind::Param,
        SegmentKind::Query,
        SegmentKind::Fragment,
    ];

    /// Separator used to split (and re-join) this part.
    pub fn separator(self) -> &'static str {
        match self {
            SegmentKind::Scheme => "",
            SegmentKind::NetLoc => ".",
            SegmentKind::Path => "/",
            SegmentKind::Param => ";",
            SegmentKind::Query | SegmentKind::Fragment => "&",
        }
    }

    /// Weight of one position of this kind in similarity scoring.
    pub fn weight(self) -> u32 {
        match self {
            SegmentKind::NetLoc => 2,
            _ => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Scheme => "scheme",
            SegmentKind::NetLoc => "netloc",
            SegmentKind::Path => "path",
            SegmentKind::Param => "param",
            SegmentKind::Query => "query",
            SegmentKind::Fragment => "fragment",
        }
    }

    fn index(self) -> usize {
        match self {
            SegmentKind::Scheme => 0,
            SegmentKind::NetLoc => 1,
            SegmentKind::Path => 2,
            SegmentKind::Param => 3,
            SegmentKind::Query => 4,
            SegmentKind::Fragment => 5,
        }
    }
}

/// One typed token of a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    /// 0-based index within the whole sequence.
    pub position: usize,
    pub text: String,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn new(position: usize, text: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            position,
            text: text.into(),
            kind,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.text == WILDCARD
    }

    /// Text before the first `=` (the whole text if there is none).
    pub fn param_key(&self) -> &str {
        self.text
            .split_once('=')
            .map(|(key, _)| key)
            .unwrap_or(&self.text)
    }
}

/// Ordered segments of one URL, always in part order
/// (scheme, netloc, path, params, query, fragment).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SegmentSequence {
    segments: Vec<Segment>,
}

impl SegmentSequence {
    /// Builds a sequence from `(kind, text)` tokens, dropping empty texts and
    /// numbering the survivors 0..N-1.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = (SegmentKind, S)>,
        S: Into<String>,
    {
        let segments = tokens
            .into_iter()
            .map(|(kind, text)| (kind, text.into()))
            .filter(|(_, text)| !text.is_empty())
            .enumerate()
            .map(|(position, (kind, text))| Segment::new(position, text, kind))
            .collect();
        Self { segments }
    }

    /// Wraps already-numbered segments without renumbering them.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.text.as_str())
    }

    /// Drops empty-text segments and renumbers what is left.
    pub fn compact(&self) -> SegmentSequence {
        SegmentSequence::from_tokens(self.segments.iter().map(|s| (s.kind, s.text.clone())))
    }

    pub fn boundaries(&self) -> PartBoundaries {
        PartBoundaries::of(self)
    }
}

impl<'a> IntoIterator for &'a SegmentSequence {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Index range of each URL part inside a [`SegmentSequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartBoundaries {
    ranges: [Range<usize>; 6],
}

impl PartBoundaries {
    fn of(seq: &SegmentSequence) -> Self {
        let mut counts = [0usize; 6];
        for seg in seq {
            counts[seg.kind.index()] += 1;
        }
        let mut start = 0;
        let ranges = counts.map(|count| {
            let range = start..start + count;
            start += count;
            range
        });
        Self { ranges }
    }

    pub fn range(&self, kind: SegmentKind) -> Range<usize> {
        self.ranges[kind.index()].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tokens_drops_empty_and_numbers() {
        let seq = SegmentSequence::from_tokens([
            (SegmentKind::Scheme, "http"),
            (SegmentKind::NetLoc, ""),
            (SegmentKind::NetLoc, "x"),
            (SegmentKind::Path, "a"),
        ]);
        let positions: Vec<usize> = seq.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(seq.texts().collect::<Vec<_>>(), vec!["http", "x", "a"]);
    }

    #[test]
    fn param_key_splits_on_first_equals() {
        let seg = Segment::new(0, "id=1=2", SegmentKind::Param);
        assert_eq!(seg.param_key(), "id");
        let bare = Segment::new(0, "flag", SegmentKind::Param);
        assert_eq!(bare.param_key(), "flag");
    }

    #[test]
    fn boundaries_follow_part_order() {
        let seq = SegmentSequence::from_tokens([
            (SegmentKind::Scheme, "http"),
            (SegmentKind::NetLoc, "x"),
            (SegmentKind::NetLoc, "com"),
            (SegmentKind::Query, "a=1"),
        ]);
        let b = seq.boundaries();
        assert_eq!(b.range(SegmentKind::Scheme), 0..1);
        assert_eq!(b.range(SegmentKind::NetLoc), 1..3);
        assert_eq!(b.range(SegmentKind::Path), 3..3);
        assert_eq!(b.range(SegmentKind::Query), 3..4);
        assert_eq!(b.range(SegmentKind::Fragment), 4..4);
    }

    #[test]
    fn compact_renumbers() {
        let seq = SegmentSequence::from_segments(vec![
            Segment::new(0, "http", SegmentKind::Scheme),
            Segment::new(1, "", SegmentKind::NetLoc),
            Segment::new(2, "com", SegmentKind::NetLoc),
        ]);
        let compact = seq.compact();
        assert_eq!(compact.len(), 2);
        assert_eq!(compact.get(1).map(|s| s.position), Some(1));
    }
}
