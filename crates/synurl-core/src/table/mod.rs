//! Similarity table: incremental first-fit clustering of URLs.
//!
//! Each cluster is a [`Template`]: one slot per position, literal where every
//! member agreed and wildcarded where they differed, with the observed texts
//! kept as variants. A new URL joins the first template it is similar enough
//! to, otherwise it starts a new one. There is no re-clustering.

mod render;

pub use render::render_table;

use crate::segment::{
    self, reconstruct, Segment, SegmentError, SegmentKind, SegmentSequence, WILDCARD,
};
use crate::similarity::{similar_with, KindCheck};

/// Text of one template slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotText {
    Literal(String),
    Wildcard,
}

impl SlotText {
    pub fn as_str(&self) -> &str {
        match self {
            SlotText::Literal(text) => text,
            SlotText::Wildcard => WILDCARD,
        }
    }
}

/// One position of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub position: usize,
    pub text: SlotText,
    pub kind: SegmentKind,
    /// Distinct texts seen at this position, in first-seen order. Empty while literal.
    pub variants: Vec<String>,
}

impl Slot {
    pub fn is_wildcard(&self) -> bool {
        self.text == SlotText::Wildcard
    }

    fn absorb(&mut self, incoming: &str) {
        match &self.text {
            SlotText::Wildcard => {
                if !self.variants.iter().any(|v| v == incoming) {
                    self.variants.push(incoming.to_string());
                }
            }
            SlotText::Literal(old) if old != incoming => {
                self.variants = vec![old.clone(), incoming.to_string()];
                self.text = SlotText::Wildcard;
            }
            SlotText::Literal(_) => {}
        }
    }
}

/// A generalized URL standing for a cluster of similar URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    slots: Vec<Slot>,
    members: usize,
}

impl Template {
    fn from_sequence(seq: &SegmentSequence) -> Self {
        let slots = seq
            .iter()
            .map(|s| Slot {
                position: s.position,
                text: SlotText::Literal(s.text.clone()),
                kind: s.kind,
                variants: Vec::new(),
            })
            .collect();
        Self { slots, members: 1 }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of URLs inserted into this template (duplicates included).
    pub fn members(&self) -> usize {
        self.members
    }

    pub fn is_generalized(&self) -> bool {
        self.slots.iter().any(Slot::is_wildcard)
    }

    /// The template as a segment sequence: literal text, or the wildcard
    /// marker for generalized slots.
    pub fn view(&self) -> SegmentSequence {
        SegmentSequence::from_segments(
            self.slots
                .iter()
                .map(|s| Segment::new(s.position, s.text.as_str(), s.kind))
                .collect(),
        )
    }

    /// Human-readable URL for the template; wildcards show their position.
    pub fn representative(&self) -> String {
        reconstruct(&self.view())
    }

    /// `(position, variants)` for every wildcarded slot.
    pub fn variants(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.slots
            .iter()
            .filter(|s| s.is_wildcard())
            .map(|s| (s.position, s.variants.as_slice()))
    }

    fn accepts(&self, seq: &SegmentSequence, threshold: f64) -> bool {
        similar_with(&self.view(), seq, threshold, KindCheck::Ignore)
    }

    fn absorb(&mut self, seq: &SegmentSequence) {
        debug_assert_eq!(self.slots.len(), seq.len());
        for (slot, seg) in self.slots.iter_mut().zip(seq) {
            slot.absorb(&seg.text);
        }
        self.members += 1;
    }
}

/// Ordered list of templates; insertion order is first-seen order.
#[derive(Debug, Clone, Default)]
pub struct SimilarityTable {
    templates: Vec<Template>,
}

impl SimilarityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table by inserting every URL in order.
    pub fn from_urls<I, S>(urls: I, threshold: f64) -> Result<Self, SegmentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for url in urls {
            table.insert(url.as_ref(), threshold)?;
        }
        Ok(table)
    }

    /// Segments `url` and files it under the first similar template.
    pub fn insert(&mut self, url: &str, threshold: f64) -> Result<(), SegmentError> {
        let seq = segment::segment(url)?;
        self.insert_sequence(&seq, threshold);
        Ok(())
    }

    pub fn insert_sequence(&mut self, seq: &SegmentSequence, threshold: f64) {
        match self
            .templates
            .iter()
            .position(|t| t.accepts(seq, threshold))
        {
            Some(index) => {
                tracing::trace!(template = index, "url joins existing template");
                self.templates[index].absorb(seq);
            }
            None => self.templates.push(Template::from_sequence(seq)),
        }
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
