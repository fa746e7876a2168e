//! Synonym URL sets and their reduction.
//!
//! A synonym set groups the distinct URLs that, across all trials, fetched a
//! resource with the same content hash. Reduction distills the set into a few
//! generalized URLs meant to stand in for every member.

mod reduce;

pub use reduce::{intersect, reduce, reduce_sequences};

use std::collections::BTreeMap;

use crate::segment::SegmentError;

/// Distinct URLs that share one content hash, with occurrence counts.
///
/// Members iterate in sorted URL order; reduction and the sanity check rely
/// on that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymSet {
    pub hash: String,
    pub members: BTreeMap<String, usize>,
}

impl SynonymSet {
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            members: BTreeMap::new(),
        }
    }

    /// Builds a set from URLs, counting repeats.
    pub fn from_urls<I, S>(hash: impl Into<String>, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new(hash);
        for url in urls {
            set.add(url);
        }
        set
    }

    pub fn add(&mut self, url: impl Into<String>) {
        *self.members.entry(url.into()).or_insert(0) += 1;
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// First member in sorted order; used for the sanity fetch.
    pub fn first_url(&self) -> Option<&str> {
        self.urls().next()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Only hashes seen under more than one distinct URL are synonym sets.
    pub fn is_synonym(&self) -> bool {
        self.members.len() > 1
    }
}

/// A synonym set together with its reduced URLs.
#[derive(Debug, Clone)]
pub struct ReducedSet {
    pub set: SynonymSet,
    pub reduced: Vec<String>,
}

/// Reduces every set at `threshold`.
pub fn reduce_all(sets: Vec<SynonymSet>, threshold: f64) -> Result<Vec<ReducedSet>, SegmentError> {
    sets.into_iter()
        .map(|set| {
            let reduced = reduce(&set, threshold)?;
            tracing::debug!(
                hash = %set.hash,
                members = set.len(),
                reduced = reduced.len(),
                "reduced synonym set"
            );
            Ok(ReducedSet { set, reduced })
        })
        .collect()
}
