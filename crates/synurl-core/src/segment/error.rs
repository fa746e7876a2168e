//! Segmentation errors.

/// A URL that cannot be decomposed into the six standard parts.
#[derive(Debug, thiserror::Error)]
pub enum SegmentError {
    #[error("malformed URL {url:?}: {reason}")]
    Malformed { url: String, reason: String },
}

impl SegmentError {
    pub(crate) fn malformed(url: &str, reason: impl ToString) -> Self {
        SegmentError::Malformed {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
