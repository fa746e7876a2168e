//! JSON result written by a fetch: `{status, resources: [{url, hash, size}]}`.

use serde::{Deserialize, Serialize};

/// Status value of a successful fetch.
pub const STATUS_SUCCESS: &str = "success";
/// Status recorded when a fetch produced no usable result.
pub const STATUS_FAIL: &str = "fail";

/// One resource retrieved while loading a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub url: String,
    pub hash: String,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    pub status: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl FetchResult {
    pub fn success(resources: Vec<Resource>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            resources,
        }
    }

    pub fn failed() -> Self {
        Self {
            status: STATUS_FAIL.to_string(),
            resources: Vec::new(),
        }
    }

    /// Only the `status` field decides success.
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// First resource whose content hash equals `hash`.
    pub fn find_hash(&self, hash: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.hash == hash)
    }
}
