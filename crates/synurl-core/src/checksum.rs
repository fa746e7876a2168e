//! Content hashing (SHA-256, lowercase hex) for fetched bodies.

use sha2::{Digest, Sha256};

/// Incremental SHA-256 over a response body, counting bytes as it goes.
#[derive(Default)]
pub struct ContentHasher {
    hasher: Sha256,
    size: u64,
}

impl ContentHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.size += data.len() as u64;
    }

    /// Returns `(hex digest, bytes hashed)`.
    pub fn finish(self) -> (String, u64) {
        (hex::encode(self.hasher.finalize()), self.size)
    }
}

/// SHA-256 of `data` as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn chunked_matches_one_shot() {
        let mut hasher = ContentHasher::new();
        hasher.update(b"hel");
        hasher.update(b"lo\n");
        let (digest, size) = hasher.finish();
        assert_eq!(size, 6);
        assert_eq!(
            digest,
            "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
        );
        assert_eq!(digest, sha256_hex(b"hello\n"));
    }
}
