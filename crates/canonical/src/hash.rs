//! Content fingerprints for exact-text lookup.
//!
//! A fingerprint is the SHA-256 digest of a document's normalized content,
//! hex encoded. It is a cache key, not a security boundary: two documents
//! with the same normalized text always share a fingerprint, and collisions
//! are treated as impossible at license-corpus scale.
//!
//! Lookup tables keyed by SHA-1 digests of normalized text do not
//! interoperate with these fingerprints; rebuild such keys with
//! [`hash_text`].
//!
//! ```text
//! SHA-256(normalized_content_bytes) -> 64 lowercase hex chars
//! ```
//!
//! # Examples
//!
//! ```rust
//! use canonical::hash_text;
//!
//! let hash = hash_text("permission is hereby granted");
//! assert_eq!(hash.len(), 64);
//! assert_eq!(hash, hash_text("permission is hereby granted"));
//! assert_ne!(hash, hash_text("permission is hereby granted."));
//! ```

use sha2::{Digest, Sha256};

/// Hash text with SHA-256 and return a lowercase hex digest.
pub fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Returns `true` if `candidate` has the shape of a [`hash_text`] digest.
pub fn is_fingerprint(candidate: &str) -> bool {
    candidate.len() == 64
        && candidate
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_known_digest() {
        assert_eq!(
            hash_text(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn digests_are_fingerprints() {
        assert!(is_fingerprint(&hash_text("mit")));
        assert!(!is_fingerprint("not-a-digest"));
        assert!(!is_fingerprint(&hash_text("mit").to_uppercase()));
    }
}
