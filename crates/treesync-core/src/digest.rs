//! The digest function underlying every hash in this crate.
//!
//! MD5 is used here for speed and for compatibility with existing clients
//! that already understand 32-character hex digests — not for collision
//! resistance against an adversary. Nothing in this crate treats a digest
//! as a MAC; see the crate-level docs for the full threat model.

use md5::{Digest as _, Md5};

/// Returned for "nothing was hashed" — distinguishable from a real digest
/// by length alone (1 byte vs. 32).
pub const DEFAULT_DIGEST: &str = "0";

/// Hashes `bytes` into a 32-character lowercase hex digest.
///
/// Empty input returns [`DEFAULT_DIGEST`] rather than the MD5 of the empty
/// string, so that "no content" stays distinguishable from a real digest.
pub fn digest(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return DEFAULT_DIGEST.to_owned();
    }
    let mut hasher = Md5::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// `true` if `s` is either [`DEFAULT_DIGEST`] or a well-formed 32-char hex digest.
pub fn is_valid_digest(s: &str) -> bool {
    s == DEFAULT_DIGEST || (s.len() == 32 && s.chars().all(|c| c.is_ascii_hexdigit()))
}
