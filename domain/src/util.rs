//! Shared utility functions.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
///
/// Returns a sub-slice of the original string. If the string is shorter than
/// `max_bytes`, the entire string is returned unchanged.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Process-local 64-bit hash, used for memo keys.
pub fn content_hash(value: &impl Hash) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_str("hello world", 5), "hello");
    }

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_str("hi", 10), "hi");
    }

    #[test]
    fn truncate_multibyte_boundary() {
        // 'é' is 2 bytes; cutting inside it backs up to the previous boundary
        let s = "autonomie éco";
        assert_eq!(truncate_str(s, 11), "autonomie ");
    }

    #[test]
    fn content_hash_is_stable_within_process() {
        assert_eq!(content_hash(&"bonjour"), content_hash(&"bonjour"));
        assert_ne!(content_hash(&"bonjour"), content_hash(&"bonsoir"));
    }
}
