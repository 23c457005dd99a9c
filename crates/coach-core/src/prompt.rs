//! System preamble and prompt fingerprinting.

use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Fixed system preamble sent ahead of every chat transcript.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Arixa, an AI fitness trainer.";

/// Short, stable SHA-256 fingerprint of a prompt, for logs.
///
/// Only the first 12 hex characters are kept.
pub fn prompt_fingerprint(prompt: &str) -> String {
    let digest = Sha256::digest(prompt.as_bytes());
    let mut hex = String::with_capacity(12);
    for byte in digest.iter().take(6) {
        let _ = write!(hex, "{:02x}", byte);
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_stable_and_short() {
        let first = prompt_fingerprint(DEFAULT_SYSTEM_PROMPT);
        let second = prompt_fingerprint(DEFAULT_SYSTEM_PROMPT);

        assert_eq!(first, second);
        assert_eq!(first.len(), 12);
        assert_ne!(first, prompt_fingerprint("You are a pirate."));
    }
}
