// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Opaque identifier generation for images and hotspots.
//!
//! Identifiers are a caller-supplied prefix plus a random alphanumeric
//! suffix. Collisions are negligible at the dataset sizes this tool handles;
//! no cryptographic uniqueness is claimed.

use rand::Rng;

const SUFFIX_LEN: usize = 9;
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate an identifier like `img-x3k09qf2m`.
pub fn generate(prefix: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{prefix}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_has_prefix_and_suffix() {
        let id = generate("img");
        assert!(id.starts_with("img-"));
        assert_eq!(id.len(), "img-".len() + SUFFIX_LEN);
        assert!(id["img-".len()..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_is_practically_unique() {
        let ids: std::collections::HashSet<String> = (0..1000).map(|_| generate("spot")).collect();
        assert_eq!(ids.len(), 1000);
    }
}
