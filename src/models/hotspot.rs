// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot data structure and pure sequence operations.
//!
//! A hotspot is a commentable point marker anchored at a percentage
//! position on an image. All operations here return a new sequence instead
//! of mutating in place, so the owning image's identity change stays
//! detectable by collaborators (persistence, rendering).

use serde::{Deserialize, Serialize};

/// A commentable point marker on an image.
///
/// `x` and `y` are percentages (0..=100) of the image's intrinsic size,
/// rounded to two decimals at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub comment: String,
}

impl Hotspot {
    /// Create a hotspot with an empty comment.
    pub fn new(id: String, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            comment: String::new(),
        }
    }
}

/// Append a hotspot to the sequence.
pub fn add(seq: &[Hotspot], hotspot: Hotspot) -> Vec<Hotspot> {
    let mut out = seq.to_vec();
    out.push(hotspot);
    out
}

/// Replace the comment of the matching hotspot. Unknown ids leave the
/// sequence unchanged.
pub fn update_comment(seq: &[Hotspot], id: &str, text: &str) -> Vec<Hotspot> {
    seq.iter()
        .map(|h| {
            if h.id == id {
                Hotspot {
                    comment: text.to_string(),
                    ..h.clone()
                }
            } else {
                h.clone()
            }
        })
        .collect()
}

/// Remove the matching hotspot. Unknown ids leave the sequence unchanged.
pub fn remove(seq: &[Hotspot], id: &str) -> Vec<Hotspot> {
    seq.iter().filter(|h| h.id != id).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot(id: &str) -> Hotspot {
        Hotspot::new(id.to_string(), 10.0, 20.0)
    }

    #[test]
    fn test_add_appends_in_order() {
        let seq = add(&[], spot("a"));
        let seq = add(&seq, spot("b"));
        let seq = add(&seq, spot("c"));
        let ids: Vec<&str> = seq.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_update_comment_replaces_latest() {
        let seq = add(&add(&[], spot("a")), spot("b"));
        let seq = update_comment(&seq, "b", "first");
        let seq = update_comment(&seq, "b", "second");
        assert_eq!(seq[0].comment, "");
        assert_eq!(seq[1].comment, "second");
    }

    #[test]
    fn test_update_comment_unknown_id_is_noop() {
        let seq = add(&[], spot("a"));
        let updated = update_comment(&seq, "nope", "text");
        assert_eq!(updated, seq);
    }

    #[test]
    fn test_remove_keeps_order_of_rest() {
        let seq = add(&add(&add(&[], spot("a")), spot("b")), spot("c"));
        let seq = remove(&seq, "b");
        let ids: Vec<&str> = seq.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let seq = add(&[], spot("a"));
        let removed = remove(&seq, "nope");
        assert_eq!(removed, seq);
    }

    #[test]
    fn test_operations_do_not_mutate_input() {
        let seq = add(&[], spot("a"));
        let _ = update_comment(&seq, "a", "changed");
        let _ = remove(&seq, "a");
        assert_eq!(seq[0].comment, "");
        assert_eq!(seq.len(), 1);
    }
}
