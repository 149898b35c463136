// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotated images and the ordered image collection.
//!
//! The collection is a pure container: selection of the "active" image and
//! the tour image belong to the surrounding session state, not here.

use super::hotspot::Hotspot;
use serde::{Deserialize, Serialize};

/// An image together with its ordered hotspot sequence.
///
/// `src` is the opaque source reference (a file path on desktop) and is
/// only ever used to re-acquire the displayable pixels; the model never
/// interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedImage {
    pub id: String,
    pub src: String,
    pub filename: String,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

impl AnnotatedImage {
    pub fn new(id: String, src: String, filename: String) -> Self {
        Self {
            id,
            src,
            filename,
            hotspots: Vec::new(),
        }
    }

    /// Replace the hotspot sequence, the only sanctioned mutation.
    pub fn with_hotspots(&self, hotspots: Vec<Hotspot>) -> Self {
        Self {
            hotspots,
            ..self.clone()
        }
    }
}

/// Ordered collection of annotated images; insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageCollection(Vec<AnnotatedImage>);

impl ImageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnotatedImage> {
        self.0.iter()
    }

    pub fn get(&self, id: &str) -> Option<&AnnotatedImage> {
        self.0.iter().find(|img| img.id == id)
    }

    pub fn first_id(&self) -> Option<&str> {
        self.0.first().map(|img| img.id.as_str())
    }

    /// Append a batch (multi-upload). Order within the batch is preserved.
    pub fn add_many(&self, batch: Vec<AnnotatedImage>) -> ImageCollection {
        let mut out = self.0.clone();
        out.extend(batch);
        ImageCollection(out)
    }

    /// Whole-record replace by id. Unknown ids leave the collection unchanged.
    pub fn update_by_id(&self, id: &str, image: AnnotatedImage) -> ImageCollection {
        ImageCollection(
            self.0
                .iter()
                .map(|img| if img.id == id { image.clone() } else { img.clone() })
                .collect(),
        )
    }

    /// Remove by id. Unknown ids leave the collection unchanged.
    pub fn remove_by_id(&self, id: &str) -> ImageCollection {
        ImageCollection(self.0.iter().filter(|img| img.id != id).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(id: &str) -> AnnotatedImage {
        AnnotatedImage::new(id.to_string(), format!("/tmp/{id}.png"), format!("{id}.png"))
    }

    #[test]
    fn test_add_many_preserves_order() {
        let coll = ImageCollection::new().add_many(vec![img("a"), img("b")]);
        let coll = coll.add_many(vec![img("c")]);
        let ids: Vec<&str> = coll.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(coll.first_id(), Some("a"));
    }

    #[test]
    fn test_update_by_id_replaces_whole_record() {
        let coll = ImageCollection::new().add_many(vec![img("a"), img("b")]);
        let replacement = img("b").with_hotspots(vec![Hotspot::new("h1".into(), 5.0, 5.0)]);
        let coll = coll.update_by_id("b", replacement);
        assert_eq!(coll.get("b").unwrap().hotspots.len(), 1);
        assert!(coll.get("a").unwrap().hotspots.is_empty());
    }

    #[test]
    fn test_update_by_id_unknown_is_noop() {
        let coll = ImageCollection::new().add_many(vec![img("a")]);
        let updated = coll.update_by_id("nope", img("nope"));
        assert_eq!(updated, coll);
    }

    #[test]
    fn test_remove_by_id() {
        let coll = ImageCollection::new().add_many(vec![img("a"), img("b")]);
        let coll = coll.remove_by_id("a");
        assert_eq!(coll.len(), 1);
        assert!(coll.get("a").is_none());
        assert_eq!(coll.remove_by_id("nope"), coll);
    }
}
