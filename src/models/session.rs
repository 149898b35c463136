// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application-level session state and the core mutation operations.
//!
//! Everything the UI can change goes through one of these operations, each
//! synchronous and applied in response to a single interaction event. The
//! "active image" and "selected hotspot" live here explicitly instead of
//! being ambient rendering state, so the rules tying them to the collection
//! (clearing on delete, the tour placement lock) are enforced in one place.
//!
//! Every operation returns whether state actually changed; the caller uses
//! that to fire a persistence save.

use super::hotspot::{self, Hotspot};
use super::image::{AnnotatedImage, ImageCollection};
use super::tour::TourState;
use crate::util::geometry::PercentPos;
use crate::util::ident;

/// Complete in-memory session state. The image collection is the persisted
/// part; selection and tour state are ephemeral.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub images: ImageCollection,
    pub active_image: Option<String>,
    pub selected_hotspot: Option<String>,
    pub tour: TourState,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active image, if any.
    pub fn active(&self) -> Option<&AnnotatedImage> {
        self.active_image.as_deref().and_then(|id| self.images.get(id))
    }

    /// Merge an acquisition batch into the collection. The first image added
    /// to a previously empty collection becomes the active one.
    pub fn add_images(&mut self, batch: Vec<AnnotatedImage>) -> bool {
        if batch.is_empty() {
            return false;
        }
        let was_empty = self.images.is_empty();
        self.images = self.images.add_many(batch);
        if was_empty {
            self.active_image = self.images.first_id().map(String::from);
        }
        log::info!("Collection now holds {} image(s)", self.images.len());
        true
    }

    /// Switch the active image. Unknown ids and re-selecting the current
    /// image are no-ops. Switching clears the hotspot selection and discards
    /// any tour session.
    pub fn set_active_image(&mut self, id: &str) -> bool {
        if self.images.get(id).is_none() || self.active_image.as_deref() == Some(id) {
            return false;
        }
        self.active_image = Some(id.to_string());
        self.selected_hotspot = None;
        self.tour.image_changed();
        true
    }

    /// Delete an image. Clears the active selection and exits the tour if
    /// they referenced it.
    pub fn delete_image(&mut self, id: &str) -> bool {
        if self.images.get(id).is_none() {
            return false;
        }
        self.images = self.images.remove_by_id(id);
        if self.active_image.as_deref() == Some(id) {
            self.active_image = None;
            self.selected_hotspot = None;
        }
        if self.tour.is_active_for(id) {
            self.tour.exit();
        }
        log::info!("Deleted image {id}, {} remaining", self.images.len());
        true
    }

    /// Place a new hotspot on the active image. Rejected while a tour is
    /// running on that image. The new hotspot becomes the selected one so
    /// the comment editor opens on it.
    pub fn place_hotspot(&mut self, pos: PercentPos) -> bool {
        let Some(image) = self.active() else {
            return false;
        };
        if self.tour.is_active_for(&image.id) {
            log::info!("Placement ignored: tour active on {}", image.id);
            return false;
        }

        let spot = Hotspot::new(ident::generate("spot"), pos.x, pos.y);
        let spot_id = spot.id.clone();
        let updated = image.with_hotspots(hotspot::add(&image.hotspots, spot));
        let image_id = updated.id.clone();

        self.images = self.images.update_by_id(&image_id, updated);
        self.selected_hotspot = Some(spot_id);
        log::info!("Placed hotspot at ({:.2}, {:.2}) on {image_id}", pos.x, pos.y);
        true
    }

    /// Replace a hotspot's comment on the active image. Unknown ids are
    /// idempotent no-ops.
    pub fn edit_comment(&mut self, hotspot_id: &str, text: &str) -> bool {
        let Some(image) = self.active() else {
            return false;
        };
        let updated = hotspot::update_comment(&image.hotspots, hotspot_id, text);
        if updated == image.hotspots {
            return false;
        }
        let updated_image = image.with_hotspots(updated);
        let image_id = updated_image.id.clone();
        self.images = self.images.update_by_id(&image_id, updated_image);
        true
    }

    /// Remove a hotspot from the active image. Clears a matching selection
    /// and re-validates any tour running on that image (which may end it).
    pub fn delete_hotspot(&mut self, hotspot_id: &str) -> bool {
        let Some(image) = self.active() else {
            return false;
        };
        let updated = hotspot::remove(&image.hotspots, hotspot_id);
        if updated.len() == image.hotspots.len() {
            return false;
        }
        let updated_image = image.with_hotspots(updated);
        let image_id = updated_image.id.clone();
        let remaining = updated_image.hotspots.len();

        self.images = self.images.update_by_id(&image_id, updated_image);
        if self.selected_hotspot.as_deref() == Some(hotspot_id) {
            self.selected_hotspot = None;
        }
        if self.tour.is_active_for(&image_id) {
            self.tour.reconcile(remaining);
        }
        log::info!("Deleted hotspot {hotspot_id} from {image_id}");
        true
    }

    /// Start a tour over an image's hotspots. Rejected when the image does
    /// not exist or has no hotspots. Starting also clears the hotspot
    /// selection so no editor overlays the playback.
    pub fn start_tour(&mut self, image_id: &str) -> bool {
        let Some(image) = self.images.get(image_id) else {
            return false;
        };
        let count = image.hotspots.len();
        if self.tour.start(image_id, count) {
            self.active_image = Some(image_id.to_string());
            self.selected_hotspot = None;
            log::info!("Tour started on {image_id} ({count} stops)");
            true
        } else {
            false
        }
    }

    pub fn tour_next(&mut self) {
        if let Some(count) = self.toured_count() {
            self.tour.next(count);
        }
    }

    pub fn tour_prev(&mut self) {
        self.tour.prev();
    }

    pub fn exit_tour(&mut self) {
        self.tour.exit();
    }

    /// Clamp-on-read hook: re-validate the tour against the current hotspot
    /// sequence. Called once per frame before the tour state is rendered,
    /// and after any mutation that can shrink the sequence.
    pub fn reconcile_tour(&mut self) {
        match self.toured_count() {
            Some(count) => self.tour.reconcile(count),
            // Toured image no longer exists
            None if self.tour.is_active() => self.tour.exit(),
            None => {}
        }
    }

    fn toured_count(&self) -> Option<usize> {
        match &self.tour {
            TourState::Active { image_id, .. } => {
                self.images.get(image_id).map(|img| img.hotspots.len())
            }
            TourState::Inactive => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(id: &str) -> AnnotatedImage {
        AnnotatedImage::new(id.to_string(), format!("/tmp/{id}.png"), format!("{id}.png"))
    }

    fn pos(x: f64, y: f64) -> PercentPos {
        PercentPos { x, y }
    }

    fn session_with(images: Vec<AnnotatedImage>) -> SessionState {
        let mut s = SessionState::new();
        s.add_images(images);
        s
    }

    #[test]
    fn test_first_image_into_empty_collection_becomes_active() {
        let mut s = SessionState::new();
        assert!(s.add_images(vec![img("a"), img("b")]));
        assert_eq!(s.active_image.as_deref(), Some("a"));

        // Later batches do not steal activation
        s.add_images(vec![img("c")]);
        assert_eq!(s.active_image.as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let mut s = SessionState::new();
        assert!(!s.add_images(vec![]));
        assert!(s.images.is_empty());
    }

    #[test]
    fn test_placement_selects_new_hotspot() {
        let mut s = session_with(vec![img("a")]);
        assert!(s.place_hotspot(pos(10.0, 20.0)));

        let spots = &s.images.get("a").unwrap().hotspots;
        assert_eq!(spots.len(), 1);
        assert_eq!(spots[0].x, 10.0);
        assert_eq!(s.selected_hotspot.as_deref(), Some(spots[0].id.as_str()));
    }

    #[test]
    fn test_placement_blocked_during_tour_on_that_image() {
        let mut s = session_with(vec![img("a")]);
        s.place_hotspot(pos(10.0, 10.0));
        assert!(s.start_tour("a"));

        assert!(!s.place_hotspot(pos(50.0, 50.0)));
        assert_eq!(s.images.get("a").unwrap().hotspots.len(), 1);

        // Placement works again once the tour ends
        s.exit_tour();
        assert!(s.place_hotspot(pos(50.0, 50.0)));
        assert_eq!(s.images.get("a").unwrap().hotspots.len(), 2);
    }

    #[test]
    fn test_edit_comment_is_idempotent_for_unknown_id() {
        let mut s = session_with(vec![img("a")]);
        s.place_hotspot(pos(10.0, 10.0));
        assert!(!s.edit_comment("nope", "text"));

        let id = s.images.get("a").unwrap().hotspots[0].id.clone();
        assert!(s.edit_comment(&id, "landmark"));
        assert_eq!(s.images.get("a").unwrap().hotspots[0].comment, "landmark");
        // Same text again: no change, no save
        assert!(!s.edit_comment(&id, "landmark"));
    }

    #[test]
    fn test_delete_hotspot_clears_selection() {
        let mut s = session_with(vec![img("a")]);
        s.place_hotspot(pos(10.0, 10.0));
        let id = s.selected_hotspot.clone().unwrap();

        assert!(s.delete_hotspot(&id));
        assert_eq!(s.selected_hotspot, None);
        assert!(s.images.get("a").unwrap().hotspots.is_empty());
    }

    #[test]
    fn test_deleting_only_toured_hotspot_exits_tour() {
        let mut s = session_with(vec![img("a")]);
        s.place_hotspot(pos(10.0, 10.0));
        let id = s.images.get("a").unwrap().hotspots[0].id.clone();
        s.start_tour("a");

        s.delete_hotspot(&id);
        assert_eq!(s.tour, TourState::Inactive);
    }

    #[test]
    fn test_tour_step_clamped_after_deletion() {
        let mut s = session_with(vec![img("a")]);
        s.place_hotspot(pos(10.0, 10.0));
        s.place_hotspot(pos(20.0, 20.0));
        s.place_hotspot(pos(30.0, 30.0));
        let last = s.images.get("a").unwrap().hotspots[2].id.clone();

        s.start_tour("a");
        s.tour_next();
        s.tour_next();
        assert_eq!(s.tour.step_for("a"), Some(2));

        s.delete_hotspot(&last);
        assert_eq!(s.tour.step_for("a"), Some(1));
    }

    #[test]
    fn test_tour_navigation_scenario() {
        // Image with hotspots at (10,10) "a" and (90,90) "b"
        let mut s = session_with(vec![img("a")]);
        s.place_hotspot(pos(10.0, 10.0));
        s.place_hotspot(pos(90.0, 90.0));

        assert!(s.start_tour("a"));
        assert_eq!(s.tour.step_for("a"), Some(0));
        s.tour_next();
        assert_eq!(s.tour.step_for("a"), Some(1));
        s.tour_next();
        assert_eq!(s.tour.step_for("a"), Some(1));
        s.tour_prev();
        s.tour_prev();
        assert_eq!(s.tour.step_for("a"), Some(0));
    }

    #[test]
    fn test_start_tour_rejected_without_hotspots() {
        let mut s = session_with(vec![img("a")]);
        assert!(!s.start_tour("a"));
        assert_eq!(s.tour, TourState::Inactive);
        assert!(!s.start_tour("missing"));
    }

    #[test]
    fn test_delete_active_image_clears_activation_and_tour() {
        let mut s = session_with(vec![img("a"), img("b")]);
        s.place_hotspot(pos(10.0, 10.0));
        s.start_tour("a");

        assert!(s.delete_image("a"));
        assert_eq!(s.active_image, None);
        assert_eq!(s.selected_hotspot, None);
        assert_eq!(s.tour, TourState::Inactive);
        assert_eq!(s.images.len(), 1);
    }

    #[test]
    fn test_switching_active_image_discards_tour_and_selection() {
        let mut s = session_with(vec![img("a"), img("b")]);
        s.place_hotspot(pos(10.0, 10.0));
        s.start_tour("a");

        assert!(s.set_active_image("b"));
        assert_eq!(s.tour, TourState::Inactive);
        assert_eq!(s.selected_hotspot, None);

        // Unknown id and re-selection are no-ops
        assert!(!s.set_active_image("missing"));
        assert!(!s.set_active_image("b"));
    }

    #[test]
    fn test_reconcile_exits_when_toured_image_vanishes() {
        let mut s = session_with(vec![img("a")]);
        s.place_hotspot(pos(10.0, 10.0));
        s.start_tour("a");

        // Bypass delete_image to simulate an external collection swap
        s.images = ImageCollection::new();
        s.reconcile_tour();
        assert_eq!(s.tour, TourState::Inactive);
    }
}
