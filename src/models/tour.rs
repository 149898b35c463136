// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tour state machine.
//!
//! A tour walks one image's hotspots in insertion order. The machine only
//! tracks the current step; it reads the hotspot sequence but never mutates
//! it. Sessions are ephemeral and never persisted.
//!
//! External mutations can shrink the hotspot sequence underneath an active
//! session. The recovery policy is clamp-on-read: `reconcile` clamps the
//! step to the new last valid index, and exits when the sequence becomes
//! empty.

/// Guided playback state: either no tour, or a position within one image's
/// hotspot sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TourState {
    #[default]
    Inactive,
    Active { image_id: String, step: usize },
}

impl TourState {
    /// Begin a tour at step 0. Rejected (stays `Inactive`) when the target
    /// image has no hotspots.
    pub fn start(&mut self, image_id: &str, hotspot_count: usize) -> bool {
        if hotspot_count == 0 {
            log::info!("Tour start rejected: image {image_id} has no hotspots");
            return false;
        }
        *self = TourState::Active {
            image_id: image_id.to_string(),
            step: 0,
        };
        true
    }

    /// Advance one step; no-op at the last step (no wraparound).
    pub fn next(&mut self, hotspot_count: usize) {
        if let TourState::Active { step, .. } = self {
            let last = hotspot_count.saturating_sub(1);
            *step = (*step + 1).min(last);
        }
    }

    /// Step back; no-op at step 0.
    pub fn prev(&mut self) {
        if let TourState::Active { step, .. } = self {
            *step = step.saturating_sub(1);
        }
    }

    /// End the tour unconditionally.
    pub fn exit(&mut self) {
        *self = TourState::Inactive;
    }

    /// The active image selection changed; any session state pending for the
    /// previous image no longer applies.
    pub fn image_changed(&mut self) {
        *self = TourState::Inactive;
    }

    /// Re-validate the step against the current hotspot count of the toured
    /// image: clamp into range, and force exit when the sequence is empty.
    pub fn reconcile(&mut self, hotspot_count: usize) {
        if let TourState::Active { step, image_id } = self {
            if hotspot_count == 0 {
                log::info!("Tour on {image_id} ended: hotspot sequence became empty");
                *self = TourState::Inactive;
            } else if *step > hotspot_count - 1 {
                *step = hotspot_count - 1;
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, TourState::Active { .. })
    }

    pub fn is_active_for(&self, id: &str) -> bool {
        matches!(self, TourState::Active { image_id, .. } if image_id == id)
    }

    /// Current step when a tour is running on `id`.
    pub fn step_for(&self, id: &str) -> Option<usize> {
        match self {
            TourState::Active { image_id, step } if image_id == id => Some(*step),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_rejected_on_empty_sequence() {
        let mut tour = TourState::default();
        assert!(!tour.start("img-a", 0));
        assert_eq!(tour, TourState::Inactive);
    }

    #[test]
    fn test_navigation_is_clamped() {
        // Image with two hotspots: next past the end and prev past the
        // start both stay put.
        let mut tour = TourState::default();
        assert!(tour.start("img-a", 2));
        assert_eq!(tour.step_for("img-a"), Some(0));

        tour.next(2);
        assert_eq!(tour.step_for("img-a"), Some(1));
        tour.next(2);
        assert_eq!(tour.step_for("img-a"), Some(1));

        tour.prev();
        assert_eq!(tour.step_for("img-a"), Some(0));
        tour.prev();
        assert_eq!(tour.step_for("img-a"), Some(0));
    }

    #[test]
    fn test_exit_is_unconditional() {
        let mut tour = TourState::default();
        tour.start("img-a", 3);
        tour.exit();
        assert_eq!(tour, TourState::Inactive);

        // Exiting while inactive stays inactive
        tour.exit();
        assert_eq!(tour, TourState::Inactive);
    }

    #[test]
    fn test_reconcile_clamps_after_shrink() {
        let mut tour = TourState::default();
        tour.start("img-a", 3);
        tour.next(3);
        tour.next(3);
        assert_eq!(tour.step_for("img-a"), Some(2));

        tour.reconcile(2);
        assert_eq!(tour.step_for("img-a"), Some(1));
    }

    #[test]
    fn test_reconcile_exits_when_sequence_empties() {
        let mut tour = TourState::default();
        tour.start("img-a", 1);
        tour.reconcile(0);
        assert_eq!(tour, TourState::Inactive);
    }

    #[test]
    fn test_image_changed_discards_session() {
        let mut tour = TourState::default();
        tour.start("img-a", 2);
        tour.image_changed();
        assert_eq!(tour, TourState::Inactive);
    }

    #[test]
    fn test_step_for_other_image_is_none() {
        let mut tour = TourState::default();
        tour.start("img-a", 2);
        assert_eq!(tour.step_for("img-b"), None);
        assert!(tour.is_active_for("img-a"));
        assert!(!tour.is_active_for("img-b"));
    }
}
