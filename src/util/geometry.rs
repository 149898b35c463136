// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Coordinate mapping between viewport pixels and percentage positions.
//!
//! Hotspot positions are stored as percentages of the rendered image's
//! intrinsic size, so they survive window resizes and zoom-to-fit changes.
//! The mapper is stateless: callers pass in the current bounding box of the
//! rendered image element and re-invoke after every resize.

/// Viewport-space rectangle of the rendered image element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// A box with a zero or non-finite extent cannot anchor any position.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// A position expressed as percentages (0..=100) of the image extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentPos {
    pub x: f64,
    pub y: f64,
}

/// Round to two decimal places, the precision hotspots are stored at.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert a pointer position to a percentage position within `bbox`.
///
/// Returns `None` when the box is degenerate (image not rendered yet, or
/// collapsed by layout); the interaction is silently skipped in that case.
/// Output components are rounded to two decimals and clamped to [0, 100].
pub fn to_percent(pointer_x: f32, pointer_y: f32, bbox: &BoundingBox) -> Option<PercentPos> {
    if bbox.is_degenerate() {
        return None;
    }

    let x = (pointer_x - bbox.left) as f64 / bbox.width as f64 * 100.0;
    let y = (pointer_y - bbox.top) as f64 / bbox.height as f64 * 100.0;

    Some(PercentPos {
        x: round2(x).clamp(0.0, 100.0),
        y: round2(y).clamp(0.0, 100.0),
    })
}

/// Convert a percentage position back to viewport pixels within `bbox`.
///
/// Used to place markers and anchor the comment overlay. Must be re-invoked
/// with a fresh bounding box whenever the layout changes.
pub fn to_pixels(percent_x: f64, percent_y: f64, bbox: &BoundingBox) -> (f32, f32) {
    (
        (percent_x / 100.0 * bbox.width as f64) as f32 + bbox.left,
        (percent_y / 100.0 * bbox.height as f64) as f32 + bbox.top,
    )
}
