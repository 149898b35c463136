// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image canvas: displays the active image, draws hotspot markers, and
//! turns pointer clicks into placement or selection events.
//!
//! The canvas recomputes the fitted image rectangle every frame, so the
//! bounding box handed to the coordinate mapper is always current even
//! after a resize.

use crate::models::image::AnnotatedImage;
use crate::util::geometry::{self, BoundingBox, PercentPos};

const MARKER_RADIUS: f32 = 9.0;

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    /// Pointer click on open image area; position already mapped to percent.
    PlaceHotspot(PercentPos),
    /// Pointer click on an existing marker.
    SelectHotspot(String),
    Deselect,
}

/// Display the canvas area and handle pointer interactions.
pub fn show(
    ui: &mut egui::Ui,
    image: Option<&AnnotatedImage>,
    texture: Option<&egui::TextureHandle>,
    selected_hotspot: Option<&str>,
    tour_step: Option<usize>,
    collection_empty: bool,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let (Some(image), Some(texture)) = (image, texture) else {
            show_placeholder(ui, image.is_some(), collection_empty);
            return;
        };

        let image_rect = fitted_image_rect(ui, texture);
        let bbox = BoundingBox::new(
            image_rect.min.x,
            image_rect.min.y,
            image_rect.width(),
            image_rect.height(),
        );

        ui.painter().image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let response = ui.allocate_rect(image_rect, egui::Sense::click());
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                action = click_action(pos, image, &bbox, &image_rect, tour_step.is_some());
            }
        }

        draw_markers(ui.painter(), image, &bbox, selected_hotspot, tour_step);

        if let Some(step) = tour_step {
            if let Some(spot) = image.hotspots.get(step) {
                draw_tour_overlay(ui.painter(), spot, step, image.hotspots.len(), &bbox);
            }
        }
    });

    action
}

/// Decide what a click means: marker hit → selection, open image area →
/// placement (suppressed during a tour), anything else → deselect.
fn click_action(
    pos: egui::Pos2,
    image: &AnnotatedImage,
    bbox: &BoundingBox,
    image_rect: &egui::Rect,
    tour_active: bool,
) -> CanvasAction {
    // Markers are checked last-to-first so overlapping markers resolve to
    // the most recently placed one.
    for spot in image.hotspots.iter().rev() {
        let (mx, my) = geometry::to_pixels(spot.x, spot.y, bbox);
        if pos.distance(egui::pos2(mx, my)) <= MARKER_RADIUS + 2.0 {
            return CanvasAction::SelectHotspot(spot.id.clone());
        }
    }

    if image_rect.contains(pos) && !tour_active {
        match geometry::to_percent(pos.x, pos.y, bbox) {
            Some(percent) => return CanvasAction::PlaceHotspot(percent),
            None => return CanvasAction::None,
        }
    }

    CanvasAction::Deselect
}

/// Scale the image to fit the available space, centered.
fn fitted_image_rect(ui: &egui::Ui, texture: &egui::TextureHandle) -> egui::Rect {
    let available = ui.available_size();
    let [img_width, img_height] = texture.size();
    let img_aspect = img_width as f32 / img_height as f32;
    let available_aspect = available.x / available.y;

    let (display_width, display_height) = if img_aspect > available_aspect {
        // Image is wider - fit to width
        let width = available.x;
        (width, width / img_aspect)
    } else {
        // Image is taller - fit to height
        let height = available.y;
        (height * img_aspect, height)
    };

    let x_offset = (available.x - display_width) / 2.0;
    let y_offset = (available.y - display_height) / 2.0;

    egui::Rect::from_min_size(
        ui.min_rect().min + egui::vec2(x_offset, y_offset),
        egui::vec2(display_width, display_height),
    )
}

/// Draw all hotspot markers with their sequence numbers.
fn draw_markers(
    painter: &egui::Painter,
    image: &AnnotatedImage,
    bbox: &BoundingBox,
    selected_hotspot: Option<&str>,
    tour_step: Option<usize>,
) {
    for (index, spot) in image.hotspots.iter().enumerate() {
        let (x, y) = geometry::to_pixels(spot.x, spot.y, bbox);
        let center = egui::pos2(x, y);

        let is_current_stop = tour_step == Some(index);
        let is_selected = selected_hotspot == Some(spot.id.as_str());

        let (radius, fill) = if is_current_stop {
            (MARKER_RADIUS + 3.0, egui::Color32::from_rgb(80, 200, 120))
        } else if is_selected {
            (MARKER_RADIUS, egui::Color32::LIGHT_BLUE)
        } else if tour_step.is_some() {
            // Dim the other markers while a tour is running
            (MARKER_RADIUS, egui::Color32::from_gray(120))
        } else {
            (MARKER_RADIUS, egui::Color32::YELLOW)
        };

        painter.circle_filled(center, radius, fill);
        painter.circle_stroke(center, radius, egui::Stroke::new(1.5, egui::Color32::BLACK));
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            (index + 1).to_string(),
            egui::FontId::proportional(11.0),
            egui::Color32::BLACK,
        );
    }
}

/// Comment bubble anchored next to the current tour stop.
fn draw_tour_overlay(
    painter: &egui::Painter,
    spot: &crate::models::hotspot::Hotspot,
    step: usize,
    count: usize,
    bbox: &BoundingBox,
) {
    let (x, y) = geometry::to_pixels(spot.x, spot.y, bbox);

    let text = if spot.comment.is_empty() {
        format!("Stop {} of {}", step + 1, count)
    } else {
        format!("Stop {} of {}: {}", step + 1, count, spot.comment)
    };

    let galley = painter.layout(
        text,
        egui::FontId::proportional(14.0),
        egui::Color32::WHITE,
        260.0,
    );

    // Anchor below-right of the marker, nudged back inside the image box
    let mut anchor = egui::pos2(x + MARKER_RADIUS + 6.0, y + MARKER_RADIUS + 6.0);
    let right_edge = bbox.left + bbox.width;
    let bottom_edge = bbox.top + bbox.height;
    if anchor.x + galley.size().x > right_edge {
        anchor.x = (right_edge - galley.size().x).max(bbox.left);
    }
    if anchor.y + galley.size().y > bottom_edge {
        anchor.y = y - MARKER_RADIUS - 6.0 - galley.size().y;
    }

    let bubble = egui::Rect::from_min_size(anchor, galley.size()).expand(6.0);
    painter.rect_filled(bubble, 4.0, egui::Color32::from_black_alpha(200));
    painter.rect_stroke(bubble, 4.0, egui::Stroke::new(1.0, egui::Color32::from_gray(100)));
    painter.galley(anchor, galley, egui::Color32::WHITE);
}

/// Welcome text, or a loading note when the texture is not ready yet.
fn show_placeholder(ui: &mut egui::Ui, image_selected: bool, collection_empty: bool) {
    ui.centered_and_justified(|ui| {
        if image_selected {
            // Record exists but its pixels are still being acquired
            ui.label(
                egui::RichText::new("Loading image...").color(egui::Color32::WHITE),
            );
        } else if collection_empty {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.heading(
                    egui::RichText::new("SPOTS")
                        .size(32.0)
                        .color(egui::Color32::from_gray(200)),
                );
                ui.label(
                    egui::RichText::new("Sequenced Points Of interest Tour System")
                        .size(14.0)
                        .color(egui::Color32::from_gray(150)),
                );
                ui.add_space(20.0);
                ui.label(
                    egui::RichText::new("Add images, click to drop hotspots, then play them back as a tour")
                        .color(egui::Color32::from_gray(180)),
                );
                ui.add_space(10.0);
                ui.label(
                    egui::RichText::new("File → Add Images...")
                        .weak()
                        .color(egui::Color32::from_gray(130)),
                );
            });
        } else {
            ui.label(
                egui::RichText::new("Select an image from the panel")
                    .color(egui::Color32::from_gray(180)),
            );
        }
    });
}
