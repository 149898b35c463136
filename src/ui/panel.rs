// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Side panel: image list, hotspot list, and the comment editor.

use crate::models::image::ImageCollection;

/// Result of side panel interaction.
pub enum PanelAction {
    None,
    SelectImage(String),
    DeleteImage(String),
    SelectHotspot(String),
    CommentChanged { id: String, text: String },
    DeleteHotspot(String),
}

/// Display the image and hotspot lists. Editing is disabled while a tour is
/// running; navigation keys own the interaction then.
pub fn show(
    ui: &mut egui::Ui,
    images: &ImageCollection,
    active_image: Option<&str>,
    selected_hotspot: Option<&str>,
    tour_active: bool,
) -> PanelAction {
    let mut action = PanelAction::None;

    ui.heading("Images");
    ui.separator();

    if images.is_empty() {
        ui.label(egui::RichText::new("No images yet").weak());
    }

    for image in images.iter() {
        ui.horizontal(|ui| {
            let is_active = active_image == Some(image.id.as_str());
            let label = format!("{} ({})", image.filename, image.hotspots.len());
            if ui.selectable_label(is_active, label).clicked() {
                action = PanelAction::SelectImage(image.id.clone());
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("🗑").on_hover_text("Delete image").clicked() {
                    action = PanelAction::DeleteImage(image.id.clone());
                }
            });
        });
    }

    let Some(active) = active_image.and_then(|id| images.get(id)) else {
        return action;
    };

    ui.add_space(12.0);
    ui.heading("Hotspots");
    ui.separator();

    if active.hotspots.is_empty() {
        ui.label(egui::RichText::new("Click the image to place a hotspot").weak());
    }

    for (index, spot) in active.hotspots.iter().enumerate() {
        ui.horizontal(|ui| {
            let is_selected = selected_hotspot == Some(spot.id.as_str());
            let summary = if spot.comment.is_empty() {
                format!("{}. ({:.1}%, {:.1}%)", index + 1, spot.x, spot.y)
            } else {
                format!("{}. {}", index + 1, truncate(&spot.comment, 24))
            };
            if ui.selectable_label(is_selected, summary).clicked() {
                action = PanelAction::SelectHotspot(spot.id.clone());
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let delete = ui
                    .add_enabled(!tour_active, egui::Button::new("🗑").small())
                    .on_hover_text("Delete hotspot");
                if delete.clicked() {
                    action = PanelAction::DeleteHotspot(spot.id.clone());
                }
            });
        });
    }

    // Comment editor for the selected hotspot
    if let Some(spot) = selected_hotspot.and_then(|id| active.hotspots.iter().find(|h| h.id == id))
    {
        if !tour_active {
            ui.add_space(12.0);
            ui.label(egui::RichText::new("Comment").strong());
            let mut text = spot.comment.clone();
            let response = ui.add(
                egui::TextEdit::multiline(&mut text)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY)
                    .hint_text("What should the tour say here?"),
            );
            if response.changed() {
                action = PanelAction::CommentChanged {
                    id: spot.id.clone(),
                    text,
                };
            }
        }
    }

    action
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 24), "short");
        assert_eq!(truncate("ürgently löng commentary", 8), "ürgently…");
        assert_eq!(truncate("", 4), "");
    }
}
