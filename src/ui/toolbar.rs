// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar: batch upload and tour playback controls.

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    AddImages,
    StartTour,
    NextStep,
    PrevStep,
    ExitTour,
}

/// Display the toolbar. `tour_progress` is `(step, count)` while a tour is
/// running; `can_start` means the active image has at least one hotspot.
pub fn show(
    ui: &mut egui::Ui,
    can_start: bool,
    tour_progress: Option<(usize, usize)>,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        match tour_progress {
            Some((step, count)) => {
                if ui.button("⏹ Exit Tour").clicked() {
                    action = ToolbarAction::ExitTour;
                }

                ui.separator();

                if ui.add_enabled(step > 0, egui::Button::new("◀ Prev")).clicked() {
                    action = ToolbarAction::PrevStep;
                }
                ui.label(format!("Stop {} / {}", step + 1, count));
                if ui
                    .add_enabled(step + 1 < count, egui::Button::new("Next ▶"))
                    .clicked()
                {
                    action = ToolbarAction::NextStep;
                }

                ui.separator();
                ui.label(
                    egui::RichText::new("Arrow keys step, Escape exits")
                        .italics()
                        .weak(),
                );
            }
            None => {
                if ui.button("➕ Add Images...").clicked() {
                    action = ToolbarAction::AddImages;
                }

                ui.separator();

                if ui
                    .add_enabled(can_start, egui::Button::new("▶ Start Tour"))
                    .clicked()
                {
                    action = ToolbarAction::StartTour;
                }

                ui.separator();
                let hint = if can_start {
                    "Play this image's hotspots back in placement order"
                } else {
                    "Place hotspots on an image to enable the tour"
                };
                ui.label(egui::RichText::new(hint).italics().weak());
            }
        }
    });

    action
}
