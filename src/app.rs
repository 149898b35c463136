// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! Owns the session state, the per-image textures, and the background
//! image loader. Every interaction event is applied to the session through
//! one of its operations; whenever one reports a change, the collection is
//! saved to the injected store (fire-and-forget).

use crate::io::{media, serialization, store};
use crate::models::{image::AnnotatedImage, session::SessionState};
use crate::ui::{canvas, panel, toolbar};
use crate::util::ident;
use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver};

/// One successfully decoded upload.
struct UploadedFile {
    src: String,
    filename: String,
    image: media::LoadedImage,
}

/// Result of a background decode batch.
enum LoadedBatch {
    /// Freshly picked files, to be added to the collection.
    Uploaded(Vec<UploadedFile>),
    /// Pixels for records restored from the store; keyed by image id.
    Rehydrated(Vec<(String, media::LoadedImage)>),
}

/// Main application state.
pub struct SpotsApp {
    session: SessionState,

    /// Injected persistence collaborator
    store: Box<dyn store::BlobStore>,

    /// Display textures keyed by image id
    textures: HashMap<String, egui::TextureHandle>,

    /// Receiver for the in-flight decode batch; at most one at a time
    batch_loader: Option<Receiver<LoadedBatch>>,

    /// Loading state message
    loading_message: Option<String>,
}

impl SpotsApp {
    /// Create the application, restoring the collection from the store and
    /// kicking off texture rehydration for the restored records.
    pub fn new(store: Box<dyn store::BlobStore>) -> Self {
        let collection = store::load_collection(store.as_ref());
        let mut session = SessionState::new();
        session.add_images(collection.iter().cloned().collect());

        let mut app = Self {
            session,
            store,
            textures: HashMap::new(),
            batch_loader: None,
            loading_message: None,
        };
        app.rehydrate_textures();
        app
    }

    /// Decode the stored images' pixels again on a background thread.
    fn rehydrate_textures(&mut self) {
        let sources: Vec<(String, String)> = self
            .session
            .images
            .iter()
            .map(|img| (img.id.clone(), img.src.clone()))
            .collect();
        if sources.is_empty() {
            return;
        }

        let (sender, receiver) = channel();
        self.batch_loader = Some(receiver);
        self.loading_message = Some(format!("Restoring {} image(s)...", sources.len()));

        std::thread::spawn(move || {
            let mut loaded = Vec::new();
            for (id, src) in sources {
                match media::load_image(Path::new(&src)) {
                    Ok(image) => loaded.push((id, image)),
                    Err(e) => log::warn!("Could not reload {src}: {e}"),
                }
            }
            let _ = sender.send(LoadedBatch::Rehydrated(loaded));
        });
    }

    /// Open the multi-file picker and decode the chosen batch in the
    /// background. One batch in flight at a time; results merge additively.
    fn pick_and_load_images(&mut self) {
        if self.batch_loader.is_some() {
            return;
        }
        let Some(paths) = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"])
            .pick_files()
        else {
            return;
        };
        if paths.is_empty() {
            return;
        }

        let (sender, receiver) = channel();
        self.batch_loader = Some(receiver);
        self.loading_message = Some(format!("Loading {} image(s)...", paths.len()));

        std::thread::spawn(move || {
            let mut uploaded = Vec::new();
            for path in paths {
                match media::load_image(&path) {
                    Ok(image) => uploaded.push(UploadedFile {
                        src: path.to_string_lossy().into_owned(),
                        filename: media::display_name(&path),
                        image,
                    }),
                    Err(e) => log::error!("Failed to load {}: {e}", path.display()),
                }
            }
            let _ = sender.send(LoadedBatch::Uploaded(uploaded));
        });
    }

    fn make_texture(
        ctx: &egui::Context,
        id: &str,
        image: &media::LoadedImage,
    ) -> egui::TextureHandle {
        let size = [image.width as usize, image.height as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
        ctx.load_texture(id.to_string(), color_image, egui::TextureOptions::LINEAR)
    }

    /// Fold a finished decode batch into the session and texture map.
    /// Returns whether the persisted collection changed.
    fn apply_batch(&mut self, ctx: &egui::Context, batch: LoadedBatch) -> bool {
        match batch {
            LoadedBatch::Uploaded(files) => {
                let mut records = Vec::new();
                for file in files {
                    let id = ident::generate("img");
                    self.textures
                        .insert(id.clone(), Self::make_texture(ctx, &id, &file.image));
                    records.push(AnnotatedImage::new(id, file.src, file.filename));
                }
                self.session.add_images(records)
            }
            LoadedBatch::Rehydrated(loaded) => {
                for (id, image) in loaded {
                    let texture = Self::make_texture(ctx, &id, &image);
                    self.textures.insert(id, texture);
                }
                false
            }
        }
    }

    fn export_collection(&self, path: std::path::PathBuf) {
        let extension = path.extension().and_then(|s| s.to_str());
        let result = match extension {
            Some("yaml") | Some("yml") => {
                serialization::export_yaml(&self.session.images, &path)
            }
            Some("json") => serialization::export_json(&self.session.images, &path),
            _ => {
                log::error!("Unsupported file extension: {:?}", extension);
                return;
            }
        };

        match result {
            Ok(_) => log::info!("Exported collection to {}", path.display()),
            Err(e) => log::error!("Failed to export collection: {}", e),
        }
    }

    fn save(&self) {
        store::save_collection(self.store.as_ref(), &self.session.images);
    }
}

impl eframe::App for SpotsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for a completed decode batch
        if let Some(ref receiver) = self.batch_loader {
            if let Ok(batch) = receiver.try_recv() {
                self.batch_loader = None;
                self.loading_message = None;
                if self.apply_batch(ctx, batch) {
                    SpotsApp::save(self);
                }
            }
        }

        // Request repaint while loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // Re-validate the tour against the current collection before anything
        // reads it this frame
        self.session.reconcile_tour();

        let mut changed = false;

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Add Images...").clicked() {
                        self.pick_and_load_images();
                        ui.close_menu();
                    }
                    ui.separator();
                    let has_images = !self.session.images.is_empty();
                    ui.add_enabled_ui(has_images, |ui| {
                        ui.menu_button("Export Collection", |ui| {
                            if ui.button("Export as JSON...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("JSON", &["json"])
                                    .set_file_name("collection.json")
                                    .save_file()
                                {
                                    self.export_collection(path);
                                }
                                ui.close_menu();
                            }
                            if ui.button("Export as YAML...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("YAML", &["yaml", "yml"])
                                    .set_file_name("collection.yaml")
                                    .save_file()
                                {
                                    self.export_collection(path);
                                }
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Keyboard events
        if self.session.tour.is_active() {
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
                self.session.tour_next();
            }
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
                self.session.tour_prev();
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                self.session.exit_tour();
            }
        } else {
            if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                self.session.selected_hotspot = None;
            }
            // Only process Delete if no text field is focused (to avoid
            // deleting while editing a comment)
            if !ctx.wants_keyboard_input() {
                if ctx.input(|i| {
                    i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace)
                }) {
                    if let Some(id) = self.session.selected_hotspot.clone() {
                        changed |= self.session.delete_hotspot(&id);
                    }
                }
            }
        }

        // Toolbar
        let active_id = self.session.active_image.clone();
        let can_start = self
            .session
            .active()
            .map(|img| !img.hotspots.is_empty())
            .unwrap_or(false);
        let tour_progress = active_id.as_deref().and_then(|id| {
            let step = self.session.tour.step_for(id)?;
            let count = self.session.images.get(id)?.hotspots.len();
            Some((step, count))
        });

        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, can_start, tour_progress))
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::AddImages => self.pick_and_load_images(),
            toolbar::ToolbarAction::StartTour => {
                if let Some(id) = active_id.as_deref() {
                    self.session.start_tour(id);
                }
            }
            toolbar::ToolbarAction::NextStep => self.session.tour_next(),
            toolbar::ToolbarAction::PrevStep => self.session.tour_prev(),
            toolbar::ToolbarAction::ExitTour => self.session.exit_tour(),
            toolbar::ToolbarAction::None => {}
        }

        // Side panel (right)
        let panel_action = egui::SidePanel::right("panel")
            .default_width(260.0)
            .show(ctx, |ui| {
                panel::show(
                    ui,
                    &self.session.images,
                    self.session.active_image.as_deref(),
                    self.session.selected_hotspot.as_deref(),
                    self.session.tour.is_active(),
                )
            })
            .inner;

        match panel_action {
            panel::PanelAction::SelectImage(id) => {
                self.session.set_active_image(&id);
            }
            panel::PanelAction::DeleteImage(id) => {
                if self.session.delete_image(&id) {
                    self.textures.remove(&id);
                    changed = true;
                }
            }
            panel::PanelAction::SelectHotspot(id) => {
                self.session.selected_hotspot = Some(id);
            }
            panel::PanelAction::CommentChanged { id, text } => {
                changed |= self.session.edit_comment(&id, &text);
            }
            panel::PanelAction::DeleteHotspot(id) => {
                changed |= self.session.delete_hotspot(&id);
            }
            panel::PanelAction::None => {}
        }

        // Status line (bottom)
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} image(s)", self.session.images.len()));
                if let Some(image) = self.session.active() {
                    ui.separator();
                    ui.label(format!(
                        "{} — {} hotspot(s)",
                        image.filename,
                        image.hotspots.len()
                    ));
                }
                ui.separator();
                if self.session.tour.is_active() {
                    ui.label("Touring");
                } else {
                    ui.label("Ready");
                }
            });
        });

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                // Show loading overlay if loading
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    canvas::CanvasAction::None
                } else {
                    let active = self.session.active();
                    let texture = active.and_then(|img| self.textures.get(&img.id));
                    let tour_step = active
                        .and_then(|img| self.session.tour.step_for(&img.id));
                    canvas::show(
                        ui,
                        active,
                        texture,
                        self.session.selected_hotspot.as_deref(),
                        tour_step,
                        self.session.images.is_empty(),
                    )
                }
            })
            .inner;

        match canvas_action {
            canvas::CanvasAction::PlaceHotspot(pos) => {
                changed |= self.session.place_hotspot(pos);
            }
            canvas::CanvasAction::SelectHotspot(id) => {
                self.session.selected_hotspot = Some(id);
                log::info!("Selected hotspot");
            }
            canvas::CanvasAction::Deselect => {
                self.session.selected_hotspot = None;
            }
            canvas::CanvasAction::None => {}
        }

        if changed {
            SpotsApp::save(self);
        }
    }
}
