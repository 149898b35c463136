// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! SPOTS - Sequenced Points Of interest Tour System
//!
//! A cross-platform desktop application for annotating images with
//! positioned, commentable markers ("hotspots") and replaying them as a
//! guided tour.

mod app;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::SpotsApp;
use io::store::FileStore;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("SPOTS - Sequenced Points Of interest Tour System"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "SPOTS",
        options,
        Box::new(|_cc| Ok(Box::new(SpotsApp::new(Box::new(FileStore::default_location()))))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
