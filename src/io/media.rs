// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image acquisition: decoding files into displayable pixel data.
//!
//! This is the opaque "image source" producer. Decoding happens on a
//! background thread (see `app`); the core only ever sees the finished
//! RGBA buffer and the original filename.

use anyhow::Result;
use std::path::Path;

/// A decoded image ready to become an egui texture.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode an image file to RGBA8.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)?.to_rgba8();
    let (width, height) = img.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

/// The display name for an uploaded file: its final path component.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_is_final_component() {
        assert_eq!(display_name(Path::new("/a/b/photo.png")), "photo.png");
        assert_eq!(display_name(Path::new("photo.png")), "photo.png");
    }

    #[test]
    fn test_load_image_missing_file_is_an_error() {
        assert!(load_image(Path::new("/nonexistent/missing.png")).is_err());
    }
}
