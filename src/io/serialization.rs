// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Collection export to user-chosen files.
//!
//! Convenience on top of the autosaving session store: the same records,
//! written as YAML or JSON wherever the user points the save dialog.

use crate::models::image::ImageCollection;
use anyhow::Result;
use std::path::Path;

/// Export the collection as YAML.
pub fn export_yaml(collection: &ImageCollection, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(collection)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export the collection as pretty-printed JSON.
pub fn export_json(collection: &ImageCollection, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(collection)?;
    std::fs::write(path, json)?;
    Ok(())
}
