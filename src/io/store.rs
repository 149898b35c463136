// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persistence gateway for the image collection.
//!
//! The store is an injected collaborator with plain `load`/`save` calls, so
//! independent sessions and tests run against isolated stores. The wire
//! format is a JSON array of image records (`id`, `src`, `filename`,
//! `hotspots: [{id, x, y, comment}]`) and must round-trip exactly.
//!
//! Saves are fire-and-forget after every state change: the in-memory
//! session is the source of truth, the store is just the last write.

use crate::models::image::ImageCollection;
use anyhow::{Context, Result};
use std::path::PathBuf;

const STORE_FILE: &str = "collection.json";

/// Opaque blob storage for the serialized collection.
pub trait BlobStore {
    /// `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, blob: &str) -> Result<()>;
}

/// File-backed store under the user data directory.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The default session store: `<data dir>/spots/collection.json`,
    /// falling back to the working directory when no data dir exists.
    pub fn default_location() -> Self {
        let dir = dirs::data_dir()
            .map(|d| d.join("spots"))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join(STORE_FILE))
    }
}

impl BlobStore for FileStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let blob = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        Ok(Some(blob))
    }

    fn save(&self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(&self.path, blob)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    blob: std::cell::RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.blob.borrow().clone())
    }

    fn save(&self, blob: &str) -> Result<()> {
        *self.blob.borrow_mut() = Some(blob.to_string());
        Ok(())
    }
}

/// Serialize the collection to the wire format.
pub fn encode(collection: &ImageCollection) -> Result<String> {
    Ok(serde_json::to_string_pretty(collection)?)
}

/// Parse the wire format back into a collection.
pub fn decode(blob: &str) -> Result<ImageCollection> {
    Ok(serde_json::from_str(blob)?)
}

/// Load the persisted collection, falling back to an empty one when the
/// store is empty or holds unparsable content. Never fatal.
pub fn load_collection(store: &dyn BlobStore) -> ImageCollection {
    match store.load() {
        Ok(Some(blob)) => match decode(&blob) {
            Ok(collection) => {
                log::info!("Loaded {} image(s) from store", collection.len());
                collection
            }
            Err(e) => {
                log::warn!("Persisted collection is unparsable, starting empty: {e}");
                ImageCollection::new()
            }
        },
        Ok(None) => ImageCollection::new(),
        Err(e) => {
            log::warn!("Could not read store, starting empty: {e}");
            ImageCollection::new()
        }
    }
}

/// Write the collection to the store. Failures are logged, never surfaced.
pub fn save_collection(store: &dyn BlobStore, collection: &ImageCollection) {
    let result = encode(collection).and_then(|blob| store.save(&blob));
    if let Err(e) = result {
        log::error!("Failed to save collection: {e}");
    }
}
