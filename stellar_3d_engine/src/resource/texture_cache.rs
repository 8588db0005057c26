/// Path-keyed texture cache
///
/// De-duplicates texture loads by file path. Entries are `Arc<Texture>`, so
/// a material keeps its texture alive even after the cache forgets it.
/// Inserting under an existing path replaces the entry (last writer wins).

use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::graphics_device::GraphicsDevice;
use super::texture::{Texture, TextureLoader};

#[derive(Default)]
pub struct TextureCache {
    textures: FxHashMap<String, Arc<Texture>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached texture for `path`, loading and uploading it on first use
    pub fn get_or_load(
        &mut self,
        path: &str,
        loader: &mut dyn TextureLoader,
        device: &mut dyn GraphicsDevice,
    ) -> Result<Arc<Texture>> {
        self.get_or_load_atlas(path, 1, 1, loader, device)
    }

    /// Same as `get_or_load` for an atlas of `rows` x `cols` cells
    ///
    /// The grid only applies on first load; a cached entry keeps its own.
    pub fn get_or_load_atlas(
        &mut self,
        path: &str,
        rows: u32,
        cols: u32,
        loader: &mut dyn TextureLoader,
        device: &mut dyn GraphicsDevice,
    ) -> Result<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let image = loader.load(path)?;
        let texture = Arc::new(Texture::from_image(device, image, rows, cols)?);
        crate::engine_debug!("stellar3d::TextureCache", "Loaded '{}' ({}x{})",
            path, texture.width(), texture.height());
        self.textures.insert(path.to_string(), texture.clone());
        Ok(texture)
    }

    pub fn get(&self, path: &str) -> Option<Arc<Texture>> {
        self.textures.get(path).cloned()
    }

    /// Insert or replace the entry for `path`
    pub fn insert(&mut self, path: &str, texture: Arc<Texture>) -> Option<Arc<Texture>> {
        self.textures.insert(path.to_string(), texture)
    }

    pub fn remove(&mut self, path: &str) -> Option<Arc<Texture>> {
        self.textures.remove(path)
    }

    /// Drop entries no material references anymore. Returns how many were dropped.
    pub fn evict_unused(&mut self) -> usize {
        let before = self.textures.len();
        self.textures.retain(|_, texture| Arc::strong_count(texture) > 1);
        before - self.textures.len()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
#[path = "texture_cache_tests.rs"]
mod tests;
