/// Owner of every render target texture.
///
/// Textures live in a SlotMap and are handed out as `TargetKey`s. A key is a
/// plain handle: framebuffers store keys, never textures, so attaching and
/// detaching cannot free pixel storage. Removing a texture here invalidates
/// its key everywhere at once.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::engine_bail;
use super::texture::{Texture, TextureFormat};

new_key_type! {
    /// Stable, copyable handle to a texture owned by a `TargetManager`
    pub struct TargetKey;
}

/// Render target storage
///
/// Multiple targets can exist simultaneously (shadow maps, debug color
/// buffers, post-processing buffers). Targets may optionally be named.
pub struct TargetManager {
    render_targets: SlotMap<TargetKey, Texture>,
    names: FxHashMap<String, TargetKey>,
}

impl TargetManager {
    /// Create a new empty target manager
    pub fn new() -> Self {
        Self {
            render_targets: SlotMap::with_key(),
            names: FxHashMap::default(),
        }
    }

    /// Allocate a texture and take ownership of it
    ///
    /// # Errors
    ///
    /// Propagates `Texture::new` failures (empty extent, allocation failure).
    pub fn create_render_target(
        &mut self,
        format: TextureFormat,
        width: u32,
        height: u32,
    ) -> Result<TargetKey> {
        let texture = Texture::new(format, width, height)?;
        let key = self.render_targets.insert(texture);
        crate::engine_trace!("penumbra::TargetManager",
            "Created {:?} target {}x{} ({:?})", format, width, height, key);
        Ok(key)
    }

    /// Allocate a texture and register it under `name`
    ///
    /// # Errors
    ///
    /// Returns an error if a render target with the same name already exists.
    pub fn create_named_render_target(
        &mut self,
        name: &str,
        format: TextureFormat,
        width: u32,
        height: u32,
    ) -> Result<TargetKey> {
        if self.names.contains_key(name) {
            engine_bail!("penumbra::TargetManager", InvalidResource,
                "RenderTarget '{}' already exists", name);
        }

        let key = self.create_render_target(format, width, height)?;
        self.names.insert(name.to_string(), key);
        Ok(key)
    }

    /// Take ownership of an existing texture
    pub fn insert(&mut self, texture: Texture) -> TargetKey {
        self.render_targets.insert(texture)
    }

    pub fn render_target(&self, key: TargetKey) -> Option<&Texture> {
        self.render_targets.get(key)
    }

    pub fn render_target_mut(&mut self, key: TargetKey) -> Option<&mut Texture> {
        self.render_targets.get_mut(key)
    }

    /// Look up a named render target
    pub fn find(&self, name: &str) -> Option<TargetKey> {
        self.names.get(name).copied()
    }

    pub fn contains(&self, key: TargetKey) -> bool {
        self.render_targets.contains_key(key)
    }

    /// Remove a render target, returning its texture
    ///
    /// Framebuffers still holding `key` skip it from now on.
    pub fn remove_render_target(&mut self, key: TargetKey) -> Option<Texture> {
        let texture = self.render_targets.remove(key)?;
        self.names.retain(|_, k| *k != key);
        Some(texture)
    }

    pub fn render_target_count(&self) -> usize {
        self.render_targets.len()
    }

    /// All registered names
    pub fn render_target_names(&self) -> Vec<&str> {
        self.names.keys().map(|k| k.as_str()).collect()
    }

    /// Remove all render targets
    pub fn clear(&mut self) {
        self.render_targets.clear();
        self.names.clear();
    }
}

impl Default for TargetManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "target_manager_tests.rs"]
mod tests;
