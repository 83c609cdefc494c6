//! Sprite instance batching

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

use super::{Renderable, TextureProvider};
use crate::sim::PostEffects;

/// One textured quad (must match the instance vertex layout)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2], // offset 0
    pub size: [f32; 2],     // offset 8
    pub rotation: f32,      // offset 16
    pub texture: u32,       // offset 20
    pub tint: [f32; 4],     // offset 24
}

/// Per-frame uniform block for the post-processing pass
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameGlobals {
    pub resolution: [f32; 2], // offset 0
    pub time: f32,            // offset 8
    pub shake: u32,           // offset 12
    pub confuse: u32,         // offset 16
    pub chaos: u32,           // offset 20
    _pad: [u32; 2],           // pad to 32 bytes
}

impl FrameGlobals {
    pub fn new(resolution: Vec2, time: f32, effects: &PostEffects) -> Self {
        Self {
            resolution: resolution.to_array(),
            time,
            shake: effects.shake as u32,
            confuse: effects.confuse as u32,
            chaos: effects.chaos as u32,
            _pad: [0; 2],
        }
    }
}

/// Name -> id table filled by whoever loads the images
#[derive(Debug, Clone, Default)]
pub struct TextureRegistry {
    ids: HashMap<String, u32>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture, returning its id (existing names keep theirs)
    pub fn register(&mut self, name: &str) -> u32 {
        let next = self.ids.len() as u32;
        *self.ids.entry(name.to_string()).or_insert(next)
    }

    /// Registry holding every texture the scene draws
    pub fn with_game_textures() -> Self {
        let mut registry = Self::new();
        for name in super::scene::TEXTURES {
            registry.register(name);
        }
        registry
    }
}

impl TextureProvider for TextureRegistry {
    fn texture_id(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }
}

/// Collects draws for one frame
pub struct SpriteBatch<P: TextureProvider> {
    textures: P,
    instances: Vec<SpriteInstance>,
    /// Draws skipped because their texture was unknown
    missing: usize,
}

impl<P: TextureProvider> SpriteBatch<P> {
    pub fn new(textures: P) -> Self {
        Self {
            textures,
            instances: Vec::new(),
            missing: 0,
        }
    }

    /// Start a new frame, keeping the allocation
    pub fn clear(&mut self) {
        self.instances.clear();
        self.missing = 0;
    }

    pub fn instances(&self) -> &[SpriteInstance] {
        &self.instances
    }

    /// Raw bytes for upload to an instance buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn missing(&self) -> usize {
        self.missing
    }
}

impl<P: TextureProvider> Renderable for SpriteBatch<P> {
    fn draw_sprite(&mut self, texture: &str, position: Vec2, size: Vec2, rotation: f32, tint: Vec4) {
        let Some(texture) = self.textures.texture_id(texture) else {
            if self.missing == 0 {
                log::warn!("Unknown texture '{}', sprite skipped", texture);
            }
            self.missing += 1;
            return;
        };
        self.instances.push(SpriteInstance {
            position: position.to_array(),
            size: size.to_array(),
            rotation,
            texture,
            tint: tint.to_array(),
        });
    }
}
