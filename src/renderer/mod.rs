//! Rendering capability
//!
//! The core never talks to a graphics API. It walks the session and issues
//! textured-quad draws through `Renderable`; `SpriteBatch` is the bundled
//! implementation that packs them into a GPU-ready instance buffer.

pub mod scene;
pub mod sprite;

use glam::{Vec2, Vec4};

pub use scene::draw_session;
pub use sprite::{FrameGlobals, SpriteBatch, SpriteInstance, TextureRegistry};

/// Something that can draw a textured quad
pub trait Renderable {
    /// `position` is the top-left corner, `rotation` in degrees about the center
    fn draw_sprite(&mut self, texture: &str, position: Vec2, size: Vec2, rotation: f32, tint: Vec4);
}

/// Resolves named image assets to backend texture ids
pub trait TextureProvider {
    fn texture_id(&self, name: &str) -> Option<u32>;
}
