//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-provided frame `dt` only
//! - Seeded RNG only
//! - Stable iteration order (level order, spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod level;
pub mod particles;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{PaddleBounce, resolve};
pub use geometry::{Aabb, Circle, Direction, circle_aabb_contact, vector_direction};
pub use level::{Brick, Level, standard_levels};
pub use particles::{Particle, ParticleGenerator};
pub use state::{
    Ball, GameEvent, GamePhase, GameSession, Paddle, PostEffects, PowerUp, PowerUpKind,
};
pub use tick::{TickInput, tick};
