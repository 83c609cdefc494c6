//! Breakout - a paddle-and-ball brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, power-ups, game flow)
//! - `renderer`: Draw-list capability and sprite batching
//! - `audio`: Sound cue capability and volume handling
//! - `settings`: Data-driven configuration

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Default playfield dimensions
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    /// Paddle speed (pixels/s)
    pub const PLAYER_VELOCITY: f32 = 500.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);
    /// Horizontal deflection factor on paddle hits
    pub const PADDLE_BOUNCE_STRENGTH: f32 = 2.0;

    /// Lives at the start of a run
    pub const STARTING_LIVES: u32 = 3;

    /// Screen shake duration after a solid brick hit (seconds)
    pub const SHAKE_DURATION: f32 = 0.05;

    /// Falling power-up block
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);
    /// Speed power-up multiplier
    pub const SPEED_MULTIPLIER: f32 = 1.2;
    /// Paddle growth per size power-up
    pub const PAD_SIZE_INCREASE: f32 = 50.0;

    /// Particle pool
    pub const PARTICLE_COUNT: usize = 500;
    pub const NEW_PARTICLES_PER_FRAME: usize = 2;
}

/// Neutral sprite tint
pub const WHITE: Vec3 = Vec3::ONE;

