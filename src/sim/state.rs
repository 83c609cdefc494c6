//! Game state and core simulation types
//!
//! `GameSession` exclusively owns every entity. The collision and power-up
//! passes borrow into it and keep nothing between calls.

use anyhow::bail;
use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, Circle};
use super::level::{self, Level};
use super::particles::ParticleGenerator;
use crate::consts::*;
use crate::settings::Settings;
use crate::WHITE;

/// Top-level flow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level select, waiting for confirm
    Menu,
    /// Active gameplay
    Active,
    /// Level cleared, waiting for confirm
    Win,
}

/// The ball: a circle riding inside its bounding box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Bounding square, `size = 2 * radius`
    pub body: Aabb,
    pub radius: f32,
    pub velocity: Vec2,
    /// Rides the paddle, ignores its own velocity
    pub stuck: bool,
    /// Next paddle contact re-sticks the ball
    pub sticky: bool,
    /// Destroys non-solid bricks without bouncing off them
    pub pass_through: bool,
    pub tint: Vec3,
}

impl Ball {
    pub fn new(position: Vec2, radius: f32, velocity: Vec2) -> Self {
        Self {
            body: Aabb::new(position, Vec2::splat(radius * 2.0)),
            radius,
            velocity,
            stuck: true,
            sticky: false,
            pass_through: false,
            tint: WHITE,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.position + Vec2::splat(self.radius)
    }

    pub fn circle(&self) -> Circle {
        Circle {
            center: self.center(),
            radius: self.radius,
        }
    }

    /// Integrate velocity and bounce off the left, right and top walls.
    /// The bottom edge is open. Returns the new position.
    pub fn advance(&mut self, dt: f32, width: f32) -> Vec2 {
        if !self.stuck {
            let pos = &mut self.body.position;
            *pos += self.velocity * dt;

            if pos.x <= 0.0 {
                self.velocity.x = -self.velocity.x;
                pos.x = 0.0;
            } else if pos.x + self.body.size.x >= width {
                self.velocity.x = -self.velocity.x;
                pos.x = width - self.body.size.x;
            }
            if pos.y <= 0.0 {
                self.velocity.y = -self.velocity.y;
                pos.y = 0.0;
            }
        }
        self.body.position
    }

    /// Back to a fresh serve at the given position
    pub fn reset(&mut self, position: Vec2, velocity: Vec2) {
        self.body.position = position;
        self.velocity = velocity;
        self.stuck = true;
        self.sticky = false;
        self.pass_through = false;
        self.tint = WHITE;
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub body: Aabb,
    pub tint: Vec3,
}

impl Paddle {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            body: Aabb::new(position, size),
            tint: WHITE,
        }
    }

    /// Slide horizontally, staying inside `[0, width]`.
    /// Returns the distance actually moved.
    pub fn slide(&mut self, delta: f32, width: f32) -> f32 {
        let max_x = (width - self.body.size.x).max(0.0);
        let before = self.body.position.x;
        self.body.position.x = (before + delta).clamp(0.0, max_x);
        self.body.position.x - before
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
}

/// Static properties of a power-up kind
#[derive(Debug, Clone, Copy)]
pub struct PowerUpSpec {
    /// One in `chance` bricks drops this kind
    pub chance: u32,
    /// Seconds of timed effect, 0 for instantaneous
    pub duration: f32,
    pub tint: Vec3,
    pub texture: &'static str,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    pub const fn spec(self) -> PowerUpSpec {
        match self {
            PowerUpKind::Speed => PowerUpSpec {
                chance: 75,
                duration: 0.0,
                tint: Vec3::new(0.5, 0.5, 1.0),
                texture: "powerup_speed",
            },
            PowerUpKind::Sticky => PowerUpSpec {
                chance: 75,
                duration: 20.0,
                tint: Vec3::new(1.0, 0.5, 1.0),
                texture: "powerup_sticky",
            },
            PowerUpKind::PassThrough => PowerUpSpec {
                chance: 75,
                duration: 10.0,
                tint: Vec3::new(0.5, 1.0, 0.5),
                texture: "powerup_passthrough",
            },
            PowerUpKind::PadSizeIncrease => PowerUpSpec {
                chance: 75,
                duration: 0.0,
                tint: Vec3::new(1.0, 0.6, 0.4),
                texture: "powerup_increase",
            },
            // Negative kinds drop five times as often
            PowerUpKind::Confuse => PowerUpSpec {
                chance: 15,
                duration: 15.0,
                tint: Vec3::new(1.0, 0.3, 0.3),
                texture: "powerup_confuse",
            },
            PowerUpKind::Chaos => PowerUpSpec {
                chance: 15,
                duration: 15.0,
                tint: Vec3::new(0.9, 0.25, 0.25),
                texture: "powerup_chaos",
            },
        }
    }
}

/// A falling (or collected and ticking) power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub body: Aabb,
    pub velocity: Vec2,
    /// Seconds remaining once activated
    pub duration: f32,
    pub activated: bool,
    /// Collected or missed; stays alive while `activated`
    pub destroyed: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, position: Vec2) -> Self {
        Self {
            kind,
            body: Aabb::new(position, POWERUP_SIZE),
            velocity: POWERUP_VELOCITY,
            duration: kind.spec().duration,
            activated: false,
            destroyed: false,
        }
    }

    /// Ready to drop from the live collection
    pub fn is_spent(&self) -> bool {
        self.destroyed && !self.activated
    }
}

/// Full-screen post-processing switches
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostEffects {
    pub shake: bool,
    pub confuse: bool,
    pub chaos: bool,
    /// Seconds of shake remaining
    pub shake_time: f32,
}

impl PostEffects {
    pub fn start_shake(&mut self, duration: f32) {
        self.shake = true;
        self.shake_time = duration;
    }

    /// Count the shake timer down by `dt`
    pub fn advance(&mut self, dt: f32) {
        if self.shake_time > 0.0 {
            self.shake_time -= dt;
            if self.shake_time <= 0.0 {
                self.shake = false;
            }
        }
    }
}

/// Things that happened during a tick, for audio and host bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Non-solid brick destroyed; power-ups may spawn at `position`
    BrickDestroyed { index: usize, position: Vec2 },
    /// Ball bounced off a solid brick
    SolidBrickHit { index: usize },
    PaddleHit,
    PowerUpSpawned { kind: PowerUpKind, position: Vec2 },
    PowerUpActivated { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    LifeLost { remaining: u32 },
    GameOver,
    LevelCompleted { level: usize },
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    pub settings: Settings,
    /// Playfield size
    pub width: f32,
    pub height: f32,
    pub levels: Vec<Level>,
    /// Index into `levels`
    pub level: usize,
    pub lives: u32,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Live power-ups in spawn order
    pub power_ups: Vec<PowerUp>,
    pub effects: PostEffects,
    /// Visual trail behind the ball (not gameplay-affecting)
    pub particles: ParticleGenerator,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (power-up drops)
    pub rng: Pcg32,
    /// Frames simulated while active
    pub frames: u64,
}

impl GameSession {
    /// Create a session over the given levels, starting in the menu
    pub fn new(settings: Settings, levels: Vec<Level>, seed: u64) -> anyhow::Result<Self> {
        if levels.is_empty() {
            bail!("a session needs at least one level");
        }
        let width = settings.width;
        let height = settings.height;
        let paddle = Paddle::new(Self::paddle_start(width, height), PLAYER_SIZE);
        let ball = Ball::new(
            Self::ball_start(&paddle, BALL_RADIUS),
            BALL_RADIUS,
            INITIAL_BALL_VELOCITY,
        );

        Ok(Self {
            lives: settings.starting_lives,
            particles: ParticleGenerator::new(PARTICLE_COUNT, seed),
            settings,
            width,
            height,
            levels,
            level: 0,
            phase: GamePhase::Menu,
            paddle,
            ball,
            power_ups: Vec::new(),
            effects: PostEffects::default(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frames: 0,
        })
    }

    /// Session over the four built-in layouts
    pub fn with_standard_levels(settings: Settings, seed: u64) -> anyhow::Result<Self> {
        let levels = level::standard_levels(settings.width, settings.height / 2.0)?;
        Self::new(settings, levels, seed)
    }

    fn paddle_start(width: f32, height: f32) -> Vec2 {
        Vec2::new(width / 2.0 - PLAYER_SIZE.x / 2.0, height - PLAYER_SIZE.y)
    }

    /// Ball resting centered on top of the paddle
    fn ball_start(paddle: &Paddle, radius: f32) -> Vec2 {
        paddle.body.position + Vec2::new(paddle.body.size.x / 2.0 - radius, -radius * 2.0)
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.level]
    }

    pub fn current_level_mut(&mut self) -> &mut Level {
        &mut self.levels[self.level]
    }

    /// Restore every brick of the current level
    pub fn reset_level(&mut self) {
        let level = self.level;
        self.levels[level].reset();
        log::debug!("Level {} reset", level + 1);
    }

    /// Fresh paddle and serve; clears every power-up effect
    pub fn reset_player(&mut self) {
        self.paddle.body.size = PLAYER_SIZE;
        self.paddle.body.position = Self::paddle_start(self.width, self.height);
        self.paddle.tint = WHITE;

        let start = Self::ball_start(&self.paddle, self.ball.radius);
        self.ball.reset(start, INITIAL_BALL_VELOCITY);

        self.effects.chaos = false;
        self.effects.confuse = false;
        self.power_ups.clear();
    }

    /// Switch phase, logging and recording the transition
    pub fn set_phase(&mut self, to: GamePhase, events: &mut Vec<GameEvent>) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        events.push(GameEvent::PhaseChanged { from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_advance_bounces_off_walls() {
        let mut ball = Ball::new(Vec2::new(5.0, 5.0), 10.0, Vec2::new(-100.0, -100.0));
        ball.stuck = false;
        ball.advance(0.1, 800.0);
        assert_eq!(ball.position(), Vec2::ZERO);
        assert_eq!(ball.velocity, Vec2::new(100.0, 100.0));

        let mut ball = Ball::new(Vec2::new(775.0, 300.0), 10.0, Vec2::new(100.0, 0.0));
        ball.stuck = false;
        ball.advance(0.1, 800.0);
        assert_eq!(ball.position().x, 780.0);
        assert_eq!(ball.velocity.x, -100.0);
    }

    #[test]
    fn test_stuck_ball_does_not_move() {
        let mut ball = Ball::new(Vec2::new(50.0, 50.0), 10.0, INITIAL_BALL_VELOCITY);
        ball.advance(1.0, 800.0);
        assert_eq!(ball.position(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_paddle_slide_is_clamped() {
        let mut paddle = Paddle::new(Vec2::new(10.0, 580.0), PLAYER_SIZE);
        assert_eq!(paddle.slide(-50.0, 800.0), -10.0);
        assert_eq!(paddle.body.position.x, 0.0);
        paddle.slide(10_000.0, 800.0);
        assert_eq!(paddle.body.position.x, 700.0);
    }

    #[test]
    fn test_power_up_spec_table() {
        assert_eq!(PowerUpKind::Speed.spec().duration, 0.0);
        assert_eq!(PowerUpKind::PadSizeIncrease.spec().duration, 0.0);
        assert_eq!(PowerUpKind::Sticky.spec().duration, 20.0);
        assert_eq!(PowerUpKind::PassThrough.spec().duration, 10.0);
        for kind in [PowerUpKind::Confuse, PowerUpKind::Chaos] {
            assert_eq!(kind.spec().chance, 15);
        }
        let new = PowerUp::new(PowerUpKind::Sticky, Vec2::new(1.0, 2.0));
        assert_eq!(new.duration, 20.0);
        assert!(!new.is_spent());
    }

    #[test]
    fn test_shake_timer_expires() {
        let mut effects = PostEffects::default();
        effects.start_shake(SHAKE_DURATION);
        effects.advance(0.03);
        assert!(effects.shake);
        effects.advance(0.03);
        assert!(!effects.shake);
    }

    #[test]
    fn test_session_requires_a_level() {
        let err = GameSession::new(Settings::default(), Vec::new(), 1).unwrap_err();
        assert!(err.to_string().contains("at least one level"));

        let levels = level::standard_levels(800.0, 300.0).unwrap();
        let session = GameSession::new(Settings::default(), levels, 42).unwrap();
        assert_eq!(session.seed, 42);
        assert_eq!(session.levels.len(), 4);
        assert_eq!(session.phase, GamePhase::Menu);
    }

    #[test]
    fn test_reset_player_serves_from_paddle_center() {
        let mut session = GameSession::with_standard_levels(Settings::default(), 7).unwrap();
        session.ball.stuck = false;
        session.ball.body.position = Vec2::new(3.0, 3.0);
        session.paddle.body.size.x = 250.0;
        session.effects.chaos = true;
        session.power_ups.push(PowerUp::new(PowerUpKind::Speed, Vec2::ZERO));

        session.reset_player();

        assert!(session.ball.stuck);
        assert_eq!(session.paddle.body.size, PLAYER_SIZE);
        assert_eq!(session.paddle.body.position, Vec2::new(350.0, 580.0));
        assert_eq!(session.ball.position(), Vec2::new(387.5, 555.0));
        assert!(!session.effects.chaos);
        assert!(session.power_ups.is_empty());
    }
}
