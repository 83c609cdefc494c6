//! Per-frame simulation step
//!
//! Input handling and the Menu -> Active -> Win -> Menu flow. The host calls
//! `tick` once per frame with the frame's `dt`.

use glam::Vec2;

use super::collision;
use super::powerup::{self, EffectTargets};
use super::state::{GameEvent, GamePhase, GameSession};
use crate::consts::*;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Paddle movement keys (held)
    pub left: bool,
    pub right: bool,
    /// Release a stuck ball (pressed this frame)
    pub launch: bool,
    /// Start / return to menu (pressed this frame)
    pub confirm: bool,
    /// Menu level selection (pressed this frame)
    pub next_level: bool,
    pub previous_level: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the session by one frame: input first, then the active update
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(session, &mut input);
    }

    process_input(session, &input, dt, &mut events);
    if session.phase == GamePhase::Active {
        update(session, dt, &mut events);
    }

    events
}

/// Demo player: serve immediately and keep the paddle under the ball
fn autopilot(session: &GameSession, input: &mut TickInput) {
    match session.phase {
        GamePhase::Menu | GamePhase::Win => input.confirm = true,
        GamePhase::Active => {
            let ball = &session.ball;
            if ball.stuck {
                input.launch = true;
            }

            // Ball rising and far away: go grab the lowest falling power-up
            let ball_is_safe = ball.velocity.y < 0.0 && ball.center().y < session.height * 0.5;
            let pickup = session
                .power_ups
                .iter()
                .filter(|p| !p.destroyed)
                .max_by(|a, b| {
                    a.body
                        .position
                        .y
                        .partial_cmp(&b.body.position.y)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });

            let target_x = match pickup {
                Some(p) if ball_is_safe => p.body.center().x,
                _ => ball.center().x,
            };

            // Meet the ball off-center so paddle hits keep some angle
            let half_width = session.paddle.body.half_extents().x;
            let aim = target_x - aim_offset(session.frames) * half_width;

            let paddle_x = session.paddle.body.center().x;
            let dead_zone = session.paddle.body.size.x * 0.05;
            input.left = aim < paddle_x - dead_zone;
            input.right = aim > paddle_x + dead_zone;
        }
    }
}

/// Slowly wandering hit offset, as a fraction of the paddle half-width
fn aim_offset(frames: u64) -> f32 {
    let t = frames as f32 * 0.01;
    t.sin() * 0.3 + (t * 0.7).sin() * 0.15
}

fn process_input(
    session: &mut GameSession,
    input: &TickInput,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    match session.phase {
        GamePhase::Menu => {
            if input.confirm {
                session.lives = session.settings.starting_lives;
                log::info!(
                    "Starting level {} with {} lives",
                    session.level + 1,
                    session.lives
                );
                session.set_phase(GamePhase::Active, events);
            } else if input.next_level {
                session.level = (session.level + 1) % session.levels.len();
                log::debug!("Selected level {}", session.level + 1);
            } else if input.previous_level {
                session.level = session
                    .level
                    .checked_sub(1)
                    .unwrap_or(session.levels.len() - 1);
                log::debug!("Selected level {}", session.level + 1);
            }
        }
        GamePhase::Win => {
            if input.confirm {
                session.effects.chaos = false;
                session.set_phase(GamePhase::Menu, events);
            }
        }
        GamePhase::Active => {
            let step = PLAYER_VELOCITY * dt;
            let mut delta = 0.0;
            if input.left {
                delta -= step;
            }
            if input.right {
                delta += step;
            }
            if delta != 0.0 {
                let moved = session.paddle.slide(delta, session.width);
                if session.ball.stuck {
                    session.ball.body.position.x += moved;
                }
            }
            if input.launch {
                session.ball.stuck = false;
            }
        }
    }
}

/// One frame of active play
fn update(session: &mut GameSession, dt: f32, events: &mut Vec<GameEvent>) {
    session.frames += 1;

    session.ball.advance(dt, session.width);

    // Collisions
    let bounce = session.settings.paddle_bounce();
    let level = session.level;
    let hits = collision::resolve(
        &mut session.ball,
        &mut session.levels[level].bricks,
        &session.paddle,
        bounce,
    );
    for hit in hits {
        match hit {
            GameEvent::BrickDestroyed { position, .. } => {
                for power_up in powerup::spawn_for(position, &mut session.rng) {
                    events.push(GameEvent::PowerUpSpawned {
                        kind: power_up.kind,
                        position,
                    });
                    session.power_ups.push(power_up);
                }
            }
            GameEvent::SolidBrickHit { .. } => {
                if session.settings.effective_screen_shake() {
                    session.effects.start_shake(SHAKE_DURATION);
                }
            }
            _ => {}
        }
        events.push(hit);
    }

    // Power-ups
    let mut targets = EffectTargets {
        ball: &mut session.ball,
        paddle: &mut session.paddle,
        effects: &mut session.effects,
    };
    let power_up_events = powerup::advance(dt, &mut session.power_ups, &mut targets, session.height);
    events.extend(power_up_events);

    // Particle trail
    if session.settings.particles {
        let ball = &session.ball;
        session.particles.update(
            dt,
            ball.position(),
            ball.velocity,
            NEW_PARTICLES_PER_FRAME,
            Vec2::splat(ball.radius / 2.0),
        );
    }

    session.effects.advance(dt);

    // Ball lost
    if session.ball.position().y >= session.height {
        session.lives = session.lives.saturating_sub(1);
        log::info!("Ball lost, {} lives left", session.lives);
        events.push(GameEvent::LifeLost {
            remaining: session.lives,
        });
        if session.lives == 0 {
            session.reset_level();
            events.push(GameEvent::GameOver);
            session.set_phase(GamePhase::Menu, events);
        }
        session.reset_player();
        session.particles.clear();
    }

    // Level cleared
    if session.phase == GamePhase::Active && session.current_level().is_completed() {
        let level = session.level;
        log::info!("Level {} cleared in {} frames", level + 1, session.frames);
        session.reset_level();
        session.reset_player();
        session.effects.chaos = true;
        events.push(GameEvent::LevelCompleted { level });
        session.set_phase(GamePhase::Win, events);
    }
}
