//! Collision detection and response
//!
//! Ball against the level bricks, then ball against the paddle. Bricks are
//! swept linearly in level order; a level holds at most a few hundred.

use glam::Vec2;

use super::geometry::{Direction, circle_aabb_contact};
use super::level::Brick;
use super::state::{Ball, GameEvent, Paddle};
use crate::consts::INITIAL_BALL_VELOCITY;

/// How the paddle redirects the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleBounce {
    /// Horizontal deflection factor
    pub strength: f32,
    /// Clamp the hit offset to the paddle half-width
    pub clamp_percentage: bool,
}

impl Default for PaddleBounce {
    fn default() -> Self {
        Self {
            strength: crate::consts::PADDLE_BOUNCE_STRENGTH,
            clamp_percentage: false,
        }
    }
}

/// Resolve one frame of ball collisions.
///
/// Destroys non-solid bricks on contact and bounces the ball, unless it is in
/// pass-through mode and the brick is destructible. Reports what happened;
/// power-up spawning and screen shake are left to the caller.
pub fn resolve(
    ball: &mut Ball,
    bricks: &mut [Brick],
    paddle: &Paddle,
    bounce: PaddleBounce,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for (index, brick) in bricks.iter_mut().enumerate() {
        if brick.destroyed {
            continue;
        }
        let Some(contact) = circle_aabb_contact(ball.circle(), &brick.body) else {
            continue;
        };

        if brick.solid {
            events.push(GameEvent::SolidBrickHit { index });
        } else {
            brick.destroyed = true;
            events.push(GameEvent::BrickDestroyed {
                index,
                position: brick.body.position,
            });
        }

        if !(ball.pass_through && !brick.solid) {
            bounce_off(ball, contact.direction, contact.difference);
        }
    }

    if !ball.stuck && circle_aabb_contact(ball.circle(), &paddle.body).is_some() {
        paddle_bounce(ball, paddle, bounce);
        events.push(GameEvent::PaddleHit);
    }

    events
}

/// Reflect the ball along the contact axis and push it out of the box
fn bounce_off(ball: &mut Ball, direction: Direction, difference: Vec2) {
    if direction.is_horizontal() {
        ball.velocity.x = -ball.velocity.x;
        let penetration = ball.radius - difference.x.abs();
        if direction == Direction::Left {
            ball.body.position.x += penetration;
        } else {
            ball.body.position.x -= penetration;
        }
    } else {
        ball.velocity.y = -ball.velocity.y;
        let penetration = ball.radius - difference.y.abs();
        if direction == Direction::Up {
            ball.body.position.y -= penetration;
        } else {
            ball.body.position.y += penetration;
        }
    }
}

/// Redirect by hit offset from the paddle center, keeping the speed.
/// Always sends the ball upward.
fn paddle_bounce(ball: &mut Ball, paddle: &Paddle, bounce: PaddleBounce) {
    let center_board = paddle.body.center().x;
    let distance = ball.center().x - center_board;
    let mut percentage = distance / paddle.body.half_extents().x;
    if bounce.clamp_percentage {
        percentage = percentage.clamp(-1.0, 1.0);
    }

    let old_velocity = ball.velocity;
    let redirected = Vec2::new(
        INITIAL_BALL_VELOCITY.x * percentage * bounce.strength,
        -old_velocity.y.abs(),
    );
    ball.velocity = redirected.normalize_or_zero() * old_velocity.length();
    ball.stuck = ball.sticky;
}
