//! Scene draw list

use glam::{Vec2, Vec4};

use super::Renderable;
use crate::sim::{GameSession, PowerUpKind};

pub const BACKGROUND: &str = "background";
pub const BALL: &str = "face";
pub const BLOCK: &str = "block";
pub const BLOCK_SOLID: &str = "block_solid";
pub const PADDLE: &str = "paddle";
pub const PARTICLE: &str = "particle";

/// Every texture `draw_session` may ask for
pub const TEXTURES: [&str; 12] = [
    BACKGROUND,
    BALL,
    BLOCK,
    BLOCK_SOLID,
    PADDLE,
    PARTICLE,
    PowerUpKind::Speed.spec().texture,
    PowerUpKind::Sticky.spec().texture,
    PowerUpKind::PassThrough.spec().texture,
    PowerUpKind::PadSizeIncrease.spec().texture,
    PowerUpKind::Confuse.spec().texture,
    PowerUpKind::Chaos.spec().texture,
];

/// Issue the draws for one frame, back to front
pub fn draw_session<R: Renderable>(session: &GameSession, renderer: &mut R) {
    renderer.draw_sprite(
        BACKGROUND,
        Vec2::ZERO,
        Vec2::new(session.width, session.height),
        0.0,
        Vec4::ONE,
    );

    for brick in session.current_level().bricks.iter().filter(|b| !b.destroyed) {
        let texture = if brick.solid { BLOCK_SOLID } else { BLOCK };
        renderer.draw_sprite(
            texture,
            brick.body.position,
            brick.body.size,
            0.0,
            brick.tint.extend(1.0),
        );
    }

    let paddle = &session.paddle;
    renderer.draw_sprite(
        PADDLE,
        paddle.body.position,
        paddle.body.size,
        0.0,
        paddle.tint.extend(1.0),
    );

    // Trail only while the ball is in flight
    if !session.ball.stuck {
        for particle in session.particles.alive() {
            renderer.draw_sprite(
                PARTICLE,
                particle.position,
                Vec2::splat(10.0),
                0.0,
                particle.color,
            );
        }
    }

    for power_up in session.power_ups.iter().filter(|p| !p.destroyed) {
        let spec = power_up.kind.spec();
        renderer.draw_sprite(
            spec.texture,
            power_up.body.position,
            power_up.body.size,
            0.0,
            spec.tint.extend(1.0),
        );
    }

    let ball = &session.ball;
    renderer.draw_sprite(BALL, ball.position(), ball.body.size, 0.0, ball.tint.extend(1.0));
}
