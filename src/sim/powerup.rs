//! Power-up lifecycle: drop, fall, collect, tick down, revert, prune

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, GameEvent, Paddle, PostEffects, PowerUp, PowerUpKind};
use crate::consts::{PAD_SIZE_INCREASE, SPEED_MULTIPLIER};
use crate::WHITE;

/// Roll every kind independently for a destroyed brick at `position`.
/// A brick may drop nothing, one, or several power-ups.
pub fn spawn_for<R: Rng>(position: Vec2, rng: &mut R) -> Vec<PowerUp> {
    PowerUpKind::ALL
        .into_iter()
        .filter(|kind| rng.random_range(0..kind.spec().chance) == 0)
        .map(|kind| PowerUp::new(kind, position))
        .collect()
}

/// Entities a power-up effect touches
pub struct EffectTargets<'a> {
    pub ball: &'a mut Ball,
    pub paddle: &'a mut Paddle,
    pub effects: &'a mut PostEffects,
}

/// Apply the gameplay effect of a freshly collected power-up
pub fn activate(kind: PowerUpKind, t: &mut EffectTargets<'_>) {
    match kind {
        PowerUpKind::Speed => t.ball.velocity *= SPEED_MULTIPLIER,
        PowerUpKind::Sticky => {
            t.ball.sticky = true;
            t.paddle.tint = kind.spec().tint;
        }
        PowerUpKind::PassThrough => {
            t.ball.pass_through = true;
            t.ball.tint = glam::Vec3::new(1.0, 0.5, 0.5);
        }
        PowerUpKind::PadSizeIncrease => t.paddle.body.size.x += PAD_SIZE_INCREASE,
        // Confuse and chaos only exclude each other at activation time
        PowerUpKind::Confuse => {
            if !t.effects.chaos {
                t.effects.confuse = true;
            }
        }
        PowerUpKind::Chaos => {
            if !t.effects.confuse {
                t.effects.chaos = true;
            }
        }
    }
}

/// Undo a timed effect once the last power-up of its kind runs out
pub fn revert(kind: PowerUpKind, t: &mut EffectTargets<'_>) {
    match kind {
        PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => {}
        PowerUpKind::Sticky => {
            t.ball.sticky = false;
            t.paddle.tint = WHITE;
        }
        PowerUpKind::PassThrough => {
            t.ball.pass_through = false;
            t.ball.tint = WHITE;
        }
        PowerUpKind::Confuse => t.effects.confuse = false,
        PowerUpKind::Chaos => t.effects.chaos = false,
    }
}

/// Another collected power-up of `kind` is still ticking
fn is_other_active(power_ups: &[PowerUp], kind: PowerUpKind) -> bool {
    power_ups.iter().any(|p| p.activated && p.kind == kind)
}

/// Advance every live power-up by `dt`.
///
/// Falling power-ups that pass `height` are lost; those touching the paddle
/// are collected and applied. Collected timed power-ups count down and revert
/// their effect on expiry, unless another of the same kind is still active.
/// Spent power-ups are pruned at the end.
pub fn advance(
    dt: f32,
    power_ups: &mut Vec<PowerUp>,
    targets: &mut EffectTargets<'_>,
    height: f32,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for i in 0..power_ups.len() {
        let power_up = &mut power_ups[i];
        power_up.body.position += power_up.velocity * dt;

        if !power_up.destroyed {
            if power_up.body.position.y >= height {
                power_up.destroyed = true;
            } else if power_up.body.overlaps(&targets.paddle.body) {
                power_up.destroyed = true;
                power_up.activated = true;
                activate(power_up.kind, targets);
                log::debug!("Power-up {:?} collected", power_up.kind);
                events.push(GameEvent::PowerUpActivated {
                    kind: power_up.kind,
                });
            }
        }

        if power_up.activated {
            power_up.duration -= dt;
            if power_up.duration <= 0.0 {
                power_up.activated = false;
                let kind = power_up.kind;
                if !is_other_active(power_ups, kind) {
                    revert(kind, targets);
                }
                events.push(GameEvent::PowerUpExpired { kind });
            }
        }
    }

    power_ups.retain(|p| !p.is_spent());
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const HEIGHT: f32 = 600.0;

    struct Fixture {
        ball: Ball,
        paddle: Paddle,
        effects: PostEffects,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                ball: Ball::new(Vec2::new(387.5, 555.0), BALL_RADIUS, INITIAL_BALL_VELOCITY),
                paddle: Paddle::new(Vec2::new(350.0, 580.0), PLAYER_SIZE),
                effects: PostEffects::default(),
            }
        }

        fn targets(&mut self) -> EffectTargets<'_> {
            EffectTargets {
                ball: &mut self.ball,
                paddle: &mut self.paddle,
                effects: &mut self.effects,
            }
        }
    }

    /// A power-up already resting on the paddle
    fn on_paddle(kind: PowerUpKind) -> PowerUp {
        PowerUp::new(kind, Vec2::new(370.0, 565.0))
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let x = spawn_for(Vec2::new(10.0, 20.0), &mut a);
            let y = spawn_for(Vec2::new(10.0, 20.0), &mut b);
            assert_eq!(
                x.iter().map(|p| p.kind).collect::<Vec<_>>(),
                y.iter().map(|p| p.kind).collect::<Vec<_>>()
            );
            assert!(x.iter().all(|p| p.body.position == Vec2::new(10.0, 20.0)));
        }
    }

    #[test]
    fn test_spawn_rates_favor_negative_kinds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut counts = std::collections::HashMap::new();
        for _ in 0..30_000 {
            for p in spawn_for(Vec2::ZERO, &mut rng) {
                *counts.entry(p.kind).or_insert(0u32) += 1;
            }
        }
        // Expect ~2000 for 1/15 kinds, ~400 for 1/75 kinds
        for kind in [PowerUpKind::Confuse, PowerUpKind::Chaos] {
            let n = counts[&kind];
            assert!((1600..2400).contains(&n), "{kind:?}: {n}");
        }
        for kind in [
            PowerUpKind::Speed,
            PowerUpKind::Sticky,
            PowerUpKind::PassThrough,
            PowerUpKind::PadSizeIncrease,
        ] {
            let n = counts[&kind];
            assert!((250..600).contains(&n), "{kind:?}: {n}");
        }
    }

    #[test]
    fn test_falling_power_up_drifts_down() {
        let mut f = Fixture::new();
        let mut power_ups = vec![PowerUp::new(PowerUpKind::Speed, Vec2::new(10.0, 10.0))];

        let events = advance(0.5, &mut power_ups, &mut f.targets(), HEIGHT);

        assert!(events.is_empty());
        assert_eq!(power_ups[0].body.position, Vec2::new(10.0, 85.0));
    }

    #[test]
    fn test_missed_power_up_is_pruned() {
        let mut f = Fixture::new();
        let mut power_ups = vec![PowerUp::new(PowerUpKind::Sticky, Vec2::new(10.0, 599.0))];

        advance(0.1, &mut power_ups, &mut f.targets(), HEIGHT);

        assert!(power_ups.is_empty());
        assert!(!f.ball.sticky);
    }

    #[test]
    fn test_spent_power_up_pruned_in_one_call() {
        let mut f = Fixture::new();
        let mut spent = PowerUp::new(PowerUpKind::Chaos, Vec2::new(10.0, 10.0));
        spent.destroyed = true;
        let mut power_ups = vec![spent];

        advance(0.0, &mut power_ups, &mut f.targets(), HEIGHT);

        assert!(power_ups.is_empty());
    }

    #[test]
    fn test_activated_power_up_persists_until_expiry() {
        let mut f = Fixture::new();
        let mut power_ups = vec![on_paddle(PowerUpKind::PassThrough)];

        let events = advance(0.0, &mut power_ups, &mut f.targets(), HEIGHT);
        assert_eq!(
            events,
            vec![GameEvent::PowerUpActivated {
                kind: PowerUpKind::PassThrough
            }]
        );
        assert!(f.ball.pass_through);
        assert_eq!(f.ball.tint, glam::Vec3::new(1.0, 0.5, 0.5));

        advance(9.0, &mut power_ups, &mut f.targets(), HEIGHT);
        assert_eq!(power_ups.len(), 1);
        assert!(power_ups[0].destroyed && power_ups[0].activated);
        assert!(f.ball.pass_through);

        let events = advance(1.0, &mut power_ups, &mut f.targets(), HEIGHT);
        assert!(power_ups.is_empty());
        assert!(!f.ball.pass_through);
        assert_eq!(f.ball.tint, WHITE);
        assert_eq!(
            events,
            vec![GameEvent::PowerUpExpired {
                kind: PowerUpKind::PassThrough
            }]
        );
    }

    #[test]
    fn test_instant_power_ups() {
        let mut f = Fixture::new();
        let mut power_ups = vec![
            on_paddle(PowerUpKind::Speed),
            on_paddle(PowerUpKind::PadSizeIncrease),
        ];

        advance(0.016, &mut power_ups, &mut f.targets(), HEIGHT);

        assert!(power_ups.is_empty());
        assert!((f.ball.velocity - INITIAL_BALL_VELOCITY * 1.2).length() < 1e-3);
        assert_eq!(f.paddle.body.size.x, PLAYER_SIZE.x + 50.0);
    }

    #[test]
    fn test_overlapping_sticky_not_reverted_early() {
        let mut f = Fixture::new();
        let mut power_ups = vec![on_paddle(PowerUpKind::Sticky)];
        advance(0.0, &mut power_ups, &mut f.targets(), HEIGHT);
        assert!(f.ball.sticky);
        assert_eq!(f.paddle.tint, PowerUpKind::Sticky.spec().tint);

        // A second sticky collected 5s later
        advance(5.0, &mut power_ups, &mut f.targets(), HEIGHT);
        power_ups.push(on_paddle(PowerUpKind::Sticky));
        advance(0.0, &mut power_ups, &mut f.targets(), HEIGHT);
        assert_eq!(power_ups.len(), 2);

        // First one expires, second still running
        let events = advance(15.0, &mut power_ups, &mut f.targets(), HEIGHT);
        assert_eq!(
            events,
            vec![GameEvent::PowerUpExpired {
                kind: PowerUpKind::Sticky
            }]
        );
        assert_eq!(power_ups.len(), 1);
        assert!(f.ball.sticky);

        advance(5.0, &mut power_ups, &mut f.targets(), HEIGHT);
        assert!(power_ups.is_empty());
        assert!(!f.ball.sticky);
        assert_eq!(f.paddle.tint, WHITE);
    }

    #[test]
    fn test_chaos_suppressed_while_confuse_active() {
        let mut f = Fixture::new();
        let mut power_ups = vec![on_paddle(PowerUpKind::Confuse)];
        advance(0.0, &mut power_ups, &mut f.targets(), HEIGHT);
        assert!(f.effects.confuse);

        power_ups.push(on_paddle(PowerUpKind::Chaos));
        advance(0.0, &mut power_ups, &mut f.targets(), HEIGHT);
        assert!(f.effects.confuse);
        assert!(!f.effects.chaos);
    }

    #[test]
    fn test_confuse_suppressed_while_chaos_active() {
        let mut f = Fixture::new();
        let mut power_ups = vec![on_paddle(PowerUpKind::Chaos)];
        advance(0.0, &mut power_ups, &mut f.targets(), HEIGHT);
        assert!(f.effects.chaos);

        power_ups.push(on_paddle(PowerUpKind::Confuse));
        advance(0.0, &mut power_ups, &mut f.targets(), HEIGHT);
        assert!(f.effects.chaos);
        assert!(!f.effects.confuse);
    }

    #[test]
    fn test_confuse_expiry_does_not_restore_suppressed_chaos() {
        let mut f = Fixture::new();
        let mut power_ups = vec![on_paddle(PowerUpKind::Confuse)];
        advance(0.0, &mut power_ups, &mut f.targets(), HEIGHT);
        advance(5.0, &mut power_ups, &mut f.targets(), HEIGHT);
        power_ups.push(on_paddle(PowerUpKind::Chaos));
        advance(0.0, &mut power_ups, &mut f.targets(), HEIGHT);

        // Confuse runs out; the chaos power-up is still ticking but was suppressed
        advance(10.0, &mut power_ups, &mut f.targets(), HEIGHT);
        assert_eq!(power_ups.len(), 1);
        assert_eq!(power_ups[0].kind, PowerUpKind::Chaos);
        assert!(!f.effects.confuse);
        assert!(!f.effects.chaos);
    }
}
