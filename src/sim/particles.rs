//! Particle trail behind the ball
//!
//! Fixed-size pool; dead particles are recycled. Has its own RNG stream so
//! visuals never shift gameplay randomness.

use glam::{Vec2, Vec4};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Salt separating the particle stream from the gameplay stream
const PARTICLE_STREAM: u64 = 0x5eed_7a11;

/// A particle for visual effects
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Vec4,
    /// Seconds left, dead at 0
    pub life: f32,
}

#[derive(Debug, Clone)]
pub struct ParticleGenerator {
    particles: Vec<Particle>,
    /// Search hint for the next dead particle
    last_used: usize,
    rng: Pcg32,
}

impl ParticleGenerator {
    pub fn new(amount: usize, seed: u64) -> Self {
        Self {
            particles: vec![Particle::default(); amount],
            last_used: 0,
            rng: Pcg32::seed_from_u64(seed ^ PARTICLE_STREAM),
        }
    }

    /// Spawn `new_particles` at the emitter and age every living one
    pub fn update(
        &mut self,
        dt: f32,
        emitter_position: Vec2,
        emitter_velocity: Vec2,
        new_particles: usize,
        offset: Vec2,
    ) {
        if self.particles.is_empty() {
            return;
        }
        for _ in 0..new_particles {
            let index = self.first_unused();
            let particle = self.respawn(emitter_position, emitter_velocity, offset);
            self.particles[index] = particle;
        }

        for p in &mut self.particles {
            p.life -= dt;
            if p.life > 0.0 {
                p.position -= p.velocity * dt;
                p.color.w -= dt * 2.5;
            }
        }
    }

    /// Living particles, for drawing
    pub fn alive(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.life > 0.0)
    }

    /// Kill every particle
    pub fn clear(&mut self) {
        self.particles.fill(Particle::default());
        self.last_used = 0;
    }

    /// Index of a dead particle, or 0 when the pool is saturated
    fn first_unused(&mut self) -> usize {
        let len = self.particles.len();
        let found = (self.last_used..len)
            .chain(0..self.last_used)
            .find(|&i| self.particles[i].life <= 0.0);
        match found {
            Some(i) => {
                self.last_used = i;
                i
            }
            None => {
                self.last_used = 0;
                0
            }
        }
    }

    fn respawn(&mut self, position: Vec2, velocity: Vec2, offset: Vec2) -> Particle {
        let jitter = (self.rng.random_range(0..100i32) - 50) as f32 / 10.0;
        let shade = 0.5 + self.rng.random_range(0..100i32) as f32 / 100.0;
        Particle {
            position: position + Vec2::splat(jitter) + offset,
            velocity: velocity * 0.1,
            color: Vec4::new(shade, shade, shade, 1.0),
            life: 1.0,
        }
    }
}
