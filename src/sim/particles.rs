//! Ball trail particles
//!
//! A fixed pool of particles reused in place. Dead slots are found with a
//! two-phase scan: forward from the last slot handed out, then from the start.
//! Trails respawn in order, so the next dead slot is almost always just ahead.

use glam::{Vec2, Vec4};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::Body;

/// Alpha lost per second
const FADE_RATE: f32 = 2.5;

/// A single trail particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Vec4,
    /// Seconds left; dead at 0
    pub life: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: Vec4::ONE,
            life: 0.0,
        }
    }
}

impl Particle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Fixed-capacity particle pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleGenerator {
    particles: Vec<Particle>,
    last_used: usize,
}

impl ParticleGenerator {
    pub fn new(amount: usize) -> Self {
        Self {
            particles: vec![Particle::default(); amount],
            last_used: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Particles that should be drawn
    pub fn alive(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }

    /// Respawn `new_particles` around `source` and age the whole pool
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        dt: f32,
        source: &Body,
        new_particles: usize,
        offset: Vec2,
    ) {
        if self.particles.is_empty() {
            return;
        }
        for _ in 0..new_particles {
            let slot = self.first_unused();
            self.particles[slot] = Self::respawn(rng, source, offset);
        }
        for p in self.particles.iter_mut() {
            p.life -= dt;
            if p.is_alive() {
                p.pos -= p.vel * dt;
                p.color.w -= dt * FADE_RATE;
            }
        }
    }

    /// Kill every particle
    pub fn clear(&mut self) {
        self.particles.fill(Particle::default());
        self.last_used = 0;
    }

    /// Index of a dead slot, or slot 0 when the pool is saturated
    fn first_unused(&mut self) -> usize {
        let len = self.particles.len();
        let found = (self.last_used..len)
            .chain(0..self.last_used)
            .find(|&i| !self.particles[i].is_alive());
        self.last_used = found.unwrap_or(0);
        self.last_used
    }

    fn respawn<R: Rng + ?Sized>(rng: &mut R, source: &Body, offset: Vec2) -> Particle {
        let jitter = rng.random_range(-50..50) as f32 / 10.0;
        let shade = 0.5 + rng.random_range(0..100) as f32 / 100.0;
        Particle {
            pos: source.pos + Vec2::splat(jitter) + offset,
            vel: source.vel * 0.1,
            color: Vec4::new(shade, shade, shade, 1.0),
            life: 1.0,
        }
    }
}
