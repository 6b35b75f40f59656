//! Power-up pickups
//!
//! Pickups drop from destroyed bricks, fall toward the paddle and, once
//! collected, keep a countdown so their effect can be rolled back later.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Body, Sprite};
use crate::consts::{POWERUP_SIZE, POWERUP_VELOCITY};
use crate::tuning::Tuning;

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

impl PowerUpKind {
    /// Spawn roll order
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    /// Negative pickups hamper the player and drop more often
    pub fn is_negative(self) -> bool {
        matches!(self, PowerUpKind::Confuse | PowerUpKind::Chaos)
    }

    /// Pickup tint
    pub fn color(self) -> Vec3 {
        match self {
            PowerUpKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerUpKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerUpKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerUpKind::PadSizeIncrease => Vec3::new(1.0, 0.6, 0.4),
            PowerUpKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerUpKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
        }
    }
}

/// A falling (or collected and still counting down) power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
    /// Remaining effect time in seconds (0 = permanent)
    pub duration: f32,
    /// Effect currently in force
    pub activated: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, duration: f32, pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, POWERUP_SIZE, Sprite::PowerUp(kind))
                .with_color(kind.color())
                .with_velocity(POWERUP_VELOCITY),
            kind,
            duration,
            activated: false,
        }
    }

    /// Still falling and collectable
    #[inline]
    pub fn is_falling(&self) -> bool {
        !self.body.destroyed
    }

    /// Safe to drop from the active list
    #[inline]
    pub fn is_spent(&self) -> bool {
        self.body.destroyed && !self.activated
    }
}

/// One 1-in-`chance` Bernoulli trial; a chance of 0 never succeeds
pub fn should_spawn<R: Rng + ?Sized>(rng: &mut R, chance: u32) -> bool {
    chance > 0 && rng.random_range(0..chance) == 0
}

/// Roll every power-up type independently for a destroyed brick at `pos`
pub fn roll_spawns<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, pos: Vec2) -> Vec<PowerUp> {
    PowerUpKind::ALL
        .into_iter()
        .filter(|&kind| should_spawn(rng, tuning.spawn_chance(kind)))
        .map(|kind| PowerUp::new(kind, tuning.duration(kind), pos))
        .collect()
}
