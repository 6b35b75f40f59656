//! Playfield bodies
//!
//! Every object on the playfield is a `Body`: an axis-aligned rectangle with
//! a velocity and a tint. The ball composes a body with its circle-specific
//! state; bricks and the paddle are plain bodies.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::powerup::PowerUpKind;

/// Image handle resolved by the external resource cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Background,
    Paddle,
    Ball,
    Block,
    BlockSolid,
    Particle,
    PowerUp(PowerUpKind),
}

impl Sprite {
    /// Resource cache key
    pub fn key(&self) -> &'static str {
        match self {
            Sprite::Background => "background",
            Sprite::Paddle => "paddle",
            Sprite::Ball => "face",
            Sprite::Block => "block",
            Sprite::BlockSolid => "block_solid",
            Sprite::Particle => "particle",
            Sprite::PowerUp(kind) => match kind {
                PowerUpKind::Speed => "powerup_speed",
                PowerUpKind::Sticky => "powerup_sticky",
                PowerUpKind::PassThrough => "powerup_passthrough",
                PowerUpKind::PadSizeIncrease => "powerup_increase",
                PowerUpKind::Confuse => "powerup_confuse",
                PowerUpKind::Chaos => "powerup_chaos",
            },
        }
    }
}

/// A rectangular playfield entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub color: Vec3,
    /// Rotation in degrees around the body centre
    pub rotation: f32,
    /// Solid bodies cannot be destroyed
    pub solid: bool,
    pub destroyed: bool,
    pub sprite: Sprite,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, sprite: Sprite) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            color: Vec3::ONE,
            rotation: 0.0,
            solid: false,
            destroyed: false,
            sprite,
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// The ball: a body whose collision shape is the inscribed circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub body: Body,
    pub radius: f32,
    /// Glued to the paddle, waiting for launch
    pub stuck: bool,
    /// Re-glues to the paddle on the next paddle contact
    pub sticky: bool,
    /// Destroys non-solid bricks without bouncing off them
    pub pass_through: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, vel: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(radius * 2.0), Sprite::Ball).with_velocity(vel),
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    /// Centre of the collision circle
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.pos + Vec2::splat(self.radius)
    }

    /// Euler-integrate position (no wall handling)
    pub fn advance(&mut self, dt: f32) {
        if !self.stuck {
            self.body.pos += self.body.vel * dt;
        }
    }

    /// Reflect off the left, right and top edges, clamping back inside.
    /// The bottom edge is open.
    pub fn bounce_off_walls(&mut self, width: f32) {
        if self.stuck {
            return;
        }
        let body = &mut self.body;
        if body.pos.x <= 0.0 {
            body.vel.x = -body.vel.x;
            body.pos.x = 0.0;
        } else if body.pos.x + body.size.x >= width {
            body.vel.x = -body.vel.x;
            body.pos.x = width - body.size.x;
        }
        if body.pos.y <= 0.0 {
            body.vel.y = -body.vel.y;
            body.pos.y = 0.0;
        }
    }

    /// Advance one frame and handle wall bounces; returns the new position
    pub fn step(&mut self, dt: f32, width: f32) -> Vec2 {
        self.advance(dt);
        self.bounce_off_walls(width);
        self.body.pos
    }

    /// Re-glue the ball at `pos` with `vel`, clearing power-up state
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.body.pos = pos;
        self.body.vel = vel;
        self.body.color = Vec3::ONE;
        self.stuck = true;
        self.sticky = false;
        self.pass_through = false;
    }
}
