//! Game state and core simulation types
//!
//! Everything one frame of simulation touches lives in `GameState`, owned by
//! the frame-loop driver and passed by reference into `tick`.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Ball, Body, Sprite};
use super::level::{Level, LevelError};
use super::particles::ParticleGenerator;
use super::powerup::{PowerUp, PowerUpKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level select, waiting for Enter
    Menu,
    /// Active gameplay
    Active,
    /// Level cleared, waiting for Enter
    Win,
}

/// Post-processing toggles consumed by the renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    pub confuse: bool,
    pub chaos: bool,
    pub shake: bool,
    /// Seconds of shake left
    pub shake_time: f32,
}

impl Effects {
    /// Start (or restart) the shake countdown
    pub fn start_shake(&mut self, duration: f32) {
        self.shake_time = duration;
        self.shake = true;
    }

    /// Count the shake down, switching it off once elapsed
    pub fn update_shake(&mut self, dt: f32) {
        if self.shake_time > 0.0 {
            self.shake_time -= dt;
            if self.shake_time <= 0.0 {
                self.shake = false;
            }
        }
    }

    /// Enable confuse unless chaos is already showing
    pub fn enable_confuse(&mut self) {
        if !self.chaos {
            self.confuse = true;
        }
    }

    /// Enable chaos unless confuse is already showing
    pub fn enable_chaos(&mut self) {
        if !self.confuse {
            self.chaos = true;
        }
    }
}

/// Things that happened during one update, for audio/HUD collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickDestroyed { pos: Vec2 },
    SolidBrickHit,
    PaddleHit,
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    LifeLost { lives_left: u32 },
    GameOver,
    LevelCompleted { level: usize },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Playfield size in pixels
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub lives: u32,
    /// Index into `levels`
    pub level: usize,
    pub levels: Vec<Level>,
    pub paddle: Body,
    pub ball: Ball,
    /// Falling pickups and collected ones still counting down
    pub power_ups: Vec<PowerUp>,
    pub effects: Effects,
    pub particles: ParticleGenerator,
    /// Events raised by the latest update
    pub events: Vec<GameEvent>,
    /// Seconds simulated so far
    pub time: f32,
    pub(super) rng: Pcg32,
}

impl GameState {
    /// New game on the built-in levels, starting in the menu
    pub fn new(seed: u64) -> Result<Self, LevelError> {
        let levels = Level::builtin(SCREEN_WIDTH, SCREEN_HEIGHT / 2.0)?;
        Ok(Self::with_levels(Tuning::default(), levels, seed))
    }

    /// New game on the given levels
    pub fn with_levels(tuning: Tuning, levels: Vec<Level>, seed: u64) -> Self {
        let paddle = Body::new(Vec2::ZERO, PLAYER_SIZE, Sprite::Paddle);
        let ball = Ball::new(Vec2::ZERO, BALL_RADIUS, INITIAL_BALL_VELOCITY);
        let mut state = Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            phase: GamePhase::Menu,
            lives: tuning.lives,
            level: 0,
            levels,
            paddle,
            ball,
            power_ups: Vec::new(),
            effects: Effects::default(),
            particles: ParticleGenerator::new(tuning.particle_count),
            events: Vec::new(),
            time: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };
        state.reset_player();
        state
    }

    /// Seeded source for spawn rolls and particle jitter
    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn current_level(&self) -> Option<&Level> {
        self.levels.get(self.level)
    }

    pub fn current_level_mut(&mut self) -> Option<&mut Level> {
        self.levels.get_mut(self.level)
    }

    /// Bricks of the current level (empty if there are no levels)
    pub fn bricks(&self) -> &[Body] {
        self.current_level().map(|l| l.bricks.as_slice()).unwrap_or(&[])
    }

    /// True when the current level has no destructible brick left standing
    pub fn level_completed(&self) -> bool {
        self.current_level().is_some_and(Level::is_completed)
    }

    /// Cycle the selected level forward, wrapping around
    pub fn select_next_level(&mut self) {
        if !self.levels.is_empty() {
            self.level = (self.level + 1) % self.levels.len();
        }
    }

    /// Cycle the selected level backward, wrapping around
    pub fn select_previous_level(&mut self) {
        if !self.levels.is_empty() {
            self.level = self.level.checked_sub(1).unwrap_or(self.levels.len() - 1);
        }
    }

    /// Rebuild the current level's bricks and restore lives
    pub fn reset_level(&mut self) {
        if let Some(level) = self.current_level_mut() {
            level.reload();
        }
        self.lives = self.tuning.lives;
    }

    /// Put paddle and ball back at their start positions with no effects active
    pub fn reset_player(&mut self) {
        self.paddle.size = PLAYER_SIZE;
        self.paddle.pos = Vec2::new(
            self.width / 2.0 - PLAYER_SIZE.x / 2.0,
            self.height - PLAYER_SIZE.y,
        );
        self.paddle.color = Vec3::ONE;

        let radius = self.ball.radius;
        let ball_pos = self.paddle.pos + Vec2::new(PLAYER_SIZE.x / 2.0 - radius, -radius * 2.0);
        self.ball.reset(ball_pos, INITIAL_BALL_VELOCITY);

        self.effects.confuse = false;
        self.effects.chaos = false;
        self.power_ups.clear();
    }

    /// Keep the paddle inside the playfield
    pub fn clamp_paddle(&mut self) {
        let max_x = (self.width - self.paddle.size.x).max(0.0);
        self.paddle.pos.x = self.paddle.pos.x.clamp(0.0, max_x);
    }

    /// Whether another collected power-up of `kind` is still in force
    pub fn is_other_power_up_active(&self, kind: PowerUpKind) -> bool {
        self.power_ups
            .iter()
            .any(|p| p.activated && p.kind == kind)
    }
}
