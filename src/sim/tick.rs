//! Per-frame simulation step
//!
//! Input handling, ball movement, collision response, power-up lifecycle and
//! the menu / active / win transitions.

use glam::{Vec2, Vec3};

use super::body::{Ball, Body};
use super::collision::{CollisionResult, Direction, circle_rect_collision, rect_overlap};
use super::powerup::{PowerUpKind, roll_spawns};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Paddle tint while sticky is active
const STICKY_TINT: Vec3 = Vec3::new(1.0, 0.5, 1.0);
/// Ball tint while pass-through is active
const PASS_THROUGH_TINT: Vec3 = Vec3::new(1.0, 0.5, 0.5);

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    /// Release the ball (space)
    Launch,
    /// Start / leave the win screen (enter)
    Confirm,
    /// Next level in the menu (W)
    Up,
    /// Previous level in the menu (S)
    Down,
}

impl Key {
    pub const COUNT: usize = 6;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Key-state table fed by the windowing layer
///
/// `processed` latches one-shot keys so holding Enter or W does not repeat
/// every frame; it clears when the key is released.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    held: [bool; Key::COUNT],
    processed: [bool; Key::COUNT],
}

impl TickInput {
    pub fn press(&mut self, key: Key) {
        self.held[key.index()] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
        self.processed[key.index()] = false;
    }

    pub fn set(&mut self, key: Key, down: bool) {
        if down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// True once per press of `key`
    pub fn take_press(&mut self, key: Key) -> bool {
        let i = key.index();
        if self.held[i] && !self.processed[i] {
            self.processed[i] = true;
            true
        } else {
            false
        }
    }
}

/// Process input, then advance the simulation by `dt` seconds
pub fn tick(state: &mut GameState, input: &mut TickInput, dt: f32) {
    process_input(state, input, dt);
    update(state, dt);
}

/// Apply held keys for this frame
pub fn process_input(state: &mut GameState, input: &mut TickInput, dt: f32) {
    match state.phase {
        GamePhase::Menu => {
            if input.take_press(Key::Confirm) {
                log::info!("Starting level {}", state.level);
                state.phase = GamePhase::Active;
            }
            if input.take_press(Key::Up) {
                state.select_next_level();
            }
            if input.take_press(Key::Down) {
                state.select_previous_level();
            }
        }
        GamePhase::Win => {
            if input.take_press(Key::Confirm) {
                state.effects.chaos = false;
                state.phase = GamePhase::Menu;
            }
        }
        GamePhase::Active => {
            let velocity = PLAYER_VELOCITY * dt;
            let before = state.paddle.pos.x;
            if input.is_down(Key::Left) {
                state.paddle.pos.x -= velocity;
            }
            if input.is_down(Key::Right) {
                state.paddle.pos.x += velocity;
            }
            state.clamp_paddle();

            // A glued ball rides along with the paddle
            if state.ball.stuck {
                state.ball.body.pos.x += state.paddle.pos.x - before;
            }
            if input.is_down(Key::Launch) {
                state.ball.stuck = false;
            }
        }
    }
}

/// Advance the simulation by `dt` seconds
pub fn update(state: &mut GameState, dt: f32) {
    state.events.clear();
    state.time += dt;

    state.ball.step(dt, state.width);
    do_collisions(state);

    let offset = Vec2::splat(state.ball.radius / 2.0);
    state.particles.update(
        &mut state.rng,
        dt,
        &state.ball.body,
        state.tuning.particles_per_frame,
        offset,
    );

    update_power_ups(state, dt);
    state.effects.update_shake(dt);

    if state.ball.body.pos.y >= state.height {
        lose_life(state);
    }

    if state.phase == GamePhase::Active && state.level_completed() {
        complete_level(state);
    }
}

/// Bricks, then falling power-ups, then the paddle
pub fn do_collisions(state: &mut GameState) {
    collide_bricks(state);
    collide_power_ups(state);
    collide_paddle(state);
}

fn collide_bricks(state: &mut GameState) {
    let Some(level) = state.levels.get_mut(state.level) else {
        return;
    };

    for brick in level.bricks.iter_mut().filter(|b| !b.destroyed) {
        let result = circle_rect_collision(&state.ball, brick);
        if !result.hit {
            continue;
        }

        if brick.solid {
            state.effects.start_shake(state.tuning.shake_duration);
            state.events.push(GameEvent::SolidBrickHit);
        } else {
            brick.destroyed = true;
            state.events.push(GameEvent::BrickDestroyed { pos: brick.pos });

            for power_up in roll_spawns(&mut state.rng, &state.tuning, brick.pos) {
                log::debug!("Spawned {:?} at {}", power_up.kind, brick.pos);
                state.events.push(GameEvent::PowerUpSpawned(power_up.kind));
                state.power_ups.push(power_up);
            }
        }

        // Pass-through ploughs through destructible bricks
        if !(state.ball.pass_through && !brick.solid) {
            resolve_brick_hit(&mut state.ball, &result);
        }
    }
}

/// Reflect the ball off the struck face and push it back out of the brick
pub fn resolve_brick_hit(ball: &mut Ball, result: &CollisionResult) {
    let penetration = result.penetration(ball.radius);
    let body = &mut ball.body;
    match result.direction {
        Direction::Left => {
            body.vel.x = -body.vel.x;
            body.pos.x += penetration;
        }
        Direction::Right => {
            body.vel.x = -body.vel.x;
            body.pos.x -= penetration;
        }
        Direction::Up => {
            body.vel.y = -body.vel.y;
            body.pos.y -= penetration;
        }
        Direction::Down => {
            body.vel.y = -body.vel.y;
            body.pos.y += penetration;
        }
    }
}

fn collide_power_ups(state: &mut GameState) {
    let mut collected = Vec::new();
    for power_up in state.power_ups.iter_mut().filter(|p| p.is_falling()) {
        if power_up.body.pos.y >= state.height {
            power_up.body.destroyed = true;
            continue;
        }
        if rect_overlap(&state.paddle, &power_up.body) {
            power_up.activated = true;
            power_up.body.destroyed = true;
            collected.push(power_up.kind);
        }
    }

    for kind in collected {
        log::debug!("Collected {:?}", kind);
        activate_power_up(state, kind);
        state.events.push(GameEvent::PowerUpCollected(kind));
    }
}

fn collide_paddle(state: &mut GameState) {
    if state.ball.stuck {
        return;
    }
    if circle_rect_collision(&state.ball, &state.paddle).hit {
        paddle_bounce(
            &mut state.ball,
            &state.paddle,
            state.tuning.paddle_bounce_strength,
        );
        state.events.push(GameEvent::PaddleHit);
    }
}

/// Bounce the ball off the paddle.
///
/// Horizontal speed follows where the ball struck relative to the paddle
/// centre; vertical direction is always upward so a ball that sank into the
/// paddle cannot oscillate inside it. Overall speed is preserved.
pub fn paddle_bounce(ball: &mut Ball, paddle: &Body, strength: f32) {
    let half_width = paddle.size.x / 2.0;
    let distance = ball.center().x - (paddle.pos.x + half_width);
    let percentage = distance / half_width;

    let speed = ball.body.vel.length();
    let bounced = Vec2::new(
        INITIAL_BALL_VELOCITY.x * percentage * strength,
        -ball.body.vel.y.abs(),
    );
    ball.body.vel = bounced.try_normalize().unwrap_or(Vec2::NEG_Y) * speed;
    ball.stuck = ball.sticky;
}

/// Apply a collected power-up's effect
pub fn activate_power_up(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Speed => {
            state.ball.body.vel *= state.tuning.speed_multiplier;
        }
        PowerUpKind::Sticky => {
            state.ball.sticky = true;
            state.paddle.color = STICKY_TINT;
        }
        PowerUpKind::PassThrough => {
            state.ball.pass_through = true;
            state.ball.body.color = PASS_THROUGH_TINT;
        }
        PowerUpKind::PadSizeIncrease => {
            state.paddle.size.x += state.tuning.pad_size_increase;
            state.clamp_paddle();
        }
        PowerUpKind::Confuse => state.effects.enable_confuse(),
        PowerUpKind::Chaos => state.effects.enable_chaos(),
    }
}

/// Undo a timed effect. Returns false for permanent kinds.
fn roll_back(state: &mut GameState, kind: PowerUpKind) -> bool {
    match kind {
        PowerUpKind::Sticky => {
            state.ball.sticky = false;
            state.paddle.color = Vec3::ONE;
        }
        PowerUpKind::PassThrough => {
            state.ball.pass_through = false;
            state.ball.body.color = Vec3::ONE;
        }
        PowerUpKind::Confuse => state.effects.confuse = false,
        PowerUpKind::Chaos => state.effects.chaos = false,
        PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => return false,
    }
    true
}

/// Move pickups, count down active effects and prune spent entries
pub fn update_power_ups(state: &mut GameState, dt: f32) {
    for i in 0..state.power_ups.len() {
        let power_up = &mut state.power_ups[i];
        power_up.body.pos += power_up.body.vel * dt;
        if !power_up.activated {
            continue;
        }

        power_up.duration -= dt;
        if power_up.duration <= 0.0 {
            power_up.activated = false;
            let kind = power_up.kind;
            // A duplicate still running keeps the effect alive
            if !state.is_other_power_up_active(kind) && roll_back(state, kind) {
                log::debug!("{:?} expired", kind);
                state.events.push(GameEvent::PowerUpExpired(kind));
            }
        }
    }
    state.power_ups.retain(|p| !p.is_spent());
}

/// Ball fell past the bottom edge
fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    log::info!("Ball lost, {} lives left", state.lives);
    state.events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });

    if let Some(level) = state.current_level_mut() {
        level.reload();
    }
    if state.lives == 0 {
        log::info!("Game over");
        state.events.push(GameEvent::GameOver);
        state.reset_level();
        state.phase = GamePhase::Menu;
    }
    state.reset_player();
}

/// Every destructible brick is gone
fn complete_level(state: &mut GameState) {
    log::info!("Level {} complete", state.level);
    state.events.push(GameEvent::LevelCompleted { level: state.level });
    state.reset_level();
    state.reset_player();
    state.effects.chaos = true;
    state.phase = GamePhase::Win;
}
