//! Breakout - A classic brick-breaker arcade game
//!
//! Core modules:
//! - `sim`: Simulation (collisions, power-ups, game state)
//! - `renderer`: Draw-list collaborator contract and HUD text
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{ConfigError, Tuning};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Window / playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    /// Paddle speed (pixels/s)
    pub const PLAYER_VELOCITY: f32 = 500.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);

    /// Power-up pickup size and fall velocity
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);

    /// Suggested fixed frame step for headless drivers (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
}
