//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (brick and power-up lists are never reordered)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod level;
pub mod particles;
pub mod powerup;
pub mod state;
pub mod tick;

pub use body::{Ball, Body, Sprite};
pub use collision::{CollisionResult, Direction, circle_rect_collision, classify_direction, rect_overlap};
pub use level::{Level, LevelError, TileGrid};
pub use particles::{Particle, ParticleGenerator};
pub use powerup::{PowerUp, PowerUpKind};
pub use state::{Effects, GameEvent, GamePhase, GameState};
pub use tick::{Key, TickInput, process_input, tick, update};
