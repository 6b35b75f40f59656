//! Rendering collaborator contract
//!
//! The simulation never draws. A frontend hands a `SpriteRenderer` to
//! `draw_game` each frame and reads the effect toggles through
//! `presented_effects`; texture loading and the GPU passes live in the frontend.

pub mod sprite;

use glam::{Vec2, Vec3, Vec4};

pub use sprite::{QUAD_VERTICES, QuadVertex, SpriteBatch, SpriteDraw, SpriteInstance, model_matrix, projection};

use crate::settings::Settings;
use crate::sim::{Effects, GamePhase, GameState, Sprite};

/// Sink for textured quads
pub trait SpriteRenderer {
    /// Draw `sprite` with its top-left at `position`, rotated by `rotation`
    /// degrees about its centre and tinted by `color`
    fn draw_sprite(&mut self, sprite: Sprite, position: Vec2, size: Vec2, rotation: f32, color: Vec3);

    /// Draw one additive particle quad
    fn draw_particle(&mut self, position: Vec2, color: Vec4);
}

/// Emit the whole scene, back to front
pub fn draw_game<R: SpriteRenderer>(renderer: &mut R, state: &GameState, settings: &Settings) {
    renderer.draw_sprite(
        Sprite::Background,
        Vec2::ZERO,
        Vec2::new(state.width, state.height),
        0.0,
        Vec3::ONE,
    );

    for brick in state.bricks().iter().filter(|b| !b.destroyed) {
        renderer.draw_sprite(brick.sprite, brick.pos, brick.size, brick.rotation, brick.color);
    }

    let paddle = &state.paddle;
    renderer.draw_sprite(paddle.sprite, paddle.pos, paddle.size, paddle.rotation, paddle.color);

    if settings.particles {
        for particle in state.particles.alive() {
            renderer.draw_particle(particle.pos, particle.color);
        }
    }

    let ball = &state.ball.body;
    renderer.draw_sprite(ball.sprite, ball.pos, ball.size, ball.rotation, ball.color);

    for power_up in state.power_ups.iter().filter(|p| p.is_falling()) {
        let body = &power_up.body;
        renderer.draw_sprite(body.sprite, body.pos, body.size, body.rotation, body.color);
    }
}

/// Effect toggles after applying presentation preferences
pub fn presented_effects(effects: &Effects, settings: &Settings) -> Effects {
    let distortion = settings.effective_distortion();
    let shake = effects.shake && settings.effective_screen_shake();
    Effects {
        confuse: effects.confuse && distortion,
        chaos: effects.chaos && distortion,
        shake,
        shake_time: if shake { effects.shake_time } else { 0.0 },
    }
}

/// Text lines for the HUD, top to bottom
pub fn hud_lines(state: &GameState, settings: &Settings) -> Vec<String> {
    if !settings.show_hud {
        return Vec::new();
    }

    let mut lines = vec![format!("Lives: {}", state.lives)];
    match state.phase {
        GamePhase::Menu => {
            lines.push("Press ENTER to start".to_string());
            lines.push("Press W or S to select level".to_string());
            if let Some(level) = state.current_level() {
                lines.push(format!("Level {}: {}", state.level + 1, level.name));
            }
        }
        GamePhase::Win => {
            lines.push("You WON!!!".to_string());
            lines.push("Press ENTER to retry or ESC to quit".to_string());
        }
        GamePhase::Active => {}
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Level, PowerUp, PowerUpKind};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        let level = Level::load("test", "1 2 2", 300.0, 100.0).unwrap();
        GameState::with_levels(Tuning::default(), vec![level], 1)
    }

    #[test]
    fn test_draw_order() {
        let mut state = state();
        state.current_level_mut().unwrap().bricks[1].destroyed = true;
        state
            .power_ups
            .push(PowerUp::new(PowerUpKind::Speed, 0.0, Vec2::new(10.0, 10.0)));
        let mut collected = PowerUp::new(PowerUpKind::Sticky, 20.0, Vec2::ZERO);
        collected.activated = true;
        collected.body.destroyed = true;
        state.power_ups.push(collected);

        let mut batch = SpriteBatch::new();
        draw_game(&mut batch, &state, &Settings::default());

        let sprites: Vec<Sprite> = batch.draws().iter().map(|d| d.sprite).collect();
        assert_eq!(
            sprites,
            vec![
                Sprite::Background,
                Sprite::BlockSolid,
                Sprite::Block,
                Sprite::Paddle,
                Sprite::Ball,
                Sprite::PowerUp(PowerUpKind::Speed),
            ]
        );
    }

    #[test]
    fn test_particles_drawn_between_paddle_and_ball() {
        let mut state = state();
        crate::sim::update(&mut state, 0.016);
        let mut batch = SpriteBatch::new();
        draw_game(&mut batch, &state, &Settings::default());

        let sprites: Vec<Sprite> = batch.draws().iter().map(|d| d.sprite).collect();
        let paddle = sprites.iter().position(|s| *s == Sprite::Paddle).unwrap();
        let ball = sprites.iter().position(|s| *s == Sprite::Ball).unwrap();
        assert_eq!(ball - paddle - 1, state.particles.alive().count());
        assert!(sprites[paddle + 1..ball].iter().all(|s| *s == Sprite::Particle));

        let off = Settings {
            particles: false,
            ..Default::default()
        };
        batch.clear();
        draw_game(&mut batch, &state, &off);
        assert!(batch.instances_for(Sprite::Particle).is_empty());
    }

    #[test]
    fn test_presented_effects_follow_settings() {
        let effects = Effects {
            confuse: false,
            chaos: true,
            shake: true,
            shake_time: 0.03,
        };
        assert_eq!(presented_effects(&effects, &Settings::default()), effects);

        let no_shake = Settings {
            screen_shake: false,
            ..Default::default()
        };
        let shown = presented_effects(&effects, &no_shake);
        assert!(shown.chaos && !shown.shake);
        assert_eq!(shown.shake_time, 0.0);

        let reduced = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert_eq!(presented_effects(&effects, &reduced), Effects::default());
    }

    #[test]
    fn test_hud_lines_per_phase() {
        let mut state = state();
        let settings = Settings::default();
        let menu = hud_lines(&state, &settings);
        assert_eq!(menu[0], "Lives: 3");
        assert!(menu.iter().any(|l| l.contains("ENTER to start")));
        assert!(menu.iter().any(|l| l == "Level 1: test"));

        state.phase = GamePhase::Active;
        assert_eq!(hud_lines(&state, &settings), vec!["Lives: 3".to_string()]);

        state.phase = GamePhase::Win;
        assert!(hud_lines(&state, &settings).iter().any(|l| l == "You WON!!!"));

        let hidden = Settings {
            show_hud: false,
            ..Default::default()
        };
        assert!(hud_lines(&state, &hidden).is_empty());
    }
}
