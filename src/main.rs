//! Breakout headless driver
//!
//! Runs the simulation with a paddle autopilot and logs game events. Useful for
//! checking balance changes in `breakout.json` without a window.
//!
//! Usage: `breakout [seed] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use breakout::consts::*;
    use breakout::renderer::{SpriteBatch, draw_game, hud_lines};
    use breakout::sim::{GameEvent, GamePhase, GameState, Key, Level, TickInput, tick};
    use breakout::{Settings, Tuning};

    env_logger::init();
    log::info!("Breakout (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5EED);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);

    let tuning = Tuning::load_or_default("breakout.json");
    let settings = Settings::load("settings.json").unwrap_or_default();

    let levels = match Level::builtin(SCREEN_WIDTH, SCREEN_HEIGHT / 2.0) {
        Ok(levels) => levels,
        Err(e) => {
            log::error!("Failed to load built-in levels: {}", e);
            std::process::exit(1);
        }
    };
    let mut state = GameState::with_levels(tuning, levels, seed);
    log::info!("Game initialized with seed: {}", seed);

    let mut input = TickInput::default();
    let mut batch = SpriteBatch::new();
    let frames = (seconds / FRAME_DT) as u64;
    let mut bricks_destroyed = 0u32;

    for frame in 0..frames {
        // Autopilot: follow the ball, launch at once, confirm any prompt
        let ball_x = state.ball.center().x;
        let paddle_x = state.paddle.center().x;
        input.set(Key::Left, ball_x < paddle_x - 10.0);
        input.set(Key::Right, ball_x > paddle_x + 10.0);
        input.set(Key::Launch, true);
        input.set(Key::Confirm, state.phase != GamePhase::Active && frame % 2 == 0);

        tick(&mut state, &mut input, FRAME_DT);

        for event in &state.events {
            match event {
                GameEvent::BrickDestroyed { .. } => bricks_destroyed += 1,
                GameEvent::PowerUpCollected(kind) => log::info!("Collected {:?}", kind),
                GameEvent::LifeLost { lives_left } => {
                    log::info!("Life lost at {:.1}s ({} left)", state.time, lives_left)
                }
                GameEvent::LevelCompleted { level } => {
                    log::info!("Cleared level {} at {:.1}s", level + 1, state.time)
                }
                _ => {}
            }
        }

        batch.clear();
        draw_game(&mut batch, &state, &settings);
    }

    log::info!(
        "Done after {:.1}s: {} bricks destroyed, {} sprites in last frame",
        state.time,
        bricks_destroyed,
        batch.len()
    );
    for line in hud_lines(&state, &settings) {
        println!("{}", line);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by a browser frontend on wasm
}
