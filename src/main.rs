//! Headless demo run
//!
//! Drives the simulation with scripted input for a bounded number of frames
//! and logs the outcome. Useful for smoke-testing tuning changes without a
//! rendering front end: `RUST_LOG=info cargo run`.

use sandstorm_arena::config::PlayerClass;
use sandstorm_arena::sim::{GamePhase, GameState, TickInput, tick};

const FRAME_MS: f64 = 16.0;
const MAX_FRAMES: u32 = 7200; // ~2 minutes of simulated play

fn main() {
    env_logger::init();

    let mut state = GameState::new(0xC0FFEE);
    state.open_character_select();
    state.select_class(PlayerClass::Assault);

    let mut now = 0.0;
    let mut frames = 0u32;
    while state.phase == GamePhase::Playing && frames < MAX_FRAMES {
        // Strafe side to side while the aim sweeps a slow circle
        let input = TickInput {
            move_left: frames % 240 < 120,
            move_right: frames % 240 >= 120,
            aim_yaw: frames as f32 * 0.01,
            ..TickInput::default()
        };
        tick(&mut state, &input, FRAME_MS as f32, now);
        now += FRAME_MS;
        frames += 1;
    }

    log::info!(
        "demo finished after {} frames: score {}, {} enemies alive, phase {:?}",
        frames,
        state.score,
        state.enemies.len(),
        state.phase
    );
    match serde_json::to_string(&state) {
        Ok(snapshot) => log::debug!("final state: {snapshot}"),
        Err(err) => log::warn!("snapshot serialization failed: {err}"),
    }
}
