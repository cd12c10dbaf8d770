//! Cyber Grid core crate.
//!
//! An animated perspective-grid backdrop with Digit the mascot, interrupted now
//! and then by a "hacker attack": a small puzzle the player must solve before
//! play resumes. Attacks come from the launch button or from a random periodic
//! ambush. The game logic (`attack`, `puzzle`, `schedule`, `session`) is plain
//! Rust and runs on the host; `web` binds it to the page.

use wasm_bindgen::prelude::*;

pub mod attack;
pub mod config;
mod log;
pub mod puzzle;
pub mod render;
pub mod rng;
pub mod schedule;
pub mod session;
pub mod surface;
pub mod web;

pub use attack::{AttackController, AttackState, Signal, Submission};
pub use config::GameConfig;
pub use puzzle::{Answer, Puzzle, PuzzleFamily};
pub use rng::{OsRandom, RandomSource, SeededRandom};
pub use schedule::{AmbushPolicy, Task, TaskQueue};
pub use session::Session;
pub use surface::{NullSurface, PresentationSurface, Tone, Waveform};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Narration tables
// -----------------------------------------------------------------------------

pub const SPEECH_LINES: &[&str] = &[
    "Hey team! Ready for a cyberspace adventure?",
    "Math mission activated! Let's do this!",
    "Point and hover - I'll guide you!",
    "Teamwork makes every puzzle easier!",
    "Digit is on duty. Next stop: fun!",
];

pub const MISSION_LINES: &[&str] = &[
    "MISSION UPDATE: Puzzle portals are opening!",
    "NEW MISSION: Decode the Grid!",
    "CYBER CHALLENGE: Shape lock unlocked!",
    "OBJECTIVE: Trace the map pathways!",
];

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(GameConfig::default())
}

/// Start with a JSON object of [`GameConfig`] overrides.
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json)
        .map_err(|e| JsValue::from_str(&format!("bad game config: {e}")))?;
    web::start(config)
}

/// Same as pressing the launch button. No-op before `start_game`.
#[wasm_bindgen]
pub fn launch_mission() {
    web::with_session(|s| s.launch_mission());
}

/// Submit an answer from host code. Returns true when it repelled the attack.
#[wasm_bindgen]
pub fn submit_answer(raw: &str) -> bool {
    web::with_session(|s| s.submit_answer(raw)) == Some(Submission::Accepted)
}
