//! Bop Rush - a tap-the-bouncing-target arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (phase sequencer, target motion, scoring, effects)
//! - `audio`: Procedural audio cue sink - no sound assets needed
//! - `bestscore`: Single-scalar best score persistence
//! - `results`: Score-band result screen data
//! - `settings`: Player preferences

pub mod audio;
pub mod bestscore;
pub mod results;
pub mod settings;
pub mod sim;

pub use bestscore::BestScore;
pub use settings::Settings;

/// Install logging and panic reporting before the JS shell starts the loop
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Game configuration constants
///
/// The timing and scoring values here are gameplay contract, not tuning
/// knobs: changing them changes observable behavior.
pub mod consts {
    /// Longest frame delta the simulation will integrate (seconds).
    /// Frame stalls beyond this are swallowed rather than integrated.
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Intro countdown on the very first round of a session
    pub const INTRO_FIRST_SECONDS: f32 = 7.0;
    /// Intro countdown on every retry
    pub const INTRO_RETRY_SECONDS: f32 = 3.0;
    /// Intro remaining at which the countdown cue fires (once per round)
    pub const COUNTDOWN_CUE_AT: f32 = 3.0;
    /// How long "GO!!" stays up before the clock starts
    pub const GO_HOLD_SECONDS: f32 = 1.0;
    /// Round length
    pub const GAME_SECONDS: f32 = 30.0;
    /// Hold after time-up so a late tap can't leak into the result screen
    pub const FINISH_HOLD_SECONDS: f32 = 2.0;

    /// Consecutive hits within this window keep the combo alive
    pub const COMBO_WINDOW: f32 = 1.0;
    /// Every this-many combo steps pays a bonus
    pub const BONUS_INTERVAL: u32 = 5;
    /// Bonus payout, before the fever multiplier
    pub const BONUS_POINTS: u32 = 10;
    /// Every this-many combo steps starts or refreshes fever
    pub const FEVER_INTERVAL: u32 = 10;
    /// Fever length per trigger
    pub const FEVER_SECONDS: f32 = 3.0;
    /// Score multiplier while fever is active
    pub const FEVER_MULTIPLIER: u32 = 2;
    /// Clock time lost on a whiffed tap
    pub const MISS_TIME_PENALTY: f32 = 0.25;

    /// Hit-flash duration on the target
    pub const HIT_FLASH_SECONDS: f32 = 0.18;
    /// Size-bounce duration on the target
    pub const SCALE_POP_SECONDS: f32 = 0.20;

    /// Per-hit velocity drift band - mildly speeds up or slows down
    pub const DRIFT_MIN: f32 = 0.97;
    pub const DRIFT_MAX: f32 = 1.05;

    /// Target radius as a fraction of the viewport minor dimension
    pub const RADIUS_FRACTION: f32 = 0.10;
    pub const RADIUS_MIN: f32 = 28.0;
    pub const RADIUS_MAX: f32 = 120.0;

    /// Speed cap: fraction of the viewport minor dimension, clamped (px/s)
    pub const SPEED_CAP_FRACTION: f32 = 0.85;
    pub const SPEED_CAP_MIN: f32 = 520.0;
    pub const SPEED_CAP_MAX: f32 = 900.0;

    /// HUD band at the top of the play area the target may not enter
    pub const TOP_MARGIN: f32 = 56.0;

    /// Base velocity bands at round start (sign is random per axis, px/s)
    pub const BASE_VX_MIN: f32 = 220.0;
    pub const BASE_VX_MAX: f32 = 340.0;
    pub const BASE_VY_MIN: f32 = 180.0;
    pub const BASE_VY_MAX: f32 = 300.0;

    /// Particle burst size per successful hit
    pub const HIT_PARTICLES: usize = 26;
    pub const PARTICLE_SPEED_MIN: f32 = 140.0;
    pub const PARTICLE_SPEED_MAX: f32 = 620.0;
    pub const PARTICLE_LIFE_MIN: f32 = 0.22;
    pub const PARTICLE_LIFE_MAX: f32 = 0.55;
    /// Exponential particle damping base: `v *= DAMPING^dt`
    pub const PARTICLE_DAMPING: f32 = 0.06;
}
