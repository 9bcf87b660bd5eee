//! Simulation core
//!
//! All gameplay logic lives here. The module is single-threaded and
//! tick-driven: one call to [`tick::tick`] runs to completion before the
//! next, with no rendering or platform dependencies. Randomness comes from
//! a state-owned seedable RNG, so tests can fix the seed.

pub mod effects;
pub mod input;
pub mod state;
pub mod tick;

pub use effects::{
    EffectPool, Floater, FloaterPool, FloaterStyle, MAX_FLOATERS, MAX_PARTICLES, Particle,
    ParticlePool,
};
pub use input::{HIT_RADIUS_SCALE, TAP_QUEUE_CAPACITY, TapOutcome, TickInput, classify_tap};
pub use state::{
    ComboState, FeverState, GameEvent, GameState, Phase, SessionContext, TargetBody, Viewport,
};
pub use tick::tick;
