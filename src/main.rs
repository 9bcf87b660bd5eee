//! Bop Rush entry point
//!
//! Native builds run a headless autoplay round and log the outcome; the
//! playable build ships as a wasm library driven by the browser shell.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry points live in the library; this just satisfies the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;
    use rand::Rng;

    use bop_rush::sim::{GameEvent, GameState, Phase, SessionContext, TickInput, Viewport, tick};
    use bop_rush::{BestScore, results};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Autoplay cadence: a tap roughly every 0.4s, one whiff in eight
    const TAP_EVERY: f32 = 0.4;

    pub fn run() {
        let mut rng = rand::rng();
        let seed: u64 = rng.random();

        let mut store = BestScore::load();
        let mut session = SessionContext::with_best(store.best);
        let viewport = Viewport::new(1280.0, 720.0);
        let mut state = GameState::new(seed, viewport);
        state.start_round(&mut session);
        log::info!("Autoplay round starting (seed {seed})");

        let mut since_tap = 0.0_f32;
        let mut frames = 0u32;
        while !matches!(state.phase, Phase::Result) {
            let mut input = TickInput::default();
            if state.phase.is_play() {
                since_tap += FRAME_DT;
                if since_tap >= TAP_EVERY {
                    since_tap = 0.0;
                    // Mostly on target, sometimes a deliberate whiff. The
                    // top-left corner sits inside the HUD margin, so it can
                    // never contain the target.
                    input.tap = Some(if rng.random_range(0..8) == 0 {
                        Vec2::new(1.0, 1.0)
                    } else {
                        state.target.pos
                    });
                }
            }

            tick(&mut state, &input, FRAME_DT);
            frames += 1;

            for event in state.drain_events() {
                match event {
                    GameEvent::Countdown => log::info!("countdown!"),
                    GameEvent::Go => log::info!("GO!"),
                    GameEvent::Hit { combo, points } => {
                        log::debug!("hit: +{points} (combo {combo})");
                    }
                    GameEvent::Bonus { points } => log::info!("bonus: +{points}"),
                    GameEvent::FeverStart => log::info!("FEVER x2"),
                    GameEvent::Finish => log::info!("time up"),
                    GameEvent::RoundOver { score } => log::info!("round over: {score}"),
                }
            }

            // A full round is ~40s of simulated time
            if frames > 60 * 60 {
                log::error!("demo never reached the result screen");
                break;
            }
        }

        let score = state.score;
        let new_best = session.record_round(score);
        if store.record(score) {
            store.save();
        }

        let pack = results::pack_for_score(score);
        let comment = results::pick_comment(pack, &mut rng);
        if new_best {
            log::info!("NEW BEST! {score}");
        }
        log::info!("Score: {} / Best: {} - {comment}", score, session.best);
    }
}
