//! Per-frame simulation advance
//!
//! One call runs to completion before the next; nothing here blocks or
//! suspends. Audio and network delivery happen outside via the drained
//! event queue, so a slow collaborator can never stall a tick.

use glam::Vec2;
use rand::Rng;

use super::effects::{Floater, FloaterStyle};
use super::input::{TapOutcome, TickInput, classify_tap};
use super::state::{GameEvent, GameState, Phase};
use crate::consts::*;

/// Hit exclamation pool, one picked at random per hit
const SMACK_WORDS: [&str; 3] = ["SPLASH!!", "BOP!!", "SMACK!!"];

/// Advance the simulation by one frame
///
/// `dt` is the wall-clock delta in seconds, clamped to `[0, MAX_FRAME_DT]`
/// so frame stalls bound the integration error instead of teleporting the
/// target.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    if let Some(tap) = input.tap {
        state.queue_tap(tap);
    }

    // Shake cools off no matter the phase
    state.shake = (state.shake - dt).max(0.0);

    match state.phase {
        Phase::Intro {
            left,
            total,
            countdown_cued,
        } => {
            state.clear_taps();

            let left = (left - dt).max(0.0);
            let mut countdown_cued = countdown_cued;
            if !countdown_cued && left <= COUNTDOWN_CUE_AT {
                state.push_event(GameEvent::Countdown);
                countdown_cued = true;
            }

            if left <= 0.0 {
                enter_go_hold(state);
            } else {
                state.phase = Phase::Intro {
                    left,
                    total,
                    countdown_cued,
                };
            }
        }

        Phase::GoHold { left } => {
            state.clear_taps();

            let left = (left - dt).max(0.0);
            if left <= 0.0 {
                // Clock starts and the target picks up its round velocity
                state.phase = Phase::Play {
                    time_left: GAME_SECONDS,
                };
                state.target.vel = state.target.base_vel;
            } else {
                state.phase = Phase::GoHold { left };
            }
        }

        Phase::Play { time_left } => {
            let time_left = (time_left - dt).max(0.0);
            if time_left <= 0.0 {
                state.phase = Phase::FinishHold {
                    left: FINISH_HOLD_SECONDS,
                };
                state.push_event(GameEvent::Finish);
                state.target.vel = Vec2::ZERO;
                state.clear_taps();
            } else {
                state.phase = Phase::Play { time_left };

                integrate_target(state, dt);

                // At most one classified tap per tick keeps scoring
                // deterministic relative to the physics step order
                if let Some(tap) = state.pop_tap() {
                    match classify_tap(tap, &state.target) {
                        TapOutcome::Hit => apply_hit(state),
                        TapOutcome::Miss => apply_miss(state),
                    }
                }

                state.target.hit_flash = (state.target.hit_flash - dt).max(0.0);
                state.target.scale_pop = (state.target.scale_pop - dt).max(0.0);
                state.combo.decay(dt);
                state.fever.decay(dt);
            }
        }

        Phase::FinishHold { left } => {
            state.clear_taps();

            let left = (left - dt).max(0.0);
            if left <= 0.0 {
                state.phase = Phase::Result;
                state.push_event(GameEvent::RoundOver { score: state.score });
            } else {
                state.phase = Phase::FinishHold { left };
            }
        }

        // Inert until the shell issues a restart
        Phase::Result => {
            state.clear_taps();
            return;
        }
    }

    state.particles.advance(dt);
    state.floaters.advance(dt);
}

/// Intro hit zero: show "GO!!" and hold before the clock starts
fn enter_go_hold(state: &mut GameState) {
    state.phase = Phase::GoHold {
        left: GO_HOLD_SECONDS,
    };
    state.push_event(GameEvent::Go);

    let anchor = state.target.pos - Vec2::new(0.0, state.target.radius + 10.0);
    state.floaters.push(Floater::new(
        "GO!!",
        anchor,
        FloaterStyle {
            size: 52.0,
            life: GO_HOLD_SECONDS,
            rise: 140.0,
            wobble: 16.0,
            weight: 1300,
        },
    ));
    state.add_shake(0.22);
}

/// Integrate the target and reflect it off the play-area walls
fn integrate_target(state: &mut GameState, dt: f32) {
    let w = state.viewport.width;
    let h = state.viewport.height;

    let body = &mut state.target;
    body.pos += body.vel * dt;

    let r = body.radius;
    if body.pos.x - r < 0.0 {
        body.pos.x = r;
        body.vel.x = -body.vel.x;
    }
    if body.pos.x + r > w {
        body.pos.x = w - r;
        body.vel.x = -body.vel.x;
    }
    if body.pos.y - r < TOP_MARGIN {
        body.pos.y = TOP_MARGIN + r;
        body.vel.y = -body.vel.y;
    }
    if body.pos.y + r > h {
        body.pos.y = h - r;
        body.vel.y = -body.vel.y;
    }
}

/// Score a successful tap: combo step, base points, periodic bonus, fever
/// milestone, visual feedback, and the stochastic speed drift.
fn apply_hit(state: &mut GameState) {
    let combo = state.combo.register_hit();
    let mul = state.fever.multiplier;
    let center = state.target.pos;
    let radius = state.target.radius;
    let above = center - Vec2::new(0.0, radius + 10.0);

    let points = mul;
    state.score += points;
    state.push_event(GameEvent::Hit { combo, points });

    state.floaters.push(Floater::new(
        format!("+{points}"),
        center - Vec2::new(0.0, radius * 0.15),
        FloaterStyle {
            size: 30.0,
            life: 0.65,
            rise: 130.0,
            wobble: 10.0,
            weight: 1200,
        },
    ));

    let word = SMACK_WORDS[state.rng.random_range(0..SMACK_WORDS.len())];
    state.floaters.push(Floater::new(
        word,
        above,
        FloaterStyle {
            size: 38.0,
            life: 0.80,
            rise: 120.0,
            wobble: 18.0,
            weight: 1200,
        },
    ));

    if combo >= 3 {
        state.floaters.push(Floater::new(
            format!("{combo} COMBO!!"),
            center + Vec2::new(0.0, radius + 8.0),
            FloaterStyle {
                size: 30.0 + (combo as f32 * 2.0).min(20.0),
                life: 0.60,
                rise: 70.0,
                wobble: 12.0,
                weight: 1200,
            },
        ));
    }

    if combo.is_multiple_of(BONUS_INTERVAL) {
        let bonus = BONUS_POINTS * mul;
        state.score += bonus;
        state.push_event(GameEvent::Bonus { points: bonus });
        state.floaters.push(Floater::new(
            format!("+{bonus} BONUS!!"),
            center,
            FloaterStyle {
                size: 44.0,
                life: 1.0,
                rise: 160.0,
                wobble: 22.0,
                weight: 1300,
            },
        ));
        state.add_shake(0.35);
    }

    if combo.is_multiple_of(FEVER_INTERVAL) {
        // Entering while already active just refreshes the timer
        state.fever.trigger();
        state.push_event(GameEvent::FeverStart);
        state.floaters.push(Floater::new(
            "FEVER x2!!",
            center - Vec2::new(0.0, radius + 12.0),
            FloaterStyle {
                size: 40.0,
                life: 1.0,
                rise: 90.0,
                wobble: 20.0,
                weight: 1200,
            },
        ));
        state.add_shake(0.28);
    }

    state.target.hit_flash = HIT_FLASH_SECONDS;
    state.target.scale_pop = SCALE_POP_SECONDS;

    let base = if state.fever.active { 0.22 } else { 0.18 };
    state.add_shake(base + (combo as f32 * 0.012).min(0.22));

    state.particles.spawn_burst(center, HIT_PARTICLES, &mut state.rng);

    // Stochastic difficulty drift; the cap keeps a lucky streak from
    // running away
    let drift = state.rng.random_range(DRIFT_MIN..=DRIFT_MAX);
    state.target.vel *= drift;
    state.target.clamp_speed(state.viewport.speed_cap());
}

/// A whiffed tap breaks the streak and costs clock time
fn apply_miss(state: &mut GameState) {
    state.combo.reset();
    if let Phase::Play { time_left } = &mut state.phase {
        *time_left = (*time_left - MISS_TIME_PENALTY).max(0.0);
    }
}
