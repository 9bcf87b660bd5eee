//! Game state and core simulation types

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{Floater, FloaterPool, FloaterStyle, MAX_FLOATERS, MAX_PARTICLES, ParticlePool};
use super::input::TAP_QUEUE_CAPACITY;
use crate::consts::*;

/// Play-area dimensions in logical pixels
///
/// DPI scaling and resize plumbing live in the platform shell; the sim only
/// sees the final logical size, fixed for the duration of a round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn minor(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Maximum target speed per axis (px/s)
    pub fn speed_cap(&self) -> f32 {
        (self.minor() * SPEED_CAP_FRACTION).clamp(SPEED_CAP_MIN, SPEED_CAP_MAX)
    }

    /// Target radius for a round played at this size
    pub fn target_radius(&self) -> f32 {
        (self.minor() * RADIUS_FRACTION).clamp(RADIUS_MIN, RADIUS_MAX)
    }
}

/// Current stage of a round
///
/// Transitions run one way: Intro -> GoHold -> Play -> FinishHold -> Result,
/// with Result -> Intro only via an explicit restart. Each variant carries
/// its own countdown so a stale timer from another stage cannot leak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Pre-round freeze with the big on-screen countdown
    Intro {
        left: f32,
        total: f32,
        /// The one-shot countdown cue already fired this round
        countdown_cued: bool,
    },
    /// "GO!!" lingers before the clock starts
    GoHold { left: f32 },
    /// Live round
    Play { time_left: f32 },
    /// Post time-up freeze so a stray tap can't bleed into the result screen
    FinishHold { left: f32 },
    /// Round over, inert until an explicit restart
    Result,
}

impl Phase {
    pub fn is_play(&self) -> bool {
        matches!(self, Phase::Play { .. })
    }

    /// Clock shown on the HUD: full budget before play, frozen at zero after
    pub fn time_left(&self) -> f32 {
        match *self {
            Phase::Intro { .. } | Phase::GoHold { .. } => GAME_SECONDS,
            Phase::Play { time_left } => time_left,
            Phase::FinishHold { .. } | Phase::Result => 0.0,
        }
    }

    /// Big center digit during the intro
    ///
    /// `None` while the pre-roll is still outside the counted window (a 7s
    /// first-run intro shows nothing for its first two seconds).
    pub fn countdown_digit(&self) -> Option<u32> {
        match *self {
            Phase::Intro { left, .. } if left <= 5.0 => Some((left.ceil() as u32).min(5)),
            _ => None,
        }
    }
}

/// The bouncing hittable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetBody {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Velocity the body picks up when play starts (stationary before that)
    pub base_vel: Vec2,
    pub radius: f32,
    /// Hit-flash countdown, read by the renderer to swap the sprite
    pub hit_flash: f32,
    /// Size-bounce countdown, read by the renderer to scale the sprite
    pub scale_pop: f32,
}

impl TargetBody {
    /// Place a fresh target for a new round: random position inside the
    /// bounds, random base velocity, not yet moving.
    fn spawn<R: Rng>(viewport: Viewport, rng: &mut R) -> Self {
        let radius = viewport.target_radius();

        let x_max = (viewport.width - radius).max(radius + 1.0);
        let x = rng.random_range(radius..x_max);
        // Extra top clearance keeps the spawn point away from the HUD
        let y_min = radius + 90.0;
        let y_max = (viewport.height - radius).max(y_min + 1.0);
        let y = rng.random_range(y_min..y_max);

        let sign = |rng: &mut R| if rng.random::<bool>() { 1.0 } else { -1.0 };
        let base_vx = rng.random_range(BASE_VX_MIN..BASE_VX_MAX) * sign(rng);
        let base_vy = rng.random_range(BASE_VY_MIN..BASE_VY_MAX) * sign(rng);

        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            base_vel: Vec2::new(base_vx, base_vy),
            radius,
            hit_flash: 0.0,
            scale_pop: 0.0,
        }
    }

    /// Clamp both velocity components to the cap
    pub fn clamp_speed(&mut self, cap: f32) {
        self.vel.x = self.vel.x.clamp(-cap, cap);
        self.vel.y = self.vel.y.clamp(-cap, cap);
    }
}

/// Consecutive-hit streak within a rolling window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComboState {
    pub count: u32,
    /// Seconds left before the streak lapses
    pub timer: f32,
}

impl ComboState {
    /// Fold a successful hit into the streak; returns the new count
    pub fn register_hit(&mut self) -> u32 {
        self.count = if self.timer > 0.0 { self.count + 1 } else { 1 };
        self.timer = COMBO_WINDOW;
        self.count
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn decay(&mut self, dt: f32) {
        if self.timer > 0.0 {
            self.timer = (self.timer - dt).max(0.0);
            if self.timer <= 0.0 {
                self.count = 0;
            }
        }
    }
}

/// Temporary double-score state triggered by combo milestones
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeverState {
    pub active: bool,
    /// Seconds of fever remaining
    pub timer: f32,
    /// `FEVER_MULTIPLIER` while active, 1 otherwise
    pub multiplier: u32,
}

impl Default for FeverState {
    fn default() -> Self {
        Self {
            active: false,
            timer: 0.0,
            multiplier: 1,
        }
    }
}

impl FeverState {
    /// Enter fever, or refresh the timer when already active
    pub fn trigger(&mut self) {
        self.active = true;
        self.timer = FEVER_SECONDS;
        self.multiplier = FEVER_MULTIPLIER;
    }

    pub fn stop(&mut self) {
        *self = Self::default();
    }

    pub fn decay(&mut self, dt: f32) {
        if self.active {
            self.timer = (self.timer - dt).max(0.0);
            if self.timer <= 0.0 {
                self.stop();
            }
        }
    }
}

/// One-shot cues for the audio sink and other collaborators
///
/// Accumulated during a tick, drained by the shell afterwards. Delivery is
/// fire-and-forget; nothing in the sim waits on a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The intro crossed the final-countdown mark (once per round)
    Countdown,
    /// The intro finished and "GO!!" is up (once per round)
    Go,
    Hit { combo: u32, points: u32 },
    Bonus { points: u32 },
    FeverStart,
    /// Time ran out (once per round)
    Finish,
    /// The finish hold elapsed; the round score is final
    RoundOver { score: u32 },
}

/// Session-lifetime state, mutated only at round boundaries
///
/// Created once at process start and passed explicitly wherever it is
/// needed; the simulation never reads it mid-round.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SessionContext {
    /// A round has been started at least once this session
    pub has_started_once: bool,
    /// Best round score seen this session
    pub best: u32,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session with a previously persisted best score
    pub fn with_best(best: u32) -> Self {
        Self {
            has_started_once: false,
            best,
        }
    }

    /// Intro length for the next round: long on the first-ever start,
    /// short on every retry.
    pub fn intro_seconds(&self) -> f32 {
        if self.has_started_once {
            INTRO_RETRY_SECONDS
        } else {
            INTRO_FIRST_SECONDS
        }
    }

    /// Fold a finished round in; true if it set a new session best
    pub fn record_round(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }
}

/// Complete per-round game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub viewport: Viewport,
    pub phase: Phase,
    pub score: u32,
    pub combo: ComboState,
    pub fever: FeverState,
    pub target: TargetBody,
    /// Screen-shake intensity, decays linearly; renderer-only
    pub shake: f32,
    pub particles: ParticlePool,
    pub floaters: FloaterPool,
    /// A ranking submission already went out for this round
    pub rank_submitted: bool,
    pending_taps: VecDeque<Vec2>,
    events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create an inert state (Result phase); call [`Self::start_round`] to
    /// begin playing. Production shells seed from entropy, tests from a
    /// fixed value.
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let target = TargetBody::spawn(viewport, &mut rng);
        Self {
            viewport,
            phase: Phase::Result,
            score: 0,
            combo: ComboState::default(),
            fever: FeverState::default(),
            target,
            shake: 0.0,
            particles: ParticlePool::with_capacity(MAX_PARTICLES),
            floaters: FloaterPool::with_capacity(MAX_FLOATERS),
            rank_submitted: false,
            pending_taps: VecDeque::new(),
            events: Vec::new(),
            rng,
        }
    }

    /// Start (or restart) a round
    ///
    /// Valid from any phase; resets every piece of per-round state in one
    /// place so an abort can never leave a partial round behind. The intro
    /// length comes from the session: 7s on the first-ever start, 3s after.
    pub fn start_round(&mut self, session: &mut SessionContext) {
        let intro = session.intro_seconds();
        session.has_started_once = true;

        self.phase = Phase::Intro {
            left: intro,
            total: intro,
            countdown_cued: false,
        };
        self.score = 0;
        self.combo.reset();
        self.fever.stop();
        self.shake = 0.0;
        self.particles.clear();
        self.floaters.clear();
        self.rank_submitted = false;
        self.pending_taps.clear();
        self.events.clear();
        self.target = TargetBody::spawn(self.viewport, &mut self.rng);

        let anchor = self.target.pos - Vec2::new(0.0, self.target.radius + 10.0);
        self.floaters.push(Floater::new(
            "GET READY...",
            anchor,
            FloaterStyle {
                size: 34.0,
                life: 1.0,
                rise: 50.0,
                wobble: 8.0,
                weight: 1200,
            },
        ));
    }

    /// Current score multiplier (2 during fever)
    pub fn multiplier(&self) -> u32 {
        self.fever.multiplier
    }

    /// Clock value for the HUD
    pub fn time_left(&self) -> f32 {
        self.phase.time_left()
    }

    /// Queue a raw pointer tap; drops beyond the queue capacity
    pub fn queue_tap(&mut self, at: Vec2) {
        if self.pending_taps.len() < TAP_QUEUE_CAPACITY {
            self.pending_taps.push_back(at);
        }
    }

    /// Take accumulated one-shot events for delivery to collaborators
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn pop_tap(&mut self) -> Option<Vec2> {
        self.pending_taps.pop_front()
    }

    pub(crate) fn clear_taps(&mut self) {
        self.pending_taps.clear();
    }

    /// Kick the screen shake up to at least `amount`
    pub(crate) fn add_shake(&mut self, amount: f32) {
        self.shake = self.shake.max(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_window_semantics() {
        let mut combo = ComboState::default();
        assert_eq!(combo.register_hit(), 1);
        assert_eq!(combo.register_hit(), 2);

        // Lapse the window: streak restarts at 1
        combo.decay(COMBO_WINDOW + 0.01);
        assert_eq!(combo.count, 0);
        assert_eq!(combo.register_hit(), 1);
    }

    #[test]
    fn test_combo_timer_never_negative() {
        let mut combo = ComboState::default();
        combo.register_hit();
        combo.decay(10.0);
        assert_eq!(combo.timer, 0.0);
        assert_eq!(combo.count, 0);
    }

    #[test]
    fn test_fever_trigger_and_expiry() {
        let mut fever = FeverState::default();
        assert_eq!(fever.multiplier, 1);

        fever.trigger();
        assert!(fever.active);
        assert_eq!(fever.multiplier, FEVER_MULTIPLIER);
        assert_eq!(fever.timer, FEVER_SECONDS);

        // Refresh while active resets the clock
        fever.decay(FEVER_SECONDS / 2.0);
        fever.trigger();
        assert_eq!(fever.timer, FEVER_SECONDS);

        fever.decay(FEVER_SECONDS + 1.0);
        assert!(!fever.active);
        assert_eq!(fever.multiplier, 1);
        assert_eq!(fever.timer, 0.0);
    }

    #[test]
    fn test_viewport_derived_quantities() {
        let small = Viewport::new(320.0, 480.0);
        assert!((small.target_radius() - 32.0).abs() < 1e-3);
        assert_eq!(small.speed_cap(), SPEED_CAP_MIN);

        let big = Viewport::new(2560.0, 1440.0);
        assert_eq!(big.target_radius(), RADIUS_MAX);
        assert_eq!(big.speed_cap(), SPEED_CAP_MAX);

        let mid = Viewport::new(1280.0, 800.0);
        assert!((mid.target_radius() - 80.0).abs() < 1e-3);
        assert!((mid.speed_cap() - 680.0).abs() < 1e-2);
    }

    #[test]
    fn test_session_intro_seconds() {
        let mut session = SessionContext::new();
        assert_eq!(session.intro_seconds(), INTRO_FIRST_SECONDS);
        session.has_started_once = true;
        assert_eq!(session.intro_seconds(), INTRO_RETRY_SECONDS);
    }

    #[test]
    fn test_session_best_score() {
        let mut session = SessionContext::with_best(100);
        assert!(!session.record_round(100));
        assert!(!session.record_round(40));
        assert_eq!(session.best, 100);
        assert!(session.record_round(101));
        assert_eq!(session.best, 101);
    }

    #[test]
    fn test_countdown_digit_window() {
        let waiting = Phase::Intro {
            left: 6.2,
            total: 7.0,
            countdown_cued: false,
        };
        assert_eq!(waiting.countdown_digit(), None);

        let counting = Phase::Intro {
            left: 2.4,
            total: 7.0,
            countdown_cued: true,
        };
        assert_eq!(counting.countdown_digit(), Some(3));

        assert_eq!(Phase::GoHold { left: 0.5 }.countdown_digit(), None);
    }

    #[test]
    fn test_tap_queue_capacity() {
        let mut state = GameState::new(1, Viewport::new(800.0, 600.0));
        for i in 0..20 {
            state.queue_tap(Vec2::new(i as f32, 0.0));
        }
        let mut drained = 0;
        while state.pop_tap().is_some() {
            drained += 1;
        }
        assert_eq!(drained, TAP_QUEUE_CAPACITY);
    }

    #[test]
    fn test_spawn_inside_bounds() {
        for seed in 0..32 {
            let viewport = Viewport::new(800.0, 600.0);
            let state = GameState::new(seed, viewport);
            let t = &state.target;
            assert!(t.pos.x >= t.radius && t.pos.x <= viewport.width - t.radius);
            assert!(t.pos.y >= t.radius && t.pos.y <= viewport.height - t.radius);
            assert_eq!(t.vel, Vec2::ZERO);
            assert!(t.base_vel.x.abs() >= BASE_VX_MIN && t.base_vel.x.abs() <= BASE_VX_MAX);
            assert!(t.base_vel.y.abs() >= BASE_VY_MIN && t.base_vel.y.abs() <= BASE_VY_MAX);
        }
    }
}
