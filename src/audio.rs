//! Audio cue sink
//!
//! Procedurally generated sound effects via the Web Audio API - no external
//! files needed. Native builds get a silent stub. Delivery is
//! fire-and-forget: a missing or suspended audio context degrades to
//! silence, never to a stalled tick.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Plain successful tap
    Hit,
    /// Combo bonus payout
    Bonus,
    /// Fever started or refreshed
    Fever,
    /// Intro entered the final-countdown window
    Countdown,
    /// Time up
    Finish,
}

impl Cue {
    /// Cue for a simulation event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Cue> {
        match event {
            GameEvent::Hit { .. } => Some(Cue::Hit),
            GameEvent::Bonus { .. } => Some(Cue::Bonus),
            GameEvent::FeverStart => Some(Cue::Fever),
            GameEvent::Countdown => Some(Cue::Countdown),
            GameEvent::Finish => Some(Cue::Finish),
            GameEvent::Go | GameEvent::RoundOver { .. } => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        let ctx = {
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            ctx
        };

        Self {
            #[cfg(target_arch = "wasm32")]
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resume the audio context (required after a user gesture)
    pub fn resume(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound cue
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self, cue: Cue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend contexts until a user gesture lands
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            Cue::Hit => self.play_hit(ctx, vol),
            Cue::Bonus | Cue::Fever => self.play_bonus(ctx, vol),
            Cue::Countdown => self.play_countdown(ctx, vol),
            Cue::Finish => self.play_finish(ctx, vol),
        }
    }

    /// Silent native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, cue: Cue) {
        if self.effective_volume() > 0.0 {
            log::trace!("audio cue: {:?}", cue);
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    #[cfg(target_arch = "wasm32")]
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Plain hit - quick wet thump
    #[cfg(target_arch = "wasm32")]
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.75, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(80.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Bonus / fever - bright rising chime
    #[cfg(target_arch = "wasm32")]
    fn play_bonus(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 520.0, OscillatorType::Triangle) {
            gain.gain().set_value_at_time(vol * 0.55, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(520.0, t).ok();
            osc.frequency().set_value_at_time(660.0, t + 0.08).ok();
            osc.frequency().set_value_at_time(880.0, t + 0.16).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.35).ok();
        }

        // Sparkle on top
        if let Some((osc, gain)) = self.create_osc(ctx, 1760.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.2, t + 0.1).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }
    }

    /// Countdown - three short blips and a long one
    #[cfg(target_arch = "wasm32")]
    fn play_countdown(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        for i in 0..3 {
            let at = t + i as f64;
            if let Some((osc, gain)) = self.create_osc(ctx, 440.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.3, at).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, at + 0.15)
                    .ok();
                osc.start_with_when(at).ok();
                osc.stop_with_when(at + 0.18).ok();
            }
        }

        // "GO" lands an octave up
        if let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Square) {
            let at = t + 3.0;
            gain.gain().set_value_at_time(vol * 0.4, at).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, at + 0.5)
                .ok();
            osc.start_with_when(at).ok();
            osc.stop_with_when(at + 0.55).ok();
        }
    }

    /// Time up - descending two-note sting
    #[cfg(target_arch = "wasm32")]
    fn play_finish(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 660.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.6)
                .ok();
            osc.frequency().set_value_at_time(660.0, t).ok();
            osc.frequency().set_value_at_time(440.0, t + 0.25).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.6).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_cue_mapping() {
        assert_eq!(
            Cue::for_event(&GameEvent::Hit { combo: 1, points: 1 }),
            Some(Cue::Hit)
        );
        assert_eq!(
            Cue::for_event(&GameEvent::Bonus { points: 10 }),
            Some(Cue::Bonus)
        );
        assert_eq!(Cue::for_event(&GameEvent::FeverStart), Some(Cue::Fever));
        assert_eq!(Cue::for_event(&GameEvent::Countdown), Some(Cue::Countdown));
        assert_eq!(Cue::for_event(&GameEvent::Finish), Some(Cue::Finish));
        // GO is covered by the tail of the countdown cue
        assert_eq!(Cue::for_event(&GameEvent::Go), None);
        assert_eq!(Cue::for_event(&GameEvent::RoundOver { score: 0 }), None);
    }

    #[test]
    fn test_muted_volume_is_zero() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(0.8);
        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
        audio.set_muted(false);
        assert!(audio.effective_volume() > 0.0);
    }
}
