//! Transient visual effects
//!
//! Particles and floating text are cosmetic feedback: created with an
//! explicit lifetime, aged each tick, compacted in place once expired.
//! The pools have a hard capacity; pushing into a full pool silently drops
//! the entry - effects are never required for correctness.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Hard cap on live particles
pub const MAX_PARTICLES: usize = 256;
/// Hard cap on live floating-text entries
pub const MAX_FLOATERS: usize = 32;

/// A burst particle with exponentially damped velocity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Elapsed lifetime (seconds)
    pub t: f32,
    pub life: f32,
}

impl Particle {
    pub fn alive(&self) -> bool {
        self.t < self.life
    }

    /// Fade factor for rendering: 1 at birth, 0 at expiry
    pub fn alpha(&self) -> f32 {
        (1.0 - self.t / self.life).clamp(0.0, 1.0)
    }

    fn advance(&mut self, dt: f32) {
        self.t += dt;
        self.pos += self.vel * dt;
        self.vel *= PARTICLE_DAMPING.powf(dt);
    }
}

/// Presentation parameters for a floater
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloaterStyle {
    pub size: f32,
    pub life: f32,
    /// Total upward travel over the lifetime (px)
    pub rise: f32,
    /// Horizontal sine-wobble amplitude (px)
    pub wobble: f32,
    pub weight: u32,
}

impl Default for FloaterStyle {
    fn default() -> Self {
        Self {
            size: 26.0,
            life: 0.7,
            rise: 140.0,
            wobble: 10.0,
            weight: 1000,
        }
    }
}

/// Short-lived rising text ("+1", "5 COMBO!!", "FEVER x2!!", ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floater {
    pub text: String,
    /// Spawn anchor; the draw position rises and wobbles from here
    pub origin: Vec2,
    pub t: f32,
    pub life: f32,
    pub rise: f32,
    pub wobble: f32,
    pub size: f32,
    pub weight: u32,
}

impl Floater {
    pub fn new(text: impl Into<String>, origin: Vec2, style: FloaterStyle) -> Self {
        Self {
            text: text.into(),
            origin,
            t: 0.0,
            life: style.life,
            rise: style.rise,
            wobble: style.wobble,
            size: style.size,
            weight: style.weight,
        }
    }

    pub fn alive(&self) -> bool {
        self.t < self.life
    }

    /// Normalized age in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.t / self.life).clamp(0.0, 1.0)
    }

    /// Current draw position: eased rise with a sine wobble
    pub fn pos(&self) -> Vec2 {
        let p = self.progress();
        let ease = 1.0 - (1.0 - p).powi(3);
        Vec2::new(
            self.origin.x + (p * std::f32::consts::TAU).sin() * self.wobble,
            self.origin.y - self.rise * ease,
        )
    }

    pub fn alpha(&self) -> f32 {
        1.0 - self.progress()
    }
}

/// Fixed-capacity effect pool
///
/// Backed by a `Vec` that never grows past its construction capacity;
/// overflow pushes are dropped, expired entries are compacted out in place
/// each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectPool<T> {
    entries: Vec<T>,
    capacity: usize,
}

impl<T> EffectPool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Add an entry; a full pool drops it silently
    pub fn push(&mut self, entry: T) {
        if self.entries.len() < self.capacity {
            self.entries.push(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.entries.retain(keep);
    }

    fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.entries.iter_mut()
    }
}

pub type ParticlePool = EffectPool<Particle>;
pub type FloaterPool = EffectPool<Floater>;

impl EffectPool<Particle> {
    /// Radial spray at a hit point: random direction, speed and lifetime
    pub fn spawn_burst<R: Rng>(&mut self, at: Vec2, count: usize, rng: &mut R) {
        for _ in 0..count {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(PARTICLE_SPEED_MIN..PARTICLE_SPEED_MAX);
            self.push(Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                t: 0.0,
                life: rng.random_range(PARTICLE_LIFE_MIN..PARTICLE_LIFE_MAX),
            });
        }
    }

    /// Age, integrate and damp all particles, dropping expired ones
    pub fn advance(&mut self, dt: f32) {
        for p in self.iter_mut() {
            p.advance(dt);
        }
        self.retain(|p| p.alive());
    }
}

impl EffectPool<Floater> {
    /// Age all floaters, dropping expired ones
    pub fn advance(&mut self, dt: f32) {
        for f in self.iter_mut() {
            f.t += dt;
        }
        self.retain(|f| f.alive());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_pool_capacity_ceiling() {
        let mut pool = FloaterPool::with_capacity(4);
        for i in 0..10 {
            pool.push(Floater::new(
                format!("{i}"),
                Vec2::ZERO,
                FloaterStyle::default(),
            ));
        }
        assert_eq!(pool.len(), 4);
        // Oldest entries won, overflow was dropped
        assert_eq!(pool.iter().next().unwrap().text, "0");
    }

    #[test]
    fn test_burst_respects_capacity() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut pool = ParticlePool::with_capacity(MAX_PARTICLES);
        for _ in 0..20 {
            pool.spawn_burst(Vec2::new(10.0, 10.0), HIT_PARTICLES, &mut rng);
        }
        assert_eq!(pool.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_expired_particles_removed() {
        let mut pool = ParticlePool::with_capacity(8);
        pool.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(100.0, 0.0),
            t: 0.0,
            life: 0.3,
        });
        pool.advance(0.2);
        assert_eq!(pool.len(), 1);
        pool.advance(0.2);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_floater_expires_at_life() {
        let mut pool = FloaterPool::with_capacity(8);
        pool.push(Floater::new(
            "+1",
            Vec2::ZERO,
            FloaterStyle {
                life: 0.65,
                ..Default::default()
            },
        ));
        pool.advance(0.64);
        assert_eq!(pool.len(), 1);
        pool.advance(0.02);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_damping_is_framerate_independent() {
        let mut a = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(600.0, 0.0),
            t: 0.0,
            life: 1.0,
        };
        let mut b = a;

        a.advance(0.3);
        b.advance(0.15);
        b.advance(0.15);

        // Same total elapsed time, same residual speed (up to float noise)
        assert!((a.vel.x - b.vel.x).abs() < 0.5);
    }

    #[test]
    fn test_floater_rises_and_fades() {
        let f = Floater {
            text: "GO!!".into(),
            origin: Vec2::new(100.0, 200.0),
            t: 0.5,
            life: 1.0,
            rise: 100.0,
            wobble: 0.0,
            size: 52.0,
            weight: 1300,
        };
        assert!(f.pos().y < f.origin.y);
        assert!((f.alpha() - 0.5).abs() < 1e-6);
    }
}
