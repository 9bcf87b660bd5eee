//! Pointer input dispatch
//!
//! Raw taps arrive from the platform shell in play-area coordinates and are
//! queued on the game state; the tick consumes at most one per frame so that
//! scoring stays deterministic relative to the physics step order.

use glam::Vec2;

use super::state::TargetBody;

/// Taps queued beyond this are dropped
pub const TAP_QUEUE_CAPACITY: usize = 8;

/// Hit-test inflation for easing taps on small targets (1.0 = exact circle)
pub const HIT_RADIUS_SCALE: f32 = 1.0;

/// Input for a single simulation tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer-down position this frame, in play-area coordinates
    pub tap: Option<Vec2>,
}

/// Classification of a tap against the target body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    Hit,
    Miss,
}

/// Circular hit-test against the target's current center and radius
pub fn classify_tap(tap: Vec2, target: &TargetBody) -> TapOutcome {
    let r = target.radius * HIT_RADIUS_SCALE;
    if tap.distance_squared(target.pos) <= r * r {
        TapOutcome::Hit
    } else {
        TapOutcome::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target_at(x: f32, y: f32, radius: f32) -> TargetBody {
        TargetBody {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            base_vel: Vec2::ZERO,
            radius,
            hit_flash: 0.0,
            scale_pop: 0.0,
        }
    }

    #[test]
    fn test_center_tap_hits() {
        let target = target_at(100.0, 100.0, 40.0);
        assert_eq!(classify_tap(Vec2::new(100.0, 100.0), &target), TapOutcome::Hit);
    }

    #[test]
    fn test_edge_tap_hits() {
        let target = target_at(100.0, 100.0, 40.0);
        assert_eq!(classify_tap(Vec2::new(140.0, 100.0), &target), TapOutcome::Hit);
    }

    #[test]
    fn test_outside_tap_misses() {
        let target = target_at(100.0, 100.0, 40.0);
        assert_eq!(classify_tap(Vec2::new(141.0, 100.0), &target), TapOutcome::Miss);
        assert_eq!(classify_tap(Vec2::new(130.0, 130.0), &target), TapOutcome::Miss);
    }
}
