//! Input merging and press detection
//!
//! The shell reports what is *held* each frame (keyboard keys, touch stick,
//! touch buttons). `InputTracker` turns that into the per-tick
//! `InputSnapshot` the simulation consumes: a movement vector plus four
//! one-shot presses that fire only on the not-held to held transition.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Dead zone for the on-screen stick, in playfield units
pub const TOUCH_DEAD_ZONE: f32 = 12.0;

/// Normalized keyboard direction; diagonals have unit length
pub fn key_vector(left: bool, right: bool, up: bool, down: bool) -> Vec2 {
    let x = right as i32 as f32 - left as i32 as f32;
    let y = down as i32 as f32 - up as i32 as f32;
    Vec2::new(x, y).normalize_or_zero()
}

/// Unit stick direction, each axis clamped to [-1, 1]
pub fn normalize_stick(dx: f32, dy: f32) -> Vec2 {
    Vec2::new(dx, dy)
        .normalize_or_zero()
        .clamp(Vec2::NEG_ONE, Vec2::ONE)
}

/// Stick drag to direction; drags shorter than `dead_zone` are ignored
pub fn to_direction(dx: f32, dy: f32, dead_zone: f32) -> Vec2 {
    if Vec2::new(dx, dy).length() < dead_zone {
        return Vec2::ZERO;
    }
    normalize_stick(dx, dy)
}

/// On-screen stick state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TouchStick {
    pub dir: Vec2,
    /// True while a pointer is down on the stick
    pub active: bool,
}

impl TouchStick {
    pub fn released() -> Self {
        Self::default()
    }

    /// Stick held with the pointer `(dx, dy)` away from its centre
    pub fn dragged(dx: f32, dy: f32) -> Self {
        Self {
            dir: to_direction(dx, dy, TOUCH_DEAD_ZONE),
            active: true,
        }
    }
}

/// Input for a single simulation tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Keyboard direction, magnitude <= 1
    pub keys: Vec2,
    pub touch: TouchStick,
    pub confirm: bool,
    pub dash: bool,
    pub flight_toggle: bool,
    pub pause: bool,
}

impl InputSnapshot {
    /// Touch direction wins outright while the stick is held
    pub fn movement(&self) -> Vec2 {
        if self.touch.active {
            self.touch.dir
        } else {
            self.keys
        }
    }
}

/// Everything held down this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub confirm: bool,
    pub dash: bool,
    pub flight: bool,
    pub pause: bool,
    pub touch: TouchStick,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Buttons {
    confirm: bool,
    dash: bool,
    flight: bool,
    pause: bool,
}

/// Edge detector over successive `Controls`
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    previous: Buttons,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build this tick's snapshot and remember what was held
    pub fn snapshot(&mut self, held: &Controls) -> InputSnapshot {
        let now = Buttons {
            confirm: held.confirm,
            dash: held.dash,
            flight: held.flight,
            pause: held.pause,
        };
        let prev = std::mem::replace(&mut self.previous, now);

        InputSnapshot {
            keys: key_vector(held.left, held.right, held.up, held.down),
            touch: held.touch,
            confirm: now.confirm && !prev.confirm,
            dash: now.dash && !prev.dash,
            flight_toggle: now.flight && !prev.flight,
            pause: now.pause && !prev.pause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_vector_normalizes_diagonals() {
        let v = key_vector(false, true, true, false);
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!(v.x > 0.0 && v.y < 0.0);
        assert_eq!(key_vector(true, true, false, false), Vec2::ZERO);
        assert_eq!(key_vector(false, false, false, false), Vec2::ZERO);
    }

    #[test]
    fn test_to_direction_dead_zone() {
        assert_eq!(to_direction(3.0, 4.0, 12.0), Vec2::ZERO);
        let v = to_direction(30.0, 40.0, 12.0);
        assert!((v.x - 0.6).abs() < 1e-6 && (v.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_touch_overrides_keys() {
        let snapshot = InputSnapshot {
            keys: Vec2::X,
            touch: TouchStick {
                dir: Vec2::Y,
                active: true,
            },
            ..Default::default()
        };
        assert_eq!(snapshot.movement(), Vec2::Y);

        // An active stick inside its dead zone still overrides: no blending
        let snapshot = InputSnapshot {
            touch: TouchStick::dragged(1.0, 1.0),
            ..snapshot
        };
        assert_eq!(snapshot.movement(), Vec2::ZERO);

        let snapshot = InputSnapshot {
            touch: TouchStick::released(),
            ..snapshot
        };
        assert_eq!(snapshot.movement(), Vec2::X);
    }

    #[test]
    fn test_presses_fire_on_edge_only() {
        let mut tracker = InputTracker::new();
        let held = Controls {
            dash: true,
            ..Default::default()
        };
        assert!(tracker.snapshot(&held).dash);
        assert!(!tracker.snapshot(&held).dash);
        assert!(!tracker.snapshot(&Controls::default()).dash);
        assert!(tracker.snapshot(&held).dash);
    }

    #[test]
    fn test_each_button_tracked_separately() {
        let mut tracker = InputTracker::new();
        let first = tracker.snapshot(&Controls {
            confirm: true,
            ..Default::default()
        });
        assert!(first.confirm && !first.pause);
        let second = tracker.snapshot(&Controls {
            confirm: true,
            pause: true,
            flight: true,
            ..Default::default()
        });
        assert!(!second.confirm && second.pause && second.flight_toggle);
    }
}
