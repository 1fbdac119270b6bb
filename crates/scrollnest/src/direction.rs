//! Gesture axis classification and the per-gesture direction lock
//!
//! # State Machine
//!
//! ```text
//!              lock horizontal              lock vertical
//! Horizontal ◄──────────────── Undecided ────────────────► Vertical
//!     │  ▲ (same band: stays)      ▲      (same band: stays) ▲  │
//!     │  └─────────                │               ──────────┘  │
//!     └──────────── begin / end ───┴──────── begin / end ───────┘
//! ```
//!
//! Once a gesture is locked to an axis, a lock request for the other axis
//! produces no transition until the gesture ends.

use scrollnest_core::{StateTransitions, Vec2};

/// Lower edge of the horizontal band, in degrees from "up"
pub const HORIZONTAL_BAND_MIN: f32 = 45.0;
/// Upper edge of the horizontal band, in degrees from "up"
pub const HORIZONTAL_BAND_MAX: f32 = 135.0;

/// A scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    Horizontal,
    Vertical,
}

impl ScrollAxis {
    /// Classify a gesture angle (degrees from local "up", in `[0, 180]`).
    ///
    /// `(45, 135)` is horizontal, `[0, 45)` and `(135, 180]` are vertical.
    /// The boundaries themselves belong to neither band.
    pub fn from_angle(angle: f32) -> Option<ScrollAxis> {
        if angle > HORIZONTAL_BAND_MIN && angle < HORIZONTAL_BAND_MAX {
            Some(ScrollAxis::Horizontal)
        } else if angle < HORIZONTAL_BAND_MIN || angle > HORIZONTAL_BAND_MAX {
            Some(ScrollAxis::Vertical)
        } else {
            None
        }
    }

    /// Classify a drag delta in local (y-up) space.
    ///
    /// Equivalent to `from_angle(delta.angle_to(Vec2::UP))`, but compares
    /// the components directly so exact diagonals land on the boundary
    /// instead of drifting into a band through `acos` rounding. A zero delta
    /// has no direction and is not classified.
    pub fn from_delta(delta: Vec2) -> Option<ScrollAxis> {
        let (dx, dy) = (delta.x.abs(), delta.y.abs());
        if dx > dy {
            Some(ScrollAxis::Horizontal)
        } else if dy > dx {
            Some(ScrollAxis::Vertical)
        } else {
            None
        }
    }

    fn lock_event(self) -> u32 {
        match self {
            ScrollAxis::Horizontal => gesture_events::LOCK_HORIZONTAL,
            ScrollAxis::Vertical => gesture_events::LOCK_VERTICAL,
        }
    }
}

/// Events driving [`GestureDirection`]
pub mod gesture_events {
    /// A drag gesture started
    pub const BEGIN: u32 = 100;
    /// Motion classified into the horizontal band
    pub const LOCK_HORIZONTAL: u32 = 101;
    /// Motion classified into the vertical band
    pub const LOCK_VERTICAL: u32 = 102;
    /// The drag gesture ended
    pub const END: u32 = 103;
}

/// Direction resolved for the current drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureDirection {
    /// No axis decided yet
    #[default]
    Undecided,
    /// Gesture locked to horizontal motion
    Horizontal,
    /// Gesture locked to vertical motion
    Vertical,
}

impl GestureDirection {
    pub fn is_locked(&self) -> bool {
        !matches!(self, GestureDirection::Undecided)
    }

    pub fn axis(&self) -> Option<ScrollAxis> {
        match self {
            GestureDirection::Undecided => None,
            GestureDirection::Horizontal => Some(ScrollAxis::Horizontal),
            GestureDirection::Vertical => Some(ScrollAxis::Vertical),
        }
    }

    /// Resolve a classified band against the current lock.
    ///
    /// Returns the direction to hold when the band is accepted (first lock,
    /// or the same band again), or `None` when the gesture is already locked
    /// to the other axis.
    pub fn accept(&self, axis: ScrollAxis) -> Option<GestureDirection> {
        self.on_event(axis.lock_event())
    }
}

impl StateTransitions for GestureDirection {
    fn on_event(&self, event: u32) -> Option<Self> {
        use gesture_events::*;
        use GestureDirection::*;

        match (self, event) {
            (_, BEGIN) | (_, END) => Some(Undecided),

            (Undecided, LOCK_HORIZONTAL) | (Horizontal, LOCK_HORIZONTAL) => Some(Horizontal),
            (Undecided, LOCK_VERTICAL) | (Vertical, LOCK_VERTICAL) => Some(Vertical),

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_band_is_open_interval() {
        for angle in [45.01, 60.0, 90.0, 120.0, 134.99] {
            assert_eq!(ScrollAxis::from_angle(angle), Some(ScrollAxis::Horizontal));
        }
    }

    #[test]
    fn test_vertical_band_includes_extremes() {
        for angle in [0.0, 10.0, 44.99, 135.01, 170.0, 180.0] {
            assert_eq!(ScrollAxis::from_angle(angle), Some(ScrollAxis::Vertical));
        }
    }

    #[test]
    fn test_band_boundaries_are_unclaimed() {
        assert_eq!(ScrollAxis::from_angle(45.0), None);
        assert_eq!(ScrollAxis::from_angle(135.0), None);
    }

    #[test]
    fn test_from_delta_matches_angle_classification() {
        let deltas = [
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(-10.0, 0.0),
            Vec2::new(0.0, -10.0),
            Vec2::new(3.0, 7.0),
            Vec2::new(7.0, 3.0),
            Vec2::new(-7.0, -3.0),
            Vec2::new(-3.0, -7.0),
        ];

        for delta in deltas {
            let by_angle = delta.angle_to(Vec2::UP).and_then(ScrollAxis::from_angle);
            assert_eq!(ScrollAxis::from_delta(delta), by_angle, "delta {delta:?}");
        }
    }

    #[test]
    fn test_from_delta_straight_lines() {
        assert_eq!(
            ScrollAxis::from_delta(Vec2::new(0.0, 10.0)),
            Some(ScrollAxis::Vertical)
        );
        assert_eq!(
            ScrollAxis::from_delta(Vec2::new(10.0, 0.0)),
            Some(ScrollAxis::Horizontal)
        );
    }

    #[test]
    fn test_from_delta_diagonals_and_zero_are_unclaimed() {
        assert_eq!(ScrollAxis::from_delta(Vec2::new(10.0, 10.0)), None);
        assert_eq!(ScrollAxis::from_delta(Vec2::new(-4.0, 4.0)), None);
        assert_eq!(ScrollAxis::from_delta(Vec2::ZERO), None);
    }

    #[test]
    fn test_direction_locks_once() {
        let mut direction = GestureDirection::default();

        direction = direction.accept(ScrollAxis::Horizontal).unwrap();
        assert_eq!(direction, GestureDirection::Horizontal);

        // Same band keeps the lock, other band is refused
        assert_eq!(
            direction.accept(ScrollAxis::Horizontal),
            Some(GestureDirection::Horizontal)
        );
        assert_eq!(direction.accept(ScrollAxis::Vertical), None);
    }

    #[test]
    fn test_direction_resets_on_begin_and_end() {
        let mut direction = GestureDirection::Vertical;
        assert!(direction.apply(gesture_events::END));
        assert_eq!(direction, GestureDirection::Undecided);

        direction = GestureDirection::Horizontal;
        assert!(direction.apply(gesture_events::BEGIN));
        assert!(!direction.is_locked());
    }
}
