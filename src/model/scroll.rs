//! Scroll state for the input/momentum controller.

use super::layout::ListLayout;

/// Current scroll offset plus velocity for momentum.
///
/// Owned and mutated by the input side (wheel/drag/momentum); the manager
/// only ever reads the clamped offset fed to it via `set_scroll`. Physics
/// policy - friction, sensitivity - deliberately lives here, outside the
/// windowing logic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Clamped offset in `[-max_scroll, 0]`.
    pub offset: f64,
    /// Current velocity in content units per tick. Decays under friction.
    pub velocity: f64,
}

/// Velocity retained per tick while coasting.
const FRICTION: f64 = 0.92;

/// Velocity below which coasting stops.
const REST_THRESHOLD: f64 = 0.5;

impl ScrollState {
    /// Scroll state at the content top with no motion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an instantaneous scroll delta (wheel or key), clamped by the
    /// layout, and add the delta to the coasting velocity.
    pub fn scroll_by(&mut self, delta: f64, layout: &ListLayout) {
        self.offset = layout.clamp_offset(self.offset + delta);
        self.velocity += delta * 0.25;
    }

    /// Jump straight to an offset and kill momentum.
    pub fn scroll_to(&mut self, offset: f64, layout: &ListLayout) {
        self.offset = layout.clamp_offset(offset);
        self.velocity = 0.0;
    }

    /// Advance one momentum tick. Returns true if the offset moved.
    pub fn tick(&mut self, layout: &ListLayout) -> bool {
        if self.velocity.abs() < REST_THRESHOLD {
            self.velocity = 0.0;
            return false;
        }
        let before = self.offset;
        self.offset = layout.clamp_offset(self.offset + self.velocity);
        self.velocity *= FRICTION;
        if self.offset == before {
            // Hit an edge; bleeding off remaining velocity avoids a bounce
            // when the user reverses direction.
            self.velocity = 0.0;
            return false;
        }
        true
    }
}
