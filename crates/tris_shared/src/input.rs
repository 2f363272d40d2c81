//! # Input Types
//!
//! Raw contact samples coming from the touch surface, and the semantic
//! events the gesture classifier turns them into.
//!
//! ```text
//! ContactSample (UI context) → GestureClassifier → InputEvent → render context
//! ```

use std::time::Duration;

/// Phase of a single-pointer contact sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactPhase {
    /// Pointer touched the surface.
    Down,
    /// Pointer moved while in contact.
    Move,
    /// Pointer left the surface.
    Up,
    /// The window system aborted the gesture.
    Cancel,
}

/// One timestamped raw contact sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactSample {
    /// What happened.
    pub phase: ContactPhase,
    /// X position in surface pixels.
    pub x: f32,
    /// Y position in surface pixels.
    pub y: f32,
    /// Monotonic time since an arbitrary, fixed epoch.
    pub time: Duration,
}

impl ContactSample {
    /// Creates a sample.
    #[must_use]
    pub const fn new(phase: ContactPhase, x: f32, y: f32, time: Duration) -> Self {
        Self { phase, x, y, time }
    }

    /// Shorthand for a `Down` sample.
    #[must_use]
    pub const fn down(x: f32, y: f32, time: Duration) -> Self {
        Self::new(ContactPhase::Down, x, y, time)
    }

    /// Shorthand for a `Move` sample.
    #[must_use]
    pub const fn moved(x: f32, y: f32, time: Duration) -> Self {
        Self::new(ContactPhase::Move, x, y, time)
    }

    /// Shorthand for an `Up` sample.
    #[must_use]
    pub const fn up(x: f32, y: f32, time: Duration) -> Self {
        Self::new(ContactPhase::Up, x, y, time)
    }

    /// Shorthand for a `Cancel` sample.
    #[must_use]
    pub const fn cancel(time: Duration) -> Self {
        Self::new(ContactPhase::Cancel, 0.0, 0.0, time)
    }

    /// Euclidean distance to a point.
    #[must_use]
    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Semantic input events forwarded to the engine.
///
/// Created once per classified gesture step, forwarded once, then dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A quick stationary contact.
    Tap {
        /// X of the down position.
        x: f32,
        /// Y of the down position.
        y: f32,
    },

    /// Second quick contact of a double tap, delivered instead of a second tap.
    DoubleTap {
        /// X of the second down position.
        x: f32,
        /// Y of the second down position.
        y: f32,
    },

    /// Contact movement past the slop threshold.
    Scroll {
        /// X where the gesture started.
        x1: f32,
        /// Y where the gesture started.
        y1: f32,
        /// Current X.
        x2: f32,
        /// Current Y.
        y2: f32,
        /// Previous X minus current X.
        dx: f32,
        /// Previous Y minus current Y.
        dy: f32,
    },

    /// A stationary contact held past the long-press timeout.
    LongPress {
        /// X of the down position.
        x: f32,
        /// Y of the down position.
        y: f32,
    },

    /// Any release, reported in addition to the classified gesture.
    PointerUp {
        /// X of the release.
        x: f32,
        /// Y of the release.
        y: f32,
    },
}

impl InputEvent {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Tap { .. } => "tap",
            Self::DoubleTap { .. } => "double_tap",
            Self::Scroll { .. } => "scroll",
            Self::LongPress { .. } => "long_press",
            Self::PointerUp { .. } => "pointer_up",
        }
    }

    /// The point most representative of the event (the current point for scrolls).
    #[must_use]
    pub const fn position(&self) -> (f32, f32) {
        match *self {
            Self::Tap { x, y }
            | Self::DoubleTap { x, y }
            | Self::LongPress { x, y }
            | Self::PointerUp { x, y } => (x, y),
            Self::Scroll { x2, y2, .. } => (x2, y2),
        }
    }
}
