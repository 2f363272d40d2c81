//! # Timing & Threshold Constants
//!
//! Defaults for gesture classification and the refresh cadence.
//!
//! These mirror the stock touch-framework values so taps feel the same as in
//! every other app on the device. All of them can be overridden through
//! `BridgeConfig`.

use std::time::Duration;

// =============================================================================
// GESTURE THRESHOLDS
// =============================================================================

/// Maximum pointer travel (pixels) still classified as a stationary contact.
pub const DEFAULT_TOUCH_SLOP_PX: f32 = 8.0;

/// Maximum distance (pixels) between two downs of a double tap.
pub const DEFAULT_DOUBLE_TAP_SLOP_PX: f32 = 100.0;

/// Maximum time between the first release and the second down of a double tap.
pub const DEFAULT_DOUBLE_TAP_TIMEOUT: Duration = Duration::from_millis(300);

/// Hold time after which a stationary contact becomes a long press.
pub const DEFAULT_LONG_PRESS_TIMEOUT: Duration = Duration::from_millis(500);

// =============================================================================
// SCHEDULING
// =============================================================================

/// Fixed-interval UI refresh cadence.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(100);

/// Target frame time for 60 FPS on the render context.
pub const TARGET_FRAME_TIME: Duration = Duration::from_micros(16_666);

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Key of the persisted high score in the score store.
pub const HISCORE_KEY: &str = "hiscore";
