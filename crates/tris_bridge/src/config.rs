//! # Bridge Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file is a valid configuration.
//!
//! ```toml
//! [gesture]
//! touch_slop_px = 8.0
//! double_tap_slop_px = 100.0
//! double_tap_timeout_ms = 300
//! long_press_timeout_ms = 500
//!
//! [refresh]
//! policy = "interval"      # or "frame-change"
//! interval_ms = 100
//!
//! [render]
//! frame_interval_ms = 16
//!
//! [store]
//! path = "tris-scores.toml"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tris_shared::{
    DEFAULT_DOUBLE_TAP_SLOP_PX, DEFAULT_DOUBLE_TAP_TIMEOUT, DEFAULT_LONG_PRESS_TIMEOUT,
    DEFAULT_REFRESH_INTERVAL, DEFAULT_TOUCH_SLOP_PX, TARGET_FRAME_TIME,
};

use crate::error::{BridgeError, BridgeResult};
use crate::gesture::GestureConfig;
use crate::refresh::RefreshPolicy;

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// `[gesture]` thresholds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureSection {
    /// Touch slop in pixels.
    pub touch_slop_px: f32,
    /// Double-tap slop in pixels.
    pub double_tap_slop_px: f32,
    /// Double-tap timeout in milliseconds.
    pub double_tap_timeout_ms: u64,
    /// Long-press timeout in milliseconds.
    pub long_press_timeout_ms: u64,
}

impl Default for GestureSection {
    fn default() -> Self {
        Self {
            touch_slop_px: DEFAULT_TOUCH_SLOP_PX,
            double_tap_slop_px: DEFAULT_DOUBLE_TAP_SLOP_PX,
            double_tap_timeout_ms: millis(DEFAULT_DOUBLE_TAP_TIMEOUT),
            long_press_timeout_ms: millis(DEFAULT_LONG_PRESS_TIMEOUT),
        }
    }
}

/// Refresh policy as written in the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefreshPolicyKind {
    /// Fixed interval.
    #[default]
    Interval,
    /// On frame change.
    FrameChange,
}

/// `[refresh]` settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RefreshSection {
    /// Policy selector.
    pub policy: RefreshPolicyKind,
    /// Interval for the fixed-interval policy, in milliseconds.
    pub interval_ms: u64,
}

impl Default for RefreshSection {
    fn default() -> Self {
        Self {
            policy: RefreshPolicyKind::Interval,
            interval_ms: millis(DEFAULT_REFRESH_INTERVAL),
        }
    }
}

/// `[render]` settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSection {
    /// Render thread frame interval in milliseconds.
    pub frame_interval_ms: u64,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            frame_interval_ms: millis(TARGET_FRAME_TIME).max(1),
        }
    }
}

/// `[store]` settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    /// High-score file. In-memory storage when absent.
    pub path: Option<PathBuf>,
}

/// Complete bridge configuration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Gesture thresholds.
    pub gesture: GestureSection,
    /// UI refresh.
    pub refresh: RefreshSection,
    /// Render loop.
    pub render: RenderSection,
    /// Score storage.
    pub store: StoreSection,
}

impl BridgeConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] on syntax errors, unknown keys or invalid values.
    pub fn from_toml_str(text: &str) -> BridgeResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|err| BridgeError::Config(err.message().to_owned()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] if the file cannot be read or is invalid.
    pub fn load(path: impl AsRef<Path>) -> BridgeResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|err| BridgeError::Config(format!("{}: {err}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] naming the first offending key.
    pub fn validate(&self) -> BridgeResult<()> {
        fn positive(key: &str, value: f32) -> BridgeResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(BridgeError::Config(format!("{key} must be positive, got {value}")))
            }
        }
        fn nonzero(key: &str, value: u64) -> BridgeResult<()> {
            if value == 0 {
                Err(BridgeError::Config(format!("{key} must be greater than zero")))
            } else {
                Ok(())
            }
        }

        positive("gesture.touch_slop_px", self.gesture.touch_slop_px)?;
        positive("gesture.double_tap_slop_px", self.gesture.double_tap_slop_px)?;
        nonzero("gesture.double_tap_timeout_ms", self.gesture.double_tap_timeout_ms)?;
        nonzero("gesture.long_press_timeout_ms", self.gesture.long_press_timeout_ms)?;
        nonzero("refresh.interval_ms", self.refresh.interval_ms)?;
        nonzero("render.frame_interval_ms", self.render.frame_interval_ms)
    }

    /// Gesture thresholds as classifier configuration.
    #[must_use]
    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig {
            touch_slop: self.gesture.touch_slop_px,
            double_tap_slop: self.gesture.double_tap_slop_px,
            double_tap_timeout: Duration::from_millis(self.gesture.double_tap_timeout_ms),
            long_press_timeout: Duration::from_millis(self.gesture.long_press_timeout_ms),
        }
    }

    /// The refresh policy.
    #[must_use]
    pub fn refresh_policy(&self) -> RefreshPolicy {
        match self.refresh.policy {
            RefreshPolicyKind::Interval => {
                RefreshPolicy::FixedInterval(Duration::from_millis(self.refresh.interval_ms))
            }
            RefreshPolicyKind::FrameChange => RefreshPolicy::OnFrameChange,
        }
    }

    /// Render thread frame interval.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.render.frame_interval_ms)
    }
}
