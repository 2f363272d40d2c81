//! # Engine Status Types
//!
//! The installation error code reported by the AR provider and the status
//! flags queried from the engine on every refresh.

use std::fmt;

/// Installation/availability error code reported by the AR provider.
///
/// Kept as a raw code so unknown values survive the trip to the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InstallError(pub i32);

impl InstallError {
    /// Everything is installed and available.
    pub const SUCCESS: Self = Self(0);
    /// The camera permission was not granted.
    pub const CAMERA_PERMISSION_NOT_GRANTED: Self = Self(-9);
    /// The device cannot run the AR provider at all.
    pub const DEVICE_NOT_COMPATIBLE: Self = Self(-101);
    /// The installed AR provider is older than required.
    pub const APK_TOO_OLD: Self = Self(-103);
    /// The app was built against a provider SDK that is too old.
    pub const SDK_TOO_OLD: Self = Self(-104);
    /// The user declined to install the AR provider.
    pub const USER_DECLINED_INSTALLATION: Self = Self(-105);

    /// Returns the raw code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Returns true for `SUCCESS`.
    #[inline]
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == Self::SUCCESS.0
    }
}

impl fmt::Display for InstallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status flags queried from the engine.
///
/// Never cached: every refresh builds a fresh snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineStatusSnapshot {
    /// At least one trackable surface is being tracked.
    pub tracking: bool,
    /// The game board has been placed and the game started.
    pub started: bool,
    /// The current game has ended.
    pub over: bool,
    /// Installation/availability error, `SUCCESS` when none.
    pub install_error: InstallError,
    /// Current score.
    pub score: i32,
}

impl EngineStatusSnapshot {
    /// True once a started game is over.
    #[inline]
    #[must_use]
    pub const fn has_ended(&self) -> bool {
        self.started && self.over
    }
}
