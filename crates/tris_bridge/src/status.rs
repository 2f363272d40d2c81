//! # Status Resolution
//!
//! Maps engine flags and the AR provider's installation error to the line
//! shown to the player.
//!
//! ```text
//! install_error != SUCCESS  ──> fixed error message (overrides everything)
//! !tracking && !started     ──> "Searching for surfaces..."
//! !tracking &&  started     ──> "Tracking lost :("
//!  tracking && !started     ──> "Tap to place & start"
//!  tracking &&  started && over ──> "Game over"
//! otherwise                 ──> ""
//! ```

use std::borrow::Cow;
use std::fmt;

use tris_shared::{EngineStatusSnapshot, InstallError};

/// User-facing status line. Empty when there is nothing to show.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StatusMessage(Cow<'static, str>);

impl StatusMessage {
    const fn fixed(text: &'static str) -> Self {
        Self(Cow::Borrowed(text))
    }

    /// The empty message.
    #[must_use]
    pub const fn empty() -> Self {
        Self::fixed("")
    }

    /// Returns the text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when there is nothing to show.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn install_error_message(error: InstallError) -> StatusMessage {
    match error {
        InstallError::DEVICE_NOT_COMPATIBLE => {
            StatusMessage::fixed("Sorry, your phone does not support ARCore :,(")
        }
        InstallError::USER_DECLINED_INSTALLATION => {
            StatusMessage::fixed("You must install ARCore to play this AR game")
        }
        InstallError::APK_TOO_OLD => StatusMessage::fixed("Please update ARCore"),
        InstallError::SDK_TOO_OLD => StatusMessage::fixed(
            "An ARCore update broke this app (AR_UNAVAILABLE_SDK_TOO_OLD), blame Google",
        ),
        InstallError::CAMERA_PERMISSION_NOT_GRANTED => {
            StatusMessage::fixed("No Camera permission, how did that happen?")
        }
        other => StatusMessage(Cow::Owned(format!(
            "ARCore installation error (error {})",
            other.code()
        ))),
    }
}

/// Resolves the status line. Pure: equal inputs give equal output.
#[must_use]
pub fn resolve(install_error: InstallError, tracking: bool, started: bool, over: bool) -> StatusMessage {
    if !install_error.is_success() {
        return install_error_message(install_error);
    }

    match (tracking, started, over) {
        (false, false, _) => StatusMessage::fixed("Searching for surfaces..."),
        (false, true, _) => StatusMessage::fixed("Tracking lost :("),
        (true, false, _) => StatusMessage::fixed("Tap to place & start"),
        (true, true, true) => StatusMessage::fixed("Game over"),
        (true, true, false) => StatusMessage::empty(),
    }
}

/// [`resolve`] over a queried snapshot.
#[inline]
#[must_use]
pub fn resolve_snapshot(snapshot: &EngineStatusSnapshot) -> StatusMessage {
    resolve(
        snapshot.install_error,
        snapshot.tracking,
        snapshot.started,
        snapshot.over,
    )
}
