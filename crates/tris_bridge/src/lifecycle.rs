//! # Platform Capability Interfaces
//!
//! Three narrow traits the host window system drives. Each one can be
//! implemented and mocked on its own.
//!
//! ```text
//! ┌──────────────────────┐  render context
//! │ RenderCallbacks      │  surface created / changed, draw frame
//! ├──────────────────────┤  UI context
//! │ DisplayListener      │  display rotation changed
//! │ LifecycleObserver    │  resume / pause / destroy
//! └──────────────────────┘
//! ```

use std::time::Duration;

use tris_shared::{DisplayRotation, PlatformContext};

use crate::error::BridgeResult;

/// Notice shown once when the camera permission is denied.
pub const CAMERA_PERMISSION_NOTICE: &str = "Camera permission is needed to run this application";

// ============================================================================
// TRAITS
// ============================================================================

/// Callbacks invoked by the render context.
pub trait RenderCallbacks {
    /// The rendering surface was (re)created.
    fn on_surface_created(&mut self);

    /// The rendering surface was resized.
    ///
    /// # Errors
    ///
    /// Rejects an empty size.
    fn on_surface_changed(&mut self, width: u32, height: u32) -> BridgeResult<()>;

    /// Draws one frame.
    fn on_draw_frame(&mut self);
}

/// Display change notifications (rotation without a resize, e.g. 180°).
pub trait DisplayListener {
    /// The display rotation changed.
    fn on_display_changed(&mut self, rotation: DisplayRotation);
}

/// Host lifecycle transitions, on the UI context.
pub trait LifecycleObserver {
    /// The host came to the foreground.
    fn on_resume(&mut self, platform: &PlatformContext, now: Duration) -> ResumeOutcome;

    /// The host went to the background.
    fn on_pause(&mut self);

    /// The host is shutting down. Destroys the engine.
    fn on_destroy(&mut self);
}

// ============================================================================
// OUTCOMES
// ============================================================================

/// Result of a resume request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// The engine resumed and the refresh schedule is running.
    Resumed,
    /// Nothing was resumed; the host must request the camera permission.
    PermissionRequired,
}

/// What the host does after a permission request completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionAction {
    /// Granted; resume normally.
    Proceed,
    /// Denied; the notice was shown and the host closes.
    NotifyAndClose,
    /// Denied permanently; open the system settings, then close.
    OpenSettingsAndClose,
}

impl PermissionAction {
    /// Decides the action from the permission result.
    #[must_use]
    pub const fn decide(granted: bool, can_ask_again: bool) -> Self {
        match (granted, can_ask_again) {
            (true, _) => Self::Proceed,
            (false, true) => Self::NotifyAndClose,
            (false, false) => Self::OpenSettingsAndClose,
        }
    }

    /// Returns true if the host must close.
    #[must_use]
    pub const fn closes(self) -> bool {
        !matches!(self, Self::Proceed)
    }
}
