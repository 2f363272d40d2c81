//! Platform context handed to the engine on resume.

/// What the host platform exposes to the engine when the surface resumes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlatformContext {
    /// Free-form platform label (device model, window system), for logs.
    pub label: String,
    /// Whether the camera permission has been granted.
    pub camera_permission_granted: bool,
}

impl PlatformContext {
    /// Creates a context.
    #[must_use]
    pub fn new(label: impl Into<String>, camera_permission_granted: bool) -> Self {
        Self {
            label: label.into(),
            camera_permission_granted,
        }
    }
}
