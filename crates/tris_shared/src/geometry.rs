//! Display rotation and viewport geometry.

/// Display rotation, quantized to quarter turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayRotation {
    /// Natural orientation.
    #[default]
    Rotation0,
    /// Rotated 90 degrees.
    Rotation90,
    /// Rotated 180 degrees (upside down, no resize happens).
    Rotation180,
    /// Rotated 270 degrees.
    Rotation270,
}

impl DisplayRotation {
    /// Converts a quarter-turn count as reported by the window system (0..=3).
    #[must_use]
    pub const fn from_quarter_turns(turns: i32) -> Option<Self> {
        match turns {
            0 => Some(Self::Rotation0),
            1 => Some(Self::Rotation90),
            2 => Some(Self::Rotation180),
            3 => Some(Self::Rotation270),
            _ => None,
        }
    }

    /// Converts a rotation in degrees. Only exact quarter turns are accepted.
    #[must_use]
    pub const fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Self::Rotation0),
            90 => Some(Self::Rotation90),
            180 => Some(Self::Rotation180),
            270 => Some(Self::Rotation270),
            _ => None,
        }
    }

    /// Returns the rotation in degrees.
    #[must_use]
    pub const fn degrees(self) -> u32 {
        match self {
            Self::Rotation0 => 0,
            Self::Rotation90 => 90,
            Self::Rotation180 => 180,
            Self::Rotation270 => 270,
        }
    }

    /// Returns the quarter-turn count (0..=3), the form the engine expects.
    #[must_use]
    pub const fn quarter_turns(self) -> i32 {
        match self {
            Self::Rotation0 => 0,
            Self::Rotation90 => 1,
            Self::Rotation180 => 2,
            Self::Rotation270 => 3,
        }
    }
}

/// Surface geometry forwarded to the engine before a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportGeometry {
    /// Current display rotation.
    pub rotation: DisplayRotation,
    /// Surface width in pixels, always > 0.
    pub width: u32,
    /// Surface height in pixels, always > 0.
    pub height: u32,
}

impl ViewportGeometry {
    /// Geometry assumed before the first surface notification.
    pub const INITIAL: Self = Self {
        rotation: DisplayRotation::Rotation0,
        width: 1,
        height: 1,
    };

    /// Creates a geometry, rejecting empty surfaces.
    #[must_use]
    pub const fn new(rotation: DisplayRotation, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { rotation, width, height })
    }

    /// Returns a copy with a different rotation.
    #[must_use]
    pub const fn with_rotation(self, rotation: DisplayRotation) -> Self {
        Self { rotation, ..self }
    }
}

impl Default for ViewportGeometry {
    fn default() -> Self {
        Self::INITIAL
    }
}
