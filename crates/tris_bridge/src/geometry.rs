//! # Geometry Slot
//!
//! Latest viewport geometry plus a dirty flag, written from the UI context
//! and consumed once per render tick. Last write wins.

use parking_lot::Mutex;
use tris_shared::{DisplayRotation, ViewportGeometry};

use crate::error::{BridgeError, BridgeResult};

#[derive(Debug, Default)]
struct SlotState {
    geometry: ViewportGeometry,
    dirty: bool,
}

/// Shared, mutex-guarded geometry with change tracking.
#[derive(Debug, Default)]
pub struct GeometrySlot {
    state: Mutex<SlotState>,
}

impl GeometrySlot {
    /// Creates a clean slot holding the initial geometry (0°, 1x1).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new surface size and marks the slot dirty.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidGeometry`] if either dimension is zero;
    /// the slot is left untouched.
    pub fn update_size(&self, width: u32, height: u32) -> BridgeResult<()> {
        let mut state = self.state.lock();
        let geometry = ViewportGeometry::new(state.geometry.rotation, width, height)
            .ok_or(BridgeError::InvalidGeometry { width, height })?;
        state.geometry = geometry;
        state.dirty = true;
        Ok(())
    }

    /// Records a new display rotation and marks the slot dirty.
    pub fn update_rotation(&self, rotation: DisplayRotation) {
        let mut state = self.state.lock();
        state.geometry = state.geometry.with_rotation(rotation);
        state.dirty = true;
    }

    /// Returns the geometry and clears the flag if it changed since the last call.
    pub fn take_if_dirty(&self) -> Option<ViewportGeometry> {
        let mut state = self.state.lock();
        if state.dirty {
            state.dirty = false;
            Some(state.geometry)
        } else {
            None
        }
    }

    /// Current geometry, dirty or not.
    #[must_use]
    pub fn current(&self) -> ViewportGeometry {
        self.state.lock().geometry
    }

    /// Returns whether an update is waiting for the next tick.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.state.lock().dirty
    }
}
