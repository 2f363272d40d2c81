//! # Native Engine Boundary
//!
//! The fixed set of entry points the coordination layer consumes.
//!
//! The engine (AR tracking, rendering, game simulation) lives outside this
//! crate. It implements [`NativeEngine`]; the bridge only ever calls it from
//! inside [`EngineHandle::with_handle`](crate::EngineHandle::with_handle).
//!
//! ```text
//! Bridge defines:          Engine implements:
//! ┌────────────────────┐    ┌───────────────────┐
//! │ trait NativeEngine │ ←─ │ impl NativeEngine │
//! └────────────────────┘    └───────────────────┘
//! ```

use tris_shared::{
    DisplayRotation, EngineStatusSnapshot, InputEvent, InstallError, PlatformContext,
};

/// Interface to the native simulation/render engine.
///
/// Dropping the value is the engine's destruction; the handle guarantees the
/// drop never overlaps a frame step.
pub trait NativeEngine: Send + 'static {
    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// The presentation surface was paused/backgrounded.
    fn on_lifecycle_pause(&mut self);

    /// The presentation surface was resumed.
    fn on_lifecycle_resume(&mut self, platform: &PlatformContext);

    /// Allocates render resources. Called once per surface (re)creation.
    fn on_surface_created(&mut self);

    /// The viewport size or display rotation changed.
    fn on_geometry_changed(&mut self, rotation: DisplayRotation, width: u32, height: u32);

    /// Advances and renders one frame.
    ///
    /// Returns true when externally observable state (score, flags) changed.
    fn on_frame(&mut self) -> bool;

    // ========================================================================
    // INPUT (render context only)
    // ========================================================================

    /// A tap at surface coordinates.
    fn on_tap(&mut self, x: f32, y: f32);

    /// A double tap. Engines without a dedicated action treat it as a tap.
    fn on_double_tap(&mut self, x: f32, y: f32) {
        self.on_tap(x, y);
    }

    /// A scroll step from `(x1, y1)` to `(x2, y2)` with incremental delta.
    fn on_scroll(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, dx: f32, dy: f32);

    /// A long press.
    fn on_long_press(&mut self, x: f32, y: f32);

    /// A release of contact, reported for every gesture.
    fn on_touch_up(&mut self, x: f32, y: f32);

    // ========================================================================
    // QUERIES & COMMANDS
    // ========================================================================

    /// At least one trackable surface is tracked.
    fn is_tracking(&self) -> bool;

    /// The game has been placed and started.
    fn game_started(&self) -> bool;

    /// The current game is over.
    fn game_over(&self) -> bool;

    /// Current score.
    fn score(&self) -> i32;

    /// Installation/availability error of the AR provider.
    fn install_error(&self) -> InstallError;

    /// Starts a new game.
    fn restart_game(&mut self);
}

/// Dispatches a classified input event to the matching engine entry point.
pub fn forward_input<E: NativeEngine + ?Sized>(engine: &mut E, event: InputEvent) {
    match event {
        InputEvent::Tap { x, y } => engine.on_tap(x, y),
        InputEvent::DoubleTap { x, y } => engine.on_double_tap(x, y),
        InputEvent::Scroll {
            x1,
            y1,
            x2,
            y2,
            dx,
            dy,
        } => engine.on_scroll(x1, y1, x2, y2, dx, dy),
        InputEvent::LongPress { x, y } => engine.on_long_press(x, y),
        InputEvent::PointerUp { x, y } => engine.on_touch_up(x, y),
    }
}

/// Queries every status flag in one pass.
#[must_use]
pub fn query_snapshot<E: NativeEngine + ?Sized>(engine: &E) -> EngineStatusSnapshot {
    EngineStatusSnapshot {
        tracking: engine.is_tracking(),
        started: engine.game_started(),
        over: engine.game_over(),
        install_error: engine.install_error(),
        score: engine.score(),
    }
}
