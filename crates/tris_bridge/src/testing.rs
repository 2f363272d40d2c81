//! Recording engine stub for unit tests.

use std::sync::Arc;

use parking_lot::Mutex;
use tris_shared::{DisplayRotation, EngineStatusSnapshot, InstallError, PlatformContext};

use crate::engine::NativeEngine;

/// One recorded engine call.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Pause,
    Resume,
    SurfaceCreated,
    Geometry(DisplayRotation, u32, u32),
    Frame,
    Tap(f32, f32),
    DoubleTap(f32, f32),
    Scroll(f32, f32, f32, f32, f32, f32),
    LongPress(f32, f32),
    TouchUp(f32, f32),
    Restart,
}

#[derive(Default)]
struct Shared {
    calls: Vec<Call>,
    status: EngineStatusSnapshot,
    frame_changes: bool,
    dropped: bool,
}

/// Test-side view of a [`StubEngine`].
#[derive(Clone, Default)]
pub struct CallLog {
    shared: Arc<Mutex<Shared>>,
}

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.shared.lock().calls.clone()
    }

    pub fn dropped(&self) -> bool {
        self.shared.lock().dropped
    }

    pub fn set_status(&self, status: EngineStatusSnapshot) {
        self.shared.lock().status = status;
    }

    pub fn set_frame_changes(&self, changes: bool) {
        self.shared.lock().frame_changes = changes;
    }
}

/// Engine that records every call and reports a scripted status.
pub struct StubEngine {
    log: CallLog,
}

impl StubEngine {
    pub fn new() -> (Self, CallLog) {
        let log = CallLog::default();
        (Self { log: log.clone() }, log)
    }

    fn record(&self, call: Call) {
        self.log.shared.lock().calls.push(call);
    }

    fn status(&self) -> EngineStatusSnapshot {
        self.log.shared.lock().status
    }
}

impl Drop for StubEngine {
    fn drop(&mut self) {
        self.log.shared.lock().dropped = true;
    }
}

impl NativeEngine for StubEngine {
    fn on_lifecycle_pause(&mut self) {
        self.record(Call::Pause);
    }

    fn on_lifecycle_resume(&mut self, _platform: &PlatformContext) {
        self.record(Call::Resume);
    }

    fn on_surface_created(&mut self) {
        self.record(Call::SurfaceCreated);
    }

    fn on_geometry_changed(&mut self, rotation: DisplayRotation, width: u32, height: u32) {
        self.record(Call::Geometry(rotation, width, height));
    }

    fn on_frame(&mut self) -> bool {
        self.record(Call::Frame);
        self.log.shared.lock().frame_changes
    }

    fn on_tap(&mut self, x: f32, y: f32) {
        self.record(Call::Tap(x, y));
    }

    fn on_double_tap(&mut self, x: f32, y: f32) {
        self.record(Call::DoubleTap(x, y));
    }

    fn on_scroll(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, dx: f32, dy: f32) {
        self.record(Call::Scroll(x1, y1, x2, y2, dx, dy));
    }

    fn on_long_press(&mut self, x: f32, y: f32) {
        self.record(Call::LongPress(x, y));
    }

    fn on_touch_up(&mut self, x: f32, y: f32) {
        self.record(Call::TouchUp(x, y));
    }

    fn is_tracking(&self) -> bool {
        self.status().tracking
    }

    fn game_started(&self) -> bool {
        self.status().started
    }

    fn game_over(&self) -> bool {
        self.status().over
    }

    fn score(&self) -> i32 {
        self.status().score
    }

    fn install_error(&self) -> InstallError {
        self.status().install_error
    }

    fn restart_game(&mut self) {
        self.record(Call::Restart);
    }
}
