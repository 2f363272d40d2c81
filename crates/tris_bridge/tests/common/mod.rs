//! Shared probes for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use tris_bridge::{BridgeError, BridgeResult, NativeEngine, Presenter, ScoreLine, ScoreStore, StatusView};
use tris_shared::{DisplayRotation, EngineStatusSnapshot, InstallError, PlatformContext};

/// One observed engine call. `Dropped` is pushed by the engine's destructor.
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
    Dropped,
}

#[derive(Default)]
struct Script {
    calls: Vec<Call>,
    status: EngineStatusSnapshot,
    frame_changes: bool,
}

/// Test-side view of a [`ProbeEngine`].
#[derive(Clone, Default)]
pub struct Probe {
    script: Arc<Mutex<Script>>,
}

impl Probe {
    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().calls.clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.script.lock().calls.iter().filter(|c| predicate(c)).count()
    }

    pub fn set_status(&self, status: EngineStatusSnapshot) {
        self.script.lock().status = status;
    }

    pub fn set_frame_changes(&self, changes: bool) {
        self.script.lock().frame_changes = changes;
    }
}

/// Engine recording every entry point into its [`Probe`].
pub struct ProbeEngine {
    probe: Probe,
}

impl ProbeEngine {
    pub fn create() -> (Self, Probe) {
        let probe = Probe::default();
        (Self { probe: probe.clone() }, probe)
    }

    fn record(&self, call: Call) {
        self.probe.script.lock().calls.push(call);
    }

    fn status(&self) -> EngineStatusSnapshot {
        self.probe.script.lock().status
    }
}

impl Drop for ProbeEngine {
    fn drop(&mut self) {
        self.record(Call::Dropped);
    }
}

impl NativeEngine for ProbeEngine {
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
        self.probe.script.lock().frame_changes
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

/// Everything a [`ScreenPresenter`] was asked to show.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Screen {
    pub statuses: Vec<(String, i32)>,
    pub game_ends: Vec<String>,
    pub game_starts: u32,
    pub notices: Vec<String>,
}

/// Presenter recording into a shared [`Screen`].
#[derive(Clone, Default)]
pub struct ScreenPresenter {
    screen: Arc<Mutex<Screen>>,
}

impl ScreenPresenter {
    pub fn screen(&self) -> Screen {
        self.screen.lock().clone()
    }
}

impl Presenter for ScreenPresenter {
    fn show_status(&mut self, view: &StatusView) -> BridgeResult<()> {
        self.screen
            .lock()
            .statuses
            .push((view.message.as_str().to_owned(), view.score));
        Ok(())
    }

    fn show_game_end(&mut self, line: &ScoreLine) -> BridgeResult<()> {
        self.screen.lock().game_ends.push(line.to_string());
        Ok(())
    }

    fn show_game_start(&mut self) -> BridgeResult<()> {
        self.screen.lock().game_starts += 1;
        Ok(())
    }

    fn notify(&mut self, message: &str) -> BridgeResult<()> {
        self.screen.lock().notices.push(message.to_owned());
        Ok(())
    }
}

/// Store whose writes always fail.
#[derive(Default)]
pub struct ReadOnlyStore;

impl ScoreStore for ReadOnlyStore {
    fn get_int(&self, _key: &str) -> BridgeResult<Option<i64>> {
        Ok(None)
    }

    fn put_int(&mut self, key: &str, _value: i64) -> BridgeResult<()> {
        Err(BridgeError::Store(format!("{key}: read-only store")))
    }
}

pub fn snapshot(tracking: bool, started: bool, over: bool, score: i32) -> EngineStatusSnapshot {
    EngineStatusSnapshot {
        tracking,
        started,
        over,
        score,
        install_error: InstallError::SUCCESS,
    }
}
