//! # Simulated Engine
//!
//! Deterministic stand-in for the native AR engine, driven purely by frame
//! count and input.
//!
//! ```text
//! frame < frames_until_tracking    → searching
//! tracking, tap                    → board placed, game started
//! every frames_per_point frames    → +1 score
//! long press                       → hard drop, +1 score
//! game_length_frames elapsed       → game over
//! restart                          → score 0, game running again
//! ```

use tris_bridge::NativeEngine;
use tris_shared::{DisplayRotation, InstallError, PlatformContext};

/// Pacing of the simulated game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Frames before a surface is "found".
    pub frames_until_tracking: u64,
    /// Frames per passive point while a game runs.
    pub frames_per_point: u64,
    /// Frames a game lasts.
    pub game_length_frames: u64,
    /// Installation error reported from the start.
    pub install_error: InstallError,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frames_until_tracking: 30,
            frames_per_point: 10,
            game_length_frames: 180,
            install_error: InstallError::SUCCESS,
        }
    }
}

/// Observable state, compared across a frame to report changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Observable {
    tracking: bool,
    started: bool,
    over: bool,
    score: i32,
    install_error: InstallError,
}

/// Headless engine implementing the native boundary.
#[derive(Debug)]
pub struct SimulatedEngine {
    config: SimConfig,
    state: Observable,
    frame: u64,
    game_frames: u64,
    surface_ready: bool,
    paused: bool,
    viewport: Option<(DisplayRotation, u32, u32)>,
    /// Set by input or commands; reported by the next frame.
    input_dirty: bool,
    inputs: u64,
}

impl SimulatedEngine {
    /// Creates an engine waiting for its surface.
    #[must_use]
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            state: Observable {
                install_error: config.install_error,
                ..Observable::default()
            },
            frame: 0,
            game_frames: 0,
            surface_ready: false,
            paused: true,
            viewport: None,
            input_dirty: false,
            inputs: 0,
        }
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Input events received so far.
    #[must_use]
    pub fn inputs(&self) -> u64 {
        self.inputs
    }

    /// Last viewport forwarded by the bridge.
    #[must_use]
    pub fn viewport(&self) -> Option<(DisplayRotation, u32, u32)> {
        self.viewport
    }

    fn game_running(&self) -> bool {
        self.state.started && !self.state.over
    }
}

impl Drop for SimulatedEngine {
    fn drop(&mut self) {
        tracing::debug!(frames = self.frame, inputs = self.inputs, "simulated engine released");
    }
}

impl NativeEngine for SimulatedEngine {
    fn on_lifecycle_pause(&mut self) {
        self.paused = true;
    }

    fn on_lifecycle_resume(&mut self, platform: &PlatformContext) {
        self.paused = false;
        if !platform.camera_permission_granted {
            self.state.install_error = InstallError::CAMERA_PERMISSION_NOT_GRANTED;
            self.input_dirty = true;
        }
    }

    fn on_surface_created(&mut self) {
        self.surface_ready = true;
    }

    fn on_geometry_changed(&mut self, rotation: DisplayRotation, width: u32, height: u32) {
        tracing::debug!(degrees = rotation.degrees(), width, height, "simulated viewport");
        self.viewport = Some((rotation, width, height));
    }

    fn on_frame(&mut self) -> bool {
        if self.paused || !self.surface_ready {
            return false;
        }

        let before = self.state;
        self.frame += 1;

        if !self.state.tracking && self.frame >= self.config.frames_until_tracking {
            self.state.tracking = true;
        }

        if self.game_running() && self.state.tracking {
            self.game_frames += 1;
            if self.game_frames % self.config.frames_per_point.max(1) == 0 {
                self.state.score += 1;
            }
            if self.game_frames >= self.config.game_length_frames {
                self.state.over = true;
            }
        }

        let changed = self.input_dirty || self.state != before;
        self.input_dirty = false;
        changed
    }

    fn on_tap(&mut self, _x: f32, _y: f32) {
        self.inputs += 1;
        if self.state.tracking && !self.state.started {
            self.state.started = true;
            self.input_dirty = true;
            tracing::info!(frame = self.frame, "board placed, game started");
        }
    }

    fn on_scroll(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32, _dx: f32, _dy: f32) {
        self.inputs += 1;
    }

    fn on_long_press(&mut self, _x: f32, _y: f32) {
        self.inputs += 1;
        if self.game_running() {
            self.state.score += 1;
            self.input_dirty = true;
        }
    }

    fn on_touch_up(&mut self, _x: f32, _y: f32) {
        self.inputs += 1;
    }

    fn is_tracking(&self) -> bool {
        self.state.tracking
    }

    fn game_started(&self) -> bool {
        self.state.started
    }

    fn game_over(&self) -> bool {
        self.state.over
    }

    fn score(&self) -> i32 {
        self.state.score
    }

    fn install_error(&self) -> InstallError {
        self.state.install_error
    }

    fn restart_game(&mut self) {
        if self.state.started {
            self.state.over = false;
            self.state.score = 0;
            self.game_frames = 0;
            self.input_dirty = true;
            tracing::info!("game restarted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_engine(config: SimConfig) -> SimulatedEngine {
        let mut engine = SimulatedEngine::new(config);
        engine.on_surface_created();
        engine.on_lifecycle_resume(&PlatformContext::new("test", true));
        engine
    }

    #[test]
    fn test_paused_engine_does_not_advance() {
        let mut engine = SimulatedEngine::new(SimConfig::default());
        engine.on_surface_created();
        assert!(!engine.on_frame());
        assert_eq!(engine.frames(), 0);
    }

    #[test]
    fn test_full_game_cycle() {
        let config = SimConfig {
            frames_until_tracking: 2,
            frames_per_point: 3,
            game_length_frames: 9,
            install_error: InstallError::SUCCESS,
        };
        let mut engine = running_engine(config);

        assert!(!engine.on_frame());
        assert!(engine.on_frame());
        assert!(engine.is_tracking());

        engine.on_tap(0.0, 0.0);
        assert!(engine.game_started());
        assert!(engine.on_frame());

        engine.on_long_press(0.0, 0.0);
        for _ in 0..8 {
            engine.on_frame();
        }
        assert!(engine.game_over());
        assert_eq!(engine.score(), 4);

        engine.on_tap(0.0, 0.0);
        assert!(engine.game_over());

        engine.restart_game();
        assert!(!engine.game_over());
        assert_eq!(engine.score(), 0);
        assert!(engine.on_frame());
    }

    #[test]
    fn test_missing_permission_surfaces_install_error() {
        let mut engine = SimulatedEngine::new(SimConfig::default());
        engine.on_lifecycle_resume(&PlatformContext::new("test", false));
        assert_eq!(engine.install_error(), InstallError::CAMERA_PERMISSION_NOT_GRANTED);
    }

    #[test]
    fn test_double_tap_places_board_like_a_tap() {
        let mut engine = running_engine(SimConfig {
            frames_until_tracking: 1,
            ..SimConfig::default()
        });
        engine.on_frame();
        engine.on_double_tap(5.0, 5.0);
        assert!(engine.game_started());
    }
}
