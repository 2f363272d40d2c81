//! # Render Loop Coordinator
//!
//! Drives the per-frame cycle on the render context.
//!
//! ```text
//! tick():
//! ┌──────────────────────────────────────────────────────────────┐
//! │ with_handle (lifetime guard held for the whole tick)         │
//! │   0. drain RenderTasks (FIFO) → engine input / restart       │
//! │   a. geometry dirty? → on_geometry_changed, clear flag       │
//! │   b. on_frame()                                              │
//! │   c. changed? → raise refresh signal (coalescing)            │
//! └──────────────────────────────────────────────────────────────┘
//! destroyed → TickOutcome::Skipped, queued tasks discarded
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tris_shared::TARGET_FRAME_TIME;

use crate::engine::{forward_input, NativeEngine};
use crate::error::{BridgeError, BridgeResult};
use crate::geometry::GeometrySlot;
use crate::handle::EngineHandle;
use crate::lifecycle::RenderCallbacks;
use crate::queue::{RefreshNotifier, RenderTask, TaskReceiver};

/// Result of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine is destroyed; nothing ran.
    Skipped,
    /// A frame ran.
    Rendered {
        /// The engine reported an observable state change.
        changed: bool,
    },
}

/// Counters accumulated over the coordinator's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderLoopStats {
    /// Ticks attempted.
    pub ticks: u64,
    /// Ticks that found the engine destroyed.
    pub skipped_ticks: u64,
    /// Geometry changes forwarded to the engine.
    pub geometry_applied: u64,
    /// Tasks forwarded to the engine.
    pub tasks_forwarded: u64,
    /// Tasks dropped because the engine was gone.
    pub tasks_discarded: u64,
    /// Frames that reported a state change.
    pub changed_frames: u64,
    /// Frames that took longer than the 60 FPS budget.
    pub frames_over_budget: u64,
}

/// What happened inside the guard during one tick.
struct FrameReport {
    forwarded: u64,
    geometry_applied: bool,
    changed: bool,
}

fn apply_task<E: NativeEngine>(engine: &mut E, task: RenderTask) {
    match task {
        RenderTask::Input(event) => forward_input(engine, event),
        RenderTask::RestartGame => engine.restart_game(),
    }
}

/// Render-context side of a session.
pub struct RenderLoopCoordinator<E: NativeEngine> {
    handle: EngineHandle<E>,
    geometry: Arc<GeometrySlot>,
    tasks: TaskReceiver,
    refresh: Option<RefreshNotifier>,
    stats: RenderLoopStats,
}

impl<E: NativeEngine> RenderLoopCoordinator<E> {
    /// Creates a coordinator with no refresh signal attached.
    #[must_use]
    pub fn new(handle: EngineHandle<E>, geometry: Arc<GeometrySlot>, tasks: TaskReceiver) -> Self {
        Self {
            handle,
            geometry,
            tasks,
            refresh: None,
            stats: RenderLoopStats::default(),
        }
    }

    /// Raises `notifier` after every frame that changed observable state.
    #[must_use]
    pub fn with_refresh_notifier(mut self, notifier: RefreshNotifier) -> Self {
        self.refresh = Some(notifier);
        self
    }

    /// Runs one frame cycle.
    pub fn tick(&mut self) -> TickOutcome {
        self.stats.ticks += 1;
        let started = Instant::now();

        let tasks = &self.tasks;
        let geometry = &self.geometry;
        let report = self.handle.with_handle(|engine| {
            let mut forwarded = 0;
            for task in tasks.drain() {
                apply_task(engine, task);
                forwarded += 1;
            }

            let pending = geometry.take_if_dirty();
            if let Some(g) = pending {
                tracing::debug!(
                    rotation = g.rotation.degrees(),
                    width = g.width,
                    height = g.height,
                    "applying viewport geometry"
                );
                engine.on_geometry_changed(g.rotation, g.width, g.height);
            }

            FrameReport {
                forwarded,
                geometry_applied: pending.is_some(),
                changed: engine.on_frame(),
            }
        });

        let Some(report) = report else {
            let discarded = self.tasks.drain().len() as u64;
            if discarded > 0 {
                tracing::debug!(discarded, "engine destroyed; queued tasks discarded");
            }
            self.stats.skipped_ticks += 1;
            self.stats.tasks_discarded += discarded;
            return TickOutcome::Skipped;
        };

        self.stats.tasks_forwarded += report.forwarded;
        if report.geometry_applied {
            self.stats.geometry_applied += 1;
        }
        if report.changed {
            self.stats.changed_frames += 1;
            if let Some(notifier) = &self.refresh {
                notifier.notify();
            }
        }
        if started.elapsed() > TARGET_FRAME_TIME {
            self.stats.frames_over_budget += 1;
        }

        TickOutcome::Rendered {
            changed: report.changed,
        }
    }

    /// Returns the accumulated statistics.
    #[must_use]
    pub fn stats(&self) -> RenderLoopStats {
        self.stats
    }

    /// Returns the handle this coordinator drives.
    #[must_use]
    pub fn handle(&self) -> &EngineHandle<E> {
        &self.handle
    }
}

impl<E: NativeEngine> RenderCallbacks for RenderLoopCoordinator<E> {
    fn on_surface_created(&mut self) {
        if self.handle.with_handle(|engine| engine.on_surface_created()).is_none() {
            tracing::debug!("surface created after engine destruction; ignored");
        }
    }

    fn on_surface_changed(&mut self, width: u32, height: u32) -> BridgeResult<()> {
        self.geometry.update_size(width, height)
    }

    fn on_draw_frame(&mut self) {
        self.tick();
    }
}

// ============================================================================
// RENDER THREAD
// ============================================================================

/// A dedicated thread ticking a coordinator at a fixed cadence.
pub struct RenderThread {
    running: Arc<AtomicBool>,
    join: JoinHandle<RenderLoopStats>,
}

impl RenderThread {
    /// Name of the spawned thread.
    pub const THREAD_NAME: &'static str = "tris-render";

    /// Spawns the render thread. The surface is created on it before the first tick.
    ///
    /// The loop ends when [`stop`](Self::stop) is called or the engine is destroyed.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::RenderThread`] if the OS refuses the thread.
    pub fn spawn<E: NativeEngine>(
        mut coordinator: RenderLoopCoordinator<E>,
        frame_interval: Duration,
    ) -> BridgeResult<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let join = thread::Builder::new()
            .name(Self::THREAD_NAME.to_owned())
            .spawn(move || {
                tracing::info!(interval_ms = frame_interval.as_millis() as u64, "render thread started");
                coordinator.on_surface_created();

                while flag.load(Ordering::Acquire) {
                    let frame_start = Instant::now();
                    if coordinator.tick() == TickOutcome::Skipped {
                        tracing::info!("engine destroyed; render thread exiting");
                        break;
                    }
                    if let Some(rest) = frame_interval.checked_sub(frame_start.elapsed()) {
                        thread::sleep(rest);
                    }
                }

                let stats = coordinator.stats();
                tracing::info!(ticks = stats.ticks, changed = stats.changed_frames, "render thread stopped");
                stats
            })
            .map_err(|err| BridgeError::RenderThread(err.to_string()))?;

        Ok(Self { running, join })
    }

    /// Returns false once the loop has exited.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.join.is_finished()
    }

    /// Stops the loop, joins the thread and returns its final statistics.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::RenderThread`] if the thread panicked.
    pub fn stop(self) -> BridgeResult<RenderLoopStats> {
        self.running.store(false, Ordering::Release);
        self.join
            .join()
            .map_err(|_| BridgeError::RenderThread("render thread panicked".to_owned()))
    }
}
