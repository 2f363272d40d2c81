//! # Session
//!
//! Wires the components together and implements the platform capability
//! traits by delegating to them.
//!
//! ```text
//!                    ┌──────────────────────────── Session (UI context) ─┐
//! contacts ─────────>│ GestureDispatcher ──TaskSender──┐                 │
//! restart ──────────>│ ────────────────────────────────┤                 │
//! display changed ──>│ GeometrySlot <──────────────────┼──────┐          │
//! resume/pause ─────>│ UiRefreshScheduler <─RefreshSignal─┐   │          │
//!                    └────────────────────────────────┼──┼───┼──────────┘
//!                                                     ▼  │   │
//!                    ┌── RenderLoopCoordinator (render context) ─────────┐
//!                    │ TaskReceiver, GeometrySlot, RefreshNotifier       │
//!                    └───────────────────────────────────────────────────┘
//!                  both sides reach the engine only through EngineHandle
//! ```

use std::sync::Arc;
use std::time::Duration;

use tris_shared::{ContactSample, DisplayRotation, PlatformContext};

use crate::config::BridgeConfig;
use crate::engine::NativeEngine;
use crate::error::BridgeResult;
use crate::geometry::GeometrySlot;
use crate::gesture::GestureDispatcher;
use crate::handle::EngineHandle;
use crate::lifecycle::{
    DisplayListener, LifecycleObserver, PermissionAction, ResumeOutcome, CAMERA_PERMISSION_NOTICE,
};
use crate::queue::{refresh_signal, task_queue, RenderTask, TaskSender};
use crate::refresh::{Presenter, UiRefreshScheduler};
use crate::render_loop::RenderLoopCoordinator;
use crate::store::{HighScore, ScoreStore};

/// One running game host: engine handle plus both loop sides.
pub struct Session<E: NativeEngine, P, S> {
    handle: EngineHandle<E>,
    geometry: Arc<GeometrySlot>,
    tasks: TaskSender,
    dispatcher: GestureDispatcher,
    scheduler: UiRefreshScheduler<P, S>,
    render: Option<RenderLoopCoordinator<E>>,
    display_listener_registered: bool,
    permission_notice_shown: bool,
}

impl<E: NativeEngine, P: Presenter, S: ScoreStore> Session<E, P, S> {
    /// Creates the engine and wires every component.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::EngineCreation`](crate::BridgeError::EngineCreation)
    /// if the engine cannot be constructed. Fatal for startup.
    pub fn new<F>(factory: F, config: &BridgeConfig, presenter: P, store: S) -> BridgeResult<Self>
    where
        F: FnOnce() -> BridgeResult<E>,
    {
        let handle = EngineHandle::create(factory)?;
        let geometry = Arc::new(GeometrySlot::new());
        let (tasks, task_receiver) = task_queue();
        let (notifier, signal) = refresh_signal();

        let render = RenderLoopCoordinator::new(handle.clone(), Arc::clone(&geometry), task_receiver)
            .with_refresh_notifier(notifier);
        let dispatcher = GestureDispatcher::new(config.gesture_config(), tasks.clone());
        let scheduler =
            UiRefreshScheduler::new(config.refresh_policy(), presenter, HighScore::new(store))
                .with_refresh_signal(signal);

        tracing::info!(policy = ?scheduler.policy(), "session created");

        Ok(Self {
            handle,
            geometry,
            tasks,
            dispatcher,
            scheduler,
            render: Some(render),
            display_listener_registered: false,
            permission_notice_shown: false,
        })
    }

    /// Hands out the render-context side. Returns `None` after the first call.
    pub fn take_render_loop(&mut self) -> Option<RenderLoopCoordinator<E>> {
        self.render.take()
    }

    /// One UI loop iteration: time-driven gestures, then the refresh schedule.
    ///
    /// Returns whether a refresh run happened.
    pub fn poll(&mut self, now: Duration) -> bool {
        self.dispatcher.on_tick(now);
        self.scheduler.poll(now, &self.handle)
    }

    /// Feeds a raw contact sample. Returns the number of events posted.
    pub fn on_contact(&mut self, sample: ContactSample) -> usize {
        self.dispatcher.on_contact(sample)
    }

    /// Posts a restart to the render context.
    pub fn restart_game(&self) -> bool {
        let posted = self.tasks.send(RenderTask::RestartGame);
        if !posted {
            tracing::warn!("render context gone; restart dropped");
        }
        posted
    }

    /// Records a surface resize reported on the UI context.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidGeometry`](crate::BridgeError::InvalidGeometry) for an empty size.
    pub fn on_surface_resized(&self, width: u32, height: u32) -> BridgeResult<()> {
        self.geometry.update_size(width, height)
    }

    /// Handles the result of a camera permission request.
    pub fn on_permission_result(&mut self, granted: bool, can_ask_again: bool) -> PermissionAction {
        let action = PermissionAction::decide(granted, can_ask_again);
        if action.closes() && !self.permission_notice_shown {
            self.permission_notice_shown = true;
            if let Err(err) = self.scheduler.presenter_mut().notify(CAMERA_PERMISSION_NOTICE) {
                tracing::warn!(error = %err, "permission notice not shown");
            }
        }
        tracing::info!(?action, "camera permission result");
        action
    }

    /// Returns whether display changes are currently observed.
    #[must_use]
    pub fn is_display_listener_registered(&self) -> bool {
        self.display_listener_registered
    }

    /// The engine handle.
    #[must_use]
    pub fn handle(&self) -> &EngineHandle<E> {
        &self.handle
    }

    /// The geometry slot shared with the render context.
    #[must_use]
    pub fn geometry(&self) -> &Arc<GeometrySlot> {
        &self.geometry
    }

    /// The refresh scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &UiRefreshScheduler<P, S> {
        &self.scheduler
    }

    /// The gesture dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &GestureDispatcher {
        &self.dispatcher
    }
}

impl<E: NativeEngine, P: Presenter, S: ScoreStore> LifecycleObserver for Session<E, P, S> {
    fn on_resume(&mut self, platform: &PlatformContext, now: Duration) -> ResumeOutcome {
        if !platform.camera_permission_granted {
            tracing::info!("camera permission missing; resume deferred");
            return ResumeOutcome::PermissionRequired;
        }

        if self
            .handle
            .with_handle(|engine| engine.on_lifecycle_resume(platform))
            .is_none()
        {
            tracing::warn!("resume after engine destruction");
        }

        self.scheduler.start(now);
        self.scheduler.run_now(now, &self.handle);
        self.display_listener_registered = true;
        tracing::info!(platform = %platform.label, "session resumed");
        ResumeOutcome::Resumed
    }

    fn on_pause(&mut self) {
        self.handle.with_handle(|engine| engine.on_lifecycle_pause());
        self.scheduler.stop();
        self.display_listener_registered = false;
        tracing::info!("session paused");
    }

    fn on_destroy(&mut self) {
        self.scheduler.stop();
        self.display_listener_registered = false;
        self.handle.destroy();
    }
}

impl<E: NativeEngine, P: Presenter, S: ScoreStore> DisplayListener for Session<E, P, S> {
    fn on_display_changed(&mut self, rotation: DisplayRotation) {
        if self.display_listener_registered {
            tracing::debug!(degrees = rotation.degrees(), "display rotation changed");
            self.geometry.update_rotation(rotation);
        }
    }
}
