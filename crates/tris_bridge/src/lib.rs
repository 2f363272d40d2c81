//! # TRIS Bridge
//!
//! Handle lifecycle and cross-thread coordination between the host UI loop
//! and the native AR engine's render loop.
//!
//! ## Design Principles
//!
//! 1. **One guard** - the engine is reachable only through [`EngineHandle::with_handle`]
//! 2. **UI never blocks** - input is classified on the UI context and posted as tasks
//! 3. **Fresh status** - every refresh queries the engine; only changes are presented
//! 4. **External configuration** - thresholds and cadences come from TOML
//!
//! ## Thread Model
//!
//! ```text
//! UI context                               render context
//! ──────────                               ──────────────
//! Session::on_contact ──RenderTask──────> RenderLoopCoordinator::tick
//! Session::poll  <────refresh signal────  (drain → geometry → on_frame)
//!      │                                        │
//!      └────────────── EngineHandle ────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use tris_bridge::{BridgeConfig, MemoryScoreStore, RenderThread, Session};
//!
//! let config = BridgeConfig::load("tris.toml")?;
//! let mut session = Session::new(|| Ok(MyEngine::new()), &config, presenter, MemoryScoreStore::new())?;
//! let render = RenderThread::spawn(session.take_render_loop().unwrap(), config.frame_interval())?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod handle;
pub mod lifecycle;
pub mod queue;
pub mod refresh;
pub mod render_loop;
pub mod session;
pub mod status;
pub mod store;

#[cfg(test)]
mod testing;

pub use config::BridgeConfig;
pub use engine::{forward_input, query_snapshot, NativeEngine};
pub use error::{BridgeError, BridgeResult};
pub use geometry::GeometrySlot;
pub use gesture::{GestureClassifier, GestureConfig, GestureDispatcher};
pub use handle::EngineHandle;
pub use lifecycle::{
    DisplayListener, LifecycleObserver, PermissionAction, RenderCallbacks, ResumeOutcome,
    CAMERA_PERMISSION_NOTICE,
};
pub use queue::{refresh_signal, task_queue, RefreshNotifier, RefreshSignal, RenderTask, TaskReceiver, TaskSender};
pub use refresh::{Presenter, RefreshPolicy, RefreshStats, StatusView, UiRefreshScheduler};
pub use render_loop::{RenderLoopCoordinator, RenderLoopStats, RenderThread, TickOutcome};
pub use session::Session;
pub use status::{resolve, resolve_snapshot, StatusMessage};
pub use store::{FileScoreStore, HighScore, MemoryScoreStore, ScoreLine, ScoreStore};
