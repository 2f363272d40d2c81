//! # Render Task Queue
//!
//! Non-blocking hand-off from the UI context to the render context.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  RenderTask   ┌─────────────┐  drain()   ┌─────────────┐
//! │ UI context  │──────────────>│  FIFO       │───────────>│  Render     │
//! │ (gestures)  │  send()       │  channel    │  per tick  │  context    │
//! └─────────────┘               └─────────────┘            └──────┬──────┘
//!       ▲                                                         │
//!       │            RefreshSignal (bounded(1), coalescing)       │
//!       └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Tasks flow FROM the UI context TO the render context in submission order.
//! The refresh signal flows back and collapses repeated notifications.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use tris_shared::InputEvent;

/// Work posted to the render context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderTask {
    /// Forward a classified input event to the engine.
    Input(InputEvent),
    /// Start a new game.
    RestartGame,
}

/// Creates a connected task sender/receiver pair.
#[must_use]
pub fn task_queue() -> (TaskSender, TaskReceiver) {
    let (sender, receiver) = unbounded();
    (TaskSender { sender }, TaskReceiver { receiver })
}

/// Handle for posting tasks (UI context).
#[derive(Clone)]
pub struct TaskSender {
    sender: Sender<RenderTask>,
}

impl TaskSender {
    /// Posts a task without blocking.
    ///
    /// Returns `false` if the render side is gone; the task is dropped.
    #[inline]
    pub fn send(&self, task: RenderTask) -> bool {
        self.sender.send(task).is_ok()
    }
}

/// Handle for consuming tasks (render context).
pub struct TaskReceiver {
    receiver: Receiver<RenderTask>,
}

impl TaskReceiver {
    /// Receives all pending tasks in submission order (non-blocking).
    #[inline]
    pub fn drain(&self) -> Vec<RenderTask> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending tasks.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}

/// Creates a connected refresh signal pair.
#[must_use]
pub fn refresh_signal() -> (RefreshNotifier, RefreshSignal) {
    let (sender, receiver) = bounded(1);
    (RefreshNotifier { sender }, RefreshSignal { receiver })
}

/// Render-side end: raises the signal after a frame that changed state.
#[derive(Clone)]
pub struct RefreshNotifier {
    sender: Sender<()>,
}

impl RefreshNotifier {
    /// Raises the signal. Never blocks; an already raised signal stays raised.
    #[inline]
    pub fn notify(&self) {
        match self.sender.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => {}
            Err(TrySendError::Disconnected(())) => {
                tracing::trace!("refresh signal receiver dropped");
            }
        }
    }
}

/// UI-side end: consumed by the refresh scheduler.
pub struct RefreshSignal {
    receiver: Receiver<()>,
}

impl RefreshSignal {
    /// Returns true (and lowers the signal) if it was raised since the last call.
    #[inline]
    pub fn take(&self) -> bool {
        self.receiver.try_recv().is_ok()
    }
}
