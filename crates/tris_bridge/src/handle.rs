//! # Engine Handle & Lifetime Guard
//!
//! The one synchronization point between the UI and render contexts.
//!
//! ## The Problem
//!
//! ```text
//! UI context:      ... destroy() ...............
//! Render context:  ... on_frame() ... on_frame()
//!
//! Without a guard: destroy lands mid-frame → USE AFTER FREE
//! ```
//!
//! ## The Solution: One Guarded Slot
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │  LifetimeGuard                       │
//! │  Mutex<Option<E>>                    │
//! │    Some(engine) → alive              │
//! │    None         → destroyed          │
//! └──────────────────────────────────────┘
//!          ▲                   ▲
//!   with_handle(f)        destroy()
//!   (frame, input,        (takes + drops
//!    queries)              under the lock)
//! ```
//!
//! The engine can only be reached through [`EngineHandle::with_handle`], so
//! destruction is ordered strictly before or after any frame step.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::engine::NativeEngine;
use crate::error::{BridgeError, BridgeResult};

/// Mutex-guarded engine slot. `None` is the destroyed state.
struct LifetimeGuard<E> {
    slot: Mutex<Option<E>>,
    /// Calls that arrived after destruction.
    rejected: AtomicU64,
}

/// Shared, lifetime-guarded owner of the native engine.
///
/// Clones share the same slot: one engine, many accessors across threads.
pub struct EngineHandle<E: NativeEngine> {
    guard: Arc<LifetimeGuard<E>>,
}

impl<E: NativeEngine> Clone for EngineHandle<E> {
    fn clone(&self) -> Self {
        Self {
            guard: Arc::clone(&self.guard),
        }
    }
}

impl<E: NativeEngine> EngineHandle<E> {
    /// Constructs the engine through `factory`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::EngineCreation`] if the factory fails. The
    /// failure is fatal for startup and is not retried.
    pub fn create<F>(factory: F) -> BridgeResult<Self>
    where
        F: FnOnce() -> BridgeResult<E>,
    {
        let engine = factory().map_err(|err| match err {
            BridgeError::EngineCreation(reason) => BridgeError::EngineCreation(reason),
            other => BridgeError::EngineCreation(other.to_string()),
        })?;

        tracing::info!("native engine created");

        Ok(Self {
            guard: Arc::new(LifetimeGuard {
                slot: Mutex::new(Some(engine)),
                rejected: AtomicU64::new(0),
            }),
        })
    }

    /// Runs `f` against the engine if it is still alive.
    ///
    /// Returns `None` when the engine has been destroyed, including when
    /// destruction won the race against this call.
    pub fn with_handle<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut E) -> R,
    {
        let mut slot = self.guard.slot.lock();
        if let Some(engine) = slot.as_mut() {
            Some(f(engine))
        } else {
            self.guard.rejected.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    /// Destroys the engine.
    ///
    /// The engine is dropped while the guard is held, so no frame step can
    /// observe a half-destroyed engine. Idempotent: returns `false` if it was
    /// already destroyed.
    pub fn destroy(&self) -> bool {
        let mut slot = self.guard.slot.lock();
        match slot.take() {
            Some(engine) => {
                drop(engine);
                tracing::info!("native engine destroyed");
                true
            }
            None => {
                tracing::debug!("destroy on an already destroyed engine ignored");
                false
            }
        }
    }

    /// Returns whether the engine is still alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.guard.slot.lock().is_some()
    }

    /// Number of `with_handle` calls that found the engine destroyed.
    #[inline]
    #[must_use]
    pub fn rejected_calls(&self) -> u64 {
        self.guard.rejected.load(Ordering::Relaxed)
    }
}
