//! # UI Refresh Scheduler
//!
//! Periodically re-derives what the player sees and pushes only changes to
//! the presentation layer.
//!
//! ```text
//! poll(now) ──> due? ──> with_handle(query_snapshot)
//!                            │
//!                            ├─ game-end transition ─> HighScore::record ─┐
//!                            ├─ restart transition ───────────────────────┤
//!                            │                                   pending view ─> show_game_end
//!                            │                                                   show_game_start
//!                            └─ (message, score) changed ────────────────> show_status
//! ```
//!
//! Runs entirely on the UI context. The previous view is owned here, never by
//! the presenter. A transition view stays pending until the presenter accepts
//! it, and the status diff runs even when a transition step failed; the first
//! error of a run is the one reported.

use std::time::Duration;

use tris_shared::{EngineStatusSnapshot, DEFAULT_REFRESH_INTERVAL};

use crate::engine::{query_snapshot, NativeEngine};
use crate::error::BridgeResult;
use crate::handle::EngineHandle;
use crate::queue::RefreshSignal;
use crate::status::{resolve_snapshot, StatusMessage};
use crate::store::{HighScore, ScoreLine, ScoreStore};

/// When refresh runs happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Every fixed interval.
    FixedInterval(Duration),
    /// Whenever the render context reports a changed frame.
    OnFrameChange,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::FixedInterval(DEFAULT_REFRESH_INTERVAL)
    }
}

/// The status line and score as last presented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusView {
    /// Resolved status line; empty hides the status.
    pub message: StatusMessage,
    /// Current score.
    pub score: i32,
}

/// Presentation layer boundary.
pub trait Presenter {
    /// Shows the status line and the score.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Presenter`](crate::BridgeError::Presenter) if the update was rejected.
    fn show_status(&mut self, view: &StatusView) -> BridgeResult<()>;

    /// Shows the final score line and the restart control.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Presenter`](crate::BridgeError::Presenter) if the update was rejected.
    fn show_game_end(&mut self, line: &ScoreLine) -> BridgeResult<()>;

    /// Hides the end-of-game view when a new game starts.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Presenter`](crate::BridgeError::Presenter) if the update was rejected.
    fn show_game_start(&mut self) -> BridgeResult<()>;

    /// Shows a one-shot transient notice.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Presenter`](crate::BridgeError::Presenter) if the notice could not be shown.
    fn notify(&mut self, message: &str) -> BridgeResult<()>;
}

/// Refresh counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshStats {
    /// Runs that queried the engine.
    pub runs: u64,
    /// `show_status` calls made.
    pub status_updates: u64,
    /// Runs that hit a store or presenter error.
    pub failures: u64,
    /// Runs that found the engine destroyed.
    pub engine_gone: u64,
}

/// Transition view computed but not yet accepted by the presenter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PendingView {
    GameEnd(ScoreLine),
    GameStart,
}

/// UI-context refresh task with explicit start/stop.
pub struct UiRefreshScheduler<P, S> {
    policy: RefreshPolicy,
    presenter: P,
    high_score: HighScore<S>,
    signal: Option<RefreshSignal>,
    running: bool,
    /// Next time a run is due; `None` when waiting on the signal only.
    next_due: Option<Duration>,
    last_view: Option<StatusView>,
    game_ended: bool,
    pending: Option<PendingView>,
    stats: RefreshStats,
}

impl<P: Presenter, S: ScoreStore> UiRefreshScheduler<P, S> {
    /// Creates a stopped scheduler.
    pub fn new(policy: RefreshPolicy, presenter: P, high_score: HighScore<S>) -> Self {
        Self {
            policy,
            presenter,
            high_score,
            signal: None,
            running: false,
            next_due: None,
            last_view: None,
            game_ended: false,
            pending: None,
            stats: RefreshStats::default(),
        }
    }

    /// Attaches the render context's refresh signal, used by [`RefreshPolicy::OnFrameChange`].
    #[must_use]
    pub fn with_refresh_signal(mut self, signal: RefreshSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Starts the schedule; the first run is due immediately.
    pub fn start(&mut self, now: Duration) {
        if !self.running {
            tracing::debug!(policy = ?self.policy, "ui refresh started");
        }
        self.running = true;
        self.next_due = Some(now);
    }

    /// Stops the schedule. A stopped scheduler never runs.
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!("ui refresh stopped");
        }
        self.running = false;
        self.next_due = None;
    }

    /// Returns whether the schedule is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Runs if due. Returns whether a run was attempted.
    pub fn poll<E: NativeEngine>(&mut self, now: Duration, handle: &EngineHandle<E>) -> bool {
        if !self.running {
            return false;
        }

        let timer_due = self.next_due.is_some_and(|due| now >= due);
        let due = match self.policy {
            RefreshPolicy::FixedInterval(_) => timer_due,
            RefreshPolicy::OnFrameChange => {
                let signaled = self.signal.as_ref().is_some_and(RefreshSignal::take);
                timer_due || signaled
            }
        };
        if !due {
            return false;
        }

        self.run(handle);
        self.reschedule(now);
        true
    }

    /// Runs immediately if started and restarts the interval from `now`.
    /// Returns whether a run was attempted.
    pub fn run_now<E: NativeEngine>(&mut self, now: Duration, handle: &EngineHandle<E>) -> bool {
        if !self.running {
            return false;
        }
        self.run(handle);
        self.reschedule(now);
        true
    }

    fn reschedule(&mut self, now: Duration) {
        self.next_due = match self.policy {
            RefreshPolicy::FixedInterval(interval) => Some(now + interval),
            RefreshPolicy::OnFrameChange => None,
        };
    }

    fn run<E: NativeEngine>(&mut self, handle: &EngineHandle<E>) {
        let Some(snapshot) = handle.with_handle(|engine| query_snapshot(engine)) else {
            self.stats.engine_gone += 1;
            return;
        };

        self.stats.runs += 1;
        if let Err(err) = self.apply(&snapshot) {
            self.stats.failures += 1;
            tracing::error!(error = %err, "ui refresh failed");
        }
    }

    fn apply(&mut self, snapshot: &EngineStatusSnapshot) -> BridgeResult<()> {
        let mut outcome = Ok(());

        let ended = snapshot.has_ended();
        if ended && !self.game_ended {
            // Left unended on failure so the next run records again.
            match self.high_score.record(i64::from(snapshot.score)) {
                Ok(line) => {
                    tracing::info!(score = snapshot.score, "game over");
                    self.game_ended = true;
                    self.pending = Some(PendingView::GameEnd(line));
                }
                Err(err) => keep_first(&mut outcome, Err(err)),
            }
        } else if !ended && self.game_ended {
            self.game_ended = false;
            self.pending = Some(PendingView::GameStart);
        }

        if let Some(pending) = self.pending {
            let shown = match pending {
                PendingView::GameEnd(line) => self.presenter.show_game_end(&line),
                PendingView::GameStart => self.presenter.show_game_start(),
            };
            if shown.is_ok() {
                self.pending = None;
            }
            keep_first(&mut outcome, shown);
        }

        let view = StatusView {
            message: resolve_snapshot(snapshot),
            score: snapshot.score,
        };
        if self.last_view.as_ref() != Some(&view) {
            let shown = self.presenter.show_status(&view);
            if shown.is_ok() {
                self.stats.status_updates += 1;
                self.last_view = Some(view);
            }
            keep_first(&mut outcome, shown);
        }
        outcome
    }

    /// Returns the counters.
    #[must_use]
    pub fn stats(&self) -> RefreshStats {
        self.stats
    }

    /// Returns the policy chosen at construction.
    #[must_use]
    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// Borrows the presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Mutably borrows the presenter.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Borrows the high score.
    pub fn high_score(&self) -> &HighScore<S> {
        &self.high_score
    }
}

fn keep_first(outcome: &mut BridgeResult<()>, result: BridgeResult<()>) {
    if outcome.is_ok() {
        *outcome = result;
    }
}
