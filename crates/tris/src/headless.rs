//! # Headless Session Driver
//!
//! Runs a complete session the way a windowed host would, minus the window:
//!
//! ```text
//! main thread (UI context)               tris-render thread
//! ────────────────────────               ──────────────────
//! resize + resume                        on_surface_created
//! replay scripted contacts ──tasks──>    tick() every frame_interval
//! poll refresh <────refresh signal────   state changed
//! game over → restart ──task──>
//! pause, destroy                         Skipped → exit
//! ```

use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tris_bridge::{
    BridgeConfig, BridgeError, BridgeResult, FileScoreStore, LifecycleObserver,
    MemoryScoreStore, RefreshStats, RenderLoopStats, RenderThread, ResumeOutcome, ScoreStore,
    Session,
};
use tris_shared::{ContactSample, PlatformContext};

use crate::presenter::LogPresenter;
use crate::sim::{SimConfig, SimulatedEngine};

/// UI loop sleep between polls.
const UI_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Errors that end a headless run.
#[derive(Error, Debug)]
pub enum HostError {
    /// A bridge operation failed.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// The session refused to resume.
    #[error("camera permission denied")]
    PermissionDenied,

    /// The render loop was already handed out.
    #[error("render loop unavailable")]
    RenderLoopTaken,
}

/// Score store chosen from configuration.
pub enum HostStore {
    /// No `[store] path` configured.
    Memory(MemoryScoreStore),
    /// File-backed.
    File(FileScoreStore),
}

impl HostStore {
    /// Opens the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Store`] if the configured file is unreadable.
    pub fn from_config(config: &BridgeConfig) -> BridgeResult<Self> {
        match &config.store.path {
            Some(path) => Ok(Self::File(FileScoreStore::open(path.clone())?)),
            None => Ok(Self::Memory(MemoryScoreStore::new())),
        }
    }
}

impl ScoreStore for HostStore {
    fn get_int(&self, key: &str) -> BridgeResult<Option<i64>> {
        match self {
            Self::Memory(store) => store.get_int(key),
            Self::File(store) => store.get_int(key),
        }
    }

    fn put_int(&mut self, key: &str, value: i64) -> BridgeResult<()> {
        match self {
            Self::Memory(store) => store.put_int(key, value),
            Self::File(store) => store.put_int(key, value),
        }
    }
}

/// Everything a run needs.
#[derive(Clone, Debug)]
pub struct HeadlessOptions {
    /// Bridge configuration.
    pub config: BridgeConfig,
    /// Simulated game pacing.
    pub sim: SimConfig,
    /// Contacts delivered when their timestamp is reached.
    pub script: Vec<ContactSample>,
    /// Games to finish before shutting down.
    pub games: u32,
    /// Wall-clock limit.
    pub timeout: Duration,
    /// Surface size reported before the first frame.
    pub surface: (u32, u32),
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self {
            config: BridgeConfig::default(),
            sim: SimConfig::default(),
            script: demo_script(),
            games: 2,
            timeout: Duration::from_secs(30),
            surface: (1080, 1920),
        }
    }
}

/// Outcome of a run.
#[derive(Clone, Debug)]
pub struct HeadlessReport {
    /// All requested games finished before the timeout.
    pub completed: bool,
    /// Games that reached the end-of-game view.
    pub games_finished: u32,
    /// Games started again after an end-of-game view.
    pub games_restarted: u32,
    /// Final refresh counters.
    pub refresh: RefreshStats,
    /// Final render loop counters.
    pub render: RenderLoopStats,
    /// Stored record at shutdown.
    pub high_score: i64,
    /// Last final score line shown.
    pub last_score_line: Option<String>,
}

/// Taps to place the board, a drag, a hard drop, then more taps for later games.
#[must_use]
pub fn demo_script() -> Vec<ContactSample> {
    let ms = Duration::from_millis;
    let mut script = Vec::new();
    for round in 0..20u64 {
        let at = 600 + round * 700;
        script.push(ContactSample::down(540.0, 960.0, ms(at)));
        script.push(ContactSample::up(541.0, 961.0, ms(at + 60)));
    }
    script.extend([
        ContactSample::down(300.0, 900.0, ms(1_500)),
        ContactSample::moved(360.0, 900.0, ms(1_530)),
        ContactSample::moved(420.0, 905.0, ms(1_560)),
        ContactSample::up(420.0, 905.0, ms(1_590)),
        ContactSample::down(700.0, 1_200.0, ms(2_000)),
        ContactSample::up(700.0, 1_200.0, ms(2_650)),
    ]);
    script.sort_by_key(|sample| sample.time);
    script
}

/// Runs one session to completion or timeout.
///
/// # Errors
///
/// Returns [`HostError`] if the engine, store or render thread cannot be set up.
pub fn run(options: HeadlessOptions) -> Result<HeadlessReport, HostError> {
    let HeadlessOptions {
        config,
        sim,
        script,
        games,
        timeout,
        surface,
    } = options;

    let store = HostStore::from_config(&config)?;
    let mut session = Session::new(|| Ok(SimulatedEngine::new(sim)), &config, LogPresenter::new(), store)?;
    session.on_surface_resized(surface.0, surface.1)?;

    let render_loop = session.take_render_loop().ok_or(HostError::RenderLoopTaken)?;
    let render = RenderThread::spawn(render_loop, config.frame_interval())?;

    let clock = Instant::now();
    let platform = PlatformContext::new("headless", true);
    if session.on_resume(&platform, clock.elapsed()) == ResumeOutcome::PermissionRequired {
        session.on_permission_result(false, true);
        session.on_destroy();
        render.stop()?;
        return Err(HostError::PermissionDenied);
    }

    let mut pending = script.into_iter().peekable();
    let mut restarts_sent = 0;
    let completed = loop {
        let now = clock.elapsed();

        while let Some(sample) = pending.next_if(|s| s.time <= now) {
            session.on_contact(sample);
        }
        session.poll(now);

        let finished = session.scheduler().presenter().game_ends();
        if finished >= games {
            break true;
        }
        if finished > restarts_sent {
            restarts_sent = finished;
            session.restart_game();
        }
        if now >= timeout {
            tracing::warn!(finished, games, "headless run timed out");
            break false;
        }

        thread::sleep(UI_POLL_INTERVAL);
    };

    session.on_pause();
    session.on_destroy();
    let render_stats = render.stop()?;

    let scheduler = session.scheduler();
    Ok(HeadlessReport {
        completed,
        games_finished: scheduler.presenter().game_ends(),
        games_restarted: scheduler.presenter().game_starts(),
        refresh: scheduler.stats(),
        render: render_stats,
        high_score: scheduler.high_score().get()?,
        last_score_line: scheduler.presenter().score_line().map(str::to_owned),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tris_shared::InstallError;

    fn fast_options() -> HeadlessOptions {
        let ms = Duration::from_millis;
        let mut config = BridgeConfig::default();
        config.render.frame_interval_ms = 1;
        config.refresh.interval_ms = 5;
        HeadlessOptions {
            config,
            sim: SimConfig {
                frames_until_tracking: 3,
                frames_per_point: 2,
                game_length_frames: 20,
                install_error: InstallError::SUCCESS,
            },
            script: (0..40u64)
                .flat_map(|i| {
                    let at = 20 + i * 50;
                    [
                        ContactSample::down(10.0, 10.0, ms(at)),
                        ContactSample::up(10.0, 10.0, ms(at + 10)),
                    ]
                })
                .collect(),
            games: 2,
            timeout: Duration::from_secs(10),
            surface: (640, 480),
        }
    }

    #[test]
    fn test_demo_script_is_time_ordered() {
        let script = demo_script();
        assert!(script.windows(2).all(|w| w[0].time <= w[1].time));
    }

    #[test]
    fn test_two_games_complete() {
        let report = run(fast_options()).unwrap();

        assert!(report.completed);
        assert_eq!(report.games_finished, 2);
        assert_eq!(report.games_restarted, 1);
        assert!(report.high_score > 0);
        assert!(report.render.changed_frames > 0);
        assert!(report.last_score_line.is_some());
    }

    #[test]
    fn test_file_store_keeps_record_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = fast_options();
        options.config.store.path = Some(dir.path().join("scores.toml"));
        options.games = 1;

        let first = run(options.clone()).unwrap();
        let second = run(options).unwrap();
        assert!(first.high_score > 0);
        assert!(second.high_score >= first.high_score);
    }
}
