//! Presenter that reports every UI update as a log event.

use tris_bridge::{BridgeResult, Presenter, ScoreLine, StatusView};

/// What the headless "screen" currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogPresenter {
    status: String,
    score: i32,
    score_line: Option<String>,
    game_ends: u32,
    game_starts: u32,
    notices: Vec<String>,
}

impl LogPresenter {
    /// Creates an empty screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status line on screen; empty when hidden.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Score on screen.
    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Final score line, while the end-of-game view is shown.
    #[must_use]
    pub fn score_line(&self) -> Option<&str> {
        self.score_line.as_deref()
    }

    /// Games that reached the end-of-game view.
    #[must_use]
    pub fn game_ends(&self) -> u32 {
        self.game_ends
    }

    /// Games started again after an end-of-game view.
    #[must_use]
    pub fn game_starts(&self) -> u32 {
        self.game_starts
    }

    /// Transient notices shown so far.
    #[must_use]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}

impl Presenter for LogPresenter {
    fn show_status(&mut self, view: &StatusView) -> BridgeResult<()> {
        if view.message.as_str() != self.status {
            if view.message.is_empty() {
                tracing::info!("status hidden");
            } else {
                tracing::info!(status = %view.message, "status");
            }
            self.status = view.message.as_str().to_owned();
        }
        if view.score != self.score {
            tracing::info!(score = view.score, "score");
            self.score = view.score;
        }
        Ok(())
    }

    fn show_game_end(&mut self, line: &ScoreLine) -> BridgeResult<()> {
        tracing::info!(line = %line, "game end");
        self.score_line = Some(line.to_string());
        self.game_ends += 1;
        Ok(())
    }

    fn show_game_start(&mut self) -> BridgeResult<()> {
        tracing::info!("game start");
        self.score_line = None;
        self.game_starts += 1;
        Ok(())
    }

    fn notify(&mut self, message: &str) -> BridgeResult<()> {
        tracing::warn!(notice = message, "notice");
        self.notices.push(message.to_owned());
        Ok(())
    }
}
