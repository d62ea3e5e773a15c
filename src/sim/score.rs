//! Score accumulation and high-score tracking

use crate::consts::{TIME_BONUS_BASE, TIME_BONUS_PER_SECOND};
use crate::highscores::{load_high_score, save_high_score};
use crate::persistence::ScoreStore;

/// Current/high score pair with its persistence backend
#[derive(Debug)]
pub struct ScoreTracker {
    current: u64,
    high: u64,
    /// Session start (ms since epoch or any monotonic origin)
    started_at_ms: f64,
    /// Set once the session has beaten the stored high score
    celebrated: bool,
    store: Box<dyn ScoreStore>,
}

impl ScoreTracker {
    /// Create a tracker, reading the persisted high score
    pub fn new(store: Box<dyn ScoreStore>) -> Self {
        let high = load_high_score(store.as_ref());
        Self {
            current: 0,
            high,
            started_at_ms: 0.0,
            celebrated: false,
            store,
        }
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn high_score(&self) -> u64 {
        self.high
    }

    /// New session: score back to 0, clock restarted, celebration re-armed
    pub fn reset(&mut self, now_ms: f64) {
        self.current = 0;
        self.started_at_ms = now_ms;
        self.celebrated = false;
    }

    /// Add (or subtract) points, clamping at 0.
    ///
    /// Beating the high score raises and persists it on every call; the
    /// return value is true only for the first crossing of the session.
    pub fn add_points(&mut self, delta: i64, now_ms: f64) -> bool {
        self.current = self.current.saturating_add_signed(delta);

        if self.current <= self.high {
            return false;
        }

        self.high = self.current;
        save_high_score(self.store.as_mut(), self.high, now_ms);

        let first = !self.celebrated;
        self.celebrated = true;
        first
    }

    /// Level completion bonus: 1000 minus 10 per whole elapsed second
    pub fn time_bonus(&self, now_ms: f64) -> u64 {
        let elapsed_secs = ((now_ms - self.started_at_ms) / 1000.0).max(0.0).floor() as u64;
        TIME_BONUS_BASE.saturating_sub(elapsed_secs.saturating_mul(TIME_BONUS_PER_SECOND))
    }

    /// Award the time bonus; returns the amount granted and whether it
    /// produced the session's first high-score crossing
    pub fn apply_time_bonus(&mut self, now_ms: f64) -> (u64, bool) {
        let bonus = self.time_bonus(now_ms);
        let crossed = self.add_points(bonus as i64, now_ms);
        (bonus, crossed)
    }
}
