//! Score, move and combo bookkeeping.

use crate::core::{ScoringRule, Timings};
use crate::ports::GameSummary;

/// Running counters for one game.
///
/// `score` and `moves` only grow until [`ScoreKeeper::reset`]. `combo`
/// drops back to zero on a mismatch or when the combo window runs out.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreKeeper {
    score: u32,
    moves: u32,
    combo: u32,
    combo_timer: f32,
    rule: ScoringRule,
    combo_window: f32,
}

impl ScoreKeeper {
    pub fn new(rule: ScoringRule, timings: &Timings) -> Self {
        Self {
            score: 0,
            moves: 0,
            combo: 0,
            combo_timer: 0.0,
            rule,
            combo_window: timings.combo_window,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Seconds left before the combo streak lapses.
    #[must_use]
    pub fn combo_timer(&self) -> f32 {
        self.combo_timer
    }

    #[must_use]
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.score,
            moves: self.moves,
            combo: self.combo,
        }
    }

    /// Count one compared pair. Returns the new move count.
    pub fn record_move(&mut self) -> u32 {
        self.moves = self.moves.saturating_add(1);
        self.moves
    }

    /// Extend the streak and award its points. Returns the points awarded.
    pub fn record_match(&mut self) -> u32 {
        self.combo = self.combo.saturating_add(1);
        self.combo_timer = self.combo_window;

        let points = self.rule.points_for(self.combo);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Break the streak. Score is untouched.
    pub fn record_mismatch(&mut self) {
        self.combo = 0;
    }

    /// Run the combo window down by `dt`.
    ///
    /// Returns `true` on the tick the window runs out and the streak is
    /// dropped.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.combo_timer <= 0.0 {
            return false;
        }

        self.combo_timer -= dt;
        if self.combo_timer <= 0.0 {
            self.combo_timer = 0.0;
            self.combo = 0;
            return true;
        }
        false
    }

    /// Replace the score with a persisted one.
    pub fn restore_score(&mut self, score: u32) {
        self.score = score;
    }

    /// Zero moves, combo and the combo window for a new deal. Score is kept.
    pub fn start_round(&mut self) {
        self.moves = 0;
        self.combo = 0;
        self.combo_timer = 0.0;
    }

    /// Zero every counter and the combo window.
    pub fn reset(&mut self) {
        self.score = 0;
        self.moves = 0;
        self.combo = 0;
        self.combo_timer = 0.0;
    }
}
