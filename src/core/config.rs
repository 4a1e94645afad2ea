//! Game configuration types.
//!
//! Hosts configure a session at startup by providing:
//! - `GridSize`: how many rows and columns of cards to deal
//! - `Timings`: flip, settle, reveal and combo-window durations (seconds)
//! - `ScoringRule`: points awarded per match in a combo streak
//! - `LayoutSpec`: physical sizing used for the feasibility check
//! - `GameConfig`: combines all configuration
//!
//! Every type here is serializable so hosts can keep it in their own
//! settings files.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GridParseError;
use crate::layout::LayoutSpec;

/// Grid dimensions in cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: u16,
    pub cols: u16,
}

impl GridSize {
    /// Create a new grid size.
    #[must_use]
    pub const fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells (and therefore cards).
    #[must_use]
    pub const fn cells(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Number of complete pairs that fit in the grid.
    #[must_use]
    pub const fn pairs(self) -> usize {
        self.cells() / 2
    }

    /// Whether the grid has an unpaired cell.
    #[must_use]
    pub const fn has_singleton(self) -> bool {
        self.cells() % 2 == 1
    }

    /// Whether either dimension is zero.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(2, 2)
    }
}

/// Persisted form is `"rows,cols"`.
impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.rows, self.cols)
    }
}

impl FromStr for GridSize {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rows, cols) = s
            .split_once(',')
            .ok_or_else(|| GridParseError::MissingSeparator(s.to_string()))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<u16>()
                .map_err(|_| GridParseError::InvalidDimension(part.trim().to_string()))
        };

        Ok(Self::new(parse(rows)?, parse(cols)?))
    }
}

/// Durations driving the resolver and card animations, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timings {
    /// Full flip animation (both halves).
    pub flip_duration: f32,

    /// Wait after a reveal/hide before sounds and the win check.
    pub settle_delay: f32,

    /// How long a mismatched pair stays visible before flipping back.
    pub reveal_delay: f32,

    /// Combo window: a match must follow within this time to extend the streak.
    pub combo_window: f32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            flip_duration: 0.3,
            settle_delay: 0.15,
            reveal_delay: 1.0,
            combo_window: 3.0,
        }
    }
}

impl Timings {
    fn assert_valid(&self) {
        assert!(self.flip_duration > 0.0, "Flip duration must be positive");
        assert!(self.settle_delay >= 0.0, "Settle delay must not be negative");
        assert!(self.reveal_delay >= 0.0, "Reveal delay must not be negative");
        assert!(self.combo_window >= 0.0, "Combo window must not be negative");
    }
}

/// Points for the n-th consecutive match: `base + (n - 1) * combo_step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub base: u32,
    pub combo_step: u32,
}

impl ScoringRule {
    /// Rule with a 10 point base per match.
    #[must_use]
    pub const fn flat_bonus() -> Self {
        Self {
            base: 10,
            combo_step: 5,
        }
    }

    /// Points for a match that brings the streak to `combo` (1-based).
    #[must_use]
    pub fn points_for(&self, combo: u32) -> u32 {
        let streak = combo.max(1) - 1;
        self.base.saturating_add(streak.saturating_mul(self.combo_step))
    }
}

impl Default for ScoringRule {
    fn default() -> Self {
        Self {
            base: 1,
            combo_step: 5,
        }
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Grid dealt when no grid choice has been persisted.
    pub grid: GridSize,

    /// Number of distinct card faces available (at least 1).
    pub palette_size: usize,

    pub timings: Timings,

    pub scoring: ScoringRule,

    /// Physical sizing used to reject grids that do not fit.
    pub layout: LayoutSpec,

    /// On odd grids, declare the win once only the lone card is left.
    ///
    /// Off by default: an odd grid can never be won.
    pub exclude_singleton_from_win: bool,

    /// Seed for dealing. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            palette_size: 8,
            timings: Timings::default(),
            scoring: ScoringRule::default(),
            layout: LayoutSpec::default(),
            exclude_singleton_from_win: false,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with the given palette size and defaults elsewhere.
    pub fn new(palette_size: usize) -> Self {
        assert!(palette_size > 0, "Palette must have at least 1 face");

        Self {
            palette_size,
            ..Self::default()
        }
    }

    /// Set the default grid.
    #[must_use]
    pub fn with_grid(mut self, rows: u16, cols: u16) -> Self {
        self.grid = GridSize::new(rows, cols);
        self
    }

    /// Set all timings.
    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        timings.assert_valid();
        self.timings = timings;
        self
    }

    /// Set the combo window only.
    #[must_use]
    pub fn with_combo_window(mut self, seconds: f32) -> Self {
        self.timings.combo_window = seconds;
        self.timings.assert_valid();
        self
    }

    /// Set the scoring rule.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringRule) -> Self {
        self.scoring = scoring;
        self
    }

    /// Set the layout feasibility spec.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutSpec) -> Self {
        self.layout = layout;
        self
    }

    /// Allow odd grids to be won once only the lone card remains.
    #[must_use]
    pub fn excluding_singleton_from_win(mut self) -> Self {
        self.exclude_singleton_from_win = true;
        self
    }

    /// Fix the dealing seed for reproducible boards.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
