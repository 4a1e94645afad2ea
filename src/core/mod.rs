//! Core types: identifiers, RNG, configuration.
//!
//! Everything else in the crate builds on these. They carry no game
//! behaviour of their own.

pub mod config;
pub mod rng;

pub use config::{GameConfig, GridSize, ScoringRule, Timings};
pub use rng::{GameRng, GameRngState};

use serde::{Deserialize, Serialize};

/// Card face identifier. Two cards with the same face form a pair.
///
/// Faces index into the host's palette (sprites, emoji, ...); the core never
/// interprets them beyond equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceId(pub u32);

impl FaceId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for FaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Face({})", self.0)
    }
}

/// Position of a card in the grid, row-major.
pub type CardIndex = usize;

/// Identifies one dealt board. Incremented on every deal and reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DealId(pub u64);

impl DealId {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Reference to a card handed out to the presentation layer.
///
/// Refs from an earlier deal are stale; the session ignores them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardRef {
    pub deal: DealId,
    pub index: CardIndex,
}

impl CardRef {
    #[must_use]
    pub const fn new(deal: DealId, index: CardIndex) -> Self {
        Self { deal, index }
    }
}

impl std::fmt::Display for CardRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({}#{})", self.deal.0, self.index)
    }
}
