//! # memory-match
//!
//! A headless engine for the memory card-matching game: shuffle pairs of
//! face-down cards onto a grid, let the player turn them two at a time,
//! score matches with a time-limited combo.
//!
//! ## Design Principles
//!
//! 1. **Headless**: No rendering, audio or input handling. The host forwards
//!    clicks and frame time; everything observable comes back through the
//!    `Presentation` port.
//!
//! 2. **Tick-Driven**: Every delay (flip animation, settle, reveal, combo
//!    window) is a countdown advanced by `GameSession::tick`. No threads, no
//!    timers, no wall clock.
//!
//! 3. **Deterministic**: Deals come from a seedable `GameRng`, so a seed and
//!    a click/tick log reproduce a game exactly.
//!
//! ## Architecture
//!
//! - **Click-Order Pairing**: Flipped cards queue in FIFO order and are
//!   compared two at a time. The player may keep clicking while a pair
//!   resolves.
//!
//! - **Deal Ids**: Card refs carry the deal they came from. A click on a card
//!   from a previous deal is ignored.
//!
//! - **Injected Ports**: Presentation and persistence are traits passed to
//!   the session. Tests use `Recorder` and `MemoryStore`.
//!
//! ## Modules
//!
//! - `core`: Face/deal identifiers, RNG, grid and game configuration
//! - `cards`: Card flip state, the board, deck generation
//! - `layout`: Grid fit checks and auto-scaling
//! - `matching`: Flip queue and pair resolver
//! - `session`: Game session and score keeping
//! - `ports`: Presentation and score-store traits with stock implementations
//! - `error`: Error types

pub mod core;
pub mod cards;
pub mod layout;
pub mod matching;
pub mod session;
pub mod ports;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    CardIndex, CardRef, DealId, FaceId,
    GameRng, GameRngState,
    GameConfig, GridSize, ScoringRule, Timings,
};

pub use crate::cards::{Board, Card, CardState, DeckGenerator, FlipAnimation, FlipStep};

pub use crate::layout::{GridLayout, LayoutSpec, Size2};

pub use crate::matching::{FlipQueue, MatchResolver, ResolutionStatus, ResolverPhase};

pub use crate::session::{GameSession, ScoreKeeper};

pub use crate::ports::{
    GameSummary, Presentation, PresentationEvent, Recorder, SoundCue,
    JsonFileStore, MemoryStore, ScoreStore,
};

pub use crate::error::{GameError, GridParseError, LayoutError, StoreError};
