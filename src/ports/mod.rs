//! Ports to the host.
//!
//! The core drives two collaborators it does not implement:
//!
//! - [`Presentation`]: card rendering, sounds, score/move/combo labels
//! - [`ScoreStore`]: persisted score and grid choice
//!
//! Both are passed into [`GameSession::new`](crate::session::GameSession::new).

mod presentation;
mod store;

pub use presentation::{GameSummary, Presentation, PresentationEvent, Recorder, SoundCue};
pub use store::{JsonFileStore, MemoryStore, ScoreStore};
