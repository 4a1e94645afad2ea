//! Flip queue and pair resolution.
//!
//! Flips enter a FIFO [`FlipQueue`]; the [`MatchResolver`] takes them two at a
//! time in click order, never by looking for a matching face. One pair is
//! resolved at a time, with timed waits between the decision and its
//! follow-up effects.
//!
//! ## Example Usage
//!
//! ```
//! use memory_match::cards::Board;
//! use memory_match::core::{DealId, FaceId, GameConfig, GridSize};
//! use memory_match::matching::{MatchResolver, ResolveContext};
//! use memory_match::ports::Recorder;
//! use memory_match::session::ScoreKeeper;
//!
//! let config = GameConfig::default();
//! let faces = [FaceId::new(0), FaceId::new(0)];
//! let mut board = Board::deal(DealId(1), GridSize::new(1, 2), &faces);
//! let mut score = ScoreKeeper::new(config.scoring, &config.timings);
//! let mut recorder = Recorder::new();
//! let mut resolver = MatchResolver::new();
//!
//! let mut ctx = ResolveContext {
//!     board: &mut board,
//!     score: &mut score,
//!     presentation: &mut recorder,
//!     config: &config,
//! };
//! resolver.on_card_flipped(0, &mut ctx);
//! resolver.on_card_flipped(1, &mut ctx);
//!
//! assert_eq!(ctx.score.score(), 1);
//! assert!(resolver.is_resolving());
//! ```

mod queue;
mod resolver;

pub use queue::FlipQueue;
pub use resolver::{MatchResolver, ResolutionStatus, ResolveContext, ResolverPhase};
