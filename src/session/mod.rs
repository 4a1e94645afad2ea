//! Game session orchestration.
//!
//! [`GameSession`] owns every card, the flip queue and the counters of one
//! playthrough. Ports are injected at construction; there is no global state.
//!
//! ## Example Usage
//!
//! ```
//! use memory_match::core::GameConfig;
//! use memory_match::ports::{MemoryStore, Recorder};
//! use memory_match::session::GameSession;
//!
//! let config = GameConfig::new(8).with_grid(2, 2).with_seed(42);
//! let mut session = GameSession::new(config, Recorder::new(), MemoryStore::new());
//! session.start_game().unwrap();
//!
//! let first = session.card_ref(0);
//! assert!(session.click_card(first));
//! assert!(!session.click_card(first)); // already turning
//!
//! session.tick(1.0 / 60.0);
//! assert_eq!(session.pending_flips(), 1);
//! ```

mod game;
mod score;

pub use game::GameSession;
pub use score::ScoreKeeper;
