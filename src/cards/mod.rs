//! Cards, decks and the board.
//!
//! - [`Card`]: one grid cell with its flip state machine
//! - [`DeckGenerator`]: paired, shuffled faces for a grid
//! - [`Board`]: the cards of one deal

pub mod board;
pub mod card;
pub mod deck;

pub use board::Board;
pub use card::{Card, CardState, FlipAnimation, FlipStep};
pub use deck::{face_counts, shuffle, singleton_face, DeckGenerator};
