//! The dealt board: every card of one deal, in grid order.
//!
//! Cards live in an `im::Vector` so the presentation can take a snapshot
//! each frame without copying the board.

use im::Vector;

use super::card::Card;
use crate::core::{CardIndex, CardRef, DealId, FaceId, GridSize};

/// All cards of one deal.
#[derive(Clone, Debug)]
pub struct Board {
    deal: DealId,
    grid: GridSize,
    cards: Vector<Card>,
}

impl Board {
    /// A board with no cards, before the first deal.
    #[must_use]
    pub fn empty(deal: DealId) -> Self {
        Self {
            deal,
            grid: GridSize::new(0, 0),
            cards: Vector::new(),
        }
    }

    /// Lay out `faces` face-down in row-major order.
    #[must_use]
    pub fn deal(deal: DealId, grid: GridSize, faces: &[FaceId]) -> Self {
        debug_assert_eq!(faces.len(), grid.cells());
        Self {
            deal,
            grid,
            cards: faces.iter().copied().map(Card::new).collect(),
        }
    }

    #[must_use]
    pub fn deal_id(&self) -> DealId {
        self.deal
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: CardIndex) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn get_mut(&mut self, index: CardIndex) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    /// Ref handed to the presentation for the card at `index`.
    #[must_use]
    pub fn card_ref(&self, index: CardIndex) -> CardRef {
        CardRef::new(self.deal, index)
    }

    /// Resolve a presentation ref to an index on this board.
    ///
    /// Returns `None` for refs from another deal or outside the grid.
    #[must_use]
    pub fn resolve(&self, card: CardRef) -> Option<CardIndex> {
        (card.deal == self.deal && card.index < self.cards.len()).then_some(card.index)
    }

    /// O(1) copy of the board for readers.
    #[must_use]
    pub fn snapshot(&self) -> Vector<Card> {
        self.cards.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Number of cards not yet matched.
    #[must_use]
    pub fn unmatched_count(&self) -> usize {
        self.cards.iter().filter(|card| !card.is_matched()).count()
    }

    /// Whether every card has been matched.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(Card::is_matched)
    }

    /// Whether any card is mid-flip.
    #[must_use]
    pub fn any_animating(&self) -> bool {
        self.cards.iter().any(Card::is_animating)
    }

    /// Advance every running flip by `dt`.
    ///
    /// Returns the indices whose visible face swapped this tick.
    pub fn tick(&mut self, dt: f32) -> Vec<CardIndex> {
        let mut swapped = Vec::new();
        for (index, card) in self.cards.iter_mut().enumerate() {
            if !card.is_animating() {
                continue;
            }
            if card.tick(dt).swapped() {
                swapped.push(index);
            }
        }
        swapped
    }
}
