//! FIFO queue of flipped cards awaiting comparison.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::core::CardIndex;

/// Cards in click order.
///
/// A card can be queued at most once; pushing it again is refused.
#[derive(Clone, Debug, Default)]
pub struct FlipQueue {
    order: VecDeque<CardIndex>,
    members: FxHashSet<CardIndex>,
}

impl FlipQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn contains(&self, index: CardIndex) -> bool {
        self.members.contains(&index)
    }

    /// Append a card. Returns `false` if it is already queued.
    pub fn push(&mut self, index: CardIndex) -> bool {
        if !self.members.insert(index) {
            return false;
        }
        self.order.push_back(index);
        true
    }

    /// Take the two oldest cards, or nothing if fewer than two are queued.
    pub fn pop_pair(&mut self) -> Option<(CardIndex, CardIndex)> {
        if self.order.len() < 2 {
            return None;
        }
        let first = self.order.pop_front()?;
        let second = self.order.pop_front()?;
        self.members.remove(&first);
        self.members.remove(&second);
        Some((first, second))
    }

    /// Queued cards, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = CardIndex> + '_ {
        self.order.iter().copied()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}
