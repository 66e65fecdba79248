//! The combination currently active on the table.

use serde::Serialize;

use crate::Card;

/// Cards of one effective rank, or nothing at the start of a round.
#[derive(Clone, PartialEq, Eq, Default, Debug, Serialize)]
pub struct TableState {
    cards: Vec<Card>,
    effective_rank: u8,
}

impl TableState {
    /// An empty table (effective rank 0).
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(cards: Vec<Card>, effective_rank: u8) -> Self {
        Self {
            cards,
            effective_rank,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards a reply must match.
    #[inline]
    pub fn count(&self) -> u8 {
        self.cards.len() as u8
    }

    /// Rank used for comparison; jokers take the rank they were played as.
    #[inline]
    pub fn effective_rank(&self) -> u8 {
        self.effective_rank
    }

    /// Rank 1 cannot be beaten.
    pub fn is_unbeatable(&self) -> bool {
        !self.is_empty() && self.effective_rank == Card::MIN_RANK
    }

    /// Clear the table, returning the cards that were on it.
    pub(crate) fn take(&mut self) -> Vec<Card> {
        self.effective_rank = 0;
        std::mem::take(&mut self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        let table = TableState::empty();
        assert!(table.is_empty());
        assert_eq!(table.count(), 0);
        assert_eq!(table.effective_rank(), 0);
        assert!(!table.is_unbeatable());
    }

    #[test]
    fn test_take_clears() {
        let mut table = TableState::new(vec![Card::new(1).unwrap(), Card::JOKER], 1);
        assert!(table.is_unbeatable());
        let taken = table.take();
        assert_eq!(taken.len(), 2);
        assert!(table.is_empty());
        assert_eq!(table.effective_rank(), 0);
    }
}
