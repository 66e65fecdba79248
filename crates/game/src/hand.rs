//! A seat's hand: an ordered multiset of cards, always sorted ascending.

use std::fmt;

use dalmuti_core::{DalmutiError, Result};

use crate::{Card, RankCounts};

#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Create a hand, sorting the cards.
    pub fn new(mut cards: Vec<Card>) -> Self {
        cards.sort_unstable();
        Self { cards }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards of `rank` held.
    pub fn count(&self, rank: u8) -> u8 {
        let lo = self.cards.partition_point(|c| c.rank() < rank);
        let hi = self.cards.partition_point(|c| c.rank() <= rank);
        (hi - lo) as u8
    }

    #[inline]
    pub fn jokers(&self) -> u8 {
        self.count(Card::JOKER_RANK)
    }

    pub fn counts(&self) -> RankCounts {
        RankCounts::from_cards(&self.cards)
    }

    /// Remove `n` cards of `rank`.
    ///
    /// Fails without touching the hand if fewer than `n` are held.
    pub fn remove(&mut self, rank: u8, n: u8) -> Result<()> {
        if n == 0 {
            return Ok(());
        }
        let held = self.count(rank);
        if held < n {
            return Err(DalmutiError::InconsistentCardPool(format!(
                "hand holds {}x rank {}, cannot remove {}",
                held, rank, n
            )));
        }
        let lo = self.cards.partition_point(|c| c.rank() < rank);
        self.cards.drain(lo..lo + n as usize);
        Ok(())
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", card)?;
        }
        write!(f, "]")
    }
}
