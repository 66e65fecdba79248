//! Deck composition and rank multisets.
//!
//! The deck holds `r` copies of every natural rank `r` in 1..=12 plus two
//! jokers, 80 cards in total.

use dalmuti_core::{DalmutiError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::Card;

/// Total number of cards in the deck.
pub const DECK_SIZE: usize = 80;

/// Number of jokers in the deck.
pub const JOKER_COUNT: u8 = 2;

/// Number of copies of `rank` in the full deck.
#[inline]
pub const fn copies_of(rank: u8) -> u8 {
    match rank {
        Card::JOKER_RANK => JOKER_COUNT,
        1..=12 => rank,
        _ => 0,
    }
}

/// The full deck in ascending rank order.
pub fn full_deck() -> Vec<Card> {
    RankCounts::full_deck().to_cards()
}

/// The full deck in uniformly random order.
pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut deck = full_deck();
    deck.shuffle(rng);
    deck
}

/// A multiset of cards keyed by rank.
///
/// Index 0 is unused so that `counts[rank]` reads naturally.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct RankCounts([u8; 14]);

impl RankCounts {
    /// An empty multiset.
    pub const fn new() -> Self {
        Self([0; 14])
    }

    /// The composition of the full deck.
    pub fn full_deck() -> Self {
        let mut counts = Self::new();
        for rank in Card::MIN_RANK..=Card::JOKER_RANK {
            counts.0[rank as usize] = copies_of(rank);
        }
        counts
    }

    /// Count the cards in a slice.
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut counts = Self::new();
        for &card in cards {
            counts.add(card, 1);
        }
        counts
    }

    /// Number of cards of `rank`.
    #[inline]
    pub fn get(&self, rank: u8) -> u8 {
        self.0.get(rank as usize).copied().unwrap_or(0)
    }

    #[inline]
    pub fn jokers(&self) -> u8 {
        self.0[Card::JOKER_RANK as usize]
    }

    pub fn add(&mut self, card: Card, n: u8) {
        self.0[card.rank() as usize] += n;
    }

    pub fn add_all(&mut self, cards: &[Card]) {
        for &card in cards {
            self.add(card, 1);
        }
    }

    /// Remove `n` cards of `rank`, failing if fewer are present.
    pub fn remove(&mut self, rank: u8, n: u8) -> Result<()> {
        if !Card::is_valid_rank(rank) {
            return Err(DalmutiError::InvalidRank(rank));
        }
        let slot = &mut self.0[rank as usize];
        if *slot < n {
            return Err(DalmutiError::InconsistentCardPool(format!(
                "need {} of rank {}, only {} left",
                n, rank, slot
            )));
        }
        *slot -= n;
        Ok(())
    }

    /// Remove every card of `other` from this multiset.
    pub fn remove_all(&mut self, other: &RankCounts) -> Result<()> {
        for rank in Card::MIN_RANK..=Card::JOKER_RANK {
            self.remove(rank, other.get(rank))?;
        }
        Ok(())
    }

    /// Total number of cards.
    pub fn total(&self) -> usize {
        self.0.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Natural ranks present, ascending, with their counts.
    pub fn naturals(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (Card::MIN_RANK..=Card::MAX_NATURAL_RANK)
            .map(move |rank| (rank, self.0[rank as usize]))
            .filter(|&(_, n)| n > 0)
    }

    /// Expand into a sorted list of cards.
    pub fn to_cards(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(self.total());
        for rank in Card::MIN_RANK..=Card::JOKER_RANK {
            for _ in 0..self.0[rank as usize] {
                cards.push(Card::new_unchecked(rank));
            }
        }
        cards
    }

    /// Counts for ranks 1..=13 as a fixed array (index 0 is rank 1).
    pub fn as_array(&self) -> [u8; 13] {
        let mut out = [0u8; 13];
        out.copy_from_slice(&self.0[1..]);
        out
    }
}
