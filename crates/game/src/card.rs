//! Card ranks.
//!
//! A card carries nothing but its rank: 1..=12 for natural cards and 13 for
//! the wild joker. Lower ranks are stronger.

use std::fmt;

use dalmuti_core::{DalmutiError, Result};
use serde::{Deserialize, Serialize};

/// A single card, identified only by its rank.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(u8);

impl Card {
    /// Strongest natural rank.
    pub const MIN_RANK: u8 = 1;

    /// Weakest natural rank.
    pub const MAX_NATURAL_RANK: u8 = 12;

    /// Rank carried by jokers.
    pub const JOKER_RANK: u8 = 13;

    /// The wild card.
    pub const JOKER: Card = Card(Self::JOKER_RANK);

    /// Create a card of the given rank (1..=13).
    pub fn new(rank: u8) -> Result<Self> {
        if (Self::MIN_RANK..=Self::JOKER_RANK).contains(&rank) {
            Ok(Self(rank))
        } else {
            Err(DalmutiError::InvalidRank(rank))
        }
    }

    /// Create a card without range checking.
    #[inline]
    pub(crate) const fn new_unchecked(rank: u8) -> Self {
        Self(rank)
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_joker(self) -> bool {
        self.0 == Self::JOKER_RANK
    }

    /// Whether `rank` names a card that exists in the deck.
    #[inline]
    pub const fn is_valid_rank(rank: u8) -> bool {
        rank >= Self::MIN_RANK && rank <= Self::JOKER_RANK
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_joker() {
            write!(f, "J")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
