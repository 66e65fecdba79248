//! Moves a seat can make.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Card;

/// A single move: pass, or play `count` cards of effective rank `rank`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "snake_case")]
pub enum Move {
    Pass,
    Play { rank: u8, count: u8 },
}

impl Move {
    pub const fn play(rank: u8, count: u8) -> Self {
        Move::Play { rank, count }
    }

    pub const fn is_pass(self) -> bool {
        matches!(self, Move::Pass)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Pass => write!(f, "pass"),
            Move::Play { rank, count } if *rank == Card::JOKER_RANK => write!(f, "{}xJ", count),
            Move::Play { rank, count } => write!(f, "{}x{}", count, rank),
        }
    }
}

/// How many of the played cards are natural and how many are jokers.
///
/// Supplied by a human who picked exact cards; otherwise the engine uses as
/// few jokers as possible.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct JokerSplit {
    pub native: u8,
    pub jokers: u8,
}

impl JokerSplit {
    pub const fn new(native: u8, jokers: u8) -> Self {
        Self { native, jokers }
    }

    /// Cards in the split, widened so any pair of counts fits.
    #[inline]
    pub const fn total(self) -> u16 {
        self.native as u16 + self.jokers as u16
    }
}

/// A legal play annotated with how many jokers it spends.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PlayOption {
    pub rank: u8,
    pub count: u8,
    pub jokers_used: u8,
}

impl PlayOption {
    pub const fn to_move(self) -> Move {
        Move::Play {
            rank: self.rank,
            count: self.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Move::Pass.to_string(), "pass");
        assert_eq!(Move::play(5, 2).to_string(), "2x5");
        assert_eq!(Move::play(13, 1).to_string(), "1xJ");
    }

    #[test]
    fn test_serde_shape() {
        let pass = serde_json::to_value(Move::Pass).unwrap();
        assert_eq!(pass, serde_json::json!({"action_type": "pass"}));

        let play = serde_json::to_value(Move::play(3, 2)).unwrap();
        assert_eq!(
            play,
            serde_json::json!({"action_type": "play", "rank": 3, "count": 2})
        );
    }

    #[test]
    fn test_play_option_to_move() {
        let option = PlayOption {
            rank: 4,
            count: 3,
            jokers_used: 1,
        };
        assert_eq!(option.to_move(), Move::play(4, 3));
    }
}
