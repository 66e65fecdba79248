//! Deck, hands and the rules engine for Dalmuti.
//!
//! Lower ranks beat higher ones: a play must match the table's card count
//! and come in strictly below its effective rank. Jokers (rank 13) stand in
//! for any rank. The first seat to shed every card wins.

mod card;
pub mod deck;
mod event;
mod game_impl;
mod hand;
mod moves;
mod observation;
mod seat;
mod state;
mod table;

pub use card::Card;
pub use deck::{RankCounts, DECK_SIZE, JOKER_COUNT};
pub use event::{EventLog, GameEvent};
pub use game_impl::Dalmuti;
pub use hand::Hand;
pub use moves::{JokerSplit, Move, PlayOption};
pub use observation::Observation;
pub use seat::{HeuristicStyle, Personality, Seat, SeatConfig, SeatKind};
pub use state::{GameState, SeatSet};
pub use table::TableState;
