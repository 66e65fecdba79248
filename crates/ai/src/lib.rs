//! Computer players for Dalmuti.
//!
//! A [`Personality`](dalmuti_game::Personality) is a closed set: three
//! heuristic styles, perfect-information MCTS and determinized MCTS.
//! [`choose_ai_move`] is the single dispatch point.

pub mod heuristic;
mod player;

pub use heuristic::{heuristic_move, rank_plays};
pub use player::{choose_ai_move, AiPlayer, DEFAULT_ITERATIONS};
