//! Monte Carlo Tree Search for N-seat games.
//!
//! This crate provides a generic MCTS implementation that can be used with
//! any game implementing the `dalmuti_core::Game` trait.
//!
//! # Features
//!
//! - **Arena tree**: nodes refer to parents and children by index
//! - **UCB1 selection** with first-expanded tie breaking
//! - **Perfect-information search** (`Mcts`) on the true state
//! - **Determinized search** (`DeterminizedMcts`) that samples one world
//!   per iteration and walks a move-keyed tree inside it
//! - **Cooperative cancellation** between iterations
//!
//! # Example
//!
//! ```
//! use dalmuti_core::Game;
//! use dalmuti_game::{Dalmuti, GameState, Move, Personality, SeatConfig};
//! use dalmuti_mcts::{Mcts, MctsConfig, RolloutEvaluator};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let seats = [SeatConfig::ai(Personality::Mcts); 4];
//! let state = GameState::new_game(&seats, &mut rng).unwrap();
//!
//! let evaluator = RolloutEvaluator::new(rng, None);
//! let mut mcts = Mcts::new(MctsConfig::with_iterations(50), evaluator);
//! let result = mcts.search(&Dalmuti, &state);
//! let mv = result.best_or(Move::Pass);
//! assert!(Dalmuti.legal_actions(&state).contains(&mv));
//! ```

pub mod config;
pub mod evaluator;
pub mod ismcts;
mod node;
pub mod search;
#[cfg(test)]
mod test_game;
mod tree;

pub use config::{MctsConfig, DEFAULT_ROLLOUT_CAP};
pub use evaluator::{Evaluator, RolloutEvaluator};
pub use ismcts::DeterminizedMcts;
pub use search::{CancelToken, Mcts, SearchResult};
