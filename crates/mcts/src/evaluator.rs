//! Leaf evaluation for MCTS.
//!
//! The `Evaluator` trait scores a state for one seat. `RolloutEvaluator`
//! does it with a uniformly random playout.

use std::cell::RefCell;

use dalmuti_core::{Game, Reward, SeatId};
use rand::Rng;

/// Scores a state from one seat's point of view.
pub trait Evaluator<G: Game> {
    /// Estimate the outcome of `state` for `perspective`, in [0, 1].
    fn evaluate(&self, game: &G, state: &G::State, perspective: SeatId) -> Reward;
}

/// Evaluator using uniformly random playouts.
pub struct RolloutEvaluator<R: Rng> {
    /// Random number generator (wrapped in RefCell for interior mutability).
    rng: RefCell<R>,

    /// Ply cap; `None` plays until the game ends.
    max_rollout_depth: Option<usize>,
}

impl<R: Rng> RolloutEvaluator<R> {
    pub fn new(rng: R, max_rollout_depth: Option<usize>) -> Self {
        Self {
            rng: RefCell::new(rng),
            max_rollout_depth,
        }
    }

    /// Play random legal moves from `initial_state` until the game ends or
    /// the ply cap is hit. Returns the final state and the plies played.
    pub fn rollout<G: Game>(&self, game: &G, initial_state: &G::State) -> (G::State, usize) {
        let mut state = initial_state.clone();
        let mut depth = 0;
        let cap = self.max_rollout_depth.unwrap_or(usize::MAX);

        while !game.is_terminal(&state) && depth < cap {
            let legal_actions = game.legal_actions(&state);
            if legal_actions.is_empty() {
                break;
            }

            let idx = self.rng.borrow_mut().gen_range(0..legal_actions.len());
            state = game.apply(&state, legal_actions[idx]);
            depth += 1;
        }

        (state, depth)
    }
}

impl<G: Game, R: Rng> Evaluator<G> for RolloutEvaluator<R> {
    fn evaluate(&self, game: &G, state: &G::State, perspective: SeatId) -> Reward {
        let (end, _) = self.rollout(game, state);
        Reward::for_seat(game.winner(&end), perspective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_game::{RaceState, RaceTo};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rollout_reaches_terminal() {
        let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(42), None);
        let game = RaceTo::new(10, 3);
        let (end, depth) = evaluator.rollout(&game, &RaceState::start());
        assert!(game.is_terminal(&end));
        assert_eq!(end.total, 10);
        assert!((5..=10).contains(&depth));
    }

    #[test]
    fn test_capped_rollout_is_a_loss() {
        let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(42), Some(2));
        let game = RaceTo::new(10, 2);
        let (end, depth) = evaluator.rollout(&game, &RaceState::start());
        assert_eq!(depth, 2);
        assert!(!game.is_terminal(&end));
        for seat in 0..2 {
            let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(42), Some(2));
            assert_eq!(
                evaluator.evaluate(&game, &RaceState::start(), seat),
                Reward::LOSS
            );
        }
    }

    #[test]
    fn test_forced_win_is_scored_for_mover() {
        // one step from the target with only one legal move left
        let game = RaceTo::new(5, 2);
        let state = RaceState {
            total: 4,
            to_move: 1,
            winner: None,
        };
        let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(0), None);
        assert_eq!(evaluator.evaluate(&game, &state, 1), Reward::WIN);
        assert_eq!(evaluator.evaluate(&game, &state, 0), Reward::LOSS);
    }

    #[test]
    fn test_terminal_state_is_scored_directly() {
        let game = RaceTo::new(5, 2);
        let state = RaceState {
            total: 5,
            to_move: 1,
            winner: Some(0),
        };
        let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(0), None);
        assert_eq!(evaluator.evaluate(&game, &state, 0), Reward::WIN);
    }
}
