//! Dispatch from a personality to a move.

use dalmuti_core::Result;
use dalmuti_game::{Dalmuti, GameState, Move, Personality};
use dalmuti_mcts::{DeterminizedMcts, Mcts, MctsConfig, RolloutEvaluator, SearchResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::heuristic::heuristic_move;

/// Iterations per decision when none is configured.
pub const DEFAULT_ITERATIONS: usize = 1000;

fn perfect_search(state: &GameState, iterations: usize, seed: u64) -> SearchResult<Move> {
    let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(seed), None);
    Mcts::new(MctsConfig::with_iterations(iterations), evaluator).search(&Dalmuti, state)
}

fn determinized_search(state: &GameState, iterations: usize, seed: u64) -> SearchResult<Move> {
    let config = MctsConfig::determinized(iterations);
    let evaluator =
        RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(seed), config.max_rollout_depth);
    let sampler = ChaCha8Rng::seed_from_u64(seed.rotate_left(32) ^ 0x9e37_79b9_7f4a_7c15);
    DeterminizedMcts::new(config, evaluator, sampler).search(&Dalmuti, state)
}

/// `Pass` when the rules allow it, otherwise the first enumerated play.
fn fallback_move(state: &GameState) -> Move {
    if state.is_legal_move(state.current_seat(), Move::Pass) {
        return Move::Pass;
    }
    state.possible_moves().first().copied().unwrap_or(Move::Pass)
}

/// Pick a move for the seat to act.
///
/// Searches run synchronously for the full `iterations` budget and draw
/// their seeds from `rng`. A search that expands nothing falls back to
/// `Pass`, or to the first play when opening a round.
pub fn choose_ai_move<R: Rng + ?Sized>(
    state: &GameState,
    personality: Personality,
    iterations: usize,
    rng: &mut R,
) -> Move {
    let seat = state.current_seat();
    let mv = match personality {
        Personality::Heuristic(style) => heuristic_move(state, style),
        Personality::Mcts => perfect_search(state, iterations, rng.gen())
            .best_action
            .unwrap_or_else(|| fallback_move(state)),
        Personality::MctsPro => determinized_search(state, iterations, rng.gen())
            .best_action
            .unwrap_or_else(|| fallback_move(state)),
    };
    debug!(seat, %personality, %mv, "ai move chosen");
    mv
}

/// A computer player with its own seeded generator.
#[derive(Clone, Debug)]
pub struct AiPlayer {
    personality: Personality,
    iterations: usize,
    rng: ChaCha8Rng,
}

impl AiPlayer {
    pub fn new(personality: Personality, iterations: usize, seed: u64) -> Self {
        Self {
            personality,
            iterations,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn personality(&self) -> Personality {
        self.personality
    }

    pub fn choose(&mut self, state: &GameState) -> Move {
        choose_ai_move(state, self.personality, self.iterations, &mut self.rng)
    }

    /// Choose and apply a move for the seat to act.
    pub fn play_turn(&mut self, state: &mut GameState) -> Result<Move> {
        let mv = self.choose(state);
        state.apply_move(state.current_seat(), mv)?;
        Ok(mv)
    }
}
