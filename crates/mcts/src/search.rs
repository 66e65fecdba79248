//! Perfect-information Monte Carlo Tree Search with UCB1 selection.
//!
//! Every iteration descends by UCB1, expands one child, plays a random
//! rollout from it and backpropagates a win/loss for the root seat.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dalmuti_core::Game;
use tracing::debug;

use crate::{
    config::MctsConfig,
    evaluator::Evaluator,
    node::NodeId,
    tree::Tree,
};

/// Result of an MCTS search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<A> {
    /// Visit count of each root child, in expansion order.
    pub visit_counts: Vec<(A, u32)>,

    /// Most visited root child; `None` if the root never expanded.
    pub best_action: Option<A>,

    /// Win rate of `best_action`'s node.
    pub best_win_rate: f32,

    /// Iterations that completed a backpropagation.
    pub iterations: usize,

    /// Iterations abandoned before backpropagation.
    pub aborted_iterations: usize,

    /// True if the move was decided without searching.
    pub forced: bool,
}

impl<A: Copy> SearchResult<A> {
    /// A result for a position where nothing was searched.
    pub fn empty() -> Self {
        Self {
            visit_counts: Vec::new(),
            best_action: None,
            best_win_rate: 0.0,
            iterations: 0,
            aborted_iterations: 0,
            forced: false,
        }
    }

    /// A result for a move decided without searching.
    pub fn forced(action: A) -> Self {
        Self {
            best_action: Some(action),
            forced: true,
            ..Self::empty()
        }
    }

    /// The chosen action, or `fallback` if the root never expanded.
    pub fn best_or(&self, fallback: A) -> A {
        self.best_action.unwrap_or(fallback)
    }

    pub(crate) fn from_tree<S>(tree: &Tree<S, A>, iterations: usize, aborted_iterations: usize) -> Self {
        let best = tree.most_visited_child(NodeId::ROOT);
        Self {
            visit_counts: tree.child_visits(NodeId::ROOT),
            best_action: best.and_then(|id| tree.get(id).action),
            best_win_rate: best.map_or(0.0, |id| tree.get(id).stats.win_rate()),
            iterations,
            aborted_iterations,
            forced: false,
        }
    }
}

/// Cooperative cancellation, checked between iterations only.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Monte Carlo Tree Search on the true state.
///
/// Generic over:
/// - `G`: The game being played
/// - `E`: The leaf evaluation strategy
pub struct Mcts<G: Game, E: Evaluator<G>> {
    config: MctsConfig,
    evaluator: E,
    _game: PhantomData<G>,
}

impl<G, E> Mcts<G, E>
where
    G: Game,
    E: Evaluator<G>,
{
    pub fn new(config: MctsConfig, evaluator: E) -> Self {
        Self {
            config,
            evaluator,
            _game: PhantomData,
        }
    }

    /// Search `state` for the seat to act.
    pub fn search(&mut self, game: &G, state: &G::State) -> SearchResult<G::Action> {
        self.search_cancellable(game, state, &CancelToken::new())
    }

    /// Like `search`, stopping early once `cancel` fires.
    pub fn search_cancellable(
        &mut self,
        game: &G,
        state: &G::State,
        cancel: &CancelToken,
    ) -> SearchResult<G::Action> {
        if game.is_terminal(state) {
            return SearchResult::empty();
        }
        if let Some(action) = game.forced_action(state) {
            debug!(?action, "forced move, search skipped");
            return SearchResult::forced(action);
        }

        let root_seat = game.current_seat(state);
        let mut tree = Tree::new(state.clone(), game.legal_actions(state));
        let mut completed = 0;
        for _ in 0..self.config.num_iterations {
            if cancel.is_cancelled() {
                debug!(completed, "search cancelled");
                break;
            }

            let mut leaf = tree.descend(NodeId::ROOT, self.config.exploration_constant);
            if let Some(child) = tree.expand(game, leaf) {
                leaf = child;
            }
            let reward = self.evaluator.evaluate(game, &tree.get(leaf).state, root_seat);
            tree.backpropagate(leaf, reward);
            completed += 1;
        }

        let result = SearchResult::from_tree(&tree, completed, 0);
        debug!(
            root_seat,
            iterations = completed,
            nodes = tree.len(),
            best = ?result.best_action,
            win_rate = result.best_win_rate,
            "mcts search finished"
        );
        result
    }
}
