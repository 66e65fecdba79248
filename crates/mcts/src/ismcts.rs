//! Information-set MCTS by determinization.
//!
//! The tree is keyed by moves only and holds no game state. Every iteration
//! samples one world from the root seat's point of view, then selects,
//! expands and rolls out by replaying tree moves inside that world. A child
//! is only eligible when its move is legal in the current world, so nothing
//! the root seat cannot see shapes the statistics. No sample is reused.

use dalmuti_core::Determinize;
use rand::Rng;
use tracing::{debug, warn};

use crate::{
    config::MctsConfig,
    evaluator::Evaluator,
    node::NodeId,
    search::{CancelToken, SearchResult},
    tree::Tree,
};

pub struct DeterminizedMcts<G: Determinize, E: Evaluator<G>, R: Rng> {
    config: MctsConfig,
    evaluator: E,
    rng: R,
    _game: std::marker::PhantomData<G>,
}

impl<G, E, R> DeterminizedMcts<G, E, R>
where
    G: Determinize,
    E: Evaluator<G>,
    R: Rng,
{
    /// `rng` drives determinization; the evaluator brings its own.
    pub fn new(config: MctsConfig, evaluator: E, rng: R) -> Self {
        Self {
            config,
            evaluator,
            rng,
            _game: std::marker::PhantomData,
        }
    }

    pub fn search(&mut self, game: &G, state: &G::State) -> SearchResult<G::Action> {
        self.search_cancellable(game, state, &CancelToken::new())
    }

    pub fn search_cancellable(
        &mut self,
        game: &G,
        state: &G::State,
        cancel: &CancelToken,
    ) -> SearchResult<G::Action> {
        if game.is_terminal(state) {
            return SearchResult::empty();
        }
        let legal = game.legal_actions(state);
        if let [only] = legal.as_slice() {
            debug!(action = ?only, "single legal move, search skipped");
            return SearchResult::forced(*only);
        }

        let root_seat = game.current_seat(state);
        let exploration = self.config.exploration_constant;
        let mut tree: Tree<(), G::Action> = Tree::new((), Vec::new());
        let mut completed = 0;
        let mut aborted = 0;

        for _ in 0..self.config.num_iterations {
            if cancel.is_cancelled() {
                debug!(completed, "search cancelled");
                break;
            }

            let mut world = match game.determinize(state, root_seat, &mut self.rng) {
                Ok(world) => world,
                Err(e) => {
                    warn!(error = %e, "iteration aborted");
                    aborted += 1;
                    continue;
                }
            };

            let mut id = NodeId::ROOT;
            while !game.is_terminal(&world) {
                let moves = game.legal_actions(&world);
                if let Some(action) = tree.untried(id, &moves) {
                    world = game.apply(&world, action);
                    id = tree.add_child(id, action, (), Vec::new());
                    break;
                }
                match tree.select_legal_child(id, &moves, exploration) {
                    Some(child) => {
                        let action = tree
                            .get(child)
                            .action
                            .expect("BUG: non-root node without an action");
                        world = game.apply(&world, action);
                        id = child;
                    }
                    None => break,
                }
            }

            let reward = self.evaluator.evaluate(game, &world, root_seat);
            tree.backpropagate(id, reward);
            completed += 1;
        }

        let result = SearchResult::from_tree(&tree, completed, aborted);
        debug!(
            root_seat,
            iterations = completed,
            aborted,
            nodes = tree.len(),
            best = ?result.best_action,
            win_rate = result.best_win_rate,
            "determinized search finished"
        );
        result
    }
}
