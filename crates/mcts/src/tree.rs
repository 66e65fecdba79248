//! Arena-allocated search tree.
//!
//! Nodes are stored in a contiguous vector and referenced by index. A node
//! knows its parent by index, which keeps ownership strictly top-down.

use dalmuti_core::{Game, Reward};

use crate::node::{Node, NodeId};

#[derive(Debug)]
pub struct Tree<S, A> {
    nodes: Vec<Node<S, A>>,
}

impl<S, A: Copy> Tree<S, A> {
    /// Create a tree holding only the root.
    pub fn new(root_state: S, root_moves: Vec<A>) -> Self {
        Self {
            nodes: vec![Node::new(root_state, None, None, root_moves)],
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node<S, A> {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<S, A> {
        &mut self.nodes[id.0]
    }

    /// Add a node to the arena, returning its ID. Does not link it.
    pub fn add(&mut self, node: Node<S, A>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Create a child of `parent` reached by `action` and link it.
    pub fn add_child(&mut self, parent: NodeId, action: A, state: S, moves: Vec<A>) -> NodeId {
        let child = self.add(Node::new(state, Some(parent), Some(action), moves));
        self.get_mut(parent).children.push(child);
        child
    }

    /// Child with the highest UCB1 score.
    ///
    /// Scores are computed from live statistics on every call. Ties go to
    /// the child expanded first. Returns `None` for a leaf.
    pub fn select_child(&self, id: NodeId, exploration: f32) -> Option<NodeId> {
        self.best_by_ucb1(id, self.get(id).children.iter().copied(), exploration)
    }

    fn best_by_ucb1(
        &self,
        id: NodeId,
        candidates: impl Iterator<Item = NodeId>,
        exploration: f32,
    ) -> Option<NodeId> {
        let parent_visits = self.get(id).stats.visit_count;
        let mut best = None;
        let mut best_score = f32::NEG_INFINITY;
        for child in candidates {
            let score = self.get(child).stats.ucb1(parent_visits, exploration);
            if best.is_none() || score > best_score {
                best = Some(child);
                best_score = score;
            }
        }
        best
    }

    /// Walk down from `id` through fully expanded nodes, choosing children
    /// by UCB1, and return the first node that still has unexplored moves
    /// or has no children.
    pub fn descend(&self, mut id: NodeId, exploration: f32) -> NodeId {
        loop {
            let node = self.get(id);
            if !node.is_fully_expanded() || node.children.is_empty() {
                return id;
            }
            match self.select_child(id, exploration) {
                Some(child) => id = child,
                None => return id,
            }
        }
    }

    /// Pop the most recently enumerated unexplored move of `id`, apply it
    /// and link the resulting child. Returns `None` if nothing is left.
    pub fn expand<G>(&mut self, game: &G, id: NodeId) -> Option<NodeId>
    where
        G: Game<State = S, Action = A>,
    {
        let action = self.get_mut(id).unexplored.pop()?;
        let state = game.apply(&self.get(id).state, action);
        let moves = game.legal_actions(&state);
        Some(self.add_child(id, action, state, moves))
    }

    /// Record `reward` on `id` and every ancestor up to the root.
    pub fn backpropagate(&mut self, id: NodeId, reward: Reward) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get_mut(node_id);
            node.stats.visit_count += 1;
            node.stats.win_sum += reward.get();
            current = node.parent;
        }
    }

    /// The child of `id` with the most visits, first expanded on ties.
    pub fn most_visited_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for &child in &self.get(id).children {
            let visits = self.get(child).stats.visit_count;
            if best.map_or(true, |b| visits > self.get(b).stats.visit_count) {
                best = Some(child);
            }
        }
        best
    }

    /// (action, visits) for every child of `id`, in expansion order.
    pub fn child_visits(&self, id: NodeId) -> Vec<(A, u32)> {
        self.get(id)
            .children
            .iter()
            .filter_map(|&c| {
                let child = self.get(c);
                child.action.map(|a| (a, child.stats.visit_count))
            })
            .collect()
    }
}

impl<S, A: Copy + PartialEq> Tree<S, A> {
    /// The child of `id` reached by `action`, if it was expanded.
    pub fn find_child(&self, id: NodeId, action: A) -> Option<NodeId> {
        self.get(id)
            .children
            .iter()
            .copied()
            .find(|&c| self.get(c).action == Some(action))
    }

    /// The last of `legal` that has no child under `id` yet.
    pub fn untried(&self, id: NodeId, legal: &[A]) -> Option<A> {
        legal
            .iter()
            .rev()
            .copied()
            .find(|&a| self.find_child(id, a).is_none())
    }

    /// Child with the highest UCB1 score among those whose action is in
    /// `legal`. Ties go to the child expanded first.
    pub fn select_legal_child(&self, id: NodeId, legal: &[A], exploration: f32) -> Option<NodeId> {
        let candidates = self.get(id).children.iter().copied().filter(|&c| {
            self.get(c)
                .action
                .map_or(false, |a| legal.contains(&a))
        });
        self.best_by_ucb1(id, candidates, exploration)
    }
}
