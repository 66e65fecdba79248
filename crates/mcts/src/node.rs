//! MCTS node types for tree storage.
//!
//! Nodes live in an arena and refer to each other by index, so a child can
//! name its parent without owning it.

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// Win statistics for a single node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStats {
    /// Number of iterations that passed through this node.
    pub visit_count: u32,

    /// Sum of rewards from the root seat's perspective.
    pub win_sum: f32,
}

impl NodeStats {
    /// Fraction of visits that ended in a win; 0.0 if never visited.
    pub fn win_rate(&self) -> f32 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.win_sum / self.visit_count as f32
        }
    }

    /// UCB1 score as a child of a node visited `parent_visits` times.
    ///
    /// An unvisited node scores positive infinity.
    pub fn ucb1(&self, parent_visits: u32, exploration: f32) -> f32 {
        if self.visit_count == 0 {
            return f32::INFINITY;
        }
        let n = self.visit_count as f32;
        self.win_rate() + exploration * ((parent_visits as f32).ln() / n).sqrt()
    }
}

/// A node in the search tree.
///
/// Holds the state reached at this node and the moves not yet expanded,
/// which are computed once when the node is created.
#[derive(Clone, Debug)]
pub struct Node<S, A> {
    pub state: S,

    /// Parent index; `None` for the root.
    pub parent: Option<NodeId>,

    /// Action that led here from the parent (None for root).
    pub action: Option<A>,

    /// Children in expansion order.
    pub children: Vec<NodeId>,

    pub stats: NodeStats,

    /// Legal moves without a child yet, popped from the back.
    pub unexplored: Vec<A>,
}

impl<S, A> Node<S, A> {
    pub fn new(state: S, parent: Option<NodeId>, action: Option<A>, unexplored: Vec<A>) -> Self {
        Self {
            state,
            parent,
            action,
            children: Vec::new(),
            stats: NodeStats::default(),
            unexplored,
        }
    }

    /// True once every legal move has a child.
    pub fn is_fully_expanded(&self) -> bool {
        self.unexplored.is_empty()
    }
}
