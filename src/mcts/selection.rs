//! Tree policy: UCB1 with a depth-dependent weight on the exploitation term.
//!
//! Formula: decay × wins / N_child + c × sqrt(ln(N_parent) / N_child)
//!
//! Every child is simulated right after it is created, so a child seen here always has at
//! least one visit.

use crate::game::state::GameState;
use crate::mcts::node::{NodeId, SearchTree};

/// UCB score of `child`, reading its parent's visit count through the back-reference.
pub fn ucb_score<S: GameState>(
    tree: &SearchTree<S>,
    child: NodeId,
    exploration: f64,
    decay: f64,
) -> f64 {
    let node = tree.node(child);
    debug_assert!(node.visit_count() > 0, "child selected before its first rollout");

    let parent_visits = node
        .parent()
        .map_or(node.visit_count(), |parent| tree.node(parent).visit_count());
    let visits = node.visit_count() as f64;

    let exploit = node.win_count() as f64 / visits;
    let explore = ((parent_visits as f64).ln() / visits).sqrt();
    decay * exploit + exploration * explore
}

/// Child of `id` with the highest UCB score; the first one scanned wins ties.
///
/// # Returns
/// `None` if `id` has no children
pub fn select_best_child<S: GameState>(
    tree: &SearchTree<S>,
    id: NodeId,
    exploration: f64,
    decay: f64,
) -> Option<NodeId> {
    let mut best = None;
    let mut best_score = f64::NEG_INFINITY;

    for &child in tree.node(id).children() {
        let score = ucb_score(tree, child, exploration, decay);
        if best.is_none() || score > best_score {
            best = Some(child);
            best_score = score;
        }
    }

    best
}

/// Descends from the root through fully expanded nodes, multiplying the exploitation
/// weight by `psi` at each level.
///
/// # Returns
/// Path from the root to the first node that is not fully expanded, both included
pub fn select_leaf_path<S: GameState>(
    tree: &SearchTree<S>,
    exploration: f64,
    psi: f64,
) -> Vec<NodeId> {
    let mut path = vec![NodeId::ROOT];
    let mut current = NodeId::ROOT;
    let mut decay = 1.0;

    while tree.node(current).is_fully_expanded() {
        match select_best_child(tree, current, exploration, decay) {
            Some(child) => {
                path.push(child);
                current = child;
                decay *= psi;
            }
            None => break,
        }
    }

    path
}
