//! Search tree storage.
//!
//! Nodes live in an arena owned by [`SearchTree`]; a node owns its children through their
//! arena indices and refers back to its parent by index only, so the parent link is never
//! an owner. A tree serves a single decision and is dropped afterwards.
//!
//! Win counters are kept for the side that chose the move leading into the node (the side
//! to act at its parent). Scoring a child with `wins / visits` therefore always reads as
//! "how good is this move for the player picking it".

use crate::game::state::{GameState, Move, MoveOf};
use crate::mcts::mcts_result::{MoveStats, MoveStatsOf};
use crate::mcts::simulation::rollout;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Index of a node inside its [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// One reachable game position.
pub struct SearchNode<S: GameState> {
    state: S,
    incoming: Option<MoveOf<S>>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Legal moves not expanded yet, in (shuffled) expansion order from the back.
    frontier: Vec<S::Cell>,
    /// Vacant cells of `state`, the candidates tried during rollouts.
    remaining: Vec<S::Cell>,
    visits: u64,
    wins: u64,
    /// Side whose wins are counted in `wins`.
    owner: S::Player,
    known_winner: Option<S::Player>,
}

impl<S: GameState> SearchNode<S> {
    /// Builds a node for `state`, keeping the cells of `frontier_source` that are still
    /// vacant and collecting the legal ones in random order. A node born without any legal
    /// move is terminal: the side to act has lost.
    pub fn construct(
        state: S,
        frontier_source: &[S::Cell],
        incoming: Option<MoveOf<S>>,
        parent: Option<NodeId>,
        rng: &mut StdRng,
    ) -> Self {
        let remaining: Vec<S::Cell> = frontier_source
            .iter()
            .copied()
            .filter(|&cell| state.is_vacant(cell))
            .collect();

        let mut frontier: Vec<S::Cell> = remaining
            .iter()
            .copied()
            .filter(|&cell| state.clone().place(cell))
            .collect();
        frontier.shuffle(rng);

        let mover = state.mover_to_act();
        let owner = incoming.map_or_else(|| S::opponent(mover), |mv| mv.mover);
        let known_winner = frontier.is_empty().then(|| S::opponent(mover));

        SearchNode {
            state,
            incoming,
            parent,
            children: Vec::with_capacity(frontier.len()),
            frontier,
            remaining,
            visits: 0,
            wins: 0,
            owner,
            known_winner,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn incoming_move(&self) -> Option<MoveOf<S>> {
        self.incoming
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn frontier(&self) -> &[S::Cell] {
        &self.frontier
    }

    pub fn remaining(&self) -> &[S::Cell] {
        &self.remaining
    }

    pub fn visit_count(&self) -> u64 {
        self.visits
    }

    pub fn win_count(&self) -> u64 {
        self.wins
    }

    pub fn known_winner(&self) -> Option<S::Player> {
        self.known_winner
    }

    pub fn is_terminal(&self) -> bool {
        self.known_winner.is_some()
    }

    /// True once every legal move has a child. Terminal nodes never qualify.
    pub fn is_fully_expanded(&self) -> bool {
        self.frontier.is_empty() && !self.children.is_empty()
    }
}

/// Arena holding every node of one search tree; node 0 is the root.
pub struct SearchTree<S: GameState> {
    nodes: Vec<SearchNode<S>>,
}

impl<S: GameState> SearchTree<S> {
    pub fn new(state: S, rng: &mut StdRng) -> Self {
        let source = state.remaining_cells();
        let root = SearchNode::construct(state, &source, None, None, rng);
        SearchTree { nodes: vec![root] }
    }

    pub fn root(&self) -> &SearchNode<S> {
        &self.nodes[NodeId::ROOT.0]
    }

    pub fn node(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pops the next untried move of `id`, plays it on a copy of the state and attaches the
    /// resulting child. Returns `None` when the frontier is exhausted.
    pub fn expand(&mut self, id: NodeId, rng: &mut StdRng) -> Option<NodeId> {
        let cell = self.nodes[id.0].frontier.pop()?;
        let parent = &self.nodes[id.0];

        let mut state = parent.state.clone();
        let mover = state.mover_to_act();
        let placed = state.place(cell);
        debug_assert!(placed, "frontier moves are legal by construction");

        let child = SearchNode::construct(
            state,
            &parent.remaining,
            Some(Move { cell, mover }),
            Some(id),
            rng,
        );
        let child_id = NodeId(self.nodes.len());
        self.nodes.push(child);
        self.nodes[id.0].children.push(child_id);
        Some(child_id)
    }

    /// Random playout from the position of `id`; returns the winner.
    pub fn rollout(&self, id: NodeId, rng: &mut StdRng) -> S::Player {
        let node = &self.nodes[id.0];
        rollout(&node.state, &node.remaining, rng)
    }

    /// Counts one visit on every node of `path`, and one win where `winner` owns the node.
    pub fn backpropagate(&mut self, winner: S::Player, path: &[NodeId]) {
        for &id in path {
            let node = &mut self.nodes[id.0];
            node.visits += 1;
            if node.owner == winner {
                node.wins += 1;
            }
        }
    }

    /// Most visited root child; the first one wins ties.
    pub fn best_move(&self) -> Option<MoveOf<S>> {
        let mut best: Option<&SearchNode<S>> = None;
        for &child in &self.root().children {
            let node = &self.nodes[child.0];
            if best.map_or(true, |b| node.visits > b.visits) {
                best = Some(node);
            }
        }
        best.and_then(|node| node.incoming)
    }

    /// Statistics of the root children in expansion order.
    pub fn root_stats(&self) -> Vec<MoveStatsOf<S>> {
        self.root()
            .children
            .iter()
            .filter_map(|&child| {
                let node = &self.nodes[child.0];
                node.incoming.map(|mv| MoveStats {
                    mv,
                    visits: node.visits,
                    wins: node.wins,
                })
            })
            .collect()
    }
}
