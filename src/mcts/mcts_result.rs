use crate::game::state::{GameState, Move};
use std::time::Duration;

/// Statistics of one first-ply move, from a single tree or summed over several.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveStats<C, P> {
    pub mv: Move<C, P>,
    pub visits: u64,
    pub wins: u64,
}

impl<C, P> MoveStats<C, P> {
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins as f64 / self.visits as f64
        }
    }
}

/// What a search produced for one decision.
#[derive(Debug, Clone)]
pub struct SearchOutcome<C, P> {
    /// Chosen move, `None` when the root has no legal move.
    pub best: Option<Move<C, P>>,
    /// Root children in expansion order (first-seen order once aggregated).
    pub root_children: Vec<MoveStats<C, P>>,
    /// Completed select/expand/simulate/backpropagate cycles, over all workers.
    pub iterations: u64,
    pub rollouts: u64,
    pub workers: usize,
    pub elapsed: Duration,
}

impl<C, P> SearchOutcome<C, P> {
    /// Outcome of a search that never ran an iteration.
    pub fn empty(workers: usize, elapsed: Duration) -> Self {
        SearchOutcome {
            best: None,
            root_children: Vec::new(),
            iterations: 0,
            rollouts: 0,
            workers,
            elapsed,
        }
    }

    pub fn total_child_visits(&self) -> u64 {
        self.root_children.iter().map(|stats| stats.visits).sum()
    }

    pub fn stats_for(&self, mv: &Move<C, P>) -> Option<&MoveStats<C, P>>
    where
        C: PartialEq,
        P: PartialEq,
    {
        self.root_children.iter().find(|stats| &stats.mv == mv)
    }
}

pub type MoveStatsOf<S> = MoveStats<<S as GameState>::Cell, <S as GameState>::Player>;
pub type OutcomeOf<S> = SearchOutcome<<S as GameState>::Cell, <S as GameState>::Player>;
