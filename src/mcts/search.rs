//! Single-tree search loop.
//!
//! One iteration selects a leaf path, expands one child at its end, simulates from that
//! child (or reads the winner of a terminal leaf) and backpropagates along the path. The
//! loop is strictly sequential and runs until its [`Budget`] is exhausted.

use crate::game::state::GameState;
use crate::mcts::budget::{Budget, BudgetSpec};
use crate::mcts::hyperparameters::SearchParams;
use crate::mcts::mcts_result::{OutcomeOf, SearchOutcome};
use crate::mcts::node::SearchTree;
use crate::mcts::selection::select_leaf_path;
use rand::rngs::StdRng;
use std::time::Instant;

/// How an iteration obtained its winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafResolution {
    /// A new child was created and rolled out.
    Simulated,
    /// The leaf was terminal and its known winner was used.
    Terminal,
}

/// Counters of one search loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub iterations: u64,
    pub rollouts: u64,
}

impl<S: GameState> SearchTree<S> {
    /// Runs one select/expand/simulate/backpropagate cycle.
    pub fn run_iteration(&mut self, params: &SearchParams, rng: &mut StdRng) -> LeafResolution {
        let mut path = select_leaf_path(self, params.exploration, params.psi);
        let leaf = path[path.len() - 1];

        let (winner, resolution) = match self.expand(leaf, rng) {
            Some(child) => {
                path.push(child);
                (self.rollout(child, rng), LeafResolution::Simulated)
            }
            None => match self.node(leaf).known_winner() {
                Some(winner) => (winner, LeafResolution::Terminal),
                None => unreachable!("selection stopped on a node without moves or children"),
            },
        };

        self.backpropagate(winner, &path);
        resolution
    }

    /// Iterates until `budget` is exhausted.
    pub fn run<B: Budget + ?Sized>(
        &mut self,
        params: &SearchParams,
        budget: &mut B,
        rng: &mut StdRng,
    ) -> LoopStats {
        let mut stats = LoopStats::default();
        while budget.remaining() {
            if self.run_iteration(params, rng) == LeafResolution::Simulated {
                stats.rollouts += 1;
            }
            stats.iterations += 1;
        }
        stats
    }
}

/// Searches `state` with a fresh tree and returns the most visited root move.
///
/// `started` anchors a time budget; workers of one decision share it. A terminal root
/// returns immediately with no move and no iteration.
pub fn search<S: GameState>(
    state: &S,
    params: &SearchParams,
    budget: BudgetSpec,
    started: Instant,
    rng: &mut StdRng,
) -> OutcomeOf<S> {
    let mut tree = SearchTree::new(state.clone(), rng);
    if tree.root().is_terminal() {
        log::debug!("🏁 root position has no legal move, skipping search");
        return SearchOutcome::empty(1, started.elapsed());
    }

    let mut active = budget.start(started);
    let stats = tree.run(params, active.as_mut(), rng);

    log::trace!(
        "🌲 tree of {} nodes after {} iterations ({})",
        tree.len(),
        stats.iterations,
        params.to_config_string()
    );

    SearchOutcome {
        best: tree.best_move(),
        root_children: tree.root_stats(),
        iterations: stats.iterations,
        rollouts: stats.rollouts,
        workers: 1,
        elapsed: started.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Board;
    use crate::game::piece::Piece;
    use crate::mcts::budget::IterationBudget;
    use crate::mcts::node::NodeId;
    use rand::SeedableRng;
    use std::time::Duration;

    fn terminal_board() -> Board {
        let mut board = Board::new();
        while let Some(&cell) = board.legal_moves().first() {
            board.place(cell);
        }
        board
    }

    /// Every node's visits equal the visits of its children plus the iterations that
    /// stopped on it.
    fn assert_visit_accounting(tree: &SearchTree<Board>, id: NodeId) {
        let node = tree.node(id);
        let child_visits: u64 = node
            .children()
            .iter()
            .map(|&child| tree.node(child).visit_count())
            .sum();
        assert!(node.visit_count() >= child_visits);
        if !node.is_terminal() {
            // A non-terminal node ends an iteration only as the freshly expanded child.
            assert_eq!(node.visit_count(), child_visits + 1);
        }
        for &child in node.children() {
            assert_visit_accounting(tree, child);
        }
    }

    #[test]
    fn test_iteration_budget_is_conserved() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut tree = SearchTree::new(Board::new(), &mut rng);
        let stats = tree.run(
            &SearchParams::default(),
            &mut IterationBudget::new(300),
            &mut rng,
        );

        assert_eq!(stats.iterations, 300);
        assert_eq!(stats.rollouts, 300);
        assert_eq!(tree.root().visit_count(), 300);
        assert_eq!(tree.len(), 301);
        let child_visits: u64 = tree.root_stats().iter().map(|s| s.visits).sum();
        assert_eq!(child_visits, 300);
    }

    #[test]
    fn test_visit_counts_follow_backpropagation() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut tree = SearchTree::new(Board::new(), &mut rng);
        tree.run(
            &SearchParams::new(0.5, 1.0),
            &mut IterationBudget::new(400),
            &mut rng,
        );

        let root = tree.root();
        let child_visits: u64 = root
            .children()
            .iter()
            .map(|&child| tree.node(child).visit_count())
            .sum();
        assert_eq!(child_visits, root.visit_count());
        for &child in root.children() {
            assert_visit_accounting(&tree, child);
        }
    }

    #[test]
    fn test_every_child_is_visited_on_creation() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut tree = SearchTree::new(Board::new(), &mut rng);
        tree.run(&SearchParams::default(), &mut IterationBudget::new(120), &mut rng);

        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            assert!(tree.node(id).visit_count() > 0);
            stack.extend_from_slice(tree.node(id).children());
        }
    }

    #[test]
    fn test_search_is_deterministic_per_seed() {
        let params = SearchParams::default();
        let budget = BudgetSpec::Iterations(150);
        let first = search(
            &Board::new(),
            &params,
            budget,
            Instant::now(),
            &mut StdRng::seed_from_u64(99),
        );
        let second = search(
            &Board::new(),
            &params,
            budget,
            Instant::now(),
            &mut StdRng::seed_from_u64(99),
        );

        assert!(first.best.is_some());
        assert_eq!(first.best, second.best);
        assert_eq!(first.root_children, second.root_children);
    }

    #[test]
    fn test_search_returns_legal_move() {
        let board = Board::new();
        let outcome = search(
            &board,
            &SearchParams::default(),
            BudgetSpec::Iterations(100),
            Instant::now(),
            &mut StdRng::seed_from_u64(5),
        );

        let best = outcome.best.unwrap();
        assert_eq!(best.mover, Piece::Black);
        assert!(board.legal_moves().contains(&best.cell));
        assert_eq!(outcome.iterations, 100);
        assert_eq!(outcome.total_child_visits(), 100);
        let top = outcome.root_children.iter().map(|s| s.visits).max().unwrap();
        assert_eq!(outcome.stats_for(&best).unwrap().visits, top);
    }

    #[test]
    fn test_terminal_root_skips_search() {
        let outcome = search(
            &terminal_board(),
            &SearchParams::default(),
            BudgetSpec::Iterations(100),
            Instant::now(),
            &mut StdRng::seed_from_u64(6),
        );

        assert!(outcome.best.is_none());
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.rollouts, 0);
        assert!(outcome.root_children.is_empty());
    }

    #[test]
    fn test_terminal_leaves_use_known_winner() {
        // Near the end of a game some iterations reach terminal nodes.
        let mut board = Board::new();
        let cells = board.legal_moves();
        for &cell in cells.iter().take(60) {
            let mut next = board;
            if next.place(cell) {
                board = next;
            }
        }
        let mut rng = StdRng::seed_from_u64(8);
        let mut tree = SearchTree::new(board, &mut rng);
        let stats = tree.run(
            &SearchParams::new(1.0, 1.0),
            &mut IterationBudget::new(2000),
            &mut rng,
        );

        assert_eq!(stats.iterations, 2000);
        assert_eq!(tree.root().visit_count(), 2000);
        assert_eq!(tree.len() as u64, stats.rollouts + 1);
    }

    #[test]
    fn test_time_budget_stops_near_deadline() {
        let started = Instant::now();
        let outcome = search(
            &Board::new(),
            &SearchParams::default(),
            BudgetSpec::Time(Duration::from_millis(60)),
            started,
            &mut StdRng::seed_from_u64(7),
        );

        assert!(outcome.iterations > 0);
        assert_eq!(outcome.iterations % 10, 0);
        assert!(started.elapsed() < Duration::from_millis(60 + 250));
    }
}
