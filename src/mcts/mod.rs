pub mod budget;
pub mod hyperparameters;
pub mod mcts_result;
pub mod node;
pub mod parallel;
pub mod search;
pub mod selection;
pub mod simulation;

pub use budget::{Budget, BudgetSpec, IterationBudget, TimeBudget};
pub use hyperparameters::SearchParams;
pub use mcts_result::{MoveStats, OutcomeOf, SearchOutcome};
pub use node::{NodeId, SearchNode, SearchTree};
pub use parallel::{search_parallel, worker_seed, worker_seeds};
pub use search::search;
