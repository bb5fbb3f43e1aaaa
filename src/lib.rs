//! # NoGo MCTS Library
//!
//! A NoGo (9x9) playing agent driven by pure random-playout Monte Carlo Tree Search.
//!
//! ## Features
//!
//! - **Game Engine**: 9x9 NoGo board with capture and suicide detection
//! - **AI Engine**: UCB tree search with iteration or time budgets and root parallelization
//! - **Agent**: `key=value` configured players with strength presets
//! - **Arena**: Self-play matches with CSV recording of the results
//!
//! ## Usage
//!
//! ```rust
//! use nogo_mcts::{agent::Player, game::Board};
//!
//! let mut player = Player::new("role=black N=100 seed=1").unwrap();
//! let action = player.take_action(&Board::new()).unwrap();
//! assert!(action.is_some());
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Board, stones and placements
pub mod game;

/// Monte Carlo Tree Search engine
pub mod mcts;

/// Configurable players
pub mod agent;

/// Player vs player matches
pub mod arena;

/// Episode result recording
pub mod recording;

/// Logger setup
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use agent::{ConfigError, Player};
pub use arena::{play_episode, Arena, EpisodeRecord};
pub use game::{Board, Piece, Place};
pub use mcts::{search, search_parallel, BudgetSpec, SearchOutcome, SearchParams};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the NoGo MCTS library
#[derive(Debug, thiserror::Error)]
pub enum NogoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Parallel search needs at least one worker")]
    NoWorkers,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Logger error: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, NogoError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
