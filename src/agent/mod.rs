//! Players configured from `key=value` argument strings.
//!
//! # Components
//!
//! - `meta`: the property map behind every player
//! - `player`: presets, move selection and episode bookkeeping

pub mod meta;
pub mod player;

pub use meta::Meta;
pub use player::{EpisodeStats, Player};

/// Rejected player configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("missing property: {0}")]
    MissingKey(String),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
