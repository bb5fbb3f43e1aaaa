//! Tunable parameters of the tree policy.

use serde::{Deserialize, Serialize};

/// UCB parameters shared by every tree of a decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Exploration constant `c` of the UCB formula.
    /// Default: 0.1
    pub exploration: f64,

    /// Per-depth factor applied to the exploitation term. The root's children are scored
    /// with weight 1, their children with `psi`, the next level with `psi²`, and so on.
    /// `1.0` is plain UCB.
    /// Default: 1.0
    pub psi: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            exploration: 0.1,
            psi: 1.0,
        }
    }
}

impl SearchParams {
    pub fn new(exploration: f64, psi: f64) -> Self {
        Self { exploration, psi }
    }

    /// Create a configuration string for logging
    pub fn to_config_string(&self) -> String {
        format!("c[{:.3}]_psi[{:.3}]", self.exploration, self.psi)
    }
}
