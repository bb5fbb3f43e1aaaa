//! Narrow interface between the search engine and a concrete game.
//!
//! The engine only needs to copy a state, try placements on the copy, ask whose turn it is
//! and enumerate the cells that are still free. Everything else about the rules stays behind
//! this trait.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// A cheap-to-copy game position for a two-player alternating placement game.
///
/// A player that has no legal placement left loses.
pub trait GameState: Clone + Send + Sync {
    type Cell: Copy + Eq + Hash + Debug + Send + Sync;
    type Player: Copy + Eq + Hash + Debug + Send + Sync;

    /// Places a stone for the side to move. Returns `false` on an illegal placement, after
    /// which this copy must not be reused.
    fn place(&mut self, cell: Self::Cell) -> bool;

    /// Side to move in this position.
    fn mover_to_act(&self) -> Self::Player;

    /// All cells not occupied yet.
    fn remaining_cells(&self) -> Vec<Self::Cell>;

    fn is_vacant(&self, cell: Self::Cell) -> bool;

    fn opponent(player: Self::Player) -> Self::Player;
}

/// A placement together with the side that makes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move<C, P> {
    pub cell: C,
    pub mover: P,
}

/// Move type of a given game state.
pub type MoveOf<S> = Move<<S as GameState>::Cell, <S as GameState>::Player>;
