use serde::{Deserialize, Serialize};
use std::fmt;

/// Content of a board cell, doubling as the identity of a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    Black,
    White,
    Empty,
}

impl Piece {
    /// The other side. `Empty` has no opponent and maps to itself.
    pub fn opponent(self) -> Piece {
        match self {
            Piece::Black => Piece::White,
            Piece::White => Piece::Black,
            Piece::Empty => Piece::Empty,
        }
    }

    /// Resolves a role name as used in player arguments.
    pub fn from_role(role: &str) -> Option<Piece> {
        match role {
            "black" => Some(Piece::Black),
            "white" => Some(Piece::White),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Piece::Black => 'B',
            Piece::White => 'W',
            Piece::Empty => '.',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Piece::Black => write!(f, "black"),
            Piece::White => write!(f, "white"),
            Piece::Empty => write!(f, "empty"),
        }
    }
}
