pub mod action;
pub mod board;
pub mod piece;
pub mod state;

pub use action::{cell_name, parse_cell, Place};
pub use board::{Board, Legality, BOARD_SIZE, CELL_COUNT};
pub use piece::Piece;
pub use state::{GameState, Move, MoveOf};
