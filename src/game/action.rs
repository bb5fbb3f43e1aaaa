//! Coordinates and the placement action of the 9x9 board.
//!
//! Cell `i` sits at column `i % 9` and row `i / 9`. Columns are written `A` to `I`, rows `1`
//! to `9`, so `A1` is cell 0 and `I9` is cell 80.

use crate::game::board::{Board, Legality, BOARD_SIZE};
use crate::game::piece::Piece;
use crate::game::state::Move;
use std::fmt;

/// A stone placement by a given side.
pub type Place = Move<usize, Piece>;

pub fn cell_name(cell: usize) -> String {
    let column = (b'A' + (cell % BOARD_SIZE) as u8) as char;
    format!("{}{}", column, cell / BOARD_SIZE + 1)
}

/// Parses a coordinate such as `E5` (case-insensitive).
pub fn parse_cell(name: &str) -> Option<usize> {
    let mut chars = name.chars();
    let column = chars.next()?.to_ascii_uppercase();
    if !('A'..='I').contains(&column) {
        return None;
    }
    let row: usize = chars.as_str().parse().ok()?;
    if row == 0 || row > BOARD_SIZE {
        return None;
    }
    Some((row - 1) * BOARD_SIZE + (column as u8 - b'A') as usize)
}

impl Place {
    pub fn place(cell: usize, who: Piece) -> Self {
        Move { cell, mover: who }
    }

    /// Applies the placement, refusing it when it is not this side's turn.
    pub fn apply(&self, board: &mut Board) -> Legality {
        if self.mover != board.who_take_turns() {
            return Legality::IllegalTurn;
        }
        board.place_detailed(self.cell)
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.mover.symbol(), cell_name(self.cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_names() {
        assert_eq!(cell_name(0), "A1");
        assert_eq!(cell_name(8), "I1");
        assert_eq!(cell_name(9), "A2");
        assert_eq!(cell_name(80), "I9");
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("A1"), Some(0));
        assert_eq!(parse_cell("e5"), Some(40));
        assert_eq!(parse_cell("I9"), Some(80));
        assert_eq!(parse_cell("J1"), None);
        assert_eq!(parse_cell("A0"), None);
        assert_eq!(parse_cell("A10"), None);
        assert_eq!(parse_cell(""), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Place::place(40, Piece::Black).to_string(), "B(E5)");
        assert_eq!(Place::place(0, Piece::White).to_string(), "W(A1)");
    }

    #[test]
    fn test_apply_checks_turn() {
        let mut board = Board::new();
        assert_eq!(Place::place(40, Piece::White).apply(&mut board), Legality::IllegalTurn);
        assert_eq!(Place::place(40, Piece::Black).apply(&mut board), Legality::Legal);
        assert_eq!(board.who_take_turns(), Piece::White);
    }
}
