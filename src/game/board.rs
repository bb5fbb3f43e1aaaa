//! 9x9 NoGo board.
//!
//! Players alternately place stones, black first. A placement is illegal when it would
//! capture an opponent group or leave its own group without liberties, so the game ends
//! when the side to move has no legal cell left, and that side loses.

use crate::game::action::cell_name;
use crate::game::piece::Piece;
use crate::game::state::GameState;
use std::fmt;

pub const BOARD_SIZE: usize = 9;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Outcome of a placement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legality {
    Legal,
    IllegalOutOfRange,
    IllegalOccupied,
    /// The stone would remove the last liberty of an adjacent opponent group.
    IllegalCapture,
    /// The stone's own group would have no liberty.
    IllegalSuicide,
    IllegalTurn,
}

impl Legality {
    pub fn is_legal(self) -> bool {
        self == Legality::Legal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    stones: [Piece; CELL_COUNT],
    who_take_turns: Piece,
    last_move: Option<usize>,
    stone_count: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board, black to move.
    pub fn new() -> Self {
        Board {
            stones: [Piece::Empty; CELL_COUNT],
            who_take_turns: Piece::Black,
            last_move: None,
            stone_count: 0,
        }
    }

    /// Builds a position from nine text rows, top row first (row 9 down to row 1), using
    /// `B`, `W` and `.`; whitespace inside a row is ignored.
    pub fn from_rows(rows: &[&str], to_move: Piece) -> Option<Board> {
        if rows.len() != BOARD_SIZE || to_move == Piece::Empty {
            return None;
        }
        let mut board = Board::new();
        for (line, row) in rows.iter().enumerate() {
            let y = BOARD_SIZE - 1 - line;
            let cells: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE {
                return None;
            }
            for (x, symbol) in cells.into_iter().enumerate() {
                let piece = match symbol {
                    'B' | 'b' => Piece::Black,
                    'W' | 'w' => Piece::White,
                    '.' => Piece::Empty,
                    _ => return None,
                };
                if piece != Piece::Empty {
                    board.stones[y * BOARD_SIZE + x] = piece;
                    board.stone_count += 1;
                }
            }
        }
        board.who_take_turns = to_move;
        Some(board)
    }

    pub fn who_take_turns(&self) -> Piece {
        self.who_take_turns
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn stone_count(&self) -> usize {
        self.stone_count
    }

    pub fn at(&self, cell: usize) -> Piece {
        self.stones.get(cell).copied().unwrap_or(Piece::Empty)
    }

    /// Places a stone for the side to move. Illegal attempts leave the board untouched.
    pub fn place_detailed(&mut self, cell: usize) -> Legality {
        if cell >= CELL_COUNT {
            return Legality::IllegalOutOfRange;
        }
        if self.stones[cell] != Piece::Empty {
            return Legality::IllegalOccupied;
        }

        let who = self.who_take_turns;
        let opponent = who.opponent();
        self.stones[cell] = who;

        let captures = neighbors(cell)
            .any(|n| self.stones[n] == opponent && !self.has_liberty(n));
        if captures {
            self.stones[cell] = Piece::Empty;
            return Legality::IllegalCapture;
        }
        if !self.has_liberty(cell) {
            self.stones[cell] = Piece::Empty;
            return Legality::IllegalSuicide;
        }

        self.who_take_turns = opponent;
        self.last_move = Some(cell);
        self.stone_count += 1;
        Legality::Legal
    }

    /// Cells the side to move may legally play, in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..CELL_COUNT)
            .filter(|&cell| self.stones[cell] == Piece::Empty)
            .filter(|&cell| self.clone().place_detailed(cell).is_legal())
            .collect()
    }

    pub fn is_terminal(&self) -> bool {
        (0..CELL_COUNT).all(|cell| {
            self.stones[cell] != Piece::Empty || !self.clone().place_detailed(cell).is_legal()
        })
    }

    /// Flood-fills the group containing `cell` and reports whether it touches an empty cell.
    fn has_liberty(&self, cell: usize) -> bool {
        let color = self.stones[cell];
        let mut seen: u128 = 1 << cell;
        let mut stack = [0usize; CELL_COUNT];
        let mut len = 1;
        stack[0] = cell;

        while len > 0 {
            len -= 1;
            let current = stack[len];
            for n in neighbors(current) {
                match self.stones[n] {
                    Piece::Empty => return true,
                    stone if stone == color && seen & (1 << n) == 0 => {
                        seen |= 1 << n;
                        stack[len] = n;
                        len += 1;
                    }
                    _ => {}
                }
            }
        }
        false
    }
}

fn neighbors(cell: usize) -> impl Iterator<Item = usize> {
    let x = cell % BOARD_SIZE;
    let y = cell / BOARD_SIZE;
    [
        (x > 0).then(|| cell - 1),
        (x + 1 < BOARD_SIZE).then(|| cell + 1),
        (y > 0).then(|| cell - BOARD_SIZE),
        (y + 1 < BOARD_SIZE).then(|| cell + BOARD_SIZE),
    ]
    .into_iter()
    .flatten()
}

impl GameState for Board {
    type Cell = usize;
    type Player = Piece;

    fn place(&mut self, cell: usize) -> bool {
        self.place_detailed(cell).is_legal()
    }

    fn mover_to_act(&self) -> Piece {
        self.who_take_turns
    }

    fn remaining_cells(&self) -> Vec<usize> {
        (0..CELL_COUNT)
            .filter(|&cell| self.stones[cell] == Piece::Empty)
            .collect()
    }

    fn is_vacant(&self, cell: usize) -> bool {
        self.at(cell) == Piece::Empty && cell < CELL_COUNT
    }

    fn opponent(player: Piece) -> Piece {
        player.opponent()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for x in 0..BOARD_SIZE {
            write!(f, " {}", (b'A' + x as u8) as char)?;
        }
        writeln!(f)?;
        for y in (0..BOARD_SIZE).rev() {
            write!(f, "{}", y + 1)?;
            for x in 0..BOARD_SIZE {
                write!(f, " {}", self.stones[y * BOARD_SIZE + x].symbol())?;
            }
            writeln!(f)?;
        }
        write!(f, "{} to move", self.who_take_turns)?;
        if let Some(cell) = self.last_move {
            write!(f, ", last move {}", cell_name(cell))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plays the lowest legal cell until the side to move is stuck.
    fn fill_greedily(mut board: Board) -> Board {
        while let Some(&cell) = board.legal_moves().first() {
            assert!(board.place(cell));
        }
        board
    }

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(board.who_take_turns(), Piece::Black);
        assert_eq!(board.remaining_cells().len(), CELL_COUNT);
        assert_eq!(board.legal_moves().len(), CELL_COUNT);
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_place_alternates_turns() {
        let mut board = Board::new();
        assert_eq!(board.place_detailed(40), Legality::Legal);
        assert_eq!(board.who_take_turns(), Piece::White);
        assert_eq!(board.at(40), Piece::Black);
        assert_eq!(board.last_move(), Some(40));
        assert_eq!(board.place_detailed(40), Legality::IllegalOccupied);
        assert_eq!(board.place_detailed(81), Legality::IllegalOutOfRange);
        assert_eq!(board.who_take_turns(), Piece::White);
    }

    #[test]
    fn test_capture_is_illegal() {
        // White stone at A1 with black on B1; black at A2 would capture it.
        let mut board = Board::from_rows(
            &[
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                "WB.......",
            ],
            Piece::Black,
        )
        .unwrap();
        let before = board;
        assert_eq!(board.place_detailed(9), Legality::IllegalCapture);
        assert_eq!(board, before);
    }

    #[test]
    fn test_suicide_is_illegal() {
        // A1 is surrounded by white stones at B1 and A2.
        let mut board = Board::from_rows(
            &[
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                "W........",
                ".W.......",
            ],
            Piece::Black,
        )
        .unwrap();
        assert_eq!(board.place_detailed(0), Legality::IllegalSuicide);
        assert_eq!(board.at(0), Piece::Empty);
        // White may fill its own eye as long as the group keeps a liberty.
        let mut white = Board::from_rows(
            &[
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                "W........",
                ".W.......",
            ],
            Piece::White,
        )
        .unwrap();
        assert_eq!(white.place_detailed(0), Legality::Legal);
    }

    #[test]
    fn test_filled_board_is_terminal() {
        let board = fill_greedily(Board::new());
        assert!(board.is_terminal());
        assert!(board.legal_moves().is_empty());
        assert!(!board.remaining_cells().is_empty());
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(Board::from_rows(&["........."; 8], Piece::Black).is_none());
        assert!(Board::from_rows(&["........X"; 9], Piece::Black).is_none());
        assert!(Board::from_rows(&["........."; 9], Piece::Empty).is_none());
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.place(0);
        let text = board.to_string();
        assert!(text.starts_with("  A B C D E F G H I"));
        assert!(text.contains("1 B . ."));
        assert!(text.ends_with("white to move, last move A1"));
    }
}
