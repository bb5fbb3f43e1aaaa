//! Uniformly random playouts.

use crate::game::state::GameState;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Plays random placements from `state` over `candidates` until none of the remaining
/// candidates is legal, then returns the winner: the opponent of the side left to move.
pub fn rollout<S: GameState>(state: &S, candidates: &[S::Cell], rng: &mut StdRng) -> S::Player {
    S::opponent(playout(state, candidates, rng).mover_to_act())
}

/// Final position of a random playout.
///
/// Candidates are tried from the back of a shuffled list. A failed candidate is swapped
/// towards the front and retried only after the next successful placement, so every
/// candidate is probed at most once per position.
pub fn playout<S: GameState>(state: &S, candidates: &[S::Cell], rng: &mut StdRng) -> S {
    let mut cells = candidates.to_vec();
    cells.shuffle(rng);

    let mut board = state.clone();
    let mut live = cells.len();
    let mut probed = 0;

    while probed < live {
        let cell = cells[live - 1];
        let mut next = board.clone();
        if next.place(cell) {
            board = next;
            live -= 1;
            probed = 0;
        } else {
            cells.swap(probed, live - 1);
            probed += 1;
        }
    }

    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Board;
    use crate::game::piece::Piece;
    use rand::SeedableRng;

    #[test]
    fn test_rollout_ends_in_terminal_position() {
        for seed in 0..5 {
            let board = Board::new();
            let mut rng = StdRng::seed_from_u64(seed);
            let end = playout(&board, &board.remaining_cells(), &mut rng);
            assert!(end.is_terminal());
            assert!(end.stone_count() > 0);

            let mut rng = StdRng::seed_from_u64(seed);
            let winner = rollout(&board, &board.remaining_cells(), &mut rng);
            assert_eq!(winner, end.who_take_turns().opponent());
        }
    }

    #[test]
    fn test_rollout_is_deterministic_per_seed() {
        let board = Board::new();
        let cells = board.remaining_cells();
        let winners: Vec<Piece> = (0..2)
            .map(|_| rollout(&board, &cells, &mut StdRng::seed_from_u64(42)))
            .collect();
        assert_eq!(winners[0], winners[1]);
    }

    #[test]
    fn test_rollout_from_terminal_state() {
        let mut board = Board::new();
        while let Some(&cell) = board.legal_moves().first() {
            board.place(cell);
        }
        let stuck = board.who_take_turns();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(rollout(&board, &board.remaining_cells(), &mut rng), stuck.opponent());
    }

    #[test]
    fn test_rollout_without_candidates() {
        let board = Board::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(rollout(&board, &[], &mut rng), Piece::White);
    }
}
