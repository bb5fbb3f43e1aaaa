//! One game between two players.

use crate::agent::{ConfigError, Player};
use crate::game::action::Place;
use crate::game::board::Board;
use crate::game::piece::Piece;
use crate::Result;
use std::time::{Duration, Instant};

/// One placement of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub place: Place,
    pub elapsed_ms: u64,
    /// Search iterations spent on this move, 0 for a random move.
    pub iterations: u64,
}

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The mover had no move to offer.
    NoMove,
    /// The mover offered a placement the board refused.
    IllegalMove(Place),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRecord {
    pub moves: Vec<MoveRecord>,
    pub winner: Piece,
    pub reason: EndReason,
    pub duration: Duration,
}

pub(crate) fn check_roles(black: &Player, white: &Player) -> std::result::Result<(), ConfigError> {
    if black.who() != Piece::Black {
        return Err(ConfigError::InvalidRole(black.role().to_string()));
    }
    if white.who() != Piece::White {
        return Err(ConfigError::InvalidRole(white.role().to_string()));
    }
    Ok(())
}

/// Plays a full episode from the empty board, black first.
///
/// The player to move loses as soon as it answers `None` or an illegal placement.
pub fn play_episode(black: &mut Player, white: &mut Player) -> Result<EpisodeRecord> {
    check_roles(black, white)?;

    let started = Instant::now();
    let flag = format!("{}-vs-{}", black.name(), white.name());
    black.open_episode(&flag);
    white.open_episode(&flag);

    let mut board = Board::new();
    let mut moves = Vec::new();
    let (winner, reason) = loop {
        let who = board.who_take_turns();
        let player = if who == Piece::Black {
            &mut *black
        } else {
            &mut *white
        };

        let iterations_before = player.episode_stats().iterations;
        let move_started = Instant::now();
        let Some(place) = player.take_action(&board)? else {
            break (who.opponent(), EndReason::NoMove);
        };

        let legality = place.apply(&mut board);
        if !legality.is_legal() {
            log::warn!("❌ {} played {} which is {:?}", player.name(), place, legality);
            break (who.opponent(), EndReason::IllegalMove(place));
        }

        moves.push(MoveRecord {
            place,
            elapsed_ms: move_started.elapsed().as_millis() as u64,
            iterations: player.episode_stats().iterations - iterations_before,
        });
        log::trace!("{}\n{}", place, board);
    };

    let result = winner.to_string();
    black.close_episode(&result);
    white.close_episode(&result);

    Ok(EpisodeRecord {
        moves,
        winner,
        reason,
        duration: started.elapsed(),
    })
}
