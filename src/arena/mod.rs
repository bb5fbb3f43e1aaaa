//! Matches between two configured players.

pub mod episode;

pub use episode::{play_episode, EndReason, EpisodeRecord, MoveRecord};

use crate::agent::Player;
use crate::game::piece::Piece;
use crate::recording::{CsvWriter, EpisodeRow};
use crate::Result;
use serde::Serialize;

/// Win tally of a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ArenaSummary {
    pub episodes: usize,
    pub black_wins: usize,
    pub white_wins: usize,
    pub total_moves: usize,
}

impl ArenaSummary {
    pub fn wins(&self, side: Piece) -> usize {
        match side {
            Piece::Black => self.black_wins,
            Piece::White => self.white_wins,
            Piece::Empty => 0,
        }
    }

    pub fn win_rate(&self, side: Piece) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.wins(side) as f64 / self.episodes as f64
        }
    }

    fn record(&mut self, record: &EpisodeRecord) {
        self.episodes += 1;
        self.total_moves += record.moves.len();
        match record.winner {
            Piece::Black => self.black_wins += 1,
            Piece::White => self.white_wins += 1,
            Piece::Empty => {}
        }
    }
}

/// Two players that keep their state (random streams, decision counters) across episodes.
pub struct Arena {
    black: Player,
    white: Player,
    recorder: Option<CsvWriter>,
    summary: ArenaSummary,
}

impl Arena {
    pub fn new(black: Player, white: Player) -> Result<Self> {
        episode::check_roles(&black, &white)?;
        Ok(Self {
            black,
            white,
            recorder: None,
            summary: ArenaSummary::default(),
        })
    }

    /// Appends a row per finished episode to `writer`.
    pub fn with_recorder(mut self, writer: CsvWriter) -> Self {
        self.recorder = Some(writer);
        self
    }

    pub fn black(&self) -> &Player {
        &self.black
    }

    pub fn white(&self) -> &Player {
        &self.white
    }

    pub fn black_mut(&mut self) -> &mut Player {
        &mut self.black
    }

    pub fn white_mut(&mut self) -> &mut Player {
        &mut self.white
    }

    pub fn summary(&self) -> &ArenaSummary {
        &self.summary
    }

    /// Plays `total` more episodes and returns the tally so far.
    pub fn play(&mut self, total: usize) -> Result<ArenaSummary> {
        for _ in 0..total {
            let index = self.summary.episodes;
            let record = play_episode(&mut self.black, &mut self.white)?;
            self.summary.record(&record);

            if let Some(writer) = self.recorder.as_mut() {
                let row = EpisodeRow::from_record(index, self.black.name(), self.white.name(), &record);
                writer.write_episode(&row)?;
            }

            log::info!(
                "🎮 Episode {:3} | {} wins after {} moves ({:?}) | black {:.1}% white {:.1}%",
                index + 1,
                record.winner,
                record.moves.len(),
                record.duration,
                100.0 * self.summary.win_rate(Piece::Black),
                100.0 * self.summary.win_rate(Piece::White)
            );
        }
        Ok(self.summary)
    }
}
