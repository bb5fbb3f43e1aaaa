//! CSV writer for finished episodes.
//!
//! Format: episode,timestamp,black,white,winner,moves,duration_ms
//!
//! Rows are appended; the header is written only when the file is new or empty.

use crate::arena::EpisodeRecord;
use crate::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// One CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRow {
    pub episode: usize,
    /// RFC 3339, UTC
    pub timestamp: String,
    pub black: String,
    pub white: String,
    pub winner: String,
    pub moves: usize,
    pub duration_ms: u64,
}

impl EpisodeRow {
    pub fn from_record(episode: usize, black: &str, white: &str, record: &EpisodeRecord) -> Self {
        Self {
            episode,
            timestamp: Utc::now().to_rfc3339(),
            black: black.to_string(),
            white: white.to_string(),
            winner: record.winner.to_string(),
            moves: record.moves.len(),
            duration_ms: record.duration.as_millis() as u64,
        }
    }
}

pub struct CsvWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvWriter {
    /// Opens `path` for appending, creating it and its parent directories if needed.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let is_new = fs::metadata(&path).map_or(true, |meta| meta.len() == 0);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);

        Ok(Self { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row and flushes it to disk.
    pub fn write_episode(&mut self, row: &EpisodeRow) -> Result<()> {
        self.writer.serialize(row)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Loads every episode row of a CSV file written by [`CsvWriter`].
pub fn load_episodes<P: AsRef<Path>>(path: P) -> Result<Vec<EpisodeRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}
