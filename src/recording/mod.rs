//! Episode recording.
//!
//! Each finished arena episode becomes one CSV row, which keeps long matches between two
//! configurations inspectable after the fact.

pub mod csv_writer;

pub use csv_writer::{load_episodes, CsvWriter, EpisodeRow};
