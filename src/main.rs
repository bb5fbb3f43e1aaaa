//! NoGo Arena - matches between two configured players
//!
//! Each side is configured with the same `key=value` arguments a player accepts, e.g.
//! `--black "weak seed=1" --white "N=500 c=0.3 thread=4"`.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use nogo_mcts::agent::Player;
use nogo_mcts::arena::Arena;
use nogo_mcts::game::Piece;
use nogo_mcts::logging::setup_logging;
use nogo_mcts::recording::CsvWriter;

#[derive(Parser, Debug)]
#[command(name = "nogo_mcts", version, about = "Play NoGo matches between MCTS and random players")]
struct Config {
    /// Arguments of the black player (role is added automatically)
    #[arg(long, default_value = "weak")]
    black: String,

    /// Arguments of the white player (role is added automatically)
    #[arg(long, default_value = "random")]
    white: String,

    /// Number of episodes to play
    #[arg(short = 'g', long, default_value_t = 10)]
    total: usize,

    /// Append one CSV row per episode to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write rotating log files to this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    let _logger = setup_logging("info", config.log_dir.as_deref())?;

    log::info!("🏟️  {} {}", nogo_mcts::NAME, nogo_mcts::VERSION);
    log::info!("Black: {}", config.black);
    log::info!("White: {}", config.white);
    log::info!("Episodes: {}", config.total);

    let black = Player::new(&format!("{} role=black", config.black))?;
    let white = Player::new(&format!("{} role=white", config.white))?;

    let mut arena = Arena::new(black, white)?;
    if let Some(path) = &config.output {
        arena = arena.with_recorder(CsvWriter::new(path)?);
    }

    let summary = arena.play(config.total)?;

    log::info!("═══════════════════════════════════════════════════════════════");
    log::info!("                      ARENA RESULTS");
    log::info!("═══════════════════════════════════════════════════════════════");
    log::info!(
        "  {} (black): {} wins ({:.1}%)",
        arena.black().name(),
        summary.black_wins,
        100.0 * summary.win_rate(Piece::Black)
    );
    log::info!(
        "  {} (white): {} wins ({:.1}%)",
        arena.white().name(),
        summary.white_wins,
        100.0 * summary.win_rate(Piece::White)
    );
    if summary.episodes > 0 {
        log::info!(
            "  Average length: {:.1} moves",
            summary.total_moves as f64 / summary.episodes as f64
        );
    }
    if let Some(path) = &config.output {
        log::info!("📁 Results saved to: {}", path.display());
    }

    Ok(())
}
