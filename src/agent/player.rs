//! NoGo player: a random mover or a tree-searching one.
//!
//! Every setting lives in the player's [`Meta`] and is read again at each decision, so a
//! `notify("N=500")` between two moves changes the next search.

use crate::agent::meta::Meta;
use crate::agent::ConfigError;
use crate::game::action::Place;
use crate::game::board::{Board, CELL_COUNT};
use crate::game::piece::Piece;
use crate::mcts::budget::{BudgetSpec, DEFAULT_ITERATIONS};
use crate::mcts::hyperparameters::SearchParams;
use crate::mcts::mcts_result::SearchOutcome;
use crate::mcts::parallel::{search_parallel, worker_seeds};
use crate::mcts::search::search;
use crate::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::{Duration, Instant};

const DEFAULT_ARGS: &str = "name=unknown role=unknown N=0 T=0 c=0.1 psi=1 thread=1";

/// Characters a player name may not contain.
const FORBIDDEN_NAME_CHARS: &[char] = &['[', ']', '(', ')', ':', ';', ' '];

/// Strength presets: (flag, N, c, psi). `None` disables search.
///
/// Wins are credited to the side moving into a node, so `psi = -1` makes every other level
/// favour the replies that are good for the root's mover (optimistic descent), while
/// `psi = 1` scores each level for the side choosing there.
const PRESETS: &[(&str, Option<(u64, f64, f64)>)] = &[
    ("weak", Some((200, 0.1, -1.0))),
    ("medium", Some((10_000, 0.1, -1.0))),
    ("strong", Some((10_000, 0.2, 1.0))),
    ("random", None),
];

/// Counters of the current episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpisodeStats {
    pub decisions: u64,
    pub iterations: u64,
    pub rollouts: u64,
    pub thinking: Duration,
}

impl EpisodeStats {
    fn record<C, P>(&mut self, outcome: &SearchOutcome<C, P>) {
        self.iterations += outcome.iterations;
        self.rollouts += outcome.rollouts;
        self.thinking += outcome.elapsed;
    }
}

#[derive(Debug)]
pub struct Player {
    meta: Meta,
    who: Piece,
    searching: bool,
    seed: u64,
    rng: StdRng,
    decisions: u64,
    space: Vec<Place>,
    episode: EpisodeStats,
    episode_started: Option<Instant>,
}

impl Player {
    /// Builds a player from whitespace-separated `key=value` arguments.
    ///
    /// # Arguments
    /// * `args` - overrides of `name=unknown role=unknown N=0 T=0 c=0.1 psi=1 thread=1`, plus
    ///   optional `seed=<u64>` and preset flags (`weak`, `medium`, `strong`, `random`)
    ///
    /// # Returns
    /// The player, or the first configuration problem found
    pub fn new(args: &str) -> std::result::Result<Self, ConfigError> {
        let mut meta = Meta::parse(DEFAULT_ARGS);
        meta.extend(args);

        let mut searching = meta.count("N")? > 0 || meta.count("T")? > 0;
        let preset = PRESETS.iter().find(|(flag, _)| meta.contains(flag));
        match preset {
            Some(&(flag, Some((iterations, exploration, psi)))) => {
                meta.set("name", flag);
                meta.set("N", &iterations.to_string());
                meta.set("c", &exploration.to_string());
                meta.set("psi", &psi.to_string());
                searching = true;
            }
            Some(&(flag, None)) => {
                meta.set("name", flag);
                searching = false;
            }
            None => {
                #[cfg(feature = "judge")]
                {
                    searching &= meta.contains("unlock!");
                }
            }
        }

        let name = meta.property("name").unwrap_or_default();
        if name.contains(FORBIDDEN_NAME_CHARS) {
            return Err(ConfigError::InvalidName(name.to_string()));
        }

        let role = meta.property("role").unwrap_or_default();
        let who = Piece::from_role(role).ok_or_else(|| ConfigError::InvalidRole(role.to_string()))?;

        // Search settings are read again per decision; reject malformed ones up front.
        meta.number("c")?;
        meta.number("psi")?;
        meta.count("thread")?;

        let seed = if meta.contains("seed") {
            meta.count("seed")?
        } else {
            rand::random::<u64>()
        };

        log::debug!("🤖 {} plays {} (search: {}, seed: {})", name, who, searching, seed);

        Ok(Self {
            meta,
            who,
            searching,
            seed,
            rng: StdRng::seed_from_u64(seed),
            decisions: 0,
            space: (0..CELL_COUNT).map(|cell| Place::place(cell, who)).collect(),
            episode: EpisodeStats::default(),
            episode_started: None,
        })
    }

    pub fn name(&self) -> &str {
        self.meta.property("name").unwrap_or_default()
    }

    pub fn role(&self) -> &str {
        self.meta.property("role").unwrap_or_default()
    }

    pub fn who(&self) -> Piece {
        self.who
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.meta.property(key)
    }

    /// Updates one `key=value` setting; takes effect at the next decision.
    pub fn notify(&mut self, message: &str) {
        self.meta.notify(message);
    }

    pub fn episode_stats(&self) -> &EpisodeStats {
        &self.episode
    }

    pub fn open_episode(&mut self, flag: &str) {
        self.episode = EpisodeStats::default();
        self.episode_started = Some(Instant::now());
        log::debug!("🎬 {} opens episode {}", self.name(), flag);
    }

    pub fn close_episode(&mut self, flag: &str) {
        let duration = self
            .episode_started
            .take()
            .map(|started| started.elapsed())
            .unwrap_or_default();
        log::info!(
            "📊 {} ({}) closes episode {}: {} decisions, {} iterations, {} rollouts, {:?} thinking, {:?} total",
            self.name(),
            self.who,
            flag,
            self.episode.decisions,
            self.episode.iterations,
            self.episode.rollouts,
            self.episode.thinking,
            duration
        );
    }

    /// Chooses the next placement on `board`.
    ///
    /// # Returns
    /// `Ok(None)` when no legal placement exists or `board` is not waiting for this player
    pub fn take_action(&mut self, board: &Board) -> Result<Option<Place>> {
        if board.who_take_turns() != self.who {
            log::warn!("⚠️ {} asked to move while {} is to act", self.who, board.who_take_turns());
            return Ok(None);
        }
        self.episode.decisions += 1;

        if !self.searching {
            return Ok(self.random_action(board));
        }

        let params = SearchParams::new(self.meta.number("c")?, self.meta.number("psi")?);
        let budget = BudgetSpec::from_limits(self.meta.count("N")?, self.meta.count("T")?)
            .unwrap_or(BudgetSpec::Iterations(DEFAULT_ITERATIONS));
        let workers = self.meta.count("thread")?.max(1) as usize;

        let decision = self.decisions;
        self.decisions += 1;

        let outcome = if workers > 1 {
            search_parallel(board, &params, budget, &worker_seeds(self.seed, decision, workers))?
        } else {
            search(board, &params, budget, Instant::now(), &mut self.rng)
        };
        self.episode.record(&outcome);

        match outcome.best {
            Some(best) => {
                let win_rate = outcome.stats_for(&best).map_or(0.0, |stats| stats.win_rate());
                log::debug!(
                    "🎯 {} after {} iterations on {} worker(s) in {:?} (win rate {:.3})",
                    best,
                    outcome.iterations,
                    outcome.workers,
                    outcome.elapsed,
                    win_rate
                );
                Ok(Some(best))
            }
            None => {
                let fallback = self.random_action(board);
                if let Some(place) = fallback {
                    log::warn!("⚠️ search under {:?} found no move, playing random {}", budget, place);
                }
                Ok(fallback)
            }
        }
    }

    /// Shuffles every cell and returns the first legal placement.
    fn random_action(&mut self, board: &Board) -> Option<Place> {
        self.space.shuffle(&mut self.rng);
        self.space
            .iter()
            .find(|place| place.apply(&mut board.clone()).is_legal())
            .copied()
    }
}
