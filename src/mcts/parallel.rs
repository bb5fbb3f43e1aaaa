//! Root parallelization.
//!
//! Each worker builds its own tree from a private copy of the root state with its own
//! random stream; the trees never share anything while searching. A dedicated rayon pool
//! with one thread per worker runs every search loop once (`broadcast`), and returning from
//! the broadcast is the barrier after which the root statistics are merged.
//!
//! Sub-seeds: worker `i` of decision `d` of a player seeded with `s` uses
//! `worker_seed(s, d, i)`, so a worker's trajectory does not depend on thread scheduling.

use crate::game::state::{GameState, Move};
use crate::mcts::budget::BudgetSpec;
use crate::mcts::hyperparameters::SearchParams;
use crate::mcts::mcts_result::{MoveStats, OutcomeOf, SearchOutcome};
use crate::mcts::search::search;
use crate::{NogoError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::ThreadPoolBuilder;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed of worker `worker` for the `decision`-th decision of a player seeded with `seed`.
pub fn worker_seed(seed: u64, decision: u64, worker: usize) -> u64 {
    let stream = splitmix64(seed ^ splitmix64(decision));
    splitmix64(stream ^ splitmix64(worker as u64))
}

/// Seeds of all `workers` workers of one decision, in worker order.
pub fn worker_seeds(seed: u64, decision: u64, workers: usize) -> Vec<u64> {
    (0..workers)
        .map(|worker| worker_seed(seed, decision, worker))
        .collect()
}

/// Runs one independent search per seed concurrently and merges their root statistics.
///
/// Every worker gets the whole budget; a time budget is measured from the moment this
/// function is entered, so all workers share one deadline.
pub fn search_parallel<S: GameState>(
    state: &S,
    params: &SearchParams,
    budget: BudgetSpec,
    seeds: &[u64],
) -> Result<OutcomeOf<S>> {
    if seeds.is_empty() {
        return Err(NogoError::NoWorkers);
    }

    let started = Instant::now();
    let pool = ThreadPoolBuilder::new()
        .num_threads(seeds.len())
        .thread_name(|index| format!("mcts-worker-{}", index))
        .build()?;

    let outcomes = pool.broadcast(|ctx| {
        let mut rng = StdRng::seed_from_u64(seeds[ctx.index()]);
        search(state, params, budget, started, &mut rng)
    });

    let merged = aggregate(outcomes, started.elapsed());
    log::debug!(
        "🧵 {} workers ran {} iterations in {:?}",
        merged.workers,
        merged.iterations,
        merged.elapsed
    );
    Ok(merged)
}

/// Sums visits and wins per distinct root move over all outcomes.
///
/// The chosen move has the largest summed visit count, then the largest summed win count;
/// remaining ties go to the move seen first (worker order, then child order).
pub fn aggregate<C, P>(outcomes: Vec<SearchOutcome<C, P>>, elapsed: Duration) -> SearchOutcome<C, P>
where
    C: Copy + Eq + Hash,
    P: Copy + Eq + Hash,
{
    let mut merged: Vec<MoveStats<C, P>> = Vec::new();
    let mut index: HashMap<Move<C, P>, usize> = HashMap::new();
    let mut iterations = 0;
    let mut rollouts = 0;
    let workers = outcomes.len();

    for outcome in outcomes {
        iterations += outcome.iterations;
        rollouts += outcome.rollouts;
        for stats in outcome.root_children {
            match index.get(&stats.mv) {
                Some(&slot) => {
                    merged[slot].visits += stats.visits;
                    merged[slot].wins += stats.wins;
                }
                None => {
                    index.insert(stats.mv, merged.len());
                    merged.push(stats);
                }
            }
        }
    }

    let mut best: Option<&MoveStats<C, P>> = None;
    for stats in &merged {
        if best.map_or(true, |b| (stats.visits, stats.wins) > (b.visits, b.wins)) {
            best = Some(stats);
        }
    }

    SearchOutcome {
        best: best.map(|stats| stats.mv),
        root_children: merged,
        iterations,
        rollouts,
        workers,
        elapsed,
    }
}
