//! Stopping criteria of a search loop.
//!
//! A decision runs under exactly one budget: a number of iterations or a wall-clock limit.
//! Both are consumed through [`Budget::remaining`], asked once before every iteration.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Iterations run between two clock reads under a time budget.
pub const TIME_CHECK_BATCH: u32 = 10;

/// Kept free at the end of a time budget so the decision returns before the caller's limit.
pub const TIME_SAFETY_MARGIN: Duration = Duration::from_millis(5);

/// Iterations used by a searching player whose `N` and `T` are both zero.
pub const DEFAULT_ITERATIONS: u64 = 1000;

pub trait Budget {
    /// Whether one more iteration may run. Each `true` answer accounts for one iteration.
    fn remaining(&mut self) -> bool;
}

/// Exactly `N` iterations.
#[derive(Debug, Clone)]
pub struct IterationBudget {
    left: u64,
}

impl IterationBudget {
    pub fn new(iterations: u64) -> Self {
        Self { left: iterations }
    }
}

impl Budget for IterationBudget {
    fn remaining(&mut self) -> bool {
        if self.left == 0 {
            return false;
        }
        self.left -= 1;
        true
    }
}

/// Iterations until a deadline, reading the clock once per batch.
#[derive(Debug, Clone)]
pub struct TimeBudget {
    deadline: Instant,
    batch: u32,
    credit: u32,
}

impl TimeBudget {
    pub fn new(deadline: Instant, batch: u32) -> Self {
        Self {
            deadline,
            batch: batch.max(1),
            credit: 0,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

impl Budget for TimeBudget {
    fn remaining(&mut self) -> bool {
        if self.credit == 0 {
            if Instant::now() >= self.deadline {
                return false;
            }
            self.credit = self.batch;
        }
        self.credit -= 1;
        true
    }
}

/// Budget chosen for a decision, before it is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetSpec {
    Iterations(u64),
    Time(Duration),
}

impl BudgetSpec {
    /// Resolves the `N` and `T` settings. A nonzero time limit wins over an iteration count;
    /// `None` when both are zero.
    pub fn from_limits(iterations: u64, millis: u64) -> Option<BudgetSpec> {
        if millis > 0 {
            Some(BudgetSpec::Time(Duration::from_millis(millis)))
        } else if iterations > 0 {
            Some(BudgetSpec::Iterations(iterations))
        } else {
            None
        }
    }

    /// Absolute deadline of a time budget started at `started`, safety margin included.
    pub fn deadline(&self, started: Instant) -> Option<Instant> {
        match self {
            BudgetSpec::Iterations(_) => None,
            BudgetSpec::Time(limit) => Some(started + limit.saturating_sub(TIME_SAFETY_MARGIN)),
        }
    }

    /// Starts the budget. Every worker of a decision receives the same `started` instant so
    /// their deadlines coincide.
    pub fn start(&self, started: Instant) -> Box<dyn Budget + Send> {
        match self {
            BudgetSpec::Iterations(n) => Box::new(IterationBudget::new(*n)),
            BudgetSpec::Time(_) => Box::new(TimeBudget::new(
                self.deadline(started).unwrap_or(started),
                TIME_CHECK_BATCH,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<B: Budget + ?Sized>(budget: &mut B) -> u64 {
        let mut count = 0;
        while budget.remaining() {
            count += 1;
        }
        count
    }

    #[test]
    fn test_iteration_budget() {
        assert_eq!(drain(&mut IterationBudget::new(0)), 0);
        assert_eq!(drain(&mut IterationBudget::new(1)), 1);
        assert_eq!(drain(&mut IterationBudget::new(250)), 250);
    }

    #[test]
    fn test_expired_time_budget_grants_nothing() {
        let mut budget = TimeBudget::new(Instant::now(), TIME_CHECK_BATCH);
        assert!(!budget.remaining());
    }

    #[test]
    fn test_time_budget_counts_in_batches() {
        let deadline = Instant::now() + Duration::from_millis(30);
        let mut budget = TimeBudget::new(deadline, 4);
        let granted = drain(&mut budget);
        assert!(Instant::now() >= deadline);
        assert_eq!(granted % 4, 0);
        assert!(granted > 0);
    }

    #[test]
    fn test_from_limits_precedence() {
        assert_eq!(BudgetSpec::from_limits(0, 0), None);
        assert_eq!(
            BudgetSpec::from_limits(100, 0),
            Some(BudgetSpec::Iterations(100))
        );
        assert_eq!(
            BudgetSpec::from_limits(0, 50),
            Some(BudgetSpec::Time(Duration::from_millis(50)))
        );
        assert_eq!(
            BudgetSpec::from_limits(100, 50),
            Some(BudgetSpec::Time(Duration::from_millis(50)))
        );
    }

    #[test]
    fn test_deadline_keeps_safety_margin() {
        let started = Instant::now();
        let spec = BudgetSpec::Time(Duration::from_millis(100));
        assert_eq!(spec.deadline(started), Some(started + Duration::from_millis(95)));
        assert_eq!(BudgetSpec::Iterations(5).deadline(started), None);

        let tiny = BudgetSpec::Time(Duration::from_millis(2));
        assert_eq!(tiny.deadline(started), Some(started));
        assert!(!tiny.start(started).remaining());
    }

    #[test]
    fn test_start_iterations() {
        let mut budget = BudgetSpec::Iterations(3).start(Instant::now());
        assert_eq!(drain(budget.as_mut()), 3);
    }
}
