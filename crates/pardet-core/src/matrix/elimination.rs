//! Parallel LU elimination with partial pivoting.
//!
//! Every worker runs the same sequence of rounds, one per column. Within a round
//! worker 0 alone selects the pivot, records the logical row swap, normalizes
//! the pivot column and folds the pivot into the running determinant. After the
//! second barrier every worker updates its own contiguous block of the rows
//! below the pivot. Rows are never moved: the permutation vector is the only
//! record of swaps.

use crate::numerics::{Element, Extended};
use crate::sync::Barrier;
use parking_lot::RwLock;
use std::ops::Range;
use std::thread;
use tracing::{debug, trace};

/// Minimum magnitude gain for a later candidate to replace the current pivot.
pub const PIVOT_TOLERANCE: f64 = 1.0e-8;

/// Split of the rows below the pivot across workers for one round.
///
/// Every worker gets `per_thread` rows and the first `remainder` workers get one
/// more. With fewer rows than workers each of the first workers takes a single
/// row and the rest stay idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPartition {
    offset: usize,
    end: usize,
    per_thread: usize,
    remainder: usize,
}

impl RowPartition {
    pub fn for_round(size: usize, round: usize, thread_count: usize) -> Self {
        let thread_count = thread_count.max(1);
        let offset = (round + 1).min(size);
        let remaining = size - offset;
        let per_thread = (remaining / thread_count).max(1);
        let remainder = remaining - (per_thread * thread_count).min(remaining);

        Self {
            offset,
            end: size,
            per_thread,
            remainder,
        }
    }

    pub const fn per_thread(&self) -> usize {
        self.per_thread
    }

    pub const fn remainder(&self) -> usize {
        self.remainder
    }

    /// Positions in the permutation owned by `thread_index` for this round.
    pub fn span(&self, thread_index: usize) -> Range<usize> {
        let start = self.offset + self.per_thread * thread_index + self.remainder.min(thread_index);
        let len = self.per_thread + usize::from(thread_index < self.remainder);
        let end = (start + len).min(self.end);
        start.min(end)..end
    }
}

#[derive(Debug)]
struct RoundPlan {
    permutation: Vec<usize>,
    determinant: Extended,
    partition: RowPartition,
}

struct EliminationState {
    size: usize,
    thread_count: usize,
    rows: Vec<RwLock<Vec<Extended>>>,
    plan: RwLock<RoundPlan>,
    round_start: Barrier,
    plan_ready: Barrier,
}

pub(crate) fn determinant<T: Element>(data: &[Vec<T>], thread_count: usize) -> Extended {
    let size = data.len();
    if size == 0 {
        return Extended::ZERO;
    }

    let thread_count = thread_count.max(1);
    let _span = tracing::debug_span!("determinant", size, thread_count).entered();

    let state = EliminationState::new(data, thread_count);
    thread::scope(|scope| {
        for thread_index in 0..thread_count {
            let state = &state;
            scope.spawn(move || state.run_worker(thread_index));
        }
    });

    let determinant = state.plan.into_inner().determinant;
    if determinant.is_nan() {
        debug!("elimination produced NaN, treating matrix as singular");
        Extended::ZERO
    } else {
        debug!(%determinant, "elimination finished");
        determinant
    }
}

impl EliminationState {
    fn new<T: Element>(data: &[Vec<T>], thread_count: usize) -> Self {
        let size = data.len();
        let rows = data
            .iter()
            .map(|row| RwLock::new(row.iter().map(|value| value.widen()).collect()))
            .collect();

        Self {
            size,
            thread_count,
            rows,
            plan: RwLock::new(RoundPlan {
                permutation: (0..size).collect(),
                determinant: Extended::ONE,
                partition: RowPartition::for_round(size, 0, thread_count),
            }),
            round_start: Barrier::new(thread_count),
            plan_ready: Barrier::new(thread_count),
        }
    }

    fn run_worker(&self, thread_index: usize) {
        for round in 0..self.size {
            self.round_start.wait();
            if thread_index == 0 {
                self.select_pivot(round);
            }
            self.plan_ready.wait();
            self.update_rows(round, thread_index);
        }
    }

    fn select_pivot(&self, round: usize) {
        let mut plan = self.plan.write();
        let tolerance = Extended::from_f64(PIVOT_TOLERANCE);

        let mut pivot_position = round;
        let mut best = self.rows[plan.permutation[round]].read()[round].abs();
        for candidate in (round + 1)..self.size {
            let magnitude = self.rows[plan.permutation[candidate]].read()[round].abs();
            if magnitude - best > tolerance {
                pivot_position = candidate;
                best = magnitude;
            }
        }
        plan.permutation.swap(round, pivot_position);

        let pivot = self.rows[plan.permutation[round]].read()[round];
        for position in (round + 1)..self.size {
            self.rows[plan.permutation[position]].write()[round] /= pivot;
        }

        // Each transposition flips the sign of the determinant.
        plan.determinant *= if pivot_position == round { pivot } else { -pivot };
        plan.partition = RowPartition::for_round(self.size, round, self.thread_count);

        trace!(
            round,
            pivot_row = plan.permutation[round],
            swapped = pivot_position != round,
            per_thread = plan.partition.per_thread,
            remainder = plan.partition.remainder,
            "pivot selected"
        );
    }

    fn update_rows(&self, round: usize, thread_index: usize) {
        let plan = self.plan.read();
        let span = plan.partition.span(thread_index);
        if span.is_empty() {
            return;
        }

        let pivot_row = self.rows[plan.permutation[round]].read();
        for position in span {
            let mut row = self.rows[plan.permutation[position]].write();
            let multiplier = row[round];
            for (value, pivot_value) in row[round + 1..].iter_mut().zip(&pivot_row[round + 1..]) {
                *value -= multiplier * *pivot_value;
            }
        }
    }
}
