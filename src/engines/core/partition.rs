//! Task list partitioning
//!
//! Splits an ordered task list into contiguous, near-equal slices, one per
//! worker. Slice `i` covers `b(i)..b(i + 1)` where `b(i) = floor(i * len / n)`.

use std::ops::Range;

use itertools::Itertools;

use crate::engines::{EngineError, EngineResult};

/// A contiguous run of tasks tagged with its position among the slices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice<'a, T> {
    /// Position of this slice, in `0..n`
    pub index: usize,
    /// The borrowed tasks
    pub items: &'a [T],
}

impl<'a, T> Slice<'a, T> {
    /// Number of tasks in the slice
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the slice holds no tasks
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Number of workers a call will use: `min(max_workers, len)`
pub fn effective_workers(max_workers: usize, len: usize) -> EngineResult<usize> {
    if max_workers == 0 {
        return Err(EngineError::ContractViolation(
            "max_workers must be at least 1".to_string(),
        ));
    }
    if len == 0 {
        return Err(EngineError::ContractViolation(
            "task list must contain at least one task".to_string(),
        ));
    }
    Ok(max_workers.min(len))
}

/// Boundary `floor(i * len / workers)`, widened so the product cannot overflow
fn boundary(i: usize, len: usize, workers: usize) -> usize {
    ((i as u128 * len as u128) / workers as u128) as usize
}

/// Index ranges of the `workers` slices covering `0..len`
///
/// `workers` must be in `1..=len`; use [`effective_workers`] to obtain it.
pub fn slice_bounds(len: usize, workers: usize) -> Vec<Range<usize>> {
    (0..=workers)
        .map(|i| boundary(i, len, workers))
        .tuple_windows()
        .map(|(start, end)| start..end)
        .collect()
}

/// Split `tasks` into `min(max_workers, tasks.len())` tagged slices
pub fn partition<T>(tasks: &[T], max_workers: usize) -> EngineResult<Vec<Slice<'_, T>>> {
    let workers = effective_workers(max_workers, tasks.len())?;

    let slices = slice_bounds(tasks.len(), workers)
        .into_iter()
        .enumerate()
        .map(|(index, range)| Slice {
            index,
            items: &tasks[range],
        })
        .collect();

    Ok(slices)
}
