//! Result merging
//!
//! Orders worker outcomes by slice index and stitches their results back
//! into one list. Completion order never leaks into the merged result.

use itertools::Itertools;

use crate::engines::core::worker::WorkerOutcome;
use crate::engines::{EngineError, EngineResult};

/// Concatenate outcome results in slice order
///
/// Fails with the lowest-index [`EngineError::WorkerFailure`] if any worker
/// failed.
pub fn merge<R>(outcomes: Vec<WorkerOutcome<R>>) -> EngineResult<Vec<R>> {
    let ordered: Vec<WorkerOutcome<R>> = outcomes
        .into_iter()
        .sorted_by_key(|outcome| outcome.index())
        .collect();

    let mut partials = Vec::with_capacity(ordered.len());
    for outcome in ordered {
        match outcome {
            WorkerOutcome::Ok { results, .. } => partials.push(results),
            WorkerOutcome::Err { index, fault } => {
                return Err(EngineError::WorkerFailure { index, fault });
            }
        }
    }

    let total = partials.iter().map(Vec::len).sum();
    let mut merged = Vec::with_capacity(total);
    for results in partials {
        merged.extend(results);
    }

    Ok(merged)
}
