//! Execution engines
//!
//! This module contains the partition / fan-out / fan-in machinery and the
//! error types shared by every stage of a parallel call.

pub mod config;
pub mod core;

use std::error::Error as StdError;

/// Engine operation result type
pub type EngineResult<T> = Result<T, EngineError>;

/// Boxed error returned by a user function
pub type BoxedError = Box<dyn StdError + Send + Sync + 'static>;

/// Error types for a parallel call
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The call was malformed and rejected before any worker was spawned
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// A worker failed while processing its slice
    #[error("Worker {index} failed: {fault}")]
    WorkerFailure {
        /// Index of the slice the worker was processing
        index: usize,
        /// What went wrong
        #[source]
        fault: WorkerFault,
    },

    /// The collector did not hold exactly one outcome per slice
    #[error("Incomplete results: expected {expected} worker outcomes, collected {collected}")]
    IncompleteResults {
        /// Number of slices dispatched
        expected: usize,
        /// Number of distinct outcomes actually collected
        collected: usize,
    },
}

impl EngineError {
    /// Slice index of the failing worker, if this is a worker failure
    pub fn worker_index(&self) -> Option<usize> {
        match self {
            EngineError::WorkerFailure { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Failure detail captured from a single worker
#[derive(Debug, thiserror::Error)]
pub enum WorkerFault {
    /// The user function returned an error
    #[error("{0}")]
    Failed(BoxedError),

    /// The user function panicked
    #[error("panicked: {0}")]
    Panicked(String),

    /// The worker thread could not be started
    #[error("could not spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}
