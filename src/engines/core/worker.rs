//! Slice workers
//!
//! A worker applies the user function to one slice and turns whatever
//! happens (results, a returned error, or a panic) into a tagged outcome.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::engines::core::partition::Slice;
use crate::engines::{BoxedError, WorkerFault};

/// Outcome produced exactly once by each worker
#[derive(Debug)]
pub enum WorkerOutcome<R> {
    /// The slice was processed
    Ok {
        /// Slice index
        index: usize,
        /// Results for the slice, in slice order
        results: Vec<R>,
    },
    /// The slice could not be processed
    Err {
        /// Slice index
        index: usize,
        /// Failure detail
        fault: WorkerFault,
    },
}

impl<R> WorkerOutcome<R> {
    /// Index of the slice this outcome belongs to
    pub fn index(&self) -> usize {
        match self {
            WorkerOutcome::Ok { index, .. } | WorkerOutcome::Err { index, .. } => *index,
        }
    }

    /// Check if the outcome carries results
    pub fn is_ok(&self) -> bool {
        matches!(self, WorkerOutcome::Ok { .. })
    }
}

/// One unit of work: a slice bound to the shared context and user function
pub struct Worker<'a, T, C, F> {
    slice: Slice<'a, T>,
    context: &'a C,
    func: &'a F,
}

impl<'a, T, C, F> Worker<'a, T, C, F> {
    /// Bind a slice to the context and function it will be processed with
    pub fn new(slice: Slice<'a, T>, context: &'a C, func: &'a F) -> Self {
        Self {
            slice,
            context,
            func,
        }
    }

    /// Index of the slice this worker processes
    pub fn index(&self) -> usize {
        self.slice.index
    }

    /// Run the user function over the slice
    pub fn run<R, E>(self) -> WorkerOutcome<R>
    where
        F: Fn(&[T], &C) -> Result<Vec<R>, E>,
        E: Into<BoxedError>,
    {
        let index = self.slice.index;
        log::trace!("worker {} started on {} tasks", index, self.slice.len());

        let func = self.func;
        let items = self.slice.items;
        let context = self.context;
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| func(items, context))) {
            Ok(Ok(results)) => WorkerOutcome::Ok { index, results },
            Ok(Err(err)) => WorkerOutcome::Err {
                index,
                fault: WorkerFault::Failed(err.into()),
            },
            Err(payload) => WorkerOutcome::Err {
                index,
                fault: WorkerFault::Panicked(panic_message(payload.as_ref())),
            },
        };

        match &outcome {
            WorkerOutcome::Ok { results, .. } => {
                log::trace!("worker {} finished with {} results", index, results.len())
            }
            WorkerOutcome::Err { fault, .. } => log::warn!("worker {} failed: {}", index, fault),
        }
        outcome
    }
}

/// Extract a readable message from a panic payload
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_offset(items: &[i32], offset: &i32) -> Result<Vec<i32>, String> {
        Ok(items.iter().map(|x| x + offset).collect())
    }

    #[test]
    fn test_successful_run() {
        let tasks = [1, 2, 3];
        let slice = Slice { index: 2, items: &tasks[..] };
        let worker = Worker::new(slice, &10, &add_offset);
        assert_eq!(worker.index(), 2);

        match worker.run() {
            WorkerOutcome::Ok { index, results } => {
                assert_eq!(index, 2);
                assert_eq!(results, vec![11, 12, 13]);
            }
            other => panic!("Expected Ok outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_returned_error() {
        let reject = |items: &[i32], _: &()| -> Result<Vec<i32>, String> {
            Err(format!("cannot handle {} items", items.len()))
        };
        let tasks = [1, 2];
        let outcome = Worker::new(Slice { index: 1, items: &tasks[..] }, &(), &reject).run();

        assert_eq!(outcome.index(), 1);
        assert!(!outcome.is_ok());
        match outcome {
            WorkerOutcome::Err { fault: WorkerFault::Failed(err), .. } => {
                assert_eq!(err.to_string(), "cannot handle 2 items");
            }
            other => panic!("Expected Failed fault, got {:?}", other),
        }
    }

    #[test]
    fn test_panic_is_captured() {
        let explode = |_: &[i32], _: &()| -> Result<Vec<i32>, String> { panic!("slice exploded") };
        let tasks = [7];
        let outcome = Worker::new(Slice { index: 0, items: &tasks[..] }, &(), &explode).run();

        match outcome {
            WorkerOutcome::Err { index, fault: WorkerFault::Panicked(msg) } => {
                assert_eq!(index, 0);
                assert_eq!(msg, "slice exploded");
            }
            other => panic!("Expected Panicked fault, got {:?}", other),
        }
    }

    #[test]
    fn test_panic_message_formats() {
        let formatted = std::panic::catch_unwind(|| panic!("value {}", 5)).unwrap_err();
        assert_eq!(panic_message(formatted.as_ref()), "value 5");

        let opaque = std::panic::catch_unwind(|| std::panic::panic_any(42u8)).unwrap_err();
        assert_eq!(panic_message(opaque.as_ref()), "unknown panic payload");
    }
}
