//! Parallel function adapter
//!
//! Turns a function over a task list into one that splits the list into
//! contiguous slices, runs each slice on its own thread and stitches the
//! results back together in the original order.

use std::time::Duration;

use crate::engines::config::ParallelConfig;
use crate::engines::core::{dispatch, merge, partition, CallPhase, CallTrace};
use crate::engines::{BoxedError, EngineResult};

/// Timing and sizing of one completed call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallStats {
    /// Number of tasks in the call
    pub tasks: usize,
    /// Number of workers that ran
    pub workers: usize,
    /// Wall time from the start of partitioning to the merged result
    pub elapsed: Duration,
}

/// A function bound to a worker configuration
///
/// The wrapped function receives one contiguous slice of the task list and
/// the shared context, and must return the results for exactly that slice.
/// As long as it does not depend on where the slice boundaries fall, calling
/// the `ParallelFn` gives the same list a single sequential call would.
#[derive(Debug, Clone)]
pub struct ParallelFn<F> {
    config: ParallelConfig,
    func: F,
}

/// Wrap `func` so calls run on up to `max_workers` threads
///
/// Fails with a contract violation if `max_workers` is zero.
pub fn make_parallel<F>(max_workers: usize, func: F) -> EngineResult<ParallelFn<F>> {
    ParallelFn::with_config(ParallelConfig::new(max_workers), func)
}

impl<F> ParallelFn<F> {
    /// Wrap `func` with a full configuration
    pub fn with_config(config: ParallelConfig, func: F) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config, func })
    }

    /// Configuration the function was built with
    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Upper bound on workers per call
    pub fn max_workers(&self) -> usize {
        self.config.max_workers
    }

    /// Run the wrapped function over `tasks` in parallel
    ///
    /// Results come back in task order regardless of which worker finishes
    /// first. If several workers fail, the error of the lowest slice index is
    /// returned, and only once every worker has finished.
    pub fn call<T, C, R, E>(&self, tasks: &[T], context: &C) -> EngineResult<Vec<R>>
    where
        T: Sync,
        C: Sync,
        R: Send,
        E: Into<BoxedError>,
        F: Fn(&[T], &C) -> Result<Vec<R>, E> + Sync,
    {
        self.call_timed(tasks, context).map(|(results, _)| results)
    }

    /// Like [`ParallelFn::call`], also reporting how the call was run
    pub fn call_timed<T, C, R, E>(
        &self,
        tasks: &[T],
        context: &C,
    ) -> EngineResult<(Vec<R>, CallStats)>
    where
        T: Sync,
        C: Sync,
        R: Send,
        E: Into<BoxedError>,
        F: Fn(&[T], &C) -> Result<Vec<R>, E> + Sync,
    {
        let mut trace = CallTrace::new();
        trace.enter(CallPhase::Partitioning);

        match self.run(tasks, context, &mut trace) {
            Ok((results, workers)) => {
                trace.enter(CallPhase::Done);
                let stats = CallStats {
                    tasks: tasks.len(),
                    workers,
                    elapsed: trace.elapsed(),
                };
                Ok((results, stats))
            }
            Err(err) => {
                trace.fail(&err);
                Err(err)
            }
        }
    }

    fn run<T, C, R, E>(
        &self,
        tasks: &[T],
        context: &C,
        trace: &mut CallTrace,
    ) -> EngineResult<(Vec<R>, usize)>
    where
        T: Sync,
        C: Sync,
        R: Send,
        E: Into<BoxedError>,
        F: Fn(&[T], &C) -> Result<Vec<R>, E> + Sync,
    {
        let slices = partition(tasks, self.config.max_workers)?;
        let workers = slices.len();

        let collector = dispatch(slices, context, &self.func, &self.config, trace);

        trace.enter(CallPhase::Collecting);
        let outcomes = collector.drain()?;

        trace.enter(CallPhase::Merging);
        let results = merge(outcomes)?;

        Ok((results, workers))
    }
}
