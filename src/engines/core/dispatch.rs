//! Worker dispatch
//!
//! Spawns one scoped OS thread per slice and waits for all of them before
//! handing the collector back. Threads are created fresh for every call;
//! there is no pool.

use std::thread;

use crate::engines::config::ParallelConfig;
use crate::engines::core::collector::Collector;
use crate::engines::core::partition::Slice;
use crate::engines::core::trace::{CallPhase, CallTrace};
use crate::engines::core::worker::{Worker, WorkerOutcome};
use crate::engines::{BoxedError, WorkerFault};

/// Run every slice on its own thread, each reporting into the returned collector
///
/// Returns only after every spawned thread has been joined, so the collector
/// can be drained without waiting. `trace` must be in
/// [`CallPhase::Partitioning`]; it is left in [`CallPhase::Running`].
pub(crate) fn dispatch<T, C, R, E, F>(
    slices: Vec<Slice<'_, T>>,
    context: &C,
    func: &F,
    config: &ParallelConfig,
    trace: &mut CallTrace,
) -> Collector<R>
where
    T: Sync,
    C: Sync,
    R: Send,
    E: Into<BoxedError>,
    F: Fn(&[T], &C) -> Result<Vec<R>, E> + Sync,
{
    let collector = Collector::new(slices.len());
    log::debug!("dispatching {} workers", collector.expected());
    trace.enter(CallPhase::Spawning);

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(slices.len());

        for slice in slices {
            let index = slice.index;
            let sender = collector.sender();
            let worker = Worker::new(slice, context, func);

            let mut builder =
                thread::Builder::new().name(format!("{}-{}", config.thread_name_prefix, index));
            if let Some(stack_size) = config.stack_size {
                builder = builder.stack_size(stack_size);
            }

            // The worker is moved into the closure; keep a sender here so a
            // failed spawn still produces this slice's outcome.
            let fallback = sender.clone();
            match builder.spawn_scoped(scope, move || sender.emit(worker.run())) {
                Ok(handle) => handles.push((index, handle)),
                Err(err) => {
                    log::error!("failed to spawn worker {}: {}", index, err);
                    fallback.emit(WorkerOutcome::Err {
                        index,
                        fault: WorkerFault::Spawn(err),
                    });
                }
            }
        }

        // Barrier: every spawned worker is joined before the collector is read
        trace.enter(CallPhase::Running);
        for (index, handle) in handles {
            if handle.join().is_err() {
                log::error!("worker {} terminated without reporting", index);
            }
        }
    });

    collector
}
