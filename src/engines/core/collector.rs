//! Outcome collection
//!
//! A bounded channel sized to the number of workers. Workers only send, and
//! the channel is only read once every worker has been joined, so senders
//! never block and the drain never races a producer.

use crossbeam_channel::{Receiver, Sender};

use crate::engines::core::worker::WorkerOutcome;
use crate::engines::{EngineError, EngineResult};

/// Sending half handed to each worker
pub struct OutcomeSender<R> {
    inner: Sender<WorkerOutcome<R>>,
}

impl<R> Clone for OutcomeSender<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R> OutcomeSender<R> {
    /// Emit a worker's outcome
    ///
    /// Never blocks while the collector is alive and each worker sends once.
    pub fn emit(&self, outcome: WorkerOutcome<R>) {
        let index = outcome.index();
        if self.inner.send(outcome).is_err() {
            // Only possible once the collector is gone; drain will report the gap
            log::error!("collector closed before worker {} could report", index);
        }
    }
}

/// Receives exactly one outcome per dispatched slice
pub struct Collector<R> {
    expected: usize,
    sender: Sender<WorkerOutcome<R>>,
    receiver: Receiver<WorkerOutcome<R>>,
}

impl<R> Collector<R> {
    /// Create a collector for `expected` workers
    pub fn new(expected: usize) -> Self {
        let (sender, receiver) = crossbeam_channel::bounded(expected);
        Self {
            expected,
            sender,
            receiver,
        }
    }

    /// Number of outcomes the collector expects
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Get a sender for one worker
    pub fn sender(&self) -> OutcomeSender<R> {
        OutcomeSender {
            inner: self.sender.clone(),
        }
    }

    /// Take every outcome once all workers have finished
    ///
    /// Fails with [`EngineError::IncompleteResults`] unless each index in
    /// `0..expected` reported exactly once.
    pub fn drain(self) -> EngineResult<Vec<WorkerOutcome<R>>> {
        let Collector {
            expected,
            sender,
            receiver,
        } = self;
        drop(sender);

        let outcomes: Vec<WorkerOutcome<R>> = receiver.try_iter().collect();

        let mut seen = vec![false; expected];
        let mut distinct = 0;
        for outcome in &outcomes {
            let index = outcome.index();
            if index < expected && !seen[index] {
                seen[index] = true;
                distinct += 1;
            }
        }

        if outcomes.len() != expected || distinct != expected {
            log::error!(
                "expected {} worker outcomes, collected {} ({} distinct)",
                expected,
                outcomes.len(),
                distinct
            );
            return Err(EngineError::IncompleteResults {
                expected,
                collected: distinct,
            });
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::WorkerFault;

    fn ok(index: usize) -> WorkerOutcome<usize> {
        WorkerOutcome::Ok {
            index,
            results: vec![index],
        }
    }

    #[test]
    fn test_drain_complete() {
        let collector = Collector::new(3);
        assert_eq!(collector.expected(), 3);

        let sender = collector.sender();
        sender.emit(ok(2));
        sender.emit(ok(0));
        collector.sender().emit(WorkerOutcome::Err {
            index: 1,
            fault: WorkerFault::Panicked("x".to_string()),
        });
        drop(sender);

        let outcomes = collector.drain().unwrap();
        let indices: Vec<usize> = outcomes.iter().map(|o| o.index()).collect();
        assert_eq!(indices, vec![2, 0, 1]);
    }

    #[test]
    fn test_drain_missing_outcome() {
        let collector = Collector::new(3);
        collector.sender().emit(ok(0));
        collector.sender().emit(ok(2));

        match collector.drain() {
            Err(EngineError::IncompleteResults { expected, collected }) => {
                assert_eq!(expected, 3);
                assert_eq!(collected, 2);
            }
            other => panic!("Expected IncompleteResults, got {:?}", other.map(|o| o.len())),
        }
    }

    #[test]
    fn test_drain_duplicate_outcome() {
        let collector = Collector::new(2);
        collector.sender().emit(ok(1));
        collector.sender().emit(ok(1));

        assert!(matches!(
            collector.drain(),
            Err(EngineError::IncompleteResults { expected: 2, collected: 1 })
        ));
    }

    #[test]
    fn test_senders_across_threads() {
        let collector = Collector::new(4);
        std::thread::scope(|s| {
            for index in 0..4 {
                let sender = collector.sender();
                s.spawn(move || sender.emit(ok(index)));
            }
        });

        let mut indices: Vec<usize> = collector.drain().unwrap().iter().map(|o| o.index()).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }
}
