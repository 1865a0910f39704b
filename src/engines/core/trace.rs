//! Call lifecycle tracing
//!
//! Every parallel call walks the same phases:
//! `Idle -> Partitioning -> Spawning -> Running -> Collecting -> Merging -> Done`,
//! dropping to `Failed` from any unfinished phase.

use std::fmt;
use std::time::{Duration, Instant};

use crate::engines::EngineError;

/// Phase of a single parallel call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPhase {
    /// Nothing has happened yet
    Idle,
    /// Validating the call and splitting the task list
    Partitioning,
    /// Starting worker threads
    Spawning,
    /// Waiting at the barrier for every worker
    Running,
    /// Draining the collector
    Collecting,
    /// Ordering and concatenating partial results
    Merging,
    /// The call returned its results
    Done,
    /// The call returned an error
    Failed,
}

impl CallPhase {
    /// Check if the call has finished, successfully or not
    pub fn is_terminal(self) -> bool {
        matches!(self, CallPhase::Done | CallPhase::Failed)
    }

    /// Check if `next` is a legal transition from this phase
    pub fn can_enter(self, next: CallPhase) -> bool {
        use CallPhase::*;
        match (self, next) {
            (Idle, Partitioning)
            | (Partitioning, Spawning)
            | (Spawning, Running)
            | (Running, Collecting)
            | (Collecting, Merging)
            | (Merging, Done) => true,
            (current, Failed) => !current.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for CallPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallPhase::Idle => "idle",
            CallPhase::Partitioning => "partitioning",
            CallPhase::Spawning => "spawning",
            CallPhase::Running => "running",
            CallPhase::Collecting => "collecting",
            CallPhase::Merging => "merging",
            CallPhase::Done => "done",
            CallPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Tracks the phase and elapsed time of one call
#[derive(Debug)]
pub struct CallTrace {
    phase: CallPhase,
    started: Instant,
}

impl Default for CallTrace {
    fn default() -> Self {
        Self::new()
    }
}

impl CallTrace {
    /// Start tracing a call
    pub fn new() -> Self {
        Self {
            phase: CallPhase::Idle,
            started: Instant::now(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> CallPhase {
        self.phase
    }

    /// Time since the call started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Move to the next phase
    pub fn enter(&mut self, next: CallPhase) {
        debug_assert!(
            self.phase.can_enter(next),
            "illegal call transition {} -> {}",
            self.phase,
            next
        );
        log::debug!("{} -> {} after {:?}", self.phase, next, self.elapsed());
        self.phase = next;
    }

    /// Record that the call failed with `err`
    pub fn fail(&mut self, err: &EngineError) {
        log::debug!("{} -> {} after {:?}: {}", self.phase, CallPhase::Failed, self.elapsed(), err);
        self.phase = CallPhase::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let mut trace = CallTrace::new();
        assert_eq!(trace.phase(), CallPhase::Idle);

        for next in [
            CallPhase::Partitioning,
            CallPhase::Spawning,
            CallPhase::Running,
            CallPhase::Collecting,
            CallPhase::Merging,
            CallPhase::Done,
        ] {
            trace.enter(next);
        }
        assert_eq!(trace.phase(), CallPhase::Done);
        assert!(trace.phase().is_terminal());
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!CallPhase::Idle.can_enter(CallPhase::Running));
        assert!(!CallPhase::Merging.can_enter(CallPhase::Collecting));
        assert!(!CallPhase::Done.can_enter(CallPhase::Failed));
        assert!(CallPhase::Running.can_enter(CallPhase::Failed));
        assert!(CallPhase::Partitioning.can_enter(CallPhase::Failed));
    }

    #[test]
    fn test_fail() {
        let mut trace = CallTrace::new();
        trace.enter(CallPhase::Partitioning);
        trace.fail(&EngineError::ContractViolation("empty".to_string()));
        assert_eq!(trace.phase(), CallPhase::Failed);
        assert_eq!(CallPhase::Failed.to_string(), "failed");
    }
}
