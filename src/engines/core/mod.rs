//! Core partition / fan-out / fan-in engine

pub mod collector;
pub(crate) mod dispatch;
pub mod merge;
pub mod partition;
pub mod trace;
pub mod worker;

pub use collector::{Collector, OutcomeSender};
pub(crate) use dispatch::dispatch;
pub use merge::merge;
pub use partition::{effective_workers, partition, slice_bounds, Slice};
pub use trace::{CallPhase, CallTrace};
pub use worker::{Worker, WorkerOutcome};
