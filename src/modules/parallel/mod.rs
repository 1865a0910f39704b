//! Parallel function module
//!
//! This module provides the public adapter that wraps a function over a task
//! list into an order-preserving parallel equivalent.

pub mod adapter;
pub mod context;

/// Convenience re-exports
pub use adapter::{make_parallel, CallStats, ParallelFn};
pub use context::Context;
