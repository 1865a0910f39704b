//! Order-preserving parallel map over contiguous task slices.
//!
//! [`make_parallel`] wraps a function that maps a list of tasks to a list of
//! results. Each call splits the tasks into at most `max_workers` contiguous
//! slices of near-equal size, runs every slice on a fresh OS thread, waits for
//! all of them, and concatenates the partial results in slice order.
//!
//! ```
//! use parallel_slices::make_parallel;
//!
//! fn compute_squares(tasks: &[i64], initial_value: &i64) -> Result<Vec<i64>, String> {
//!     Ok(tasks.iter().map(|x| x * x + initial_value).collect())
//! }
//!
//! let squares = make_parallel(10, compute_squares).unwrap();
//! let tasks: Vec<i64> = (0..20).collect();
//! let results = squares.call(&tasks, &4).unwrap();
//! assert_eq!(&results[..5], &[4, 5, 8, 13, 20]);
//! ```

pub mod engines;
pub mod modules;

pub use engines::config::{default_max_workers, ParallelConfig};
pub use engines::{BoxedError, EngineError, EngineResult, WorkerFault};
pub use modules::parallel::{make_parallel, CallStats, Context, ParallelFn};
