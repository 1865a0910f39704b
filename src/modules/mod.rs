//! User-facing modules built on the engines

pub mod parallel;
