//! Parallel execution configuration

use serde::{Deserialize, Serialize};

use crate::engines::{EngineError, EngineResult};

/// Default prefix for worker thread names
pub const DEFAULT_THREAD_NAME_PREFIX: &str = "parallel-slices-worker";

/// Get the default number of workers to use
pub fn default_max_workers() -> usize {
    num_cpus::get()
}

/// Configuration bound to a parallel function when it is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Upper bound on the number of workers spawned per call
    pub max_workers: usize,
    /// Worker threads are named `{prefix}-{slice index}`
    pub thread_name_prefix: String,
    /// Stack size for worker threads; platform default when `None`
    pub stack_size: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            thread_name_prefix: DEFAULT_THREAD_NAME_PREFIX.to_string(),
            stack_size: None,
        }
    }
}

impl ParallelConfig {
    /// Create a configuration with the given worker bound
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers,
            ..Self::default()
        }
    }

    /// Set the worker thread name prefix
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Set the worker thread stack size in bytes
    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = Some(stack_size);
        self
    }

    /// Check that the configuration can drive a call
    pub fn validate(&self) -> EngineResult<()> {
        if self.max_workers == 0 {
            return Err(EngineError::ContractViolation(
                "max_workers must be at least 1".to_string(),
            ));
        }
        if self.thread_name_prefix.contains('\0') {
            return Err(EngineError::ContractViolation(
                "thread_name_prefix must not contain NUL bytes".to_string(),
            ));
        }
        if self.stack_size == Some(0) {
            return Err(EngineError::ContractViolation(
                "stack_size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParallelConfig::default();
        assert_eq!(config.max_workers, default_max_workers());
        assert!(config.max_workers >= 1);
        assert_eq!(config.thread_name_prefix, DEFAULT_THREAD_NAME_PREFIX);
        assert!(config.stack_size.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ParallelConfig::new(3)
            .with_thread_name_prefix("squares")
            .with_stack_size(256 * 1024);
        assert_eq!(config.max_workers, 3);
        assert_eq!(config.thread_name_prefix, "squares");
        assert_eq!(config.stack_size, Some(256 * 1024));
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert!(matches!(
            ParallelConfig::new(0).validate(),
            Err(EngineError::ContractViolation(_))
        ));
        assert!(matches!(
            ParallelConfig::new(2).with_stack_size(0).validate(),
            Err(EngineError::ContractViolation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_nul_in_thread_name() {
        let config = ParallelConfig::new(2).with_thread_name_prefix("bad\0name");
        match config.validate() {
            Err(EngineError::ContractViolation(msg)) => assert!(msg.contains("thread_name_prefix")),
            other => panic!("Expected ContractViolation, got {:?}", other),
        }
    }
}
