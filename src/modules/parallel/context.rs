//! Shared call context
//!
//! Extra arguments handed identically to every worker. Any `Sync` value can
//! serve as a context; [`Context`] is a convenience bundle for callers that
//! want to keep positional values apart from named options.

/// Positional values plus named options shared by every worker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context<P, N = ()> {
    /// Values the function reads positionally
    pub positional: P,
    /// Named options
    pub named: N,
}

impl<P> Context<P> {
    /// Create a context with positional values only
    pub fn positional(positional: P) -> Self {
        Self {
            positional,
            named: (),
        }
    }
}

impl<P, N> Context<P, N> {
    /// Create a context with positional values and named options
    pub fn new(positional: P, named: N) -> Self {
        Self { positional, named }
    }
}
