//! Mathematical utilities for expression evaluation

/// Total floor division and remainder
pub mod arithmetic;
