//! Analysis of evaluated grids: value statistics and stripe detection

/// Repeated-pattern detection over rows and columns
pub mod patterns;
/// Value histograms and summary statistics
pub mod statistics;
