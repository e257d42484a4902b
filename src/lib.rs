//! Procedural images from random arithmetic and bitwise expressions over pixel coordinates
//!
//! Random expression trees in `x` and `y` are evaluated over a grid, the value
//! distribution is reviewed for visual interest, and accepted grids are
//! colored and written out as PNG with a YAML description.

#![forbid(unsafe_code)]

/// Expression generation, quality review and the retry loop
pub mod algorithm;
/// Value statistics and stripe detection over evaluated grids
pub mod analysis;
/// Expression trees, values, operators and equation parsing
pub mod expression;
/// Command line, configuration, errors, logging and file output
pub mod io;
/// Total arithmetic helpers
pub mod math;
/// Dense value grid
pub mod spatial;

pub use io::error::{BitartError, Result};
