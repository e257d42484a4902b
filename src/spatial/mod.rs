//! Spatial data structures
//!
//! This module contains the dense value grid that expressions are
//! evaluated over.

/// Value grid storage, access and evaluation
pub mod grid;

pub use grid::Grid;
