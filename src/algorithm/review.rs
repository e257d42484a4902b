//! Quality review of evaluated grids
//!
//! Checks run in a fixed order and the first failing check names the
//! problem: solid colour, then dominance, then stripes.

use crate::analysis::patterns::stripe_fraction;
use crate::analysis::statistics::Analysis;
use crate::io::configuration::{DOMINANCE_THRESHOLD, MAX_PATTERN_LENGTH, STRIPE_FRACTION};
use crate::spatial::Grid;
use std::fmt;

/// Reason an image was judged uninteresting
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Problem {
    /// At most one distinct value
    SolidColour,
    /// One value covers nearly the whole image
    Dominant {
        /// Fraction of cells holding the most common value
        dominance: f64,
    },
    /// Most rows or columns repeat a short pattern
    Striped {
        /// Patterned row count
        rows: usize,
        /// Patterned column count
        columns: usize,
    },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SolidColour => write!(f, "Solid colour"),
            Self::Dominant { dominance } => write!(f, "Dominance too high: {dominance}"),
            Self::Striped { rows, columns } => {
                write!(f, "Image is mostly stripes ({rows}, {columns})")
            }
        }
    }
}

/// Limits applied during review
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReviewThresholds {
    /// Dominance above which an image is rejected
    pub dominance: f64,
    /// Longest repeating pattern that still counts as a stripe
    pub max_pattern_length: usize,
    /// Striped fraction of rows or columns above which an image is rejected
    pub stripe_fraction: f64,
}

impl Default for ReviewThresholds {
    fn default() -> Self {
        Self {
            dominance: DOMINANCE_THRESHOLD,
            max_pattern_length: MAX_PATTERN_LENGTH,
            stripe_fraction: STRIPE_FRACTION,
        }
    }
}

/// Judge a grid, returning the first problem found
pub fn review(grid: &Grid, analysis: &Analysis, thresholds: &ReviewThresholds) -> Option<Problem> {
    if analysis.num_keys <= 1 {
        return Some(Problem::SolidColour);
    }

    if analysis.dominance > thresholds.dominance {
        return Some(Problem::Dominant {
            dominance: analysis.dominance,
        });
    }

    let stripes = stripe_fraction(grid, thresholds.max_pattern_length, thresholds.stripe_fraction);
    stripes.striped.then_some(Problem::Striped {
        rows: stripes.rows,
        columns: stripes.columns,
    })
}
