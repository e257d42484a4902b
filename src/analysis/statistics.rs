//! Value histograms and summary statistics for evaluated grids

use crate::expression::Value;
use crate::spatial::Grid;
use indexmap::IndexMap;
use serde::Serialize;

/// Occurrence count of every distinct value
///
/// Entries keep the order in which values were first seen, so ties between
/// equally frequent values resolve to the earliest one in a row-major scan.
#[derive(Debug, Clone, Default)]
pub struct Histogram {
    counts: IndexMap<Value, usize>,
}

impl Histogram {
    /// Count every cell of a grid in row-major order
    pub fn of(grid: &Grid) -> Self {
        Self::from_values(grid.values())
    }

    /// Count a sequence of values
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut counts = IndexMap::new();
        for value in values {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Number of distinct values
    pub fn num_keys(&self) -> usize {
        self.counts.len()
    }

    /// Check whether nothing was counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of counted values
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Occurrences of one value
    pub fn count(&self, value: &Value) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&Value, usize)> + '_ {
        self.counts.iter().map(|(value, count)| (value, *count))
    }

    /// Most frequent value and its count, earliest first-seen value on ties
    pub fn most_common(&self) -> Option<(&Value, usize)> {
        self.iter().fold(None, |best, (value, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((value, count)),
        })
    }

    /// Smallest counted value
    pub fn min_key(&self) -> Option<&Value> {
        self.counts.keys().min()
    }

    /// Largest counted value
    pub fn max_key(&self) -> Option<&Value> {
        self.counts.keys().max()
    }
}

/// Summary statistics of a grid's value distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Number of distinct values
    pub num_keys: usize,
    /// Smallest value
    pub min_key: Value,
    /// Largest value
    pub max_key: Value,
    /// Most frequent value
    pub most_common_key: Value,
    /// Occurrences of the most frequent value
    pub most_common_key_count: usize,
    /// Distinct values divided by the width of the value range
    pub density: f64,
    /// Fraction of cells holding the most frequent value
    pub dominance: f64,
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            num_keys: 0,
            min_key: Value::new(0),
            max_key: Value::new(0),
            most_common_key: Value::new(0),
            most_common_key_count: 0,
            density: 0.0,
            dominance: 0.0,
        }
    }
}

impl Analysis {
    /// Analyse a grid; an empty grid yields all-zero statistics
    pub fn of(grid: &Grid) -> Self {
        Self::from_histogram(&Histogram::of(grid))
    }

    /// Derive statistics from a histogram
    pub fn from_histogram(histogram: &Histogram) -> Self {
        let (Some(min_key), Some(max_key), Some((most_common_key, most_common_key_count))) = (
            histogram.min_key(),
            histogram.max_key(),
            histogram.most_common(),
        ) else {
            return Self::default();
        };

        let num_keys = histogram.num_keys();
        let key_range = &(max_key - min_key) + &Value::new(1);
        let density = num_keys as f64 / key_range.to_f64();
        let dominance = most_common_key_count as f64 / histogram.total() as f64;

        Self {
            num_keys,
            min_key: min_key.clone(),
            max_key: max_key.clone(),
            most_common_key: most_common_key.clone(),
            most_common_key_count,
            density,
            dominance,
        }
    }
}
