//! Repeated-pattern detection for rows and columns
//!
//! A row or column that is explained by a short repeating prefix is evidence
//! of a striped, uninteresting image. The search grows a candidate prefix up
//! to the first mismatch until it either tiles the sequence or gets too long.

use crate::expression::Value;
use crate::io::error::Result;
use crate::spatial::Grid;

/// Shortest repeating prefix of `stripe`, if one of at most `max_pattern_length` exists
///
/// The candidate starts as the first element. Whenever the cyclic tiling of
/// the candidate deviates at position `p`, the candidate grows to `stripe[..=p]`.
/// A candidate is accepted once `p + len > stripe.len()`, meaning it already
/// explains the remainder of the sequence.
pub fn find_pattern_in<T: PartialEq>(stripe: &[T], max_pattern_length: usize) -> Option<&[T]> {
    if stripe.is_empty() {
        return None;
    }

    let mut pattern_length = 1;
    loop {
        let mismatch = repeats_to(stripe, pattern_length);
        if mismatch + pattern_length > stripe.len() {
            return stripe.get(..pattern_length);
        }

        pattern_length = mismatch + 1;
        if pattern_length > max_pattern_length {
            return None;
        }
    }
}

// First index where the sequence departs from its own prefix tiled cyclically
fn repeats_to<T: PartialEq>(stripe: &[T], pattern_length: usize) -> usize {
    stripe
        .iter()
        .enumerate()
        .position(|(n, value)| stripe.get(n % pattern_length) != Some(value))
        .unwrap_or(stripe.len())
}

/// Shortest repeating pattern of one grid row or column
///
/// `vertical` selects column `index`, otherwise row `index` is examined.
///
/// # Errors
///
/// Returns `OutOfBounds` when the row or column does not exist
pub fn repeated_pattern(
    grid: &Grid,
    index: usize,
    vertical: bool,
    max_pattern_length: usize,
) -> Result<Option<Vec<Value>>> {
    let stripe = if vertical {
        grid.column(index)?
    } else {
        grid.row(index)?
    };

    Ok(find_pattern_in(&stripe, max_pattern_length).map(<[Value]>::to_vec))
}

/// Row and column stripe counts for one grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripeReport {
    /// Rows explained by a short repeating pattern
    pub rows: usize,
    /// Columns explained by a short repeating pattern
    pub columns: usize,
    /// Whether either fraction exceeded the threshold
    pub striped: bool,
}

/// Count patterned rows and columns and judge whether the grid is striped
///
/// Rows and columns are judged independently; the grid is striped when the
/// patterned fraction of either exceeds `threshold`.
pub fn stripe_fraction(grid: &Grid, max_pattern_length: usize, threshold: f64) -> StripeReport {
    let cells = grid.cells();
    let patterned = |lane: ndarray::ArrayView1<'_, Value>| {
        find_pattern_in(&lane.to_vec(), max_pattern_length).is_some()
    };

    let rows = cells.rows().into_iter().filter(|row| patterned(row.view())).count();
    let columns = cells
        .columns()
        .into_iter()
        .filter(|column| patterned(column.view()))
        .count();

    let exceeds = |count: usize, total: usize| total > 0 && count as f64 / total as f64 > threshold;
    let striped = exceeds(rows, grid.height()) || exceeds(columns, grid.width());

    StripeReport {
        rows,
        columns,
        striped,
    }
}
