//! Dense value grid evaluated from an expression
//!
//! Cells are stored row-major in an `Array2` indexed `[y, x]`. Each
//! evaluation attempt allocates a fresh grid, fills it once, and hands it to
//! the statistics and rendering stages.

use crate::analysis::statistics::{Analysis, Histogram};
use crate::expression::{Expression, Value};
use crate::io::error::{BitartError, Result};
use ndarray::{Array2, Zip};

/// Rectangular buffer of exact integer values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Value>,
}

impl Grid {
    /// Create a zero-filled grid
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, &Value::new(0))
    }

    /// Create a grid holding one value everywhere
    pub fn filled(width: usize, height: usize, value: &Value) -> Self {
        Self {
            cells: Array2::from_elem((height, width), value.clone()),
        }
    }

    /// Create a grid and evaluate an expression at every coordinate
    pub fn evaluated(width: usize, height: usize, expression: &Expression) -> Self {
        let mut grid = Self::new(width, height);
        grid.evaluate_over(expression);
        grid
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check for a grid without cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Underlying row-major storage, indexed `[y, x]`
    pub const fn cells(&self) -> &Array2<Value> {
        &self.cells
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> BitartError {
        let (height, width) = self.cells.dim();
        BitartError::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Read the cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` when the coordinate lies outside the grid
    pub fn get(&self, x: usize, y: usize) -> Result<&Value> {
        self.cells
            .get((y, x))
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Overwrite the cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` when the coordinate lies outside the grid
    pub fn set(&mut self, x: usize, y: usize, value: Value) -> Result<()> {
        let error = self.out_of_bounds(x, y);
        let cell = self.cells.get_mut((y, x)).ok_or(error)?;
        *cell = value;
        Ok(())
    }

    /// Set every cell to one value
    pub fn fill(&mut self, value: &Value) {
        self.cells.fill(value.clone());
    }

    /// Evaluate an expression at every coordinate, binding `x` to the column and `y` to the row
    ///
    /// Cells are independent, so evaluation is spread across the rayon pool.
    /// The grid is complete when this returns.
    pub fn evaluate_over(&mut self, expression: &Expression) {
        Zip::indexed(&mut self.cells).par_for_each(|(y, x), cell| {
            *cell = expression.evaluate_at(x as i64, y as i64);
        });
    }

    /// Iterate `(x, y, value)` in row-major order
    pub fn each_pos(&self) -> impl Iterator<Item = (usize, usize, &Value)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((y, x), value)| (x, y, value))
    }

    /// Iterate values in row-major order (left to right, top to bottom)
    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.cells.iter()
    }

    /// Copy out row `y`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` when the row does not exist
    pub fn row(&self, y: usize) -> Result<Vec<Value>> {
        if y >= self.height() {
            return Err(self.out_of_bounds(0, y));
        }
        Ok(self.cells.row(y).to_vec())
    }

    /// Copy out column `x`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` when the column does not exist
    pub fn column(&self, x: usize) -> Result<Vec<Value>> {
        if x >= self.width() {
            return Err(self.out_of_bounds(x, 0));
        }
        Ok(self.cells.column(x).to_vec())
    }

    /// Frequency of every value
    pub fn histogram(&self) -> Histogram {
        Histogram::of(self)
    }

    /// Summary statistics used for quality review and coloring
    pub fn analysis(&self) -> Analysis {
        Analysis::of(self)
    }
}
