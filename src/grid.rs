//! A fixed-size square grid of color identifiers.
//!
//! Coordinates follow screen convention: `x` grows East (image column) and
//! `y` grows South (image row). Cells are stored row-major, `y * size + x`.

use crate::types::{Color, TurmiteError};
use std::collections::BTreeMap;

/// Background color every cell starts with.
pub const BACKGROUND: Color = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Color>,
}

impl Grid {
    /// Creates a `size` x `size` grid filled with the background color.
    ///
    /// A zero size is rejected, as is one whose cell count overflows `usize`.
    pub fn new(size: usize) -> Result<Self, TurmiteError> {
        if size == 0 {
            return Err(TurmiteError::ValidationError(
                "Grid size must be at least 1".to_string(),
            ));
        }

        let len = size.checked_mul(size).ok_or_else(|| {
            TurmiteError::ValidationError(format!("Grid size {} is too large", size))
        })?;

        Ok(Self {
            size,
            cells: vec![BACKGROUND; len],
        })
    }

    /// Edge length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The starting cell of an automaton: `(size / 2, size / 2)`.
    pub fn center(&self) -> (usize, usize) {
        (self.size / 2, self.size / 2)
    }

    /// Whether a signed coordinate lies inside `[0, size)` on both axes.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        let size = self.size as i64;
        (0..size).contains(&x) && (0..size).contains(&y)
    }

    /// Reads the color at `(x, y)`.
    ///
    /// The grid does not know the step index, so an `OutOfBounds` error from here
    /// always carries `step: 0`. `Turmite::step` reports the real one.
    pub fn get(&self, x: usize, y: usize) -> Result<Color, TurmiteError> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Writes `color` at `(x, y)`. Errors carry `step: 0`, as for [`Grid::get`].
    pub fn set(&mut self, x: usize, y: usize, color: Color) -> Result<(), TurmiteError> {
        let i = self.index(x, y)?;
        self.cells[i] = color;
        Ok(())
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Iterates over rows from North (y = 0) to South.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.cells.chunks(self.size)
    }

    /// Number of cells holding each color that appears on the grid.
    pub fn histogram(&self) -> BTreeMap<Color, usize> {
        let mut counts = BTreeMap::new();
        for &color in &self.cells {
            *counts.entry(color).or_insert(0) += 1;
        }
        counts
    }

    /// Clears every cell back to the background color.
    pub fn reset(&mut self) {
        self.cells.fill(BACKGROUND);
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, TurmiteError> {
        if x >= self.size || y >= self.size {
            return Err(TurmiteError::OutOfBounds {
                x: x as i64,
                y: y as i64,
                step: 0,
            });
        }
        Ok(y * self.size + x)
    }
}
