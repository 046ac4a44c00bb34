use serde::{Deserialize, Serialize};
use tilemap_editor_core::CellCoord;

use crate::DocumentError;

/// Dense row-major grid of cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    columns: u32,
    rows: u32,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid where every cell holds a copy of `value`.
    #[must_use]
    pub fn filled(columns: u32, rows: u32, value: T) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![value; capacity],
        }
    }

    /// Appends a trailing row filled with copies of `fill`.
    pub fn push_row(&mut self, fill: T) {
        let columns = self.columns as usize;
        self.cells.extend(std::iter::repeat(fill).take(columns));
        self.rows += 1;
    }

    /// Appends a trailing column filled with copies of `fill`.
    pub fn push_column(&mut self, fill: T) {
        let columns = self.columns as usize;
        let previous = std::mem::take(&mut self.cells);
        let mut remaining = previous.into_iter();
        let mut cells = Vec::with_capacity((columns + 1) * self.rows as usize);
        for _ in 0..self.rows {
            cells.extend(remaining.by_ref().take(columns));
            cells.push(fill.clone());
        }
        self.cells = cells;
        self.columns += 1;
    }
}

impl<T> Grid<T> {
    /// Builds a grid from row-major cells.
    ///
    /// Fails when the cell count does not equal `columns * rows`.
    pub fn from_cells(columns: u32, rows: u32, cells: Vec<T>) -> Result<Self, DocumentError> {
        let grid = Self {
            columns,
            rows,
            cells,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Columns and rows of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Returns the value stored at the cell, if it lies inside the grid.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<&T> {
        self.index(cell).and_then(|index| self.cells.get(index))
    }

    /// Returns a mutable reference to the value stored at the cell.
    pub fn get_mut(&mut self, cell: CellCoord) -> Option<&mut T> {
        self.index(cell).and_then(|index| self.cells.get_mut(index))
    }

    /// Iterates the grid one row slice at a time, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        let columns = (self.columns as usize).max(1);
        self.cells.chunks(columns)
    }

    /// Iterates every cell with its coordinate in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellCoord, &T)> {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, value)| {
            let index = index as u32;
            (CellCoord::new(index % columns, index / columns), value)
        })
    }

    /// Removes the trailing row unless it is the only one.
    ///
    /// Returns `false` when the grid was left untouched.
    pub fn pop_row(&mut self) -> bool {
        if self.rows <= 1 {
            return false;
        }
        self.rows -= 1;
        self.cells.truncate((self.columns * self.rows) as usize);
        true
    }

    /// Removes the trailing column unless it is the only one.
    ///
    /// Returns `false` when the grid was left untouched.
    pub fn pop_column(&mut self) -> bool {
        if self.columns <= 1 {
            return false;
        }
        let columns = self.columns as usize;
        let mut position = 0;
        self.cells.retain(|_| {
            let keep = position % columns != columns - 1;
            position += 1;
            keep
        });
        self.columns -= 1;
        true
    }

    pub(crate) fn validate(&self) -> Result<(), DocumentError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(DocumentError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        let expected = u64::from(self.columns) * u64::from(self.rows);
        if self.cells.len() as u64 != expected {
            return Err(DocumentError::CellCountMismatch {
                columns: self.columns,
                rows: self.rows,
                cells: self.cells.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
