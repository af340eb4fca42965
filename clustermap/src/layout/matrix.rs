//! Dense per-cell tables.
//!
//! Row-major storage indexed by (row, column). The layout passes are built
//! from row/column max and sum reductions, which map directly onto slices
//! (rows) and strided walks (columns).

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq)]
pub struct CellMatrix<T> {
    rows: usize,
    columns: usize,
    data: Vec<T>,
}

impl<T: Copy> CellMatrix<T> {
    /// A `rows x columns` matrix filled with `value`.
    pub fn filled(rows: usize, columns: usize, value: T) -> Self {
        Self {
            rows,
            columns,
            data: vec![value; rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, row: usize, column: usize) -> Option<T> {
        (row < self.rows && column < self.columns).then(|| self.data[row * self.columns + column])
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.columns..(row + 1) * self.columns]
    }

    /// One column, top to bottom.
    pub fn column(&self, column: usize) -> impl Iterator<Item = T> + '_ {
        self.data.iter().skip(column).step_by(self.columns.max(1)).copied()
    }

    /// Iterate `(row, column, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let columns = self.columns.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| (i / columns, i % columns, *v))
    }

    /// Apply `f` to every cell in place.
    pub fn map_in_place(&mut self, mut f: impl FnMut(usize, usize, T) -> T) {
        let columns = self.columns.max(1);
        for (i, v) in self.data.iter_mut().enumerate() {
            *v = f(i / columns, i % columns, *v);
        }
    }
}

impl CellMatrix<f64> {
    /// A matrix of zeros.
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self::filled(rows, columns, 0.0)
    }

    /// Largest value of each column.
    pub fn column_max(&self) -> Vec<f64> {
        (0..self.columns).map(|c| max_of(self.column(c))).collect()
    }

    /// Largest value of each row.
    pub fn row_max(&self) -> Vec<f64> {
        (0..self.rows).map(|r| max_of(self.row(r).iter().copied())).collect()
    }

    /// Sum of each column.
    pub fn column_sum(&self) -> Vec<f64> {
        (0..self.columns).map(|c| self.column(c).sum()).collect()
    }
}

/// NaN-ignoring maximum, zero for an empty iterator.
fn max_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max).max(0.0)
}

impl<T> Index<(usize, usize)> for CellMatrix<T> {
    type Output = T;

    fn index(&self, (row, column): (usize, usize)) -> &T {
        assert!(row < self.rows && column < self.columns, "cell ({row}, {column}) out of range");
        &self.data[row * self.columns + column]
    }
}

impl<T> IndexMut<(usize, usize)> for CellMatrix<T> {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut T {
        assert!(row < self.rows && column < self.columns, "cell ({row}, {column}) out of range");
        &mut self.data[row * self.columns + column]
    }
}
