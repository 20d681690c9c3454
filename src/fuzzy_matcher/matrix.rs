//! Row-major score matrix backed by a single heap buffer.
//!
//! Cell `(i, j)` lives at `i * cols + j`. Matrices are sized per call and
//! dropped with it, so needle length never touches the call stack.

use std::fmt::{self, Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::fuzzy_matcher::fzy::Score;

/// `rows × cols` grid stored in one flat buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// Creates a matrix with every cell set to `init`.
    pub fn new(rows: usize, cols: usize, init: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![init; rows * cols],
        }
    }
}

impl<T> Matrix<T> {
    /// Number of rows (needle length).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (haystack length).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// One row as a slice.
    pub fn row(&self, i: usize) -> &[T] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }

    #[inline(always)]
    fn offset(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.rows && j < self.cols, "({i}, {j}) out of {}x{}", self.rows, self.cols);
        i * self.cols + j
    }

    fn fmt_with(&self, f: &mut Formatter<'_>, cell: impl Fn(&T, &mut Formatter<'_>) -> fmt::Result) -> fmt::Result {
        for i in 0..self.rows {
            for value in self.row(i) {
                cell(value, f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.cells[self.offset(i, j)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        let offset = self.offset(i, j);
        &mut self.cells[offset]
    }
}

impl Display for Matrix<Score> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, |value, f| write!(f, " {value:>3}"))
    }
}

/// Unset cells print as `-`.
impl Display for Matrix<Option<Score>> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, |value, f| match value {
            Some(value) => write!(f, " {value:>3}"),
            None => write!(f, " {:>3}", "-"),
        })
    }
}
