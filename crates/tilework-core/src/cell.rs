//! Grid coordinates.

use std::ops::Add;

use tinyvec::TinyVec;

/// A small buffer of cells.
///
/// Most shapes fit in the inline capacity, so shape transforms and placement
/// bookkeeping avoid heap allocation for typical piece sizes.
pub type CellBuf = TinyVec<[Cell; 8]>;

/// A position on a grid, addressed as `(row, col)`.
///
/// Rows grow downward and columns grow rightward. Coordinates are signed so
/// that shape transforms can move cells through negative space before
/// normalization pulls them back to the origin.
///
/// Cells order row-major: first by row, then by column within a row.
///
/// # Examples
///
/// ```
/// use tilework_core::Cell;
///
/// let cell = Cell::new(2, 3);
/// assert_eq!(cell.row, 2);
/// assert_eq!(cell.col, 3);
/// assert_eq!(cell + Cell::new(1, -1), Cell::new(3, 2));
/// assert!(Cell::new(0, 9) < Cell::new(1, 0));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
#[display("({row}, {col})")]
pub struct Cell {
    /// Row index, growing downward.
    pub row: i32,
    /// Column index, growing rightward.
    pub col: i32,
}

impl Cell {
    /// Creates a cell at the given row and column.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Creates a cell from unsigned grid indices.
    ///
    /// Indices beyond `i32::MAX` saturate.
    #[must_use]
    pub fn from_indices(row: usize, col: usize) -> Self {
        let row = i32::try_from(row).unwrap_or(i32::MAX);
        let col = i32::try_from(col).unwrap_or(i32::MAX);
        Self { row, col }
    }
}

impl Add for Cell {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}
