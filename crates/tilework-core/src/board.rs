//! Bounded occupancy grids.

use std::{
    fmt::{self, Write as _},
    iter::FusedIterator,
};

use crate::{
    cell::{Cell, CellBuf},
    piece::PieceId,
    shape::Shape,
};

/// The state of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum CellState {
    /// The cell is free.
    Empty,
    /// The cell is permanently unavailable for placement.
    Blocked,
    /// The cell is covered by the given piece.
    Occupied(PieceId),
}

impl CellState {
    /// Returns the covering piece, if any.
    #[must_use]
    pub const fn as_piece(self) -> Option<PieceId> {
        match self {
            Self::Occupied(piece) => Some(piece),
            Self::Empty | Self::Blocked => None,
        }
    }
}

/// A rectangular grid that tracks which piece covers each cell.
///
/// Cells are addressed by [`Cell`] coordinates with `(0, 0)` in the top-left
/// corner. A board may carry blocked cells fixed at construction; blocked
/// cells reject placements, count as covered for [`Board::is_full`], and
/// survive [`Board::clear`].
///
/// Placement is all-or-nothing: [`Board::can_place`] checks a whole shape
/// without touching the grid, and [`Board::place`] covers every cell of the
/// shape or panics. Anything that can fail for data-dependent reasons is
/// routed through `can_place` first, so a panic from `place` is a caller bug.
///
/// # Examples
///
/// ```
/// use tilework_core::{Board, Cell, PieceId, Shape};
///
/// let mut board = Board::new(3, 2)?;
/// let corner: Shape = "##\n#.".parse()?;
///
/// assert!(board.can_place(&corner, Cell::new(0, 0)));
/// let covered = board.place(&corner, Cell::new(0, 0), PieceId::new(0));
/// assert_eq!(covered[..], [Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0)]);
/// assert_eq!(board.owner(Cell::new(0, 1)), Some(PieceId::new(0)));
///
/// // The covered cells now reject further placements.
/// assert!(!board.can_place(&corner, Cell::new(0, 0)));
///
/// board.remove(&covered);
/// assert!(board.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
    occupied: usize,
    blocked: usize,
}

impl Board {
    /// Maximum board width and height.
    pub const MAX_DIM: usize = 50;

    /// Creates an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidDimensions`] unless both dimensions are
    /// within `1..=`[`Board::MAX_DIM`].
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 || width > Self::MAX_DIM || height > Self::MAX_DIM {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![CellState::Empty; width * height],
            occupied: 0,
            blocked: 0,
        })
    }

    /// Creates a board with the given cells blocked.
    ///
    /// Blocking the same cell twice is allowed and blocks it once.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidDimensions`] for out-of-range dimensions
    /// and [`BoardError::BlockedCellOutOfBounds`] if a blocked cell falls
    /// outside the grid.
    pub fn with_blocked(
        width: usize,
        height: usize,
        blocked: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, BoardError> {
        let mut board = Self::new(width, height)?;
        for cell in blocked {
            let Some(index) = board.index(cell) else {
                return Err(BoardError::BlockedCellOutOfBounds {
                    cell,
                    width,
                    height,
                });
            };
            if board.cells[index] == CellState::Blocked {
                continue;
            }
            board.cells[index] = CellState::Blocked;
            board.occupied += 1;
            board.blocked += 1;
        }
        Ok(board)
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let row = usize::try_from(cell.row).ok()?;
        let col = usize::try_from(cell.col).ok()?;
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    /// Returns the board width in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the board height in cells.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the total number of cells.
    #[must_use]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Returns the number of cells that are neither occupied nor blocked,
    /// counting placed pieces as occupied.
    #[must_use]
    pub fn available_area(&self) -> usize {
        self.area() - self.blocked
    }

    /// Returns the number of covered cells, blocked cells included.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Returns the number of blocked cells.
    #[must_use]
    pub fn blocked_count(&self) -> usize {
        self.blocked
    }

    /// Returns `true` if every cell is covered by a piece or blocked.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.occupied == self.area()
    }

    /// Returns `true` if no piece is placed. Blocked cells do not count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied == self.blocked
    }

    /// Returns the state of a cell, or `None` outside the grid.
    #[must_use]
    pub fn state(&self, cell: Cell) -> Option<CellState> {
        self.index(cell).map(|index| self.cells[index])
    }

    /// Returns the piece covering a cell, if any.
    #[must_use]
    pub fn owner(&self, cell: Cell) -> Option<PieceId> {
        self.state(cell).and_then(CellState::as_piece)
    }

    /// Returns `true` if the cell is blocked.
    #[must_use]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.state(cell) == Some(CellState::Blocked)
    }

    /// Returns `true` if the shape fits at `anchor` entirely on empty cells.
    ///
    /// Each shape cell is offset by `anchor` and checked in row-major order;
    /// the check stops at the first cell that is out of bounds, occupied or
    /// blocked. The board is never modified.
    #[must_use]
    pub fn can_place(&self, shape: &Shape, anchor: Cell) -> bool {
        shape.cells().iter().all(|&cell| {
            self.index(anchor + cell)
                .is_some_and(|index| self.cells[index] == CellState::Empty)
        })
    }

    /// Covers the cells of `shape` at `anchor` with `piece` and returns the
    /// covered cells in board coordinates.
    ///
    /// The returned cells are exactly what [`Board::remove`] needs to undo
    /// the placement.
    ///
    /// # Panics
    ///
    /// Panics if the placement is illegal, that is if [`Board::can_place`]
    /// would return `false` for the same shape and anchor.
    #[must_use]
    pub fn place(&mut self, shape: &Shape, anchor: Cell, piece: PieceId) -> CellBuf {
        assert!(
            self.can_place(shape, anchor),
            "illegal placement of piece {piece} at {anchor}"
        );
        let mut covered = CellBuf::default();
        for &cell in shape.cells() {
            let target = anchor + cell;
            let Some(index) = self.index(target) else {
                unreachable!("placement was bounds-checked");
            };
            self.cells[index] = CellState::Occupied(piece);
            self.occupied += 1;
            covered.push(target);
        }
        covered
    }

    /// Uncovers the given cells.
    ///
    /// # Panics
    ///
    /// Panics if any cell is outside the grid or not covered by a piece.
    /// Blocked cells cannot be removed.
    pub fn remove(&mut self, cells: &[Cell]) {
        for &cell in cells {
            let Some(index) = self.index(cell) else {
                panic!("removed cell {cell} is outside the board");
            };
            assert!(
                self.cells[index].is_occupied(),
                "removed cell {cell} is not covered by a piece"
            );
            self.cells[index] = CellState::Empty;
            self.occupied -= 1;
        }
    }

    /// Removes every placed piece. Blocked cells stay blocked.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            if cell.is_occupied() {
                *cell = CellState::Empty;
            }
        }
        self.occupied = self.blocked;
    }

    /// Returns an iterator over all cell positions in row-major order.
    #[must_use]
    pub fn positions(&self) -> Positions {
        Positions {
            width: self.width,
            height: self.height,
            row: 0,
            col: 0,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            if row > 0 {
                f.write_char('\n')?;
            }
            for col in 0..self.width {
                let ch = match self.cells[row * self.width + col] {
                    CellState::Empty => '.',
                    CellState::Blocked => '#',
                    CellState::Occupied(piece) => piece_char(piece),
                };
                f.write_char(ch)?;
            }
        }
        Ok(())
    }
}

/// Letters cycle through `A..=Z` by piece identifier.
fn piece_char(piece: PieceId) -> char {
    u8::try_from(piece.value() % 26).map_or('?', |offset| char::from(b'A' + offset))
}

/// Iterator over the cells of a [`Board`] in row-major order.
///
/// Returned by [`Board::positions`]. The iterator owns its bounds, so the
/// board can be mutated while iteration is in progress.
#[derive(Debug, Clone)]
pub struct Positions {
    width: usize,
    height: usize,
    row: usize,
    col: usize,
}

impl Iterator for Positions {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.height {
            return None;
        }
        let cell = Cell::from_indices(self.row, self.col);
        self.col += 1;
        if self.col >= self.width {
            self.col = 0;
            self.row += 1;
        }
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.height - self.row) * self.width - self.col;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Positions {}

impl FusedIterator for Positions {}

/// An error from constructing a [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// A dimension was zero or beyond [`Board::MAX_DIM`].
    #[display("board dimensions must be within 1..={}: got {width}x{height}", Board::MAX_DIM)]
    InvalidDimensions {
        /// The requested width.
        width: usize,
        /// The requested height.
        height: usize,
    },
    /// A blocked cell fell outside the grid.
    #[display("blocked cell {cell} is outside the {width}x{height} board")]
    BlockedCellOutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// The board width.
        width: usize,
        /// The board height.
        height: usize,
    },
}
