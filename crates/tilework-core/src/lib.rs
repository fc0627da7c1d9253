//! Core data structures for polyomino placement puzzles.
//!
//! This crate provides the geometric vocabulary shared by solving and
//! replaying components: cells, shapes made of cells, identified pieces, and
//! the bounded board they are placed on.
//!
//! # Overview
//!
//! The crate is organized around three main concepts:
//!
//! 1. **Coordinates** - Signed grid positions
//!    - [`cell`]: The `(row, col)` coordinate type and the small cell buffer
//!      used throughout
//!
//! 2. **Shapes and pieces** - Normalized polyomino geometry
//!    - [`shape`]: Edge-connected cell sets with rotation, mirroring and
//!      orientation enumeration
//!    - [`piece`]: A shape bound to an identity, with its distinct
//!      orientations precomputed
//!
//! 3. **Boards** - Occupancy tracking
//!    - [`board`]: A rectangular grid with placement checks, placement and
//!      removal, blocked cells, and fullness accounting
//!
//! # Examples
//!
//! ```
//! use tilework_core::{Board, Cell, MirrorPolicy, Piece, PieceId, Shape};
//!
//! // Draw a shape and wrap it in a piece.
//! let shape: Shape = "##\n#.".parse()?;
//! let piece = Piece::new(PieceId::new(0), shape, MirrorPolicy::Include);
//!
//! // Place its base orientation on a board.
//! let mut board = Board::new(4, 4)?;
//! assert!(board.can_place(piece.base(), Cell::new(1, 1)));
//! let covered = board.place(piece.base(), Cell::new(1, 1), piece.id());
//! assert_eq!(covered.len(), piece.area());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod board;
pub mod cell;
pub mod piece;
pub mod shape;

// Re-export commonly used types
pub use self::{
    board::{Board, BoardError, CellState, Positions},
    cell::{Cell, CellBuf},
    piece::{Piece, PieceId},
    shape::{Axis, MirrorPolicy, ParseShapeError, Rotation, Shape, ShapeError},
};
