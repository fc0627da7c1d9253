//! Exhaustive backtracking search for polyomino placement puzzles.
//!
//! This crate takes the geometry from [`tilework_core`] and adds the search:
//! a deterministic depth-first solver ([`BacktrackSolver`]), cooperative
//! cancellation ([`CancelToken`]), an append-only record of every placement
//! and removal ([`Trace`]), and step-by-step reconstruction of a recorded run
//! ([`Replayer`]). [`validate_puzzle`] rejects configurations that are
//! provably unsolvable before any search starts.
//!
//! # Examples
//!
//! ```
//! use tilework_core::{Board, MirrorPolicy, Piece, PieceId, Shape};
//! use tilework_solver::{BacktrackSolver, CancelToken, Replayer, validate_puzzle};
//!
//! // Two dominoes exactly cover a 2x2 board.
//! let domino: Shape = "##".parse()?;
//! let pieces = vec![
//!     Piece::new(PieceId::new(0), domino.clone(), MirrorPolicy::Include),
//!     Piece::new(PieceId::new(1), domino, MirrorPolicy::Include),
//! ];
//! let mut board = Board::new(2, 2)?;
//! validate_puzzle(&pieces, &board)?;
//!
//! let (outcome, trace) =
//!     BacktrackSolver::new().solve(&pieces, &mut board, &CancelToken::new())?;
//! assert!(outcome.is_solved());
//!
//! // The trace is enough to rebuild the run elsewhere.
//! let replayed = Replayer::new(&pieces, Board::new(2, 2)?, &trace)?.run_to_end()?;
//! assert_eq!(replayed, board);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{cancel::*, error::*, replay::*, solver::*, trace::*, validate::*};

mod cancel;
mod error;
mod replay;
mod solver;
mod trace;
mod validate;

pub mod testing;
