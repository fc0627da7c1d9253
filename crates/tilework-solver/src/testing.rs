//! Test utilities for placement searches.
//!
//! This module provides [`SolveTester`], a testing harness for setting up a
//! board and pieces from drawings, running the search, and asserting on the
//! result.
//!
//! # Example
//!
//! ```
//! use tilework_solver::testing::SolveTester;
//!
//! SolveTester::on_board(2, 2)
//!     .piece("##")
//!     .piece("##")
//!     .solve()
//!     .assert_solved()
//!     .assert_board_full()
//!     .assert_replay_matches();
//! ```

use std::collections::BTreeMap;

use tilework_core::{Board, Cell, MirrorPolicy, Piece, PieceId, Shape};

use crate::{BacktrackSolver, CancelToken, EventKind, Outcome, Replayer, SearchEvent, Trace};

/// A test harness for running placement searches from drawings.
///
/// `SolveTester` builds a board and a piece list, runs the backtracking
/// search, and hands the result to [`SolveRun`] for assertions. Pieces get
/// identifiers `0, 1, 2, ...` in the order they are added.
///
/// # Method Chaining
///
/// All methods return `self`, enabling fluent method chaining for readable
/// tests.
///
/// # Panics
///
/// Setup methods panic on invalid drawings or dimensions, and assertion
/// methods panic with detailed messages on failure, using `#[track_caller]`
/// to report the correct source location.
#[derive(Debug)]
pub struct SolveTester {
    board: Board,
    pieces: Vec<Piece>,
}

impl SolveTester {
    /// Creates a tester with an empty board of the given dimensions.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions are out of range for [`Board::new`].
    #[track_caller]
    #[must_use]
    pub fn on_board(width: usize, height: usize) -> Self {
        let board = Board::new(width, height).unwrap();
        Self {
            board,
            pieces: Vec::new(),
        }
    }

    /// Replaces the board with one whose blocked cells are exactly `blocked`.
    ///
    /// # Panics
    ///
    /// Panics if a blocked cell is outside the board.
    #[track_caller]
    #[must_use]
    pub fn with_blocked(self, blocked: impl IntoIterator<Item = Cell>) -> Self {
        let board =
            Board::with_blocked(self.board.width(), self.board.height(), blocked).unwrap();
        Self { board, ..self }
    }

    /// Adds a piece from a shape drawing, mirrors included.
    ///
    /// The drawing format is the one accepted by [`Shape::from_str`]:
    /// `#` for filled cells, `.` or `_` for empty ones.
    ///
    /// # Panics
    ///
    /// Panics if the drawing does not parse as a shape.
    ///
    /// [`Shape::from_str`]: Shape#impl-FromStr-for-Shape
    #[track_caller]
    #[must_use]
    pub fn piece(self, drawing: &str) -> Self {
        self.piece_with(drawing, MirrorPolicy::Include)
    }

    /// Adds a piece from a shape drawing, rotations only.
    ///
    /// # Panics
    ///
    /// Panics if the drawing does not parse as a shape.
    #[track_caller]
    #[must_use]
    pub fn piece_without_mirrors(self, drawing: &str) -> Self {
        self.piece_with(drawing, MirrorPolicy::Exclude)
    }

    #[track_caller]
    fn piece_with(mut self, drawing: &str, mirrors: MirrorPolicy) -> Self {
        let shape: Shape = drawing.parse().unwrap();
        let id = PieceId::new(u32::try_from(self.pieces.len()).unwrap());
        self.pieces.push(Piece::new(id, shape, mirrors));
        self
    }

    /// Runs the search to its natural end.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is rejected by the solver.
    #[track_caller]
    #[must_use]
    pub fn solve(self) -> SolveRun {
        self.solve_with_observer(&CancelToken::new(), |_| ())
    }

    /// Runs the search with the given cancellation token.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is rejected by the solver.
    #[track_caller]
    #[must_use]
    pub fn solve_with_token(self, cancel: &CancelToken) -> SolveRun {
        self.solve_with_observer(cancel, |_| ())
    }

    /// Runs the search, invoking `observer` after each recorded event.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is rejected by the solver.
    #[track_caller]
    #[must_use]
    pub fn solve_with_observer<F>(self, cancel: &CancelToken, observer: F) -> SolveRun
    where
        F: FnMut(SearchEvent),
    {
        let Self { mut board, pieces } = self;
        let initial = board.clone();
        let (outcome, trace) = BacktrackSolver::new()
            .solve_with_observer(&pieces, &mut board, cancel, observer)
            .unwrap();
        SolveRun {
            pieces,
            initial,
            board,
            outcome,
            trace,
        }
    }
}

/// The result of a [`SolveTester`] run, ready for assertions.
#[derive(Debug)]
pub struct SolveRun {
    pieces: Vec<Piece>,
    initial: Board,
    board: Board,
    outcome: Outcome,
    trace: Trace,
}

impl SolveRun {
    /// Returns the outcome of the run.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the recorded trace.
    #[must_use]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Returns the board as the search left it.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Asserts that the run ended with the given outcome.
    #[track_caller]
    pub fn assert_outcome(self, expected: Outcome) -> Self {
        assert_eq!(
            self.outcome, expected,
            "expected outcome {expected}, got {} after {} events\n{}",
            self.outcome,
            self.trace.len(),
            self.board,
        );
        self
    }

    /// Asserts that the run found a solution.
    #[track_caller]
    pub fn assert_solved(self) -> Self {
        self.assert_outcome(Outcome::Solved)
    }

    /// Asserts that the run visited the whole space without a solution.
    #[track_caller]
    pub fn assert_exhausted(self) -> Self {
        self.assert_outcome(Outcome::Exhausted)
    }

    /// Asserts that the run was cancelled.
    #[track_caller]
    pub fn assert_stopped(self) -> Self {
        self.assert_outcome(Outcome::Stopped)
    }

    /// Asserts that every board cell is covered or blocked.
    #[track_caller]
    pub fn assert_board_full(self) -> Self {
        assert!(self.board.is_full(), "expected a full board, got\n{}", self.board);
        self
    }

    /// Asserts that no piece remains on the board.
    #[track_caller]
    pub fn assert_board_empty(self) -> Self {
        assert!(
            self.board.is_empty(),
            "expected an empty board, got\n{}",
            self.board
        );
        self
    }

    /// Asserts that the trace recorded exactly `expected` events.
    #[track_caller]
    pub fn assert_event_count(self, expected: usize) -> Self {
        assert_eq!(
            self.trace.len(),
            expected,
            "expected {expected} events, got {}",
            self.trace.len()
        );
        self
    }

    /// Asserts that replaying the trace reproduces the run.
    ///
    /// The trace is replayed step by step on a copy of the starting board.
    /// After every event the replay occupancy is compared against an
    /// independent cell-by-cell model of what the event stream implies, and
    /// after the last event the replayed board must equal the board the
    /// search left behind.
    #[track_caller]
    pub fn assert_replay_matches(self) -> Self {
        let mut replayer =
            Replayer::new(&self.pieces, self.initial.clone(), &self.trace).unwrap();
        let mut model: BTreeMap<Cell, PieceId> = BTreeMap::new();

        for expected in self.trace.events() {
            let stepped = replayer.step().unwrap().unwrap();
            assert_eq!(stepped, *expected);

            let piece = self
                .pieces
                .iter()
                .find(|piece| piece.id() == expected.piece)
                .unwrap();
            let shape = piece.orientation(expected.orientation).unwrap();
            for &cell in shape.cells() {
                let target = expected.anchor + cell;
                match expected.kind {
                    EventKind::Place => {
                        model.insert(target, expected.piece);
                    }
                    EventKind::Remove => {
                        model.remove(&target);
                    }
                }
            }

            for cell in replayer.board().positions() {
                assert_eq!(
                    replayer.board().owner(cell),
                    model.get(&cell).copied(),
                    "replay diverged at cell {cell} after event {}",
                    expected.seq
                );
            }
        }

        assert_eq!(replayer.step().unwrap(), None);
        assert_eq!(
            replayer.board(),
            &self.board,
            "replayed board differs from the board the search produced"
        );
        self
    }
}
