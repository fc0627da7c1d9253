//! Exhaustive backtracking over piece placements.

use tilework_core::{Board, Cell, Piece, PieceId};

use crate::{CancelToken, ConfigError, EventKind, SearchEvent, Trace};

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum Outcome {
    /// Every piece was placed and the board is completely covered.
    #[display("solved")]
    Solved,
    /// The whole candidate space was visited without finding a solution.
    #[display("exhausted")]
    Exhausted,
    /// The cancellation token was set before the traversal finished.
    #[display("stopped")]
    Stopped,
}

/// An exhaustive, deterministic backtracking search over piece placements.
///
/// The search tries pieces in input order. For the current piece it tries
/// every orientation in the piece's enumeration order, and for each
/// orientation every board anchor in row-major order. Each successful
/// placement recurses to the next piece; when a subtree yields nothing, the
/// placement is taken back and the next candidate is tried. Two runs over the
/// same input therefore visit the same candidates in the same order and
/// record identical traces.
///
/// A run counts as solved only when every piece is placed *and* the board is
/// completely covered; placing all pieces while leaving holes is a dead end
/// and is backtracked like any other. Blocked cells count as covered, so
/// boards with holes by construction can still be solved.
///
/// Every placement and removal is appended to a [`Trace`], which is returned
/// alongside the outcome regardless of how the run ended.
///
/// # Cancellation
///
/// The token is checked before each placement attempt and again after each
/// recorded event. Once it is set the search unwinds without touching the
/// board further, so a stopped run leaves the board in whatever partially
/// filled state the trace describes.
///
/// # Examples
///
/// ```
/// use tilework_core::{Board, MirrorPolicy, Piece, PieceId, Shape};
/// use tilework_solver::{BacktrackSolver, CancelToken};
///
/// let domino: Shape = "##".parse()?;
/// let pieces = vec![
///     Piece::new(PieceId::new(0), domino.clone(), MirrorPolicy::Include),
///     Piece::new(PieceId::new(1), domino, MirrorPolicy::Include),
/// ];
/// let mut board = Board::new(2, 2)?;
///
/// let (outcome, trace) =
///     BacktrackSolver::new().solve(&pieces, &mut board, &CancelToken::new())?;
/// assert!(outcome.is_solved());
/// assert!(board.is_full());
/// assert_eq!(trace.placements() - trace.removals(), pieces.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// A token that is already cancelled stops the run before the first attempt:
///
/// ```
/// use tilework_core::{Board, MirrorPolicy, Piece, PieceId, Shape};
/// use tilework_solver::{BacktrackSolver, CancelToken};
///
/// let shape: Shape = "#".parse()?;
/// let pieces = vec![Piece::new(PieceId::new(0), shape, MirrorPolicy::Include)];
/// let mut board = Board::new(1, 1)?;
///
/// let cancel = CancelToken::new();
/// cancel.cancel();
/// let (outcome, trace) = BacktrackSolver::new().solve(&pieces, &mut board, &cancel)?;
/// assert!(outcome.is_stopped());
/// assert!(trace.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackSolver;

impl BacktrackSolver {
    /// Creates a solver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Runs the search to completion, cancellation, or exhaustion.
    ///
    /// The board is mutated in place. A solved run leaves the solution on the
    /// board, an exhausted run restores the board to its starting state, and
    /// a stopped run leaves whatever was placed when the token was noticed.
    ///
    /// # Returns
    ///
    /// The outcome of the run and the trace of every placement and removal,
    /// in order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPieces`] for an empty piece list and
    /// [`ConfigError::NoOrientations`] if a piece has no orientations to try.
    pub fn solve(
        &self,
        pieces: &[Piece],
        board: &mut Board,
        cancel: &CancelToken,
    ) -> Result<(Outcome, Trace), ConfigError> {
        self.solve_with_observer(pieces, board, cancel, |_| ())
    }

    /// Runs the search, invoking `observer` after each recorded event.
    ///
    /// The observer sees every event exactly once, in trace order, as it
    /// happens. Cancelling the search token from inside the observer stops
    /// the run at that event, which is the supported way to bound a run by
    /// event count.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPieces`] for an empty piece list and
    /// [`ConfigError::NoOrientations`] if a piece has no orientations to try.
    pub fn solve_with_observer<F>(
        &self,
        pieces: &[Piece],
        board: &mut Board,
        cancel: &CancelToken,
        observer: F,
    ) -> Result<(Outcome, Trace), ConfigError>
    where
        F: FnMut(SearchEvent),
    {
        if pieces.is_empty() {
            return Err(ConfigError::NoPieces);
        }
        if let Some(piece) = pieces.iter().find(|piece| piece.orientations().is_empty()) {
            return Err(ConfigError::NoOrientations { piece: piece.id() });
        }

        let search = Search {
            pieces,
            board,
            cancel,
            observer,
            events: Vec::new(),
        };
        Ok(search.run())
    }
}

/// Control flow of one subtree of the search.
enum Flow {
    Solved,
    DeadEnd,
    Stopped,
}

struct Search<'a, F> {
    pieces: &'a [Piece],
    board: &'a mut Board,
    cancel: &'a CancelToken,
    observer: F,
    events: Vec<SearchEvent>,
}

impl<F> Search<'_, F>
where
    F: FnMut(SearchEvent),
{
    fn run(mut self) -> (Outcome, Trace) {
        let outcome = match self.place_from(0) {
            Flow::Solved => Outcome::Solved,
            Flow::DeadEnd => Outcome::Exhausted,
            Flow::Stopped => Outcome::Stopped,
        };
        let trace = Trace::from_run(
            self.events,
            outcome,
            self.board.width(),
            self.board.height(),
        );
        (outcome, trace)
    }

    fn place_from(&mut self, depth: usize) -> Flow {
        if depth == self.pieces.len() {
            // All pieces are down; holes mean this branch is still a failure.
            return if self.board.is_full() {
                Flow::Solved
            } else {
                Flow::DeadEnd
            };
        }

        let piece = &self.pieces[depth];
        for (orientation, shape) in piece.orientations().iter().enumerate() {
            for anchor in self.board.positions() {
                if self.cancel.is_cancelled() {
                    return Flow::Stopped;
                }
                if !self.board.can_place(shape, anchor) {
                    continue;
                }

                let covered = self.board.place(shape, anchor, piece.id());
                if self.emit(EventKind::Place, piece.id(), orientation, anchor) {
                    return Flow::Stopped;
                }

                match self.place_from(depth + 1) {
                    Flow::Solved => return Flow::Solved,
                    Flow::Stopped => return Flow::Stopped,
                    Flow::DeadEnd => {
                        self.board.remove(&covered);
                        if self.emit(EventKind::Remove, piece.id(), orientation, anchor) {
                            return Flow::Stopped;
                        }
                    }
                }
            }
        }
        Flow::DeadEnd
    }

    /// Records and publishes one event. Returns `true` if the run should
    /// stop, checking the token after the observer had a chance to set it.
    fn emit(&mut self, kind: EventKind, piece: PieceId, orientation: usize, anchor: Cell) -> bool {
        let event = SearchEvent {
            kind,
            piece,
            orientation,
            anchor,
            seq: self.events.len(),
        };
        self.events.push(event);
        (self.observer)(event);
        self.cancel.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use tilework_core::{MirrorPolicy, Shape};

    use super::*;

    fn pieces(drawings: &[&str]) -> Vec<Piece> {
        drawings
            .iter()
            .enumerate()
            .map(|(index, drawing)| {
                let shape: Shape = drawing.parse().unwrap();
                Piece::new(
                    PieceId::new(u32::try_from(index).unwrap()),
                    shape,
                    MirrorPolicy::Include,
                )
            })
            .collect()
    }

    fn solve(drawings: &[&str], board: &mut Board) -> (Outcome, Trace) {
        BacktrackSolver::new()
            .solve(&pieces(drawings), board, &CancelToken::new())
            .unwrap()
    }

    #[test]
    fn test_solves_two_dominoes_on_2x2() {
        let mut board = Board::new(2, 2).unwrap();
        let (outcome, trace) = solve(&["##", "##"], &mut board);

        assert_eq!(outcome, Outcome::Solved);
        assert!(board.is_full());

        // The first fit wins at every level, so the whole run is two
        // placements with no backtracking.
        let expected = [
            SearchEvent {
                kind: EventKind::Place,
                piece: PieceId::new(0),
                orientation: 0,
                anchor: Cell::new(0, 0),
                seq: 0,
            },
            SearchEvent {
                kind: EventKind::Place,
                piece: PieceId::new(1),
                orientation: 0,
                anchor: Cell::new(1, 0),
                seq: 1,
            },
        ];
        assert_eq!(trace.events(), expected);
    }

    #[test]
    fn test_full_board_with_missing_area_is_exhausted() {
        // A lone domino covers half the 2x2 board; every branch ends with
        // holes and must be taken back.
        let mut board = Board::new(2, 2).unwrap();
        let (outcome, trace) = solve(&["##"], &mut board);

        assert_eq!(outcome, Outcome::Exhausted);
        assert!(board.is_empty());
        assert_eq!(trace.placements(), trace.removals());
        assert!(trace.placements() > 0);
    }

    #[test]
    fn test_tromino_on_2x2_is_exhausted() {
        let mut board = Board::new(2, 2).unwrap();
        let (outcome, trace) = solve(&["##\n#."], &mut board);

        assert_eq!(outcome, Outcome::Exhausted);
        assert!(board.is_empty());
        assert_eq!(trace.placements(), trace.removals());
    }

    #[test]
    fn test_piece_that_never_fits_leaves_an_empty_trace() {
        let mut board = Board::new(2, 2).unwrap();
        let (outcome, trace) = solve(&["###"], &mut board);

        assert_eq!(outcome, Outcome::Exhausted);
        assert!(trace.is_empty());
    }

    #[test]
    fn test_no_pieces_is_a_configuration_error() {
        let mut board = Board::new(2, 2).unwrap();
        let result = BacktrackSolver::new().solve(&[], &mut board, &CancelToken::new());
        assert_eq!(result.unwrap_err(), ConfigError::NoPieces);
    }

    #[test]
    fn test_blocked_cells_count_as_covered() {
        // One corner is blocked; the corner tromino fills the rest.
        let mut board = Board::with_blocked(2, 2, [Cell::new(1, 1)]).unwrap();
        let (outcome, _trace) = solve(&["##\n#."], &mut board);

        assert_eq!(outcome, Outcome::Solved);
        assert!(board.is_full());
        assert_eq!(board.owner(Cell::new(0, 0)), Some(PieceId::new(0)));
    }

    #[test]
    fn test_precancelled_token_stops_before_any_attempt() {
        let mut board = Board::new(2, 2).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();

        let (outcome, trace) = BacktrackSolver::new()
            .solve(&pieces(&["##", "##"]), &mut board, &cancel)
            .unwrap();

        assert_eq!(outcome, Outcome::Stopped);
        assert!(trace.is_empty());
        assert!(board.is_empty());
    }

    #[test]
    fn test_cancel_from_observer_stops_mid_search() {
        // Unsolvable: 2 + 2 cells can never cover the 3x1 board exactly.
        let full_run = {
            let mut board = Board::new(3, 1).unwrap();
            let (outcome, trace) = solve(&["##", "##"], &mut board);
            assert_eq!(outcome, Outcome::Exhausted);
            trace
        };
        assert!(full_run.len() > 3);

        let mut board = Board::new(3, 1).unwrap();
        let cancel = CancelToken::new();
        let observer_cancel = cancel.clone();
        let (outcome, trace) = BacktrackSolver::new()
            .solve_with_observer(&pieces(&["##", "##"]), &mut board, &cancel, |event| {
                if event.seq + 1 == 3 {
                    observer_cancel.cancel();
                }
            })
            .unwrap();

        assert_eq!(outcome, Outcome::Stopped);
        assert_eq!(trace.len(), 3);
        assert!(trace.len() < full_run.len());
        assert_eq!(trace.events(), &full_run.events()[..3]);

        // No rollback on stop: net placements stay on the board.
        let net = trace.placements() - trace.removals();
        assert_eq!(board.occupied_count(), net * 2);
    }

    #[test]
    fn test_cancel_mid_search_on_a_large_unsolvable_board() {
        // Four squares can never cover 10x10; exhausting this space would
        // take far too long, which is exactly what cancellation is for.
        let mut board = Board::new(10, 10).unwrap();
        let cancel = CancelToken::new();
        let observer_cancel = cancel.clone();

        let (outcome, trace) = BacktrackSolver::new()
            .solve_with_observer(
                &pieces(&["##\n##", "##\n##", "##\n##", "##\n##"]),
                &mut board,
                &cancel,
                |event| {
                    if event.seq + 1 == 50 {
                        observer_cancel.cancel();
                    }
                },
            )
            .unwrap();

        assert_eq!(outcome, Outcome::Stopped);
        assert_eq!(trace.len(), 50);
        assert!(!board.is_empty());
    }

    #[test]
    fn test_identical_runs_record_identical_traces() {
        let run = || {
            let mut board = Board::new(3, 2).unwrap();
            solve(&["##\n#.", "##", "#"], &mut board)
        };
        let (first_outcome, first_trace) = run();
        let (second_outcome, second_trace) = run();

        assert_eq!(first_outcome, second_outcome);
        assert_eq!(first_trace, second_trace);
    }

    #[test]
    fn test_trace_orientation_indices_are_valid() {
        let pieces = pieces(&["##\n#.", "##", "#"]);
        let mut board = Board::new(3, 2).unwrap();
        let (_outcome, trace) = BacktrackSolver::new()
            .solve(&pieces, &mut board, &CancelToken::new())
            .unwrap();

        for event in trace.events() {
            let piece = pieces
                .iter()
                .find(|piece| piece.id() == event.piece)
                .unwrap();
            assert!(event.orientation < piece.orientations().len());
        }
    }

    #[test]
    fn test_sequence_numbers_are_dense_from_zero() {
        let mut board = Board::new(2, 2).unwrap();
        let (_outcome, trace) = solve(&["##"], &mut board);

        for (index, event) in trace.events().iter().enumerate() {
            assert_eq!(event.seq, index);
        }
    }

    #[test]
    fn test_solver_stops_at_the_first_solution() {
        // A 2x4 board admits several domino tilings; the trace must end on
        // the first one in traversal order, with all pieces still placed.
        let mut board = Board::new(4, 2).unwrap();
        let (outcome, trace) = solve(&["##", "##", "##", "##"], &mut board);

        assert_eq!(outcome, Outcome::Solved);
        assert_eq!(trace.placements() - trace.removals(), 4);
        assert_eq!(trace.events().last().map(|event| event.kind), Some(EventKind::Place));
    }

    #[test]
    fn test_outcome_displays_lowercase() {
        assert_eq!(Outcome::Solved.to_string(), "solved");
        assert_eq!(Outcome::Exhausted.to_string(), "exhausted");
        assert_eq!(Outcome::Stopped.to_string(), "stopped");
    }
}
