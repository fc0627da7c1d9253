//! Step-by-step reconstruction of a recorded search.

use tilework_core::{Board, CellBuf, Piece};

use crate::{EventKind, ReplayError, SearchEvent, Trace};

/// Replays a [`Trace`] event by event on a fresh board.
///
/// Replay applies the recorded placements and removals in sequence order,
/// passing through the same placement checks the original search used. After
/// applying any prefix of the trace, the board's occupancy equals the
/// occupancy the original board had at that point of the run; after applying
/// the whole trace it equals the board the search ended with.
///
/// The board must have the trace's dimensions and carry no pieces. Blocked
/// cells are fine, and must match the original board for the replay to stay
/// truthful.
///
/// # Examples
///
/// ```
/// use tilework_core::{Board, MirrorPolicy, Piece, PieceId, Shape};
/// use tilework_solver::{BacktrackSolver, CancelToken, Replayer};
///
/// let domino: Shape = "##".parse()?;
/// let pieces = vec![
///     Piece::new(PieceId::new(0), domino.clone(), MirrorPolicy::Include),
///     Piece::new(PieceId::new(1), domino, MirrorPolicy::Include),
/// ];
/// let mut live = Board::new(2, 2)?;
/// let (_outcome, trace) =
///     BacktrackSolver::new().solve(&pieces, &mut live, &CancelToken::new())?;
///
/// let replayed = Replayer::new(&pieces, Board::new(2, 2)?, &trace)?.run_to_end()?;
/// assert_eq!(replayed, live);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Replayer<'a> {
    pieces: &'a [Piece],
    trace: &'a Trace,
    board: Board,
    cursor: usize,
}

impl<'a> Replayer<'a> {
    /// Creates a replayer positioned before the first event.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::DimensionMismatch`] if the board does not have
    /// the dimensions the trace was recorded on, and
    /// [`ReplayError::BoardNotEmpty`] if any piece is already placed on it.
    pub fn new(pieces: &'a [Piece], board: Board, trace: &'a Trace) -> Result<Self, ReplayError> {
        if board.width() != trace.board_width() || board.height() != trace.board_height() {
            return Err(ReplayError::DimensionMismatch {
                trace_width: trace.board_width(),
                trace_height: trace.board_height(),
                board_width: board.width(),
                board_height: board.height(),
            });
        }
        if !board.is_empty() {
            return Err(ReplayError::BoardNotEmpty);
        }
        Ok(Self {
            pieces,
            trace,
            board,
            cursor: 0,
        })
    }

    /// Returns the board in its current replay state.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the number of events applied so far.
    #[must_use]
    pub fn applied(&self) -> usize {
        self.cursor
    }

    /// Returns the number of events not yet applied.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.trace.len() - self.cursor
    }

    /// Returns `true` once every event has been applied.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cursor == self.trace.len()
    }

    /// Applies the next event and returns it, or `None` at the end.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be applied to this board with
    /// these pieces; see [`ReplayError`]. The failing event is not applied
    /// and the replayer does not advance past it.
    pub fn step(&mut self) -> Result<Option<SearchEvent>, ReplayError> {
        let Some(&event) = self.trace.events().get(self.cursor) else {
            return Ok(None);
        };
        let piece = self
            .pieces
            .iter()
            .find(|piece| piece.id() == event.piece)
            .ok_or(ReplayError::UnknownPiece {
                seq: event.seq,
                piece: event.piece,
            })?;
        let shape =
            piece
                .orientation(event.orientation)
                .ok_or(ReplayError::UnknownOrientation {
                    seq: event.seq,
                    piece: event.piece,
                    orientation: event.orientation,
                    available: piece.orientations().len(),
                })?;

        match event.kind {
            EventKind::Place => {
                if !self.board.can_place(shape, event.anchor) {
                    return Err(ReplayError::PlacementBlocked {
                        seq: event.seq,
                        piece: event.piece,
                    });
                }
                let _ = self.board.place(shape, event.anchor, event.piece);
            }
            EventKind::Remove => {
                let covered: CellBuf = shape
                    .cells()
                    .iter()
                    .map(|&cell| event.anchor + cell)
                    .collect();
                let owned = covered
                    .iter()
                    .all(|&cell| self.board.owner(cell) == Some(event.piece));
                if !owned {
                    return Err(ReplayError::RemovalMismatch {
                        seq: event.seq,
                        piece: event.piece,
                    });
                }
                self.board.remove(&covered);
            }
        }
        self.cursor += 1;
        Ok(Some(event))
    }

    /// Applies every remaining event and returns the final board.
    ///
    /// # Errors
    ///
    /// Returns the first error [`Replayer::step`] encounters.
    pub fn run_to_end(mut self) -> Result<Board, ReplayError> {
        while self.step()?.is_some() {}
        Ok(self.board)
    }
}

#[cfg(test)]
mod tests {
    use tilework_core::{Cell, MirrorPolicy, PieceId, Shape};

    use super::*;
    use crate::{BacktrackSolver, CancelToken, Outcome};

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

    fn solve(pieces: &[Piece], mut board: Board) -> (Outcome, Trace, Board) {
        let (outcome, trace) = BacktrackSolver::new()
            .solve(pieces, &mut board, &CancelToken::new())
            .unwrap();
        (outcome, trace, board)
    }

    fn place_event(piece: u32, orientation: usize, anchor: Cell, seq: usize) -> SearchEvent {
        SearchEvent {
            kind: EventKind::Place,
            piece: PieceId::new(piece),
            orientation,
            anchor,
            seq,
        }
    }

    #[test]
    fn replay_reproduces_a_solved_board() {
        let pieces = pieces(&["##", "##"]);
        let (outcome, trace, live) = solve(&pieces, Board::new(2, 2).unwrap());
        assert_eq!(outcome, Outcome::Solved);

        let replayed = Replayer::new(&pieces, Board::new(2, 2).unwrap(), &trace)
            .unwrap()
            .run_to_end()
            .unwrap();
        assert_eq!(replayed, live);
        assert!(replayed.is_full());
    }

    #[test]
    fn replay_walks_through_removals_too() {
        // An exhausted run records every backtrack; replaying it ends on the
        // same empty board the search left behind.
        let pieces = pieces(&["##", "##"]);
        let (outcome, trace, live) = solve(&pieces, Board::new(3, 1).unwrap());
        assert_eq!(outcome, Outcome::Exhausted);
        assert!(trace.removals() > 0);

        let replayed = Replayer::new(&pieces, Board::new(3, 1).unwrap(), &trace)
            .unwrap()
            .run_to_end()
            .unwrap();
        assert_eq!(replayed, live);
        assert!(replayed.is_empty());
    }

    #[test]
    fn stepping_tracks_progress_and_occupancy() {
        let pieces = pieces(&["##", "##"]);
        let (_outcome, trace, _live) = solve(&pieces, Board::new(2, 2).unwrap());

        let mut replayer = Replayer::new(&pieces, Board::new(2, 2).unwrap(), &trace).unwrap();
        assert_eq!(replayer.applied(), 0);
        assert_eq!(replayer.remaining(), trace.len());
        assert!(!replayer.is_finished());

        let first = replayer.step().unwrap().unwrap();
        assert_eq!(first, trace.events()[0]);
        assert_eq!(replayer.board().occupied_count(), 2);
        assert_eq!(replayer.applied(), 1);

        while replayer.step().unwrap().is_some() {}
        assert!(replayer.is_finished());
        assert_eq!(replayer.remaining(), 0);
        assert!(replayer.board().is_full());
        assert_eq!(replayer.step().unwrap(), None);
    }

    #[test]
    fn replay_keeps_blocked_boards_truthful() {
        let pieces = pieces(&["##\n#."]);
        let blocked = || Board::with_blocked(2, 2, [Cell::new(1, 1)]).unwrap();
        let (outcome, trace, live) = solve(&pieces, blocked());
        assert_eq!(outcome, Outcome::Solved);

        let replayed = Replayer::new(&pieces, blocked(), &trace)
            .unwrap()
            .run_to_end()
            .unwrap();
        assert_eq!(replayed, live);
    }

    #[test]
    fn board_dimensions_must_match_the_trace() {
        let pieces = pieces(&["##", "##"]);
        let (_outcome, trace, _live) = solve(&pieces, Board::new(2, 2).unwrap());

        let result = Replayer::new(&pieces, Board::new(3, 2).unwrap(), &trace);
        assert_eq!(
            result.unwrap_err(),
            ReplayError::DimensionMismatch {
                trace_width: 2,
                trace_height: 2,
                board_width: 3,
                board_height: 2,
            }
        );
    }

    #[test]
    fn replay_board_must_carry_no_pieces() {
        let pieces = pieces(&["##", "##"]);
        let (_outcome, trace, _live) = solve(&pieces, Board::new(2, 2).unwrap());

        let mut dirty = Board::new(2, 2).unwrap();
        let _ = dirty.place(pieces[0].base(), Cell::new(0, 0), pieces[0].id());
        let result = Replayer::new(&pieces, dirty, &trace);
        assert_eq!(result.unwrap_err(), ReplayError::BoardNotEmpty);
    }

    #[test]
    fn unknown_pieces_and_orientations_are_rejected() {
        let known = pieces(&["##"]);
        let trace = Trace::from_run(
            vec![place_event(9, 0, Cell::new(0, 0), 0)],
            Outcome::Stopped,
            2,
            2,
        );
        let mut replayer = Replayer::new(&known, Board::new(2, 2).unwrap(), &trace).unwrap();
        assert_eq!(
            replayer.step().unwrap_err(),
            ReplayError::UnknownPiece {
                seq: 0,
                piece: PieceId::new(9)
            }
        );

        let trace = Trace::from_run(
            vec![place_event(0, 5, Cell::new(0, 0), 0)],
            Outcome::Stopped,
            2,
            2,
        );
        let mut replayer = Replayer::new(&known, Board::new(2, 2).unwrap(), &trace).unwrap();
        assert_eq!(
            replayer.step().unwrap_err(),
            ReplayError::UnknownOrientation {
                seq: 0,
                piece: PieceId::new(0),
                orientation: 5,
                available: 2,
            }
        );
    }

    #[test]
    fn inconsistent_events_do_not_advance_the_replayer() {
        let known = pieces(&["##"]);

        // Placing the same piece twice on the same cells cannot work.
        let trace = Trace::from_run(
            vec![
                place_event(0, 0, Cell::new(0, 0), 0),
                place_event(0, 0, Cell::new(0, 0), 1),
            ],
            Outcome::Stopped,
            2,
            2,
        );
        let mut replayer = Replayer::new(&known, Board::new(2, 2).unwrap(), &trace).unwrap();
        assert!(replayer.step().is_ok());
        assert_eq!(
            replayer.step().unwrap_err(),
            ReplayError::PlacementBlocked {
                seq: 1,
                piece: PieceId::new(0)
            }
        );
        assert_eq!(replayer.applied(), 1);

        // Removing a piece that was never placed cannot work either.
        let trace = Trace::from_run(
            vec![SearchEvent {
                kind: EventKind::Remove,
                piece: PieceId::new(0),
                orientation: 0,
                anchor: Cell::new(0, 0),
                seq: 0,
            }],
            Outcome::Stopped,
            2,
            2,
        );
        let mut replayer = Replayer::new(&known, Board::new(2, 2).unwrap(), &trace).unwrap();
        assert_eq!(
            replayer.step().unwrap_err(),
            ReplayError::RemovalMismatch {
                seq: 0,
                piece: PieceId::new(0)
            }
        );
    }
}
