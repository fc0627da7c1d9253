//! Append-only record of search activity.

use tilework_core::{Cell, PieceId};

use crate::Outcome;

/// What a [`SearchEvent`] did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum EventKind {
    /// A piece was placed.
    #[display("place")]
    Place,
    /// A placed piece was taken back.
    #[display("remove")]
    Remove,
}

/// One board mutation performed by the search.
///
/// Events carry everything needed to repeat the mutation: the piece, the
/// index into its orientation list, and the anchor the orientation was placed
/// at. The sequence number is the event's position in the trace, starting
/// from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("{seq}: {kind} piece {piece} orientation {orientation} at {anchor}")]
pub struct SearchEvent {
    /// Whether the piece was placed or removed.
    pub kind: EventKind,
    /// The piece that moved.
    pub piece: PieceId,
    /// Index into the piece's orientation list.
    pub orientation: usize,
    /// Board cell the orientation's origin was placed at.
    pub anchor: Cell,
    /// Position of this event in the trace.
    pub seq: usize,
}

/// Aggregate counters over a [`Trace`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    placements: usize,
    removals: usize,
}

impl SearchStats {
    /// Number of placement events.
    #[must_use]
    pub const fn placements(self) -> usize {
        self.placements
    }

    /// Number of removal events.
    #[must_use]
    pub const fn removals(self) -> usize {
        self.removals
    }

    /// Number of backtracks. Every removal is one backtrack.
    #[must_use]
    pub const fn backtracks(self) -> usize {
        self.removals
    }

    /// Total number of events.
    #[must_use]
    pub const fn total_events(self) -> usize {
        self.placements + self.removals
    }
}

/// The complete, ordered record of one search run.
///
/// A trace lists every placement and removal the search performed, in the
/// order it performed them, together with the outcome the run ended with and
/// the dimensions of the board it ran on. Replaying the events in order on an
/// equally-sized empty board reproduces every intermediate occupancy state of
/// the original run; see [`Replayer`](crate::Replayer).
///
/// Traces are immutable. A stopped run yields a valid trace that simply ends
/// early.
///
/// # Examples
///
/// ```
/// use tilework_core::{Board, MirrorPolicy, Piece, PieceId, Shape};
/// use tilework_solver::{BacktrackSolver, CancelToken};
///
/// let shape: Shape = "##".parse()?;
/// let pieces = vec![Piece::new(PieceId::new(0), shape, MirrorPolicy::Include)];
/// let mut board = Board::new(2, 1)?;
///
/// let (outcome, trace) =
///     BacktrackSolver::new().solve(&pieces, &mut board, &CancelToken::new())?;
/// assert!(outcome.is_solved());
/// assert_eq!(trace.placements(), 1);
/// assert_eq!(trace.removals(), 0);
/// assert_eq!(trace.events()[0].seq, 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    events: Vec<SearchEvent>,
    placements: usize,
    removals: usize,
    outcome: Outcome,
    board_width: usize,
    board_height: usize,
}

impl Trace {
    pub(crate) fn from_run(
        events: Vec<SearchEvent>,
        outcome: Outcome,
        board_width: usize,
        board_height: usize,
    ) -> Self {
        let placements = events.iter().filter(|event| event.kind.is_place()).count();
        let removals = events.len() - placements;
        Self {
            events,
            placements,
            removals,
            outcome,
            board_width,
            board_height,
        }
    }

    /// Returns all events in the order they were recorded.
    #[must_use]
    pub fn events(&self) -> &[SearchEvent] {
        &self.events
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if the search recorded no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the number of placement events.
    #[must_use]
    pub fn placements(&self) -> usize {
        self.placements
    }

    /// Returns the number of removal events.
    #[must_use]
    pub fn removals(&self) -> usize {
        self.removals
    }

    /// Returns the number of backtracks the search performed.
    #[must_use]
    pub fn backtracks(&self) -> usize {
        self.removals
    }

    /// Returns the aggregate counters as one value.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            placements: self.placements,
            removals: self.removals,
        }
    }

    /// Returns the outcome the run ended with.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the width of the board the trace was recorded on.
    #[must_use]
    pub fn board_width(&self) -> usize {
        self.board_width
    }

    /// Returns the height of the board the trace was recorded on.
    #[must_use]
    pub fn board_height(&self) -> usize {
        self.board_height
    }
}
