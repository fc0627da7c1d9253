//! Error types for puzzle validation and trace replay.

use tilework_core::PieceId;

/// An error detected before a search starts.
///
/// Configuration errors describe puzzles that can never be solved as given,
/// as opposed to puzzles the search merely fails to solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    /// The piece list was empty.
    #[display("no pieces to place")]
    NoPieces,
    /// A piece carried an empty orientation list.
    #[display("piece {piece} has no orientations")]
    NoOrientations {
        /// The piece without orientations.
        piece: PieceId,
    },
    /// Two pieces shared an identifier.
    #[display("duplicate piece id {piece}")]
    DuplicatePieceId {
        /// The identifier that appeared more than once.
        piece: PieceId,
    },
    /// The pieces cannot exactly cover the available board area.
    #[display("piece area {pieces_area} does not match available board area {board_area}")]
    AreaMismatch {
        /// Total cell count over all pieces.
        pieces_area: usize,
        /// Board cells available for placement, blocked cells excluded.
        board_area: usize,
    },
}

/// An error from replaying a trace on a board.
///
/// Replay errors indicate that the trace and the replay inputs do not belong
/// together; a trace replayed against the pieces and board dimensions it was
/// recorded with never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ReplayError {
    /// The replay board has different dimensions than the recorded one.
    #[display(
        "trace was recorded on a {trace_width}x{trace_height} board, \
         replaying on {board_width}x{board_height}"
    )]
    DimensionMismatch {
        /// Width of the board the trace was recorded on.
        trace_width: usize,
        /// Height of the board the trace was recorded on.
        trace_height: usize,
        /// Width of the board given for replay.
        board_width: usize,
        /// Height of the board given for replay.
        board_height: usize,
    },
    /// The replay board already had pieces on it.
    #[display("replay board already has pieces on it")]
    BoardNotEmpty,
    /// An event named a piece that is not in the replay piece list.
    #[display("event {seq} refers to unknown piece {piece}")]
    UnknownPiece {
        /// Sequence number of the failing event.
        seq: usize,
        /// The unknown piece.
        piece: PieceId,
    },
    /// An event named an orientation index the piece does not have.
    #[display(
        "event {seq} refers to orientation {orientation} of piece {piece}, \
         which has {available}"
    )]
    UnknownOrientation {
        /// Sequence number of the failing event.
        seq: usize,
        /// The piece the event refers to.
        piece: PieceId,
        /// The requested orientation index.
        orientation: usize,
        /// How many orientations the piece actually has.
        available: usize,
    },
    /// A recorded placement does not fit the replay board.
    #[display("event {seq} tries to place piece {piece} on occupied or out-of-bounds cells")]
    PlacementBlocked {
        /// Sequence number of the failing event.
        seq: usize,
        /// The piece that failed to place.
        piece: PieceId,
    },
    /// A recorded removal does not match the replay board occupancy.
    #[display("event {seq} removes cells not covered by piece {piece}")]
    RemovalMismatch {
        /// Sequence number of the failing event.
        seq: usize,
        /// The piece that failed to remove.
        piece: PieceId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_piece() {
        let error = ConfigError::DuplicatePieceId {
            piece: PieceId::new(3),
        };
        assert_eq!(error.to_string(), "duplicate piece id 3");

        let error = ConfigError::AreaMismatch {
            pieces_area: 12,
            board_area: 16,
        };
        assert_eq!(
            error.to_string(),
            "piece area 12 does not match available board area 16"
        );
    }

    #[test]
    fn replay_messages_carry_the_sequence_number() {
        let error = ReplayError::UnknownPiece {
            seq: 5,
            piece: PieceId::new(9),
        };
        assert_eq!(error.to_string(), "event 5 refers to unknown piece 9");
    }
}
