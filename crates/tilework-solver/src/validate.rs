//! Up-front checks that a puzzle is worth searching.

use tilework_core::{Board, Piece};

use crate::ConfigError;

/// Checks that a puzzle configuration could have a solution at all.
///
/// The search itself only rejects inputs it cannot traverse; this function
/// additionally rejects configurations that are provably unsolvable by
/// counting, so callers can fail fast instead of exhausting the search space.
/// Checks run in order: piece list non-empty, piece identifiers unique, then
/// total piece area equal to the board area available for placement (blocked
/// cells excluded).
///
/// # Examples
///
/// ```
/// use tilework_core::{Board, MirrorPolicy, Piece, PieceId, Shape};
/// use tilework_solver::{ConfigError, validate_puzzle};
///
/// let domino: Shape = "##".parse()?;
/// let pieces = vec![Piece::new(PieceId::new(0), domino, MirrorPolicy::Include)];
///
/// let board = Board::new(2, 1)?;
/// assert!(validate_puzzle(&pieces, &board).is_ok());
///
/// let too_big = Board::new(3, 3)?;
/// assert_eq!(
///     validate_puzzle(&pieces, &too_big),
///     Err(ConfigError::AreaMismatch {
///         pieces_area: 2,
///         board_area: 9,
///     })
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns the first failed check: [`ConfigError::NoPieces`],
/// [`ConfigError::DuplicatePieceId`], or [`ConfigError::AreaMismatch`].
pub fn validate_puzzle(pieces: &[Piece], board: &Board) -> Result<(), ConfigError> {
    if pieces.is_empty() {
        return Err(ConfigError::NoPieces);
    }
    for (index, piece) in pieces.iter().enumerate() {
        if pieces[..index]
            .iter()
            .any(|earlier| earlier.id() == piece.id())
        {
            return Err(ConfigError::DuplicatePieceId { piece: piece.id() });
        }
    }
    let pieces_area: usize = pieces.iter().map(Piece::area).sum();
    if pieces_area != board.available_area() {
        return Err(ConfigError::AreaMismatch {
            pieces_area,
            board_area: board.available_area(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tilework_core::{Cell, MirrorPolicy, PieceId, Shape};

    use super::*;

    fn piece(id: u32, drawing: &str) -> Piece {
        let shape: Shape = drawing.parse().unwrap();
        Piece::new(PieceId::new(id), shape, MirrorPolicy::Include)
    }

    #[test]
    fn accepts_an_exact_cover_configuration() {
        let board = Board::new(2, 2).unwrap();
        let pieces = [piece(0, "##"), piece(1, "##")];
        assert_eq!(validate_puzzle(&pieces, &board), Ok(()));
    }

    #[test]
    fn rejects_an_empty_piece_list() {
        let board = Board::new(2, 2).unwrap();
        assert_eq!(validate_puzzle(&[], &board), Err(ConfigError::NoPieces));
    }

    #[test]
    fn rejects_duplicate_identifiers() {
        let board = Board::new(2, 2).unwrap();
        let pieces = [piece(7, "##"), piece(7, "##")];
        assert_eq!(
            validate_puzzle(&pieces, &board),
            Err(ConfigError::DuplicatePieceId {
                piece: PieceId::new(7)
            })
        );
    }

    #[test]
    fn rejects_area_shortfall_and_excess() {
        let board = Board::new(2, 2).unwrap();
        assert_eq!(
            validate_puzzle(&[piece(0, "##")], &board),
            Err(ConfigError::AreaMismatch {
                pieces_area: 2,
                board_area: 4,
            })
        );
        assert_eq!(
            validate_puzzle(&[piece(0, "##"), piece(1, "###")], &board),
            Err(ConfigError::AreaMismatch {
                pieces_area: 5,
                board_area: 4,
            })
        );
    }

    #[test]
    fn blocked_cells_shrink_the_required_area() {
        let board = Board::with_blocked(2, 2, [Cell::new(1, 1)]).unwrap();
        assert_eq!(validate_puzzle(&[piece(0, "##\n#.")], &board), Ok(()));
    }
}
