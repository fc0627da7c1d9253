//! Pieces: identified shapes with precomputed orientations.

use crate::shape::{MirrorPolicy, Shape};

/// Identifies a piece within a puzzle.
///
/// Identifiers carry no meaning beyond equality; pieces with equal shapes but
/// different identifiers are distinct pieces.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
#[display("{_0}")]
pub struct PieceId(u32);

impl PieceId {
    /// Creates a piece identifier.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// A placeable piece: an identifier plus the orientations of its shape.
///
/// The distinct orientations are enumerated once at construction, in the
/// order described by [`Shape::orientations`], and indexed from zero. Index 0
/// is always the shape the piece was built from.
///
/// # Examples
///
/// ```
/// use tilework_core::{MirrorPolicy, Piece, PieceId, Shape};
///
/// let shape: Shape = "##\n#.".parse()?;
/// let piece = Piece::new(PieceId::new(7), shape.clone(), MirrorPolicy::Include);
/// assert_eq!(piece.base(), &shape);
/// assert_eq!(piece.orientations().len(), 4);
/// assert_eq!(piece.area(), 3);
/// # Ok::<(), tilework_core::ParseShapeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    orientations: Vec<Shape>,
}

impl Piece {
    /// Creates a piece, precomputing the orientations of its shape under the
    /// given mirror policy.
    #[must_use]
    pub fn new(id: PieceId, shape: Shape, mirrors: MirrorPolicy) -> Self {
        let orientations = shape.orientations(mirrors);
        Self { id, orientations }
    }

    /// Returns the piece identifier.
    #[must_use]
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Returns the shape the piece was built from.
    #[must_use]
    pub fn base(&self) -> &Shape {
        &self.orientations[0]
    }

    /// Returns the distinct orientations of the piece in enumeration order.
    #[must_use]
    pub fn orientations(&self) -> &[Shape] {
        &self.orientations
    }

    /// Returns the orientation at `index`, or `None` past the end.
    #[must_use]
    pub fn orientation(&self, index: usize) -> Option<&Shape> {
        self.orientations.get(index)
    }

    /// Returns the number of cells the piece covers.
    #[must_use]
    pub fn area(&self) -> usize {
        self.base().area()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_compare_by_value() {
        assert_eq!(PieceId::new(3), PieceId::new(3));
        assert_ne!(PieceId::new(3), PieceId::new(4));
        assert!(PieceId::new(3) < PieceId::new(10));
        assert_eq!(PieceId::new(12).to_string(), "12");
    }

    #[test]
    fn orientations_are_precomputed_in_order() {
        let skew: Shape = ".##\n##.".parse().unwrap();
        let piece = Piece::new(PieceId::new(0), skew.clone(), MirrorPolicy::Include);
        assert_eq!(piece.orientations(), skew.orientations(MirrorPolicy::Include));
        assert_eq!(piece.orientation(0), Some(&skew));
        assert_eq!(piece.orientation(piece.orientations().len()), None);
    }

    #[test]
    fn mirror_policy_changes_the_enumeration() {
        let skew: Shape = ".##\n##.".parse().unwrap();
        let chiral = Piece::new(PieceId::new(0), skew.clone(), MirrorPolicy::Include);
        let rotations_only = Piece::new(PieceId::new(1), skew, MirrorPolicy::Exclude);
        assert_eq!(chiral.orientations().len(), 4);
        assert_eq!(rotations_only.orientations().len(), 2);
    }

    #[test]
    fn area_comes_from_the_base_shape() {
        let t: Shape = "###\n.#.".parse().unwrap();
        let piece = Piece::new(PieceId::new(2), t, MirrorPolicy::Include);
        assert_eq!(piece.area(), 4);
    }
}
