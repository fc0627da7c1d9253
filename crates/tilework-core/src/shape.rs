//! Polyomino shapes and their symmetries.

use std::{
    fmt::{self, Write as _},
    str::FromStr,
};

use crate::cell::{Cell, CellBuf};

/// A polyomino: a non-empty, edge-connected set of unit cells.
///
/// Shapes are normalized on construction and after every transform: cells are
/// translated so the minimum row and minimum column are both zero, and stored
/// sorted in row-major order. Two shapes that differ only by translation are
/// therefore equal, while rotations and mirrors remain distinct.
///
/// Shapes can be parsed from a text drawing where `#` marks a filled cell and
/// `.` or `_` mark empty ones. Lines are trimmed and blank lines are skipped,
/// so drawings can be indented freely inside string literals.
///
/// # Examples
///
/// ```
/// use tilework_core::{Axis, MirrorPolicy, Rotation, Shape};
///
/// let tromino: Shape = "#.
///                       ###"
///     .parse()?;
/// assert_eq!(tromino.area(), 3);
/// assert_eq!(tromino.rotated(Rotation::R90).to_string(), "##\n#.");
/// assert_eq!(tromino.flipped(Axis::Horizontal).to_string(), ".#\n##");
///
/// // The corner tromino is its own mirror image, so only the four
/// // rotations survive deduplication.
/// assert_eq!(tromino.orientations(MirrorPolicy::Include).len(), 4);
/// # Ok::<(), tilework_core::ParseShapeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    cells: CellBuf,
}

impl Shape {
    /// Creates a shape from a set of cells.
    ///
    /// Duplicate cells collapse to one. The result is normalized so its
    /// minimum row and column are zero.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Empty`] if no cells are given and
    /// [`ShapeError::NotContiguous`] if the cells do not form a single
    /// edge-connected region. Diagonal contact does not connect cells.
    pub fn new(cells: impl IntoIterator<Item = Cell>) -> Result<Self, ShapeError> {
        let mut cells: CellBuf = cells.into_iter().collect();
        cells.sort_unstable();
        let mut unique = CellBuf::default();
        for cell in cells {
            if unique.last() != Some(&cell) {
                unique.push(cell);
            }
        }
        if unique.is_empty() {
            return Err(ShapeError::Empty);
        }
        if !is_connected(&unique) {
            return Err(ShapeError::NotContiguous);
        }
        Ok(Self::normalized(unique))
    }

    /// Translates sorted cells so the minimum row and column become zero.
    fn normalized(mut cells: CellBuf) -> Self {
        let min_row = cells.iter().map(|cell| cell.row).min().unwrap_or(0);
        let min_col = cells.iter().map(|cell| cell.col).min().unwrap_or(0);
        for cell in &mut cells[..] {
            cell.row -= min_row;
            cell.col -= min_col;
        }
        Self { cells }
    }

    fn transformed(&self, f: impl Fn(Cell) -> Cell) -> Self {
        let mut cells: CellBuf = self.cells.iter().map(|&cell| f(cell)).collect();
        cells.sort_unstable();
        Self::normalized(cells)
    }

    /// Returns the cells of the shape in row-major order.
    ///
    /// The minimum row and column over all cells are both zero.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the number of cells in the shape.
    #[must_use]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Returns the width of the bounding box.
    #[must_use]
    pub fn width(&self) -> usize {
        let max_col = self.cells.iter().map(|cell| cell.col).max().unwrap_or(-1);
        usize::try_from(max_col + 1).unwrap_or(0)
    }

    /// Returns the height of the bounding box.
    #[must_use]
    pub fn height(&self) -> usize {
        let max_row = self.cells.iter().map(|cell| cell.row).max().unwrap_or(-1);
        usize::try_from(max_row + 1).unwrap_or(0)
    }

    /// Returns `true` if the shape contains the cell.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.binary_search(&cell).is_ok()
    }

    /// Returns the shape rotated clockwise, renormalized to the origin.
    #[must_use]
    pub fn rotated(&self, rotation: Rotation) -> Self {
        match rotation {
            Rotation::R0 => self.clone(),
            Rotation::R90 => self.transformed(|cell| Cell::new(cell.col, -cell.row)),
            Rotation::R180 => self.transformed(|cell| Cell::new(-cell.row, -cell.col)),
            Rotation::R270 => self.transformed(|cell| Cell::new(-cell.col, cell.row)),
        }
    }

    /// Returns the shape rotated clockwise by an angle in degrees.
    ///
    /// The angle may be negative or beyond a full turn; `-90` rotates the
    /// same way as `270`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidRotation`] if the angle is not a multiple
    /// of 90 degrees.
    pub fn rotated_degrees(&self, degrees: i32) -> Result<Self, ShapeError> {
        Ok(self.rotated(Rotation::from_degrees(degrees)?))
    }

    /// Returns the shape mirrored across an axis, renormalized to the origin.
    #[must_use]
    pub fn flipped(&self, axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => self.transformed(|cell| Cell::new(cell.row, -cell.col)),
            Axis::Vertical => self.transformed(|cell| Cell::new(-cell.row, cell.col)),
        }
    }

    /// Enumerates the distinct orientations of the shape.
    ///
    /// Candidates are visited in a fixed order: each quarter turn starting
    /// from the unrotated shape, followed by its horizontal mirror when
    /// `mirrors` is [`MirrorPolicy::Include`]. The first occurrence of each
    /// distinct form wins, so the list has between 1 and 8 entries and its
    /// first entry is always the shape itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilework_core::{MirrorPolicy, Shape};
    ///
    /// let square: Shape = "##\n##".parse()?;
    /// assert_eq!(square.orientations(MirrorPolicy::Include).len(), 1);
    ///
    /// // The skew tetromino is chiral: excluding mirrors halves the set.
    /// let skew: Shape = ".##\n##.".parse()?;
    /// assert_eq!(skew.orientations(MirrorPolicy::Include).len(), 4);
    /// assert_eq!(skew.orientations(MirrorPolicy::Exclude).len(), 2);
    /// # Ok::<(), tilework_core::ParseShapeError>(())
    /// ```
    #[must_use]
    pub fn orientations(&self, mirrors: MirrorPolicy) -> Vec<Self> {
        let mut orientations = Vec::new();
        let mut rotated = self.clone();
        for _ in 0..4 {
            push_unique(&mut orientations, rotated.clone());
            if mirrors.is_include() {
                push_unique(&mut orientations, rotated.flipped(Axis::Horizontal));
            }
            rotated = rotated.rotated(Rotation::R90);
        }
        orientations
    }
}

impl FromStr for Shape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = CellBuf::default();
        let rows = s.lines().map(str::trim).filter(|line| !line.is_empty());
        for (row, line) in rows.enumerate() {
            for (col, character) in line.chars().enumerate() {
                match character {
                    '#' => cells.push(Cell::from_indices(row, col)),
                    '.' | '_' => {}
                    _ => return Err(ParseShapeError::UnexpectedCharacter { character }),
                }
            }
        }
        Ok(Self::new(cells)?)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height() {
            if row > 0 {
                f.write_char('\n')?;
            }
            for col in 0..self.width() {
                let filled = self.contains(Cell::from_indices(row, col));
                f.write_char(if filled { '#' } else { '.' })?;
            }
        }
        Ok(())
    }
}

fn push_unique(orientations: &mut Vec<Shape>, candidate: Shape) {
    if !orientations.contains(&candidate) {
        orientations.push(candidate);
    }
}

/// Flood fill over edge neighbors; `cells` must be sorted and non-empty.
fn is_connected(cells: &[Cell]) -> bool {
    let mut visited = vec![false; cells.len()];
    let mut stack = vec![0];
    visited[0] = true;
    let mut reached = 1;
    while let Some(index) = stack.pop() {
        let cell = cells[index];
        let neighbors = [
            Cell::new(cell.row - 1, cell.col),
            Cell::new(cell.row + 1, cell.col),
            Cell::new(cell.row, cell.col - 1),
            Cell::new(cell.row, cell.col + 1),
        ];
        for neighbor in neighbors {
            if let Ok(next) = cells.binary_search(&neighbor)
                && !visited[next]
            {
                visited[next] = true;
                reached += 1;
                stack.push(next);
            }
        }
    }
    reached == cells.len()
}

/// A clockwise quarter-turn rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// No rotation.
    R0,
    /// A quarter turn clockwise.
    R90,
    /// A half turn.
    R180,
    /// Three quarter turns clockwise.
    R270,
}

impl Rotation {
    /// All rotations, a quarter turn apart, starting from [`Rotation::R0`].
    pub const ALL: [Self; 4] = [Self::R0, Self::R90, Self::R180, Self::R270];

    /// Returns the rotation angle in degrees, one of 0, 90, 180 or 270.
    #[must_use]
    pub const fn degrees(self) -> i32 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }

    /// Converts an angle in degrees to a rotation.
    ///
    /// The angle may be negative or beyond a full turn.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidRotation`] if the angle is not a multiple
    /// of 90 degrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilework_core::Rotation;
    ///
    /// assert_eq!(Rotation::from_degrees(-90)?, Rotation::R270);
    /// assert_eq!(Rotation::from_degrees(720)?, Rotation::R0);
    /// assert!(Rotation::from_degrees(45).is_err());
    /// # Ok::<(), tilework_core::ShapeError>(())
    /// ```
    pub fn from_degrees(degrees: i32) -> Result<Self, ShapeError> {
        if degrees % 90 != 0 {
            return Err(ShapeError::InvalidRotation { degrees });
        }
        let rotation = match degrees.rem_euclid(360) {
            0 => Self::R0,
            90 => Self::R90,
            180 => Self::R180,
            270 => Self::R270,
            _ => unreachable!("angle is a multiple of 90 reduced modulo 360"),
        };
        Ok(rotation)
    }
}

/// A mirror axis for [`Shape::flipped`].
///
/// Parses case-insensitively from `"horizontal"`/`"h"` and
/// `"vertical"`/`"v"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Mirror left-right: columns reverse, rows stay.
    Horizontal,
    /// Mirror top-bottom: rows reverse, columns stay.
    Vertical,
}

impl FromStr for Axis {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Self::Horizontal),
            "vertical" | "v" => Ok(Self::Vertical),
            _ => Err(ShapeError::InvalidAxis { name: s.to_owned() }),
        }
    }
}

/// Whether orientation enumeration includes mirrored forms.
///
/// Mirroring matters for chiral shapes only; for shapes with a mirror
/// symmetry both policies enumerate the same set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum MirrorPolicy {
    /// Enumerate quarter turns and their horizontal mirrors.
    #[default]
    Include,
    /// Enumerate quarter turns only.
    Exclude,
}

/// An error from building or transforming a [`Shape`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    /// The cell set was empty.
    #[display("shape has no cells")]
    Empty,
    /// The cells do not form a single edge-connected region.
    #[display("shape cells are not edge-connected")]
    NotContiguous,
    /// A rotation angle was not a multiple of 90 degrees.
    #[display("rotation must be a multiple of 90 degrees: {degrees}")]
    InvalidRotation {
        /// The rejected angle, in degrees.
        degrees: i32,
    },
    /// A mirror axis name was not recognized.
    #[display("mirror axis must be \"horizontal\" or \"vertical\": {name:?}")]
    InvalidAxis {
        /// The rejected axis name.
        name: String,
    },
}

/// An error from parsing a [`Shape`] drawing.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ParseShapeError {
    /// The drawing contained a character other than `#`, `.` or `_`.
    #[display("unexpected character {character:?} in shape drawing")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
    },
    /// The drawn cells do not form a valid shape.
    #[display("invalid shape: {_0}")]
    Shape(#[from] ShapeError),
}
