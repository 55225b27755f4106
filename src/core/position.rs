//! Board coordinates.
//!
//! `Position` is a plain value type used directly as a map key. Coordinates
//! are unsigned, so a negative coordinate cannot be expressed at all; the
//! upper bound is the configured board size and is checked with
//! [`Position::in_bounds`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A cell on the N×N board. `x` is the column, `y` the row; (0, 0) is the
/// top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Check that the position lies on a board of `size` × `size` cells.
    #[must_use]
    pub const fn in_bounds(self, size: u8) -> bool {
        self.x < size && self.y < size
    }

    /// Orthogonal neighbours that lie on a board of the given size.
    ///
    /// ```
    /// use rust_trinity::core::Position;
    ///
    /// let corner = Position::new(0, 0);
    /// assert_eq!(corner.neighbors(8).len(), 2);
    /// assert_eq!(Position::new(3, 3).neighbors(8).len(), 4);
    /// ```
    #[must_use]
    pub fn neighbors(self, size: u8) -> SmallVec<[Position; 4]> {
        let mut out = SmallVec::new();
        if self.y > 0 {
            out.push(Position::new(self.x, self.y - 1));
        }
        if self.x + 1 < size {
            out.push(Position::new(self.x + 1, self.y));
        }
        if self.y + 1 < size {
            out.push(Position::new(self.x, self.y + 1));
        }
        if self.x > 0 {
            out.push(Position::new(self.x - 1, self.y));
        }
        out
    }

    /// Manhattan distance between two cells.
    #[must_use]
    pub fn distance(self, other: Position) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }

    /// True if the two cells share an edge.
    #[must_use]
    pub fn is_adjacent(self, other: Position) -> bool {
        self.distance(other) == 1
    }

    /// Iterate every cell of a `size` × `size` board in row-major order.
    pub fn all(size: u8) -> impl Iterator<Item = Position> {
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u8, u8)> for Position {
    fn from((x, y): (u8, u8)) -> Self {
        Self::new(x, y)
    }
}
