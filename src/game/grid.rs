use std::fmt;

/// A cell coordinate.  Coordinates are signed so that a head that has just
/// stepped off the board can still be represented and reported as a wall
/// collision.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Position {
    pub(crate) x: i16,
    pub(crate) y: i16,
}

impl Position {
    pub(crate) const fn new(x: i16, y: i16) -> Position {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The playing field.  Only knows its own extent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    pub(crate) width: i16,
    pub(crate) height: i16,
}

impl Grid {
    pub(crate) const fn new(width: i16, height: i16) -> Grid {
        Grid { width, height }
    }

    pub(crate) fn contains(self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Iterate over every cell of the grid in row-major order
    pub(crate) fn positions(self) -> impl Iterator<Item = Position> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }
}
