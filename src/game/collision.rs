use super::grid::{Grid, Position};
use std::fmt;

/// What the snake's head ran into
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    /// The head left the grid
    Wall,
    /// The head landed on a cell occupied by the snake
    SelfHit,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collision::Wall => write!(f, "hit the wall"),
            Collision::SelfHit => write!(f, "bit itself"),
        }
    }
}

/// Check a prospective head position against the grid and against the cells
/// the snake occupied before the move.  `occupied` must already exclude a
/// tail cell that is being vacated this tick.
pub(crate) fn check(grid: Grid, new_head: Position, occupied: &[Position]) -> Option<Collision> {
    if !grid.contains(new_head) {
        Some(Collision::Wall)
    } else if occupied.contains(&new_head) {
        Some(Collision::SelfHit)
    } else {
        None
    }
}
