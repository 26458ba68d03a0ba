use super::direction::Direction;
use super::food::FoodType;
use super::grid::Position;

/// One unit of body length, tagged with the kind of food that grew it
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BodySegment {
    pub(crate) kind: FoodType,
    pub(crate) pos: Position,
}

/// Snake state.
///
/// `positions` lists every occupied cell starting with the head, so
/// `positions.len() == body.len() + 1` and `body[i].pos == positions[i + 1]`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    pub(crate) head: Position,
    /// Body segments, nearest the head first
    pub(crate) body: Vec<BodySegment>,
    pub(crate) positions: Vec<Position>,
    /// `None` until the snake has been set moving
    pub(crate) direction: Option<Direction>,
}

impl Snake {
    /// Create a bodiless, motionless snake with its head at `head`
    pub(crate) fn new(head: Position) -> Snake {
        Snake {
            head,
            body: Vec::new(),
            positions: vec![head],
            direction: None,
        }
    }

    pub(crate) fn head(&self) -> Position {
        self.head
    }

    pub(crate) fn body(&self) -> &[BodySegment] {
        &self.body
    }

    /// Return whether any part of the snake (head included) covers `pos`
    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// The cells that a head moving this tick must not land on.  When the
    /// snake is not growing, its last cell is vacated by the same move and
    /// is therefore left out.
    pub(crate) fn obstructions(&self, growing: bool) -> &[Position] {
        let keep = if growing {
            self.positions.len()
        } else {
            self.positions.len().saturating_sub(1)
        };
        &self.positions[..keep]
    }

    /// Return the snake as it is after moving one cell in `direction`.  If
    /// `growth` is `Some`, the tail stays where it is and a new segment of
    /// that kind is attached there; otherwise the tail moves up.  Each
    /// existing segment keeps its kind and takes over the cell of the one
    /// in front of it.
    pub(crate) fn advanced(&self, direction: Direction, growth: Option<FoodType>) -> Snake {
        let head = direction.step(self.head);
        let keep = if growth.is_some() {
            self.positions.len()
        } else {
            self.positions.len().saturating_sub(1)
        };
        let positions = std::iter::once(head)
            .chain(self.positions[..keep].iter().copied())
            .collect::<Vec<_>>();
        let mut body = self
            .body
            .iter()
            .zip(positions.iter().skip(1))
            .map(|(seg, &pos)| BodySegment {
                kind: seg.kind,
                pos,
            })
            .collect::<Vec<_>>();
        if let Some(kind) = growth {
            if let Some(&pos) = positions.last() {
                body.push(BodySegment { kind, pos });
            }
        }
        Snake {
            head,
            body,
            positions,
            direction: Some(direction),
        }
    }
}
