use super::direction::Direction;
use crate::consts::GRID_STEP;
use rand::Rng;

/// A point on the field in world units.  The origin is the center of the
/// field and `y` grows upwards.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Position {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Position {
    pub(crate) const ORIGIN: Position = Position { x: 0, y: 0 };

    pub(crate) const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    /// Return the position `steps` grid steps away in direction `dir`.
    /// Negative `steps` go the other way.
    pub(crate) fn step(self, dir: Direction, steps: i32) -> Position {
        let (dx, dy) = dir.offset();
        Position {
            x: self.x.saturating_add(dx * GRID_STEP * steps),
            y: self.y.saturating_add(dy * GRID_STEP * steps),
        }
    }

    /// Test whether `other` is strictly closer than `radius` to `self`
    pub(crate) fn is_within(self, other: Position, radius: i32) -> bool {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        let r = i64::from(radius);
        dx * dx + dy * dy < r * r
    }
}

/// Return a random grid-aligned position with `|x| <= x_bound` and
/// `|y| <= y_bound`.  Bounds smaller than one grid step only ever yield 0 on
/// that axis.
pub(crate) fn random_position<R: Rng>(rng: &mut R, x_bound: i32, y_bound: i32) -> Position {
    Position {
        x: random_coordinate(rng, x_bound),
        y: random_coordinate(rng, y_bound),
    }
}

fn random_coordinate<R: Rng>(rng: &mut R, bound: i32) -> i32 {
    let cells = bound.max(0) / GRID_STEP;
    rng.random_range(-cells..=cells) * GRID_STEP
}
