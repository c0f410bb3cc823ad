use enum_map::Enum;

/// A direction of travel on the field.  World coordinates have `y` growing
/// upwards.
#[derive(Clone, Copy, Debug, Enum, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Heading angle in degrees, counterclockwise from the positive x-axis
    pub(crate) fn heading(self) -> u16 {
        match self {
            Direction::Up => 90,
            Direction::Down => 270,
            Direction::Left => 180,
            Direction::Right => 0,
        }
    }

    pub(crate) fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step `(dx, dy)` along this direction
    pub(crate) fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}
