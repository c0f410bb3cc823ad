use super::direction::Direction;
use super::position::Position;
use crate::consts;

/// One cell of the snake
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Segment {
    pub(crate) position: Position,
    pub(crate) heading: Direction,
}

/// The snake's body as an ordered list of segments, head first.  Never
/// empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SegmentChain {
    pub(super) segments: Vec<Segment>,

    /// The direction the head will face on the next `move_forward()`.  Input
    /// is buffered here for at most one tick.
    pub(super) direction: Direction,
}

impl SegmentChain {
    /// Create a chain of `length` segments (at least one) with its head at
    /// `origin` facing `direction` and the rest of the body trailing out
    /// behind it, one grid step apart along the negative x-axis.
    pub(crate) fn new(length: usize, origin: Position, direction: Direction) -> SegmentChain {
        let length = length.max(1);
        let segments = std::iter::successors(Some(origin), |&p| {
            Some(p.step(Direction::Left, 1))
        })
        .take(length)
        .map(|position| Segment {
            position,
            heading: Direction::Right,
        })
        .collect::<Vec<_>>();
        let mut chain = SegmentChain {
            segments,
            direction,
        };
        chain.head_mut().heading = direction;
        chain
    }

    pub(crate) fn head(&self) -> Segment {
        self.segments[0]
    }

    fn head_mut(&mut self) -> &mut Segment {
        &mut self.segments[0]
    }

    pub(crate) fn tail(&self) -> Segment {
        self.segments[self.segments.len() - 1]
    }

    /// All segments, head first
    #[cfg(test)]
    pub(crate) fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// All segments after the head
    pub(crate) fn body(&self) -> &[Segment] {
        &self.segments[1..]
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    #[cfg(test)]
    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// Advance the snake one grid step.  Each body segment takes the place
    /// (and heading) the segment in front of it had before this move, then
    /// the head turns to the buffered direction and steps forwards.
    pub(crate) fn move_forward(&mut self) {
        // Walking tail-first means each source segment is read before it is
        // overwritten.
        for i in (1..self.segments.len()).rev() {
            self.segments[i] = self.segments[i - 1];
        }
        let direction = self.direction;
        let head = self.head_mut();
        head.heading = direction;
        head.position = head.position.step(direction, 1);
    }

    /// Buffer a turn to be applied on the next move
    pub(crate) fn change_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Add `count` segments to the end of the tail, each one grid step behind
    /// the previous tail, opposite the way the tail faces
    pub(crate) fn grow(&mut self, count: usize) {
        for _ in 0..count {
            let tail = self.tail();
            self.segments.push(Segment {
                position: tail.position.step(tail.heading.opposite(), 1),
                heading: tail.heading,
            });
        }
    }

    /// Remove the tail segment unless it is also the head.  Nothing in play
    /// shrinks the snake yet.
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn shrink(&mut self) {
        if self.segments.len() > 1 {
            let _ = self.segments.pop();
        }
    }

    /// Rebuild the snake at the origin, facing right, with `length` segments
    /// (but never fewer than [`MIN_RESET_LENGTH`][consts::MIN_RESET_LENGTH])
    pub(crate) fn reset(&mut self, length: usize) {
        *self = SegmentChain::new(
            length.max(consts::MIN_RESET_LENGTH),
            Position::ORIGIN,
            Direction::Right,
        );
    }

    /// Test whether the head is closer than `threshold` to any body segment
    pub(crate) fn check_self_collision(&self, threshold: i32) -> bool {
        let head = self.head().position;
        self.body()
            .iter()
            .any(|seg| head.is_within(seg.position, threshold))
    }
}
