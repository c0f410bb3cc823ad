//! Collision predicates over the snake's head
use super::chain::SegmentChain;
use super::food::FoodPool;
use super::position::Position;

/// Test whether `head` is past the field's walls, i.e., closer than `margin`
/// to an edge of a `width` × `height` field centered on the origin
pub(crate) fn wall_collision(head: Position, width: i32, height: i32, margin: i32) -> bool {
    head.x.abs() > width / 2 - margin || head.y.abs() > height / 2 - margin
}

/// Eat all food within `radius` of `head`, returning how many items were
/// eaten
pub(crate) fn food_collision(head: Position, food: &mut FoodPool, radius: i32) -> usize {
    food.remove_near(head, radius)
}

pub(crate) fn self_collision(chain: &SegmentChain, threshold: i32) -> bool {
    chain.check_self_collision(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;
    use crate::game::direction::Direction;
    use crate::game::food::ExpiryCategory;
    use rstest::rstest;
    use std::time::Instant;

    #[rstest]
    #[case(Position::new(290, 0), false)]
    #[case(Position::new(291, 0), true)]
    #[case(Position::new(-290, 0), false)]
    #[case(Position::new(-291, 0), true)]
    #[case(Position::new(0, 290), false)]
    #[case(Position::new(0, 291), true)]
    #[case(Position::new(0, -291), true)]
    #[case(Position::ORIGIN, false)]
    fn test_wall_collision_square(#[case] head: Position, #[case] hit: bool) {
        assert_eq!(wall_collision(head, 600, 600, consts::WALL_MARGIN), hit);
    }

    #[rstest]
    #[case(Position::new(380, 280), false)]
    #[case(Position::new(400, 0), true)]
    #[case(Position::new(0, 300), true)]
    #[case(Position::new(380, -280), false)]
    fn test_wall_collision_default_field(#[case] head: Position, #[case] hit: bool) {
        assert_eq!(
            wall_collision(
                head,
                consts::DEFAULT_FIELD_WIDTH,
                consts::DEFAULT_FIELD_HEIGHT,
                consts::WALL_MARGIN
            ),
            hit
        );
    }

    #[test]
    fn food_collision_counts_every_hit() {
        let now = Instant::now();
        let mut food = FoodPool::new(ExpiryCategory::Forever, 100, 100);
        food.push(Position::new(20, 0), now);
        food.push(Position::new(20, 0), now);
        food.push(Position::new(30, 10), now);
        food.push(Position::new(60, 0), now);
        let head = Position::new(20, 0);
        assert_eq!(food_collision(head, &mut food, consts::FOOD_RADIUS), 3);
        assert_eq!(food.len(), 1);
    }

    #[test]
    fn self_collision_delegates_to_chain() {
        let chain = SegmentChain::new(5, Position::ORIGIN, Direction::Right);
        assert!(!self_collision(&chain, consts::SELF_COLLISION_THRESHOLD));
    }
}
