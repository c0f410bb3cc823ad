use super::position::{random_position, Position};
use crate::consts;
use enum_map::Enum;
use rand::{
    distr::{Bernoulli, Distribution},
    Rng,
};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use thiserror::Error;

/// A piece of food on the field
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FoodItem {
    pub(crate) position: Position,
    pub(crate) spawned: Instant,
}

impl FoodItem {
    fn expired(&self, lifetime: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.spawned) > lifetime
    }
}

/// How long food stays fresh before it starts to rot
#[derive(Clone, Copy, Debug, Default, Enum, Eq, Hash, PartialEq)]
pub(crate) enum ExpiryCategory {
    #[default]
    Fastest,
    Short,
    Medium,
    Long,
    Forever,
}

impl ExpiryCategory {
    /// Return how long an item may sit on the field before becoming a
    /// candidate for rotting, or `None` if food never rots
    pub(crate) fn lifetime(self) -> Option<Duration> {
        match self {
            ExpiryCategory::Fastest => Some(Duration::from_secs(3)),
            ExpiryCategory::Short => Some(Duration::from_secs(8)),
            ExpiryCategory::Medium => Some(Duration::from_secs(15)),
            ExpiryCategory::Long => Some(Duration::from_secs(30)),
            ExpiryCategory::Forever => None,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ExpiryCategory::Fastest => "fastest",
            ExpiryCategory::Short => "short",
            ExpiryCategory::Medium => "medium",
            ExpiryCategory::Long => "long",
            ExpiryCategory::Forever => "forever",
        }
    }
}

impl fmt::Display for ExpiryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ExpiryCategory {
    type Err = ParseExpiryError;

    fn from_str(s: &str) -> Result<ExpiryCategory, ParseExpiryError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fastest" => Ok(ExpiryCategory::Fastest),
            "short" => Ok(ExpiryCategory::Short),
            "medium" => Ok(ExpiryCategory::Medium),
            "long" => Ok(ExpiryCategory::Long),
            "forever" => Ok(ExpiryCategory::Forever),
            _ => Err(ParseExpiryError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid food expiry category: {0:?}")]
pub(crate) struct ParseExpiryError(String);

/// All food currently on the field, in the order it was spawned
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FoodPool {
    items: Vec<FoodItem>,
    expiry: ExpiryCategory,

    /// New food is placed with `|x| <= x_bound` and `|y| <= y_bound`
    x_bound: i32,
    y_bound: i32,
}

impl FoodPool {
    pub(crate) fn new(expiry: ExpiryCategory, x_bound: i32, y_bound: i32) -> FoodPool {
        FoodPool {
            items: Vec::new(),
            expiry,
            x_bound,
            y_bound,
        }
    }

    pub(crate) fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn expiry(&self) -> ExpiryCategory {
        self.expiry
    }

    /// Place `count` new items at random positions, stamped with `now`
    pub(crate) fn spawn<R: Rng>(&mut self, rng: &mut R, count: usize, now: Instant) {
        self.items.extend((0..count).map(|_| FoodItem {
            position: random_position(rng, self.x_bound, self.y_bound),
            spawned: now,
        }));
    }

    /// Give every item older than the expiry lifetime a coin flip's chance of
    /// rotting away.  Returns the number of items removed.
    pub(crate) fn sweep_expired<R: Rng>(&mut self, rng: &mut R, now: Instant) -> usize {
        let Some(lifetime) = self.expiry.lifetime() else {
            return 0;
        };
        let rot = Bernoulli::new(consts::FOOD_ROT_PROBABILITY)
            .expect("FOOD_ROT_PROBABILITY should be between 0 and 1");
        let before = self.items.len();
        self.items
            .retain(|item| !(item.expired(lifetime, now) && rot.sample(rng)));
        before - self.items.len()
    }

    /// Remove every item closer than `radius` to `point`, returning how many
    /// were removed
    pub(crate) fn remove_near(&mut self, point: Position, radius: i32) -> usize {
        let before = self.items.len();
        self.items
            .retain(|item| !point.is_within(item.position, radius));
        before - self.items.len()
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    #[cfg(test)]
    pub(super) fn push(&mut self, position: Position, spawned: Instant) {
        self.items.push(FoodItem { position, spawned });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GRID_STEP;
    use crate::util::EnumExt;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn rng() -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(RNG_SEED)
    }

    #[test]
    fn spawn_appends_aligned_items() {
        let mut rng = rng();
        let now = Instant::now();
        let mut pool = FoodPool::new(ExpiryCategory::Fastest, 380, 280);
        pool.spawn(&mut rng, 25, now);
        pool.spawn(&mut rng, 5, now);
        assert_eq!(pool.len(), 30);
        for item in pool.items() {
            assert_eq!(item.position.x % GRID_STEP, 0);
            assert_eq!(item.position.y % GRID_STEP, 0);
            assert!(item.position.x.abs() <= 380);
            assert!(item.position.y.abs() <= 280);
            assert_eq!(item.spawned, now);
        }
    }

    #[test]
    fn forever_never_sweeps() {
        let mut rng = rng();
        let start = Instant::now();
        let mut pool = FoodPool::new(ExpiryCategory::Forever, 200, 200);
        pool.spawn(&mut rng, 50, start);
        for i in 1..100 {
            let removed = pool.sweep_expired(&mut rng, start + Duration::from_secs(i * 60));
            assert_eq!(removed, 0);
            assert_eq!(pool.len(), 50);
        }
    }

    #[test]
    fn fresh_food_never_rots() {
        let mut rng = rng();
        let start = Instant::now();
        let mut pool = FoodPool::new(ExpiryCategory::Short, 200, 200);
        pool.spawn(&mut rng, 50, start);
        for _ in 0..20 {
            assert_eq!(pool.sweep_expired(&mut rng, start + Duration::from_secs(8)), 0);
        }
        assert_eq!(pool.len(), 50);
    }

    #[test]
    fn expired_food_rots_partially() {
        let mut rng = rng();
        let start = Instant::now();
        let mut pool = FoodPool::new(ExpiryCategory::Fastest, 200, 200);
        pool.spawn(&mut rng, 200, start);
        let removed = pool.sweep_expired(&mut rng, start + Duration::from_secs(10));
        assert_eq!(pool.len(), 200 - removed);
        // A fair coin flipped 200 times is far from both extremes.
        assert!((50..=150).contains(&removed), "removed {removed}");
        let mut now = start + Duration::from_secs(10);
        while !pool.is_empty() {
            now += Duration::from_secs(1);
            let _ = pool.sweep_expired(&mut rng, now);
        }
    }

    #[test]
    fn sweep_only_touches_expired_items() {
        let mut rng = rng();
        let start = Instant::now();
        let later = start + Duration::from_secs(20);
        let mut pool = FoodPool::new(ExpiryCategory::Medium, 200, 200);
        pool.spawn(&mut rng, 100, start);
        pool.spawn(&mut rng, 10, later);
        for _ in 0..64 {
            let _ = pool.sweep_expired(&mut rng, later + Duration::from_secs(1));
        }
        assert_eq!(pool.len(), 10);
        assert!(pool.items().iter().all(|item| item.spawned == later));
    }

    #[test]
    fn remove_near_consumes_all_hits() {
        let now = Instant::now();
        let mut pool = FoodPool::new(ExpiryCategory::Fastest, 200, 200);
        pool.push(Position::new(0, 0), now);
        pool.push(Position::new(20, 0), now);
        pool.push(Position::new(0, 0), now);
        pool.push(Position::new(-10, 10), now);
        pool.push(Position::new(100, 100), now);
        assert_eq!(pool.remove_near(Position::ORIGIN, consts::FOOD_RADIUS), 3);
        assert_eq!(
            pool.items()
                .iter()
                .map(|item| item.position)
                .collect::<Vec<_>>(),
            vec![Position::new(20, 0), Position::new(100, 100)]
        );
        assert_eq!(pool.remove_near(Position::ORIGIN, consts::FOOD_RADIUS), 0);
    }

    #[test]
    fn clear_empties_pool() {
        let mut rng = rng();
        let mut pool = FoodPool::new(ExpiryCategory::Long, 200, 200);
        pool.spawn(&mut rng, 12, Instant::now());
        pool.clear();
        assert!(pool.is_empty());
    }

    #[rstest]
    #[case("fastest", ExpiryCategory::Fastest)]
    #[case("short", ExpiryCategory::Short)]
    #[case("Medium", ExpiryCategory::Medium)]
    #[case(" long ", ExpiryCategory::Long)]
    #[case("FOREVER", ExpiryCategory::Forever)]
    fn parse_expiry(#[case] s: &str, #[case] expected: ExpiryCategory) {
        assert_eq!(s.parse::<ExpiryCategory>(), Ok(expected));
    }

    #[test]
    fn parse_bad_expiry() {
        assert!("eventually".parse::<ExpiryCategory>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for cat in ExpiryCategory::iter() {
            assert_eq!(cat.to_string().parse::<ExpiryCategory>(), Ok(cat));
        }
    }
}
