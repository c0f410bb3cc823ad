use crate::consts;
use std::time::{Duration, Instant};

/// A callback schedule that fires once every `period`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Periodic {
    period: Duration,
    next: Instant,
}

impl Periodic {
    /// Create a schedule whose first firing is one period after `start`.
    /// Periods are capped at [`MAX_INTERVAL`][consts::MAX_INTERVAL].
    pub(crate) fn new(period: Duration, start: Instant) -> Periodic {
        let period = period.min(consts::MAX_INTERVAL);
        Periodic {
            period,
            next: start + period,
        }
    }

    pub(crate) fn deadline(&self) -> Instant {
        self.next
    }

    /// If the schedule is due at `now`, advance it to its next firing and
    /// return `true`.  A schedule that has fallen more than a whole period
    /// behind skips the missed firings instead of bursting through them.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }
}
