//! Wall-clock source for `created_at`/`completed_at` stamps.

use crate::model::Timestamp;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

const MILLIS_PER_DAY: Timestamp = 24 * 60 * 60 * 1000;

pub trait Clock {
    /// Current time in Unix epoch milliseconds.
    fn now_ms(&self) -> Timestamp;
}

/// System clock. Times before the epoch read as `0`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| Timestamp::try_from(elapsed.as_millis()).unwrap_or(Timestamp::MAX))
            .unwrap_or(0)
    }
}

/// Settable clock; clones share the same time cell.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Timestamp>>,
}

impl ManualClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.now.set(now);
    }

    pub fn advance(&self, millis: Timestamp) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Timestamp {
        self.now.get()
    }
}

/// Midnight (UTC) of the day containing `ts`.
pub fn start_of_day_utc(ts: Timestamp) -> Timestamp {
    ts - ts.rem_euclid(MILLIS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::{start_of_day_utc, Clock, ManualClock};

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(1_000);
        let handle = clock.clone();
        handle.advance(500);
        assert_eq!(clock.now_ms(), 1_500);
    }

    #[test]
    fn start_of_day_truncates_to_midnight() {
        // 2025-06-01T13:20:00Z
        assert_eq!(start_of_day_utc(1_748_784_000_000), 1_748_736_000_000);
        assert_eq!(start_of_day_utc(-1), -86_400_000);
    }
}
