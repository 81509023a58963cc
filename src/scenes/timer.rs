use std::fmt;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Handle of one running interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Host event-loop interval timers.
///
/// The host delivers each firing back through `Presentation::on_timer`.
pub trait TimerService {
    fn start_interval(&mut self, period: Duration) -> TimerId;

    /// Stops the interval. Returns `false` when it was not running, which
    /// makes repeated cancellation harmless.
    fn cancel(&mut self, id: TimerId) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Interval {
    period: Duration,
    next_due: Duration,
}

/// Virtual clock driven explicitly by the caller.
///
/// Used by tests and by hosts that step time themselves (offline export,
/// replays).
#[derive(Debug, Default)]
pub struct ManualTimerService {
    now: Duration,
    next_id: u64,
    intervals: IndexMap<TimerId, Interval>,
}

impl ManualTimerService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.intervals.len()
    }

    #[must_use]
    pub fn is_active(&self, id: TimerId) -> bool {
        self.intervals.contains_key(&id)
    }

    /// Moves the clock forward and returns every firing in time order.
    ///
    /// Intervals due at the same instant fire in start order.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        let target = self.now + by;
        let mut fired = Vec::new();
        loop {
            let due = self
                .intervals
                .iter()
                .filter(|(_, interval)| interval.next_due <= target)
                .min_by_key(|(_, interval)| interval.next_due)
                .map(|(id, _)| *id);
            let Some(id) = due else {
                break;
            };
            if let Some(interval) = self.intervals.get_mut(&id) {
                self.now = interval.next_due;
                interval.next_due += interval.period;
            }
            trace!(%id, now_ms = self.now.as_millis() as u64, "timer fired");
            fired.push(id);
        }
        self.now = target;
        fired
    }
}

impl TimerService for ManualTimerService {
    fn start_interval(&mut self, period: Duration) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        let id = TimerId::new(self.next_id);
        self.next_id += 1;
        self.intervals.insert(
            id,
            Interval {
                period,
                next_due: self.now + period,
            },
        );
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.intervals.shift_remove(&id).is_some()
    }
}
