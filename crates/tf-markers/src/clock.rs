//! Nanosecond time source for timers.
//!
//! The wire format carries absolute epoch nanoseconds, but durations must
//! never go negative. [`SystemClock`] reads the wall clock once per process
//! and advances it with a monotonic [`Instant`], so readings look like epoch
//! time yet never step backwards when NTP adjusts the system clock.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// A source of nanosecond timestamps.
pub trait Clock {
    fn now_ns(&self) -> u64;
}

/// Wall-clock anchored, monotonic clock. All instances share one anchor.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

static ANCHOR: LazyLock<(u64, Instant)> = LazyLock::new(|| {
    let epoch_ns = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| saturating_ns(d.as_nanos()));
    (epoch_ns, Instant::now())
});

fn saturating_ns(ns: u128) -> u64 {
    u64::try_from(ns).unwrap_or(u64::MAX)
}

impl Clock for SystemClock {
    fn now_ns(&self) -> u64 {
        let (epoch_ns, instant) = *ANCHOR;
        epoch_ns.saturating_add(saturating_ns(instant.elapsed().as_nanos()))
    }
}

/// A clock that only moves when told to. Clones share the same reading.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start_ns: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ns)),
        }
    }

    pub fn set(&self, ns: u64) {
        self.now.set(ns);
    }

    pub fn advance(&self, ns: u64) {
        self.now.set(self.now.get().saturating_add(ns));
    }
}

impl Clock for ManualClock {
    fn now_ns(&self) -> u64 {
        self.now.get()
    }
}

impl fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ManualClock").field(&self.now.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock;
        let mut last = clock.now_ns();
        for _ in 0..1000 {
            let now = clock.now_ns();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn system_clock_looks_like_epoch_time() {
        // Later than 2020-01-01 in nanoseconds.
        assert!(SystemClock.now_ns() > 1_577_836_800_000_000_000);
    }

    #[test]
    fn manual_clock_clones_share_reading() {
        let clock = ManualClock::new(100);
        let other = clock.clone();
        clock.advance(50);
        assert_eq!(other.now_ns(), 150);
        other.set(7);
        assert_eq!(clock.now_ns(), 7);
    }
}
