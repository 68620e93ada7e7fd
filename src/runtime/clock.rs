use std::time::{Duration, Instant};

/// Source of render ticks.
pub trait FrameClock: Send {
    /// Block until the next tick is due. Returns `false` once the clock is exhausted.
    fn wait_next(&mut self) -> bool;
}

/// Fixed-period clock approximating display refresh.
///
/// Missed deadlines are not replayed: after a late tick the schedule restarts from now.
#[derive(Clone, Debug)]
pub struct IntervalClock {
    period: Duration,
    next: Option<Instant>,
}

impl IntervalClock {
    /// Clock ticking every `period` (at least 1ms).
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next: None,
        }
    }

    /// 60 Hz clock.
    pub fn display_refresh() -> Self {
        Self::new(Duration::from_nanos(16_666_667))
    }

    /// Tick period.
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl FrameClock for IntervalClock {
    fn wait_next(&mut self) -> bool {
        let now = Instant::now();
        let due = self.next.unwrap_or(now);
        if due > now {
            std::thread::sleep(due - now);
        }
        self.next = Some(due.max(now) + self.period);
        true
    }
}

/// Clock that yields a fixed number of ticks without waiting.
#[derive(Clone, Debug)]
pub struct CountedClock {
    remaining: u64,
}

impl CountedClock {
    /// Clock yielding exactly `ticks` ticks.
    pub fn new(ticks: u64) -> Self {
        Self { remaining: ticks }
    }

    /// Ticks left.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl FrameClock for CountedClock {
    fn wait_next(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/clock.rs"]
mod tests;
