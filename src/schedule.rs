//! Recurring timers for carousel auto-advance.
//!
//! The carousel never owns a clock. It asks a [`Scheduler`] for a recurring
//! timer and cancels it on every transition, so the host decides what time
//! is. [`VirtualClock`] is a deterministic implementation for tests and the
//! simulator.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

/// Shortest period a timer runs at; shorter requests are raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Opaque handle of a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimerHandle(pub u64);

/// Source of recurring timers.
pub trait Scheduler {
    /// Schedule a timer for `region` firing every `interval`.
    fn schedule_repeating(&mut self, region: &str, interval: Duration) -> TimerHandle;

    /// Cancel a timer. Cancelling an unknown handle does nothing.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone)]
struct Timer {
    region: String,
    interval: Duration,
    due: Duration,
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired {
    pub handle: TimerHandle,
    pub at: Duration,
}

/// Scheduler driven by explicit calls instead of wall-clock time.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Duration,
    next_handle: u64,
    timers: BTreeMap<TimerHandle, Timer>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live timers.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Live timers registered for `region`.
    pub fn pending_for(&self, region: &str) -> usize {
        self.timers.values().filter(|t| t.region == region).count()
    }

    /// Pop the earliest timer due at or before `deadline`.
    ///
    /// The clock moves to the timer's due time and the timer is re-armed for
    /// its next period. Ties go to the older timer.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<Fired> {
        let (handle, timer) = self
            .timers
            .iter_mut()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(handle, t)| (t.due, **handle))?;

        let fired = Fired {
            handle: *handle,
            at: timer.due,
        };
        timer.due += timer.interval;
        self.now = self.now.max(fired.at);
        Some(fired)
    }

    /// Jump every timer over the whole periods that end before `deadline`.
    ///
    /// Each timer is left on its last due time at or before `deadline`, so a
    /// following [`pop_due`](Self::pop_due) fires it exactly once more.
    /// Returns the number of periods skipped per timer.
    pub fn skip_periods(&mut self, deadline: Duration) -> Vec<(TimerHandle, u64)> {
        let mut skipped = Vec::new();
        for (handle, timer) in &mut self.timers {
            if timer.due > deadline {
                continue;
            }
            let span = (deadline - timer.due).as_nanos();
            let interval = timer.interval.as_nanos();
            let periods = span / interval;
            if periods == 0 {
                continue;
            }
            let rest = u64::try_from(span % interval).unwrap_or(u64::MAX);
            timer.due = deadline.saturating_sub(Duration::from_nanos(rest));
            skipped.push((*handle, u64::try_from(periods).unwrap_or(u64::MAX)));
        }
        skipped
    }

    /// Move the clock forward to `to` without firing anything.
    pub fn set_now(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }
}

impl Scheduler for VirtualClock {
    fn schedule_repeating(&mut self, region: &str, interval: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let interval = interval.max(MIN_INTERVAL);
        self.timers.insert(
            handle,
            Timer {
                region: region.to_string(),
                interval,
                due: self.now + interval,
            },
        );
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle);
    }
}
