// Single-threaded timer queue driven by the frame loop.
// Nothing here runs on its own thread. The owner calls `TimerQueue::pop_due`
// with the current time and handles each fired event before asking for the
// next one, so every callback runs on the same context that owns the state.
// Events come out in deadline order; a handler may schedule new timers and
// they are picked up in the same drain if already due.

use std::time::{Duration, Instant};

/// Repeating timers further behind than this many periods skip to their
/// latest due tick instead of replaying every missed one.
const MAX_REPLAYED_TICKS: u32 = 64;

/// What a timer in the scratch surface's queue is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceTimer {
    DecayTick,
    ResetStep,
}

/// Handle to a scheduled timer. Stays unique for the life of the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// A timer that came due.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fired<E> {
    pub handle: TimerHandle,
    pub event: E,
    /// The deadline this firing was scheduled for (not the time it was noticed).
    pub at: Instant,
}

#[derive(Debug)]
struct Entry<E> {
    handle: TimerHandle,
    event: E,
    deadline: Instant,
    period: Option<Duration>,
}

#[derive(Debug)]
pub struct TimerQueue<E> {
    entries: Vec<Entry<E>>,
    next_handle: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self { entries: Vec::new(), next_handle: 0 }
    }
}

impl<E: Copy> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `event` every `period`, first at `first`.
    /// A zero period is bumped to 1µs so the queue always makes progress.
    pub fn schedule_repeating(&mut self, first: Instant, period: Duration, event: E) -> TimerHandle {
        let period = period.max(Duration::from_micros(1));
        self.insert(first, Some(period), event)
    }

    /// Fire `event` once at `at`.
    pub fn schedule_once(&mut self, at: Instant, event: E) -> TimerHandle {
        self.insert(at, None, event)
    }

    /// Cancel a timer. Returns false if it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Number of timers still pending (repeating ones count until cancelled).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count of pending repeating timers.
    pub fn repeating_count(&self) -> usize {
        self.entries.iter().filter(|e| e.period.is_some()).count()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Take the earliest timer whose deadline is <= `now`.
    /// Ties go to the timer scheduled first.
    pub fn pop_due(&mut self, now: Instant) -> Option<Fired<E>> {
        let ix = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.handle.0))
            .map(|(ix, _)| ix)?;

        match self.entries[ix].period {
            Some(period) => {
                let entry = &mut self.entries[ix];
                let mut at = entry.deadline;
                let behind = now.saturating_duration_since(at);
                if behind > period * MAX_REPLAYED_TICKS {
                    // Jump to the last tick that is due; one sweep covers the gap.
                    let phase = (behind.as_nanos() % period.as_nanos()) as u64;
                    at = now - Duration::from_nanos(phase);
                }
                entry.deadline = at + period;
                Some(Fired { handle: entry.handle, event: entry.event, at })
            }
            None => {
                let entry = self.entries.swap_remove(ix);
                Some(Fired { handle: entry.handle, event: entry.event, at: entry.deadline })
            }
        }
    }

    fn insert(&mut self, deadline: Instant, period: Option<Duration>, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry { handle, event, deadline, period });
        handle
    }
}
