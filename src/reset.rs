// Staggered reset: wipe the current points away one at a time.
// The drain is a small state machine. `begin` snapshots the store's ids and
// schedules step 0; each step removes one snapshot id and schedules the next
// `step_delay` later. Points appended after `begin` are not in the snapshot.
// Visual: the scratches close up oldest first, in a quick ripple.

use crate::points::{PointId, PointStore};
use crate::timer::{SurfaceTimer, TimerHandle, TimerQueue};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetPhase {
    Idle,
    /// Waiting for the delay before removing `snapshot[next]`.
    Awaiting { next: usize, handle: TimerHandle },
}

#[derive(Debug)]
pub struct ResetSequencer {
    phase: ResetPhase,
    snapshot: Vec<PointId>,
    step_delay: Duration,
}

impl ResetSequencer {
    pub fn new(step_delay: Duration) -> Self {
        Self { phase: ResetPhase::Idle, snapshot: Vec::new(), step_delay }
    }

    pub fn phase(&self) -> ResetPhase {
        self.phase
    }

    /// True only while a drain is in progress.
    pub fn is_resetting(&self) -> bool {
        self.phase != ResetPhase::Idle
    }

    /// Snapshot ids not yet removed (including the one currently awaited).
    pub fn remaining(&self) -> &[PointId] {
        match self.phase {
            ResetPhase::Idle => &[],
            ResetPhase::Awaiting { next, .. } => &self.snapshot[next..],
        }
    }

    /// Start draining. Returns false when a drain is already running.
    /// An empty store completes on the spot with no timer.
    pub fn begin(&mut self, store: &PointStore, timers: &mut TimerQueue<SurfaceTimer>, now: Instant) -> bool {
        if self.is_resetting() {
            return false;
        }
        self.snapshot = store.snapshot_ids();
        if self.snapshot.is_empty() {
            // true -> false with nothing in between collapses to never being set
            debug!("reset on empty store finished immediately");
            return true;
        }
        info!(points = self.snapshot.len(), "reset started");
        let handle = timers.schedule_once(now + self.step_delay, SurfaceTimer::ResetStep);
        self.phase = ResetPhase::Awaiting { next: 0, handle };
        true
    }

    /// One drain step, run when our one-shot fires at `at`.
    /// Returns the id removed by this step, if it was still live.
    pub fn on_step(
        &mut self,
        handle: TimerHandle,
        store: &mut PointStore,
        timers: &mut TimerQueue<SurfaceTimer>,
        at: Instant,
    ) -> Option<PointId> {
        let ResetPhase::Awaiting { next, handle: expected } = self.phase else {
            return None;
        };
        if handle != expected {
            return None;
        }

        let id = self.snapshot[next];
        let removed = store.remove_by_id(id);

        let next = next + 1;
        if next < self.snapshot.len() {
            let handle = timers.schedule_once(at + self.step_delay, SurfaceTimer::ResetStep);
            self.phase = ResetPhase::Awaiting { next, handle };
        } else {
            info!(points = self.snapshot.len(), "reset finished");
            self.phase = ResetPhase::Idle;
            self.snapshot.clear();
        }
        removed.then_some(id)
    }

    /// Silent teardown: the pending step never runs, leftover points stay.
    pub fn cancel(&mut self, timers: &mut TimerQueue<SurfaceTimer>) {
        if let ResetPhase::Awaiting { next, handle } = self.phase {
            timers.cancel(handle);
            debug!(left = self.snapshot.len() - next, "reset cancelled");
        }
        self.phase = ResetPhase::Idle;
        self.snapshot.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    const STEP: Duration = Duration::from_micros(7_500);

    fn us(n: u64) -> Duration {
        Duration::from_micros(n)
    }

    /// Run every due step up to `now`, returning (id, time) for each removal.
    fn run_due(
        reset: &mut ResetSequencer,
        store: &mut PointStore,
        timers: &mut TimerQueue<SurfaceTimer>,
        now: Instant,
    ) -> Vec<(PointId, Instant)> {
        let mut removed = Vec::new();
        while let Some(fired) = timers.pop_due(now) {
            if let Some(id) = reset.on_step(fired.handle, store, timers, fired.at) {
                removed.push((id, fired.at));
            }
        }
        removed
    }

    #[test]
    fn test_empty_store_completes_immediately() {
        let t0 = Instant::now();
        let store = PointStore::new();
        let mut timers = TimerQueue::new();
        let mut reset = ResetSequencer::new(STEP);

        assert!(reset.begin(&store, &mut timers, t0));
        assert!(!reset.is_resetting());
        assert!(timers.is_empty());
    }

    #[test]
    fn test_removes_in_order_with_fixed_spacing() {
        let t0 = Instant::now();
        let mut store = PointStore::new();
        let mut timers = TimerQueue::new();
        let mut reset = ResetSequencer::new(STEP);

        let a = store.append(Point::new(0.0, 0.0), t0);
        let b = store.append(Point::new(1.0, 0.0), t0);
        let c = store.append(Point::new(2.0, 0.0), t0);

        reset.begin(&store, &mut timers, t0);
        assert!(reset.is_resetting());
        assert!(matches!(reset.phase(), ResetPhase::Awaiting { next: 0, .. }));

        let d = store.append(Point::new(3.0, 0.0), t0 + us(3_000));

        let removed = run_due(&mut reset, &mut store, &mut timers, t0 + us(100_000));
        assert_eq!(
            removed,
            vec![(a, t0 + STEP), (b, t0 + STEP * 2), (c, t0 + STEP * 3)]
        );
        assert_eq!(reset.phase(), ResetPhase::Idle);
        assert_eq!(store.snapshot_ids(), vec![d]);
    }

    #[test]
    fn test_steps_wait_for_delay() {
        let t0 = Instant::now();
        let mut store = PointStore::new();
        let mut timers = TimerQueue::new();
        let mut reset = ResetSequencer::new(STEP);
        store.append(Point::new(0.0, 0.0), t0);
        store.append(Point::new(0.0, 0.0), t0);

        reset.begin(&store, &mut timers, t0);
        assert!(run_due(&mut reset, &mut store, &mut timers, t0 + us(7_499)).is_empty());
        assert_eq!(run_due(&mut reset, &mut store, &mut timers, t0 + us(7_500)).len(), 1);
        assert_eq!(store.len(), 1);
        assert!(reset.is_resetting());
        assert_eq!(reset.remaining().len(), 1);
    }

    #[test]
    fn test_step_count_matches_snapshot_even_if_points_vanish() {
        let t0 = Instant::now();
        let mut store = PointStore::new();
        let mut timers = TimerQueue::new();
        let mut reset = ResetSequencer::new(STEP);
        let ids: Vec<_> = (0..4).map(|i| store.append(Point::new(i as f32, 0.0), t0)).collect();

        reset.begin(&store, &mut timers, t0);
        // Decay got to one of them first.
        store.remove_by_id(ids[1]);

        let mut steps = 0;
        while let Some(fired) = timers.pop_due(t0 + Duration::from_secs(1)) {
            reset.on_step(fired.handle, &mut store, &mut timers, fired.at);
            steps += 1;
        }
        assert_eq!(steps, 4);
        assert!(store.is_empty());
        assert!(!reset.is_resetting());
    }

    #[test]
    fn test_second_begin_is_rejected_while_running() {
        let t0 = Instant::now();
        let mut store = PointStore::new();
        let mut timers = TimerQueue::new();
        let mut reset = ResetSequencer::new(STEP);
        store.append(Point::new(0.0, 0.0), t0);

        assert!(reset.begin(&store, &mut timers, t0));
        assert!(!reset.begin(&store, &mut timers, t0));
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn test_cancel_leaves_remaining_points() {
        let t0 = Instant::now();
        let mut store = PointStore::new();
        let mut timers = TimerQueue::new();
        let mut reset = ResetSequencer::new(STEP);
        for i in 0..3 {
            store.append(Point::new(i as f32, 0.0), t0);
        }

        reset.begin(&store, &mut timers, t0);
        run_due(&mut reset, &mut store, &mut timers, t0 + STEP);
        reset.cancel(&mut timers);

        assert!(!reset.is_resetting());
        assert!(timers.is_empty());
        assert_eq!(store.len(), 2);
        assert!(run_due(&mut reset, &mut store, &mut timers, t0 + Duration::from_secs(1)).is_empty());
    }
}
