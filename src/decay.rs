// Decay scheduler: a recurring sweep that evicts expired fade points.
// Status and timer handle are stored separately but move together:
// `handle.is_some()` exactly when `status != Stopped`.
// Visual: a scratch stays open for a quarter second, then closes over.

use crate::points::PointStore;
use crate::timer::{SurfaceTimer, TimerHandle, TimerQueue};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecayStatus {
    /// No timer.
    Stopped,
    /// Timer scheduled, first sweep not yet run.
    Starting,
    /// At least one sweep has run.
    Running,
}

#[derive(Debug)]
pub struct DecayScheduler {
    status: DecayStatus,
    handle: Option<TimerHandle>,
    interval: Duration,
    fade_duration: Duration,
}

impl DecayScheduler {
    pub fn new(interval: Duration, fade_duration: Duration) -> Self {
        Self { status: DecayStatus::Stopped, handle: None, interval, fade_duration }
    }

    pub fn status(&self) -> DecayStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status != DecayStatus::Stopped
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.handle
    }

    pub fn fade_duration(&self) -> Duration {
        self.fade_duration
    }

    /// Schedule the recurring sweep. Already active: no-op.
    pub fn start(&mut self, timers: &mut TimerQueue<SurfaceTimer>, now: Instant) {
        if self.is_active() {
            return;
        }
        let handle = timers.schedule_repeating(now + self.interval, self.interval, SurfaceTimer::DecayTick);
        self.handle = Some(handle);
        self.status = DecayStatus::Starting;
        info!(interval_us = self.interval.as_micros() as u64, "decay started");
    }

    /// Cancel the sweep and forget the handle. Already stopped: no-op.
    pub fn stop(&mut self, timers: &mut TimerQueue<SurfaceTimer>) {
        if let Some(handle) = self.handle.take() {
            timers.cancel(handle);
            info!("decay stopped");
        }
        self.status = DecayStatus::Stopped;
    }

    /// Flip between stopped and active. Returns whether decay is now active.
    pub fn toggle(&mut self, timers: &mut TimerQueue<SurfaceTimer>, now: Instant) -> bool {
        if self.is_active() {
            self.stop(timers);
        } else {
            self.start(timers, now);
        }
        self.is_active()
    }

    /// One sweep, run when our timer fires. Stale firings (a handle we no
    /// longer own) are ignored.
    pub fn on_tick(&mut self, handle: TimerHandle, store: &mut PointStore, at: Instant) {
        if self.handle != Some(handle) {
            return;
        }
        self.status = DecayStatus::Running;
        let removed = store.evict_expired(at, self.fade_duration);
        if removed > 0 {
            debug!(removed, remaining = store.len(), "evicted expired points");
        }
    }
}
