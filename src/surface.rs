// The scratch surface: owns every piece of mutable state for one window session.
// Input, timer firings and rendering all go through `&mut ScratchSurface` from
// the frame loop, so the point store only ever sees one writer at a time.

use crate::capture::{DragEvent, DragTracker, InputCapture};
use crate::config::ScratchConfig;
use crate::decay::{DecayScheduler, DecayStatus};
use crate::points::{PointId, PointStore};
use crate::reset::ResetSequencer;
use crate::reveal;
use crate::timer::{SurfaceTimer, TimerQueue};
use crate::types::{Mask, Point};
use std::time::Instant;
use tracing::debug;

pub struct ScratchSurface {
    config: ScratchConfig,
    store: PointStore,
    timers: TimerQueue<SurfaceTimer>,
    decay: DecayScheduler,
    reset: ResetSequencer,
    tracker: DragTracker,
    capture: InputCapture,
    /// Store revision the mask was last drawn from.
    drawn_revision: Option<u64>,
}

impl ScratchSurface {
    pub fn new(config: ScratchConfig) -> Self {
        Self {
            decay: DecayScheduler::new(config.decay_interval, config.fade_duration),
            reset: ResetSequencer::new(config.reset_step_delay),
            store: PointStore::new(),
            timers: TimerQueue::new(),
            tracker: DragTracker::new(),
            capture: InputCapture,
            drawn_revision: None,
            config,
        }
    }

    /// The surface became visible: decay starts.
    pub fn activate(&mut self, now: Instant) {
        self.decay.start(&mut self.timers, now);
    }

    pub fn config(&self) -> &ScratchConfig {
        &self.config
    }

    pub fn store(&self) -> &PointStore {
        &self.store
    }

    pub fn timers(&self) -> &TimerQueue<SurfaceTimer> {
        &self.timers
    }

    pub fn decay_status(&self) -> DecayStatus {
        self.decay.status()
    }

    pub fn decay_active(&self) -> bool {
        self.decay.is_active()
    }

    pub fn is_resetting(&self) -> bool {
        self.reset.is_resetting()
    }

    /// Whether a reset request would be accepted right now.
    pub fn reset_available(&self) -> bool {
        !self.is_resetting() && !(self.config.reset_requires_paused_decay && self.decay_active())
    }

    /// Flip decay on/off. Returns whether decay is now active.
    pub fn toggle_decay(&mut self, now: Instant) -> bool {
        self.decay.toggle(&mut self.timers, now)
    }

    /// Start a staggered reset. Returns false if the request was gated.
    pub fn request_reset(&mut self, now: Instant) -> bool {
        if !self.reset_available() {
            debug!(resetting = self.is_resetting(), decay = self.decay_active(), "reset request ignored");
            return false;
        }
        self.reset.begin(&self.store, &mut self.timers, now)
    }

    /// Feed one polled mouse sample.
    pub fn pointer(&mut self, pressed: bool, cursor: Option<Point>, now: Instant) -> Option<PointId> {
        let event = self.tracker.sample(pressed, cursor)?;
        self.drag(event, now)
    }

    /// Feed one drag event directly.
    pub fn drag(&mut self, event: DragEvent, now: Instant) -> Option<PointId> {
        self.capture.apply(event, &mut self.store, now)
    }

    /// Run every timer due at `now`, in deadline order. Returns how many fired.
    pub fn advance(&mut self, now: Instant) -> usize {
        let mut fired_count = 0;
        while let Some(fired) = self.timers.pop_due(now) {
            fired_count += 1;
            match fired.event {
                SurfaceTimer::DecayTick => self.decay.on_tick(fired.handle, &mut self.store, fired.at),
                SurfaceTimer::ResetStep => {
                    self.reset.on_step(fired.handle, &mut self.store, &mut self.timers, fired.at);
                }
            }
        }
        fired_count
    }

    /// Redraw the mask if the store changed since the last draw.
    /// Returns true when the mask was rewritten.
    pub fn render_mask(&mut self, mask: &mut Mask) -> bool {
        let revision = self.store.revision();
        if self.drawn_revision == Some(revision) {
            return false;
        }
        reveal::render_mask(self.store.points(), self.config.base_radius, mask);
        self.drawn_revision = Some(revision);
        true
    }

    /// Stop everything. A reset in flight just stops where it is.
    pub fn teardown(&mut self) {
        self.reset.cancel(&mut self.timers);
        self.decay.stop(&mut self.timers);
    }
}
