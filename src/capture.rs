// Input capture: turns the polled mouse state into drag events and drag
// events into fade points.
// Visual: every time the cursor moves while the button is held (and on the
// first press) a new reveal dot appears under it.

use crate::points::{PointId, PointStore};
use crate::types::Point;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragPhase {
    Began,
    Moved,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragEvent {
    pub location: Point,
    pub phase: DragPhase,
}

/// Builds drag events from per-frame samples of (button down, cursor).
/// Zero minimum distance: the press itself is a drag start.
#[derive(Debug, Default)]
pub struct DragTracker {
    last: Option<Point>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    /// Feed one sample. A held button at an unchanged spot reports nothing.
    pub fn sample(&mut self, pressed: bool, cursor: Option<Point>) -> Option<DragEvent> {
        match (pressed, cursor, self.last) {
            (true, Some(location), None) => {
                self.last = Some(location);
                Some(DragEvent { location, phase: DragPhase::Began })
            }
            (true, Some(location), Some(prev)) if location != prev => {
                self.last = Some(location);
                Some(DragEvent { location, phase: DragPhase::Moved })
            }
            (false, _, Some(prev)) => {
                self.last = None;
                Some(DragEvent { location: cursor.unwrap_or(prev), phase: DragPhase::Ended })
            }
            _ => None,
        }
    }
}

/// Appends a point for every began/moved sample; no debouncing.
#[derive(Debug, Default)]
pub struct InputCapture;

impl InputCapture {
    pub fn apply(&self, event: DragEvent, store: &mut PointStore, now: Instant) -> Option<PointId> {
        match event.phase {
            DragPhase::Began | DragPhase::Moved => Some(store.append(event.location, now)),
            DragPhase::Ended => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_press_starts_drag_without_movement() {
        let mut tracker = DragTracker::new();
        let ev = tracker.sample(true, Some(Point::new(5.0, 5.0))).unwrap();
        assert_eq!(ev.phase, DragPhase::Began);
        assert!(tracker.is_dragging());
    }

    #[test]
    fn test_held_still_reports_nothing() {
        let mut tracker = DragTracker::new();
        tracker.sample(true, Some(Point::new(5.0, 5.0)));
        assert!(tracker.sample(true, Some(Point::new(5.0, 5.0))).is_none());
        let ev = tracker.sample(true, Some(Point::new(6.0, 5.0))).unwrap();
        assert_eq!(ev.phase, DragPhase::Moved);
    }

    #[test]
    fn test_release_ends_drag() {
        let mut tracker = DragTracker::new();
        tracker.sample(true, Some(Point::new(1.0, 1.0)));
        let ev = tracker.sample(false, None).unwrap();
        assert_eq!(ev.phase, DragPhase::Ended);
        assert_eq!(ev.location, Point::new(1.0, 1.0));
        assert!(tracker.sample(false, None).is_none());
    }

    #[test]
    fn test_hover_without_button_is_ignored() {
        let mut tracker = DragTracker::new();
        assert!(tracker.sample(false, Some(Point::new(1.0, 1.0))).is_none());
    }

    #[test]
    fn test_burst_of_moves_appends_one_point_each() {
        let t0 = Instant::now();
        let mut tracker = DragTracker::new();
        let capture = InputCapture;
        let mut store = PointStore::new();

        for i in 0..200 {
            let now = t0 + Duration::from_micros(i * 10);
            if let Some(ev) = tracker.sample(true, Some(Point::new(i as f32, 0.0))) {
                capture.apply(ev, &mut store, now);
            }
        }
        if let Some(ev) = tracker.sample(false, None) {
            assert!(capture.apply(ev, &mut store, t0).is_none());
        }
        assert_eq!(store.len(), 200);
        assert_eq!(store.points()[199].location(), Point::new(199.0, 0.0));
    }
}
