// Fade points and the ordered store that holds the live ones.
// A point is where the pointer touched and when. Identity is the id alone:
// two points at the same spot and instant are still different points.

use crate::types::Point;
use std::time::{Duration, Instant};

/// Opaque point identity. Handed out by a [`PointStore`], never reused by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(u64);

/// One revealed spot. Location and timestamp are fixed once created.
#[derive(Clone, Debug)]
pub struct FadePoint {
    id: PointId,
    location: Point,
    timestamp: Instant,
}

impl FadePoint {
    pub fn id(&self) -> PointId {
        self.id
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// Age at `now`; zero if `now` precedes the timestamp.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.timestamp)
    }

    /// Strictly older than `fade_duration`.
    pub fn is_expired(&self, now: Instant, fade_duration: Duration) -> bool {
        self.age(now) > fade_duration
    }
}

impl PartialEq for FadePoint {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FadePoint {}

/// Insertion-ordered live points.
///
/// Append is amortized O(1); eviction is a linear, order-preserving sweep.
/// Every mutation bumps `revision` so the renderer knows to redraw.
#[derive(Debug, Default)]
pub struct PointStore {
    points: Vec<FadePoint>,
    next_id: u64,
    revision: u64,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a point at the end and return its fresh id.
    pub fn append(&mut self, location: Point, now: Instant) -> PointId {
        let id = PointId(self.next_id);
        self.next_id += 1;
        self.points.push(FadePoint { id, location, timestamp: now });
        self.revision += 1;
        id
    }

    /// Drop every point whose age is strictly greater than `fade_duration`.
    /// Returns how many were removed.
    pub fn evict_expired(&mut self, now: Instant, fade_duration: Duration) -> usize {
        let before = self.points.len();
        self.points.retain(|p| !p.is_expired(now, fade_duration));
        let removed = before - self.points.len();
        if removed > 0 {
            self.revision += 1;
        }
        removed
    }

    /// Remove the point with this id. Absent ids are a no-op (returns false).
    pub fn remove_by_id(&mut self, id: PointId) -> bool {
        match self.points.iter().position(|p| p.id == id) {
            Some(ix) => {
                self.points.remove(ix);
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    pub fn clear_all(&mut self) {
        if !self.points.is_empty() {
            self.points.clear();
            self.revision += 1;
        }
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.points.iter().any(|p| p.id == id)
    }

    /// Live points in insertion order.
    pub fn points(&self) -> &[FadePoint] {
        &self.points
    }

    /// Ids in insertion order (what the reset drain snapshots).
    pub fn snapshot_ids(&self) -> Vec<PointId> {
        self.points.iter().map(|p| p.id).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Changes on every mutation; equal revisions mean identical contents.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
