// Reveal mask: turns the live fade points into a coverage mask.
// Visual expectation: each point is a soft white dot of fixed size (solid
// middle, fading toward its rim); overlapping dots merge without getting
// brighter. Later dots in a frame fade a little slower, so they look denser.
use crate::points::FadePoint;
use crate::types::{Mask, Point};

/// What the render surface draws for one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealCircle {
    pub center: Point,
    pub clip_radius: f32,  // nothing is drawn beyond this
    pub outer_radius: f32, // the gradient would reach 0 here
}

/// Circle descriptors for a snapshot, in draw order.
/// Every dot is clipped to `base_radius`; the gradient of the i-th point (by
/// position in this snapshot) ends at `base_radius + i + 1`.
pub fn circles(points: &[FadePoint], base_radius: f32) -> impl Iterator<Item = RevealCircle> + '_ {
    points.iter().enumerate().map(move |(ix, p)| RevealCircle {
        center: p.location(),
        clip_radius: base_radius,
        outer_radius: base_radius + (ix + 1) as f32,
    })
}

/// Radial gradient coverage at distance `d` from the center: 1 at the
/// center, falling linearly to 0 at `outer_radius`.
#[inline]
fn gradient_coverage(d: f32, outer_radius: f32) -> f32 {
    if d >= outer_radius { 0.0 } else { 1.0 - d / outer_radius }
}

/// Union one circle into the mask (max, never add).
/// Visual: the dot appears; where it overlaps older dots the stronger one wins.
pub fn fill_circle(mask: &mut Mask, circle: RevealCircle) {
    let outer = circle.outer_radius;
    let r = circle.clip_radius.min(outer);
    if r.is_nan() || r <= 0.0 {
        return;
    }
    let (cx, cy) = (circle.center.x, circle.center.y);

    // Scan only the bounding box, clipped to the mask.
    let x0 = (cx - r).floor().max(0.0) as usize;
    let y0 = (cy - r).floor().max(0.0) as usize;
    let x1 = ((cx + r).ceil().min(mask.width as f32 - 1.0)).max(-1.0);
    let y1 = ((cy + r).ceil().min(mask.height as f32 - 1.0)).max(-1.0);
    if x1 < 0.0 || y1 < 0.0 {
        return; // entirely left of or above the mask
    }
    let (x1, y1) = (x1 as usize, y1 as usize);

    for y in y0..=y1 {
        let row = y * mask.width;
        // Sample at pixel centers.
        let dy = y as f32 + 0.5 - cy;
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            let d = (dx * dx + dy * dy).sqrt();
            if d > r {
                continue;
            }
            let a = gradient_coverage(d, outer);
            if a <= 0.0 {
                continue;
            }
            let slot = &mut mask.alpha[row + x];
            if a > *slot {
                *slot = a;
            }
        }
    }
}

/// Rebuild the whole mask from a snapshot of the store.
/// Pure with respect to the points; only the mask is written.
pub fn render_mask(points: &[FadePoint], base_radius: f32, mask: &mut Mask) {
    mask.clear();
    for circle in circles(points, base_radius) {
        fill_circle(mask, circle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::PointStore;
    use std::time::Instant;

    fn store_with(points: &[(f32, f32)]) -> PointStore {
        let now = Instant::now();
        let mut store = PointStore::new();
        for &(x, y) in points {
            store.append(Point::new(x, y), now);
        }
        store
    }

    #[test]
    fn test_radius_grows_with_snapshot_position() {
        let store = store_with(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        let radii: Vec<f32> = circles(store.points(), 35.0).map(|c| c.outer_radius).collect();
        assert_eq!(radii, vec![36.0, 37.0, 38.0]);
    }

    #[test]
    fn test_radius_index_is_per_snapshot_not_global() {
        let mut store = store_with(&[(0.0, 0.0), (1.0, 1.0)]);
        let first = store.points()[0].id();
        store.remove_by_id(first);
        let radii: Vec<f32> = circles(store.points(), 35.0).map(|c| c.outer_radius).collect();
        assert_eq!(radii, vec![36.0]);
    }

    #[test]
    fn test_every_dot_is_clipped_to_base_radius() {
        let store = store_with(&[(50.5, 50.5)]);
        let clips: Vec<f32> = circles(store.points(), 35.0).map(|c| c.clip_radius).collect();
        assert_eq!(clips, vec![35.0]);
    }

    #[test]
    fn test_long_drag_does_not_grow_dots() {
        let spot = vec![(50.5, 50.5); 600];
        let store = store_with(&spot);
        let last = circles(store.points(), 35.0).last().unwrap();
        assert_eq!(last.outer_radius, 635.0);

        let mut mask = Mask::new(640, 480);
        render_mask(store.points(), 35.0, &mut mask);

        // Just inside the clip the wide gradient is still strong.
        assert!(mask.at(50 + 34, 50) > 0.9);
        // Nothing reaches past base_radius.
        assert_eq!(mask.at(50 + 36, 50), 0.0);
        assert_eq!(mask.at(50, 50 + 36), 0.0);
        let revealed = mask.alpha.iter().filter(|&&a| a > 0.0).count();
        assert!(revealed < 4_000, "revealed {revealed} px");
    }

    #[test]
    fn test_center_opaque_rim_transparent() {
        let store = store_with(&[(50.5, 50.5)]);
        let mut mask = Mask::new(100, 100);
        render_mask(store.points(), 35.0, &mut mask);

        assert!((mask.at(50, 50) - 1.0).abs() < 1e-6);
        assert!(mask.at(50 + 20, 50) > 0.0 && mask.at(50 + 20, 50) < 1.0);
        // Clipped at 35: nothing past it.
        assert_eq!(mask.at(50 + 36, 50), 0.0);
        assert_eq!(mask.at(0, 0), 0.0);
    }

    #[test]
    fn test_overlap_is_union_not_additive() {
        let store = store_with(&[(50.5, 50.5), (50.5, 50.5)]);
        let mut mask = Mask::new(100, 100);
        render_mask(store.points(), 35.0, &mut mask);

        assert!(mask.alpha.iter().all(|&a| a <= 1.0));
        // Second dot (radius 37) dominates; equals single-dot coverage at radius 37.
        let expected = 1.0 - 10.0 / 37.0;
        assert!((mask.at(60, 50) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_points_outside_mask_are_clipped() {
        let store = store_with(&[(-500.0, -500.0), (5_000.0, 20.0), (-10.0, 20.0)]);
        let mut mask = Mask::new(64, 48);
        render_mask(store.points(), 35.0, &mut mask);

        // Far-away dots touch nothing; the one just off the left edge bleeds in.
        assert_eq!(mask.at(63, 20), 0.0);
        assert!(mask.at(0, 20) > 0.0);
    }

    #[test]
    fn test_render_clears_previous_frame() {
        let store = store_with(&[(10.0, 10.0)]);
        let mut mask = Mask::new(32, 32);
        render_mask(store.points(), 35.0, &mut mask);
        assert!(mask.at(10, 10) > 0.0);

        render_mask(&[], 35.0, &mut mask);
        assert!(mask.alpha.iter().all(|&a| a == 0.0));
    }
}
