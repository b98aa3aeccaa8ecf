// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Hit testing and snapping methods for DeformationSession

use super::DeformationSession;
use crate::editing::hit_test::{self, HitTestResult};
use kurbo::Point;

/// Snap a proposed vertex position to the coordinates of other vertices.
///
/// Each axis is handled on its own: x takes the x of the first vertex (in
/// cage order, skipping `exclude`) whose x is closer than `threshold`, and
/// likewise for y.
pub fn snap_to_vertices(
    proposed: Point,
    vertices: &[Point],
    exclude: usize,
    threshold: f64,
) -> Point {
    let mut x = None;
    let mut y = None;
    for (i, v) in vertices.iter().enumerate() {
        if i == exclude {
            continue;
        }
        if x.is_none() && (proposed.x - v.x).abs() < threshold {
            x = Some(v.x);
        }
        if y.is_none() && (proposed.y - v.y).abs() < threshold {
            y = Some(v.y);
        }
    }

    Point::new(x.unwrap_or(proposed.x), y.unwrap_or(proposed.y))
}

impl DeformationSession {
    /// Hit test the cage vertex handles at a screen position
    ///
    /// Returns the closest vertex within `max_dist` screen pixels (the
    /// configured hit radius by default).
    pub fn hit_test_vertex(&self, screen_pos: Point, max_dist: Option<f64>) -> Option<HitTestResult> {
        let max_dist = max_dist.unwrap_or(self.config.hit_radius);
        let candidates = self
            .cage
            .vertices()
            .iter()
            .enumerate()
            .map(|(i, v)| (i, self.viewport.to_screen(*v)));

        let result = hit_test::find_closest(screen_pos, candidates, max_dist);
        match result {
            Some(hit) => tracing::debug!(
                "[hit_test_vertex] hit vertex {} at distance {:.2}",
                hit.index,
                hit.distance
            ),
            None => tracing::debug!("[hit_test_vertex] no vertex near {:?}", screen_pos),
        }
        result
    }

    /// Snap distance in design units at the current zoom
    pub fn snap_threshold(&self) -> f64 {
        self.viewport
            .screen_distance_to_design(self.config.snap_distance)
    }

    /// Snap a proposed position for vertex `index` to the other vertices
    pub fn snap_vertex(&self, index: usize, proposed: Point) -> Point {
        snap_to_vertices(proposed, self.cage.vertices(), index, self.snap_threshold())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::session;
    use super::*;

    fn snap_cage() -> Vec<Point> {
        vec![
            Point::new(0.0, 100.0),
            Point::new(12.0, 200.0),
            Point::new(40.0, 300.0),
        ]
    }

    #[test]
    fn first_match_wins_at_zoom_one() {
        // Both x=0 and x=12 are within 10; vertex 0 comes first
        let snapped = snap_to_vertices(Point::new(5.0, 500.0), &snap_cage(), 2, 10.0 / 1.0);
        assert_eq!(snapped, Point::new(0.0, 500.0));
    }

    #[test]
    fn zoomed_in_threshold_does_not_snap() {
        let snapped = snap_to_vertices(Point::new(5.0, 500.0), &snap_cage(), 2, 10.0 / 2.0);
        assert_eq!(snapped, Point::new(5.0, 500.0));
    }

    #[test]
    fn axes_snap_independently() {
        let snapped = snap_to_vertices(Point::new(14.0, 104.0), &snap_cage(), 2, 10.0);
        // x snaps to vertex 1, y to vertex 0
        assert_eq!(snapped, Point::new(12.0, 100.0));
    }

    #[test]
    fn vertex_never_snaps_to_itself() {
        let cage = snap_cage();
        let snapped = snap_to_vertices(Point::new(41.0, 301.0), &cage, 2, 10.0);
        assert_eq!(snapped, Point::new(41.0, 301.0));
    }

    #[test]
    fn session_threshold_follows_zoom() {
        let mut session = session();
        assert_eq!(session.snap_threshold(), 10.0);
        session.viewport.set_zoom(2.0);
        assert_eq!(session.snap_threshold(), 5.0);
    }

    #[test]
    fn hit_test_uses_screen_space() {
        let mut session = session();
        let v3 = session.cage().vertex(3).unwrap();

        let hit = session.hit_test_vertex(v3 + kurbo::Vec2::new(3.0, 0.0), None).unwrap();
        assert_eq!(hit.index, 3);

        // At zoom 4 the same design-space offset is 12 screen pixels
        session.viewport.set_zoom(4.0);
        let screen = session.viewport.to_screen(v3 + kurbo::Vec2::new(3.0, 0.0));
        assert!(session.hit_test_vertex(screen, None).is_none());
    }
}
