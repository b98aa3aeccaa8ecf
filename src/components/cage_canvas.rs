// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer plumbing for the cage editing surface.
//!
//! The host UI forwards raw pointer and wheel events here; `CageCanvas`
//! runs them through the `Mouse` gesture tracker into the cage tool.
//! Everything completes synchronously before the handler returns.

use crate::editing::{DeformationSession, Mouse, MouseButton, MouseEvent};
use crate::tools::CageTool;
use kurbo::Point;

/// Event handling state for the cage editing surface
#[derive(Debug, Clone, Default)]
pub struct CageCanvas {
    mouse: Mouse,
    tool: CageTool,
}

impl CageCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> &CageTool {
        &self.tool
    }

    /// Pointer pressed at a screen position
    pub fn handle_pointer_down(&mut self, pos: Point, session: &mut DeformationSession) {
        self.mouse
            .mouse_down(MouseEvent::left(pos), &mut self.tool, session);
    }

    /// Pointer moved to a screen position
    pub fn handle_pointer_move(&mut self, pos: Point, session: &mut DeformationSession) {
        self.mouse
            .mouse_moved(MouseEvent::new(pos, None), &mut self.tool, session);
    }

    /// Pointer released, anywhere (including outside the surface)
    pub fn handle_pointer_up(&mut self, pos: Point, session: &mut DeformationSession) {
        self.mouse.mouse_up(
            MouseEvent::new(pos, Some(MouseButton::Left)),
            &mut self.tool,
            session,
        );
    }

    /// Pointer capture lost
    pub fn handle_pointer_cancel(&mut self, session: &mut DeformationSession) {
        self.mouse.cancel(&mut self.tool, session);
    }

    /// Scroll wheel zoom. Independent of any gesture in progress.
    pub fn handle_scroll_zoom(delta_y: f64, session: &mut DeformationSession) {
        session.viewport.zoom_by_wheel(delta_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeformConfig;
    use crate::tools::DragState;
    use kurbo::BezPath;

    fn session() -> DeformationSession {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.curve_to((30.0, -20.0), (70.0, 20.0), (100.0, 0.0));
        path.line_to((100.0, 100.0));
        path.line_to((0.0, 100.0));
        path.close_path();
        DeformationSession::from_bezpath(&path, DeformConfig::default()).unwrap()
    }

    /// Cage with vertices at x=0 and x=12, plus a third vertex to drag
    fn snap_session() -> DeformationSession {
        let mut session = session();
        session
            .replace_cage(vec![
                Point::new(0.0, -50.0),
                Point::new(12.0, 200.0),
                Point::new(150.0, 75.0),
            ])
            .unwrap();
        session
    }

    #[test]
    fn drag_moves_vertex_and_deforms_without_solving() {
        let mut session = session();
        let mut canvas = CageCanvas::new();
        let v0 = session.cage().vertex(0).unwrap();
        let before = session.deformed_points().to_vec();

        canvas.handle_pointer_down(v0, &mut session);
        assert_eq!(canvas.tool().state(), DragState::Dragging { index: 0 });

        canvas.handle_pointer_move(Point::new(-60.0, -45.0), &mut session);
        canvas.handle_pointer_move(Point::new(-70.0, -52.0), &mut session);
        canvas.handle_pointer_up(Point::new(-70.0, -52.0), &mut session);

        assert_eq!(canvas.tool().state(), DragState::Idle);
        assert_eq!(session.cage().vertex(0).unwrap(), Point::new(-70.0, -52.0));
        assert_ne!(session.deformed_points(), &before[..]);
        assert_eq!(session.solve_count(), 1);
    }

    #[test]
    fn drag_snaps_to_first_matching_vertex() {
        let mut session = snap_session();
        let mut canvas = CageCanvas::new();

        canvas.handle_pointer_down(Point::new(150.0, 75.0), &mut session);
        canvas.handle_pointer_move(Point::new(5.0, 75.0), &mut session);
        canvas.handle_pointer_up(Point::new(5.0, 75.0), &mut session);

        assert_eq!(session.cage().vertex(2).unwrap(), Point::new(0.0, 75.0));
    }

    #[test]
    fn zoomed_drag_is_corrected_and_snaps_less() {
        let mut session = snap_session();
        session.viewport.set_zoom(2.0);
        let mut canvas = CageCanvas::new();

        let handle = session.viewport.to_screen(Point::new(150.0, 75.0));
        canvas.handle_pointer_down(handle, &mut session);
        canvas.handle_pointer_move(Point::new(10.0, 150.0), &mut session);
        canvas.handle_pointer_up(Point::new(10.0, 150.0), &mut session);

        // Screen (10, 150) is design (5, 75); threshold is 5, so no snap
        assert_eq!(session.cage().vertex(2).unwrap(), Point::new(5.0, 75.0));
    }

    #[test]
    fn press_on_empty_space_does_nothing() {
        let mut session = session();
        let mut canvas = CageCanvas::new();
        let cage = session.cage().clone();

        canvas.handle_pointer_down(Point::new(50.0, 50.0), &mut session);
        assert!(!canvas.tool().is_dragging());
        canvas.handle_pointer_move(Point::new(80.0, 80.0), &mut session);
        canvas.handle_pointer_up(Point::new(80.0, 80.0), &mut session);

        assert_eq!(session.cage(), &cage);
    }

    #[test]
    fn cancel_ends_drag_and_keeps_applied_moves() {
        let mut session = session();
        let mut canvas = CageCanvas::new();
        let v0 = session.cage().vertex(0).unwrap();

        canvas.handle_pointer_down(v0, &mut session);
        canvas.handle_pointer_move(Point::new(-40.0, -40.0), &mut session);
        canvas.handle_pointer_cancel(&mut session);

        assert_eq!(canvas.tool().state(), DragState::Idle);
        assert_eq!(session.cage().vertex(0).unwrap(), Point::new(-40.0, -40.0));

        // Further movement after the cancel does not drag
        canvas.handle_pointer_move(Point::new(-90.0, -90.0), &mut session);
        assert_eq!(session.cage().vertex(0).unwrap(), Point::new(-40.0, -40.0));
    }

    #[test]
    fn release_far_outside_still_ends_drag() {
        let mut session = session();
        let mut canvas = CageCanvas::new();
        let v0 = session.cage().vertex(0).unwrap();

        canvas.handle_pointer_down(v0, &mut session);
        canvas.handle_pointer_move(Point::new(-30.0, -30.0), &mut session);
        canvas.handle_pointer_up(Point::new(-5000.0, -5000.0), &mut session);

        assert!(!canvas.tool().is_dragging());
        // Release itself does not move the vertex
        assert_eq!(session.cage().vertex(0).unwrap(), Point::new(-30.0, -30.0));
    }

    #[test]
    fn scroll_zoom_changes_hit_radius() {
        let mut session = session();
        CageCanvas::handle_scroll_zoom(1.0, &mut session);
        assert!((session.viewport.zoom - 1.02).abs() < 1e-12);
        assert!(session.viewport.handle_radius() < crate::settings::handles::RADIUS);
    }
}
