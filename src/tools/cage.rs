// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Cage tool: drag cage vertices to deform the image.
//!
//! Pressing over a vertex handle starts a drag. Every drag update converts
//! the pointer to design space, snaps it to the other vertices' x and y
//! coordinates, moves the vertex, and re-deforms the image. Releasing or
//! cancelling ends the drag; there is nothing left to commit because every
//! move was already applied.

use crate::editing::{DeformationSession, Drag, MouseDelegate, MouseEvent};

/// Drag state of the cage tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No vertex grabbed
    #[default]
    Idle,
    /// Dragging the vertex at `index`
    Dragging { index: usize },
}

/// The cage tool
#[derive(Debug, Clone, Default)]
pub struct CageTool {
    state: DragState,
}

impl CageTool {
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Index of the vertex being dragged, if any
    pub fn dragged_vertex(&self) -> Option<usize> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { index } => Some(index),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged_vertex().is_some()
    }

    fn drag_to(&mut self, drag: Drag, session: &mut DeformationSession) {
        let Some(index) = self.dragged_vertex() else {
            return;
        };

        let proposed = session.viewport.screen_to_design(drag.current);
        let snapped = session.snap_vertex(index, proposed);
        if let Err(e) = session.set_vertex(index, snapped) {
            // The cage shrank under us; nothing sensible left to drag
            tracing::warn!("Cage tool: dropping drag of vertex {}: {}", index, e);
            self.state = DragState::Idle;
        }
    }
}

impl MouseDelegate for CageTool {
    type Data = DeformationSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut DeformationSession) {
        self.state = match session.hit_test_vertex(event.pos, None) {
            Some(hit) => {
                tracing::debug!("Cage tool: grabbed vertex {}", hit.index);
                DragState::Dragging { index: hit.index }
            }
            None => DragState::Idle,
        };
    }

    fn left_drag_began(&mut self, _event: MouseEvent, drag: Drag, session: &mut DeformationSession) {
        self.drag_to(drag, session);
    }

    fn left_drag_changed(
        &mut self,
        _event: MouseEvent,
        drag: Drag,
        session: &mut DeformationSession,
    ) {
        self.drag_to(drag, session);
    }

    fn left_up(&mut self, _event: MouseEvent, _session: &mut DeformationSession) {
        if let DragState::Dragging { index } = self.state {
            tracing::debug!("Cage tool: released vertex {}", index);
        }
        self.state = DragState::Idle;
    }

    fn cancel(&mut self, _session: &mut DeformationSession) {
        self.state = DragState::Idle;
        tracing::debug!("Cage tool: cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeformConfig;
    use kurbo::{BezPath, Point};

    fn session() -> DeformationSession {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));
        path.line_to((50.0, 80.0));
        path.close_path();
        DeformationSession::from_bezpath(&path, DeformConfig::default()).unwrap()
    }

    fn drag(start: Point, current: Point) -> Drag {
        Drag {
            start,
            prev: start,
            current,
        }
    }

    #[test]
    fn left_down_picks_nearest_vertex() {
        let mut session = session();
        let mut tool = CageTool::default();
        let v5 = session.cage().vertex(5).unwrap();

        tool.left_down(MouseEvent::left(v5 + kurbo::Vec2::new(2.0, 1.0)), &mut session);
        assert_eq!(tool.dragged_vertex(), Some(5));

        tool.left_up(MouseEvent::left(v5), &mut session);
        assert_eq!(tool.state(), DragState::Idle);
    }

    #[test]
    fn drag_without_grab_changes_nothing() {
        let mut session = session();
        let mut tool = CageTool::default();
        let cage = session.cage().clone();

        let event = MouseEvent::left(Point::new(300.0, 300.0));
        tool.left_drag_changed(event, drag(Point::ZERO, event.pos), &mut session);
        assert_eq!(session.cage(), &cage);
    }

    #[test]
    fn drag_of_vanished_vertex_returns_to_idle() {
        let mut session = session();
        let mut tool = CageTool::default();
        let v10 = session.cage().vertex(10).unwrap();
        tool.left_down(MouseEvent::left(v10), &mut session);
        assert_eq!(tool.dragged_vertex(), Some(10));

        session
            .replace_cage(vec![
                Point::new(-10.0, -10.0),
                Point::new(-10.0, 100.0),
                Point::new(120.0, 50.0),
            ])
            .unwrap();

        let event = MouseEvent::left(Point::new(400.0, 400.0));
        tool.left_drag_changed(event, drag(v10, event.pos), &mut session);
        assert_eq!(tool.state(), DragState::Idle);
        assert_eq!(session.cage().len(), 3);
    }
}
