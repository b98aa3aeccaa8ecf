// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Mouse gesture tracking.
//!
//! `Mouse` turns raw pointer down/move/up events into higher level calls on
//! a `MouseDelegate`: clicks, drag begin/change/end, and cancellation.
//! Tools implement `MouseDelegate` and only see the gestures they care
//! about.

use kurbo::Point;

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A pointer event in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// Pointer position (screen space)
    pub pos: Point,

    /// Button that changed state, if any
    pub button: Option<MouseButton>,
}

impl MouseEvent {
    pub fn new(pos: Point, button: Option<MouseButton>) -> Self {
        Self { pos, button }
    }

    /// A left-button event at `pos`
    pub fn left(pos: Point) -> Self {
        Self::new(pos, Some(MouseButton::Left))
    }
}

/// An in-progress drag (screen coordinates)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    /// Where the button went down
    pub start: Point,

    /// Position at the previous event
    pub prev: Point,

    /// Current position
    pub current: Point,
}

/// Receiver of mouse gestures
#[allow(unused_variables)]
pub trait MouseDelegate {
    /// State the delegate edits
    type Data;

    fn left_down(&mut self, event: MouseEvent, data: &mut Self::Data) {}

    fn left_up(&mut self, event: MouseEvent, data: &mut Self::Data) {}

    fn left_click(&mut self, event: MouseEvent, data: &mut Self::Data) {}

    fn left_drag_began(&mut self, event: MouseEvent, drag: Drag, data: &mut Self::Data) {}

    fn left_drag_changed(&mut self, event: MouseEvent, drag: Drag, data: &mut Self::Data) {}

    fn left_drag_ended(&mut self, event: MouseEvent, drag: Drag, data: &mut Self::Data) {}

    fn mouse_moved(&mut self, event: MouseEvent, data: &mut Self::Data) {}

    /// The gesture was abandoned (pointer released outside the surface,
    /// focus lost, ...)
    fn cancel(&mut self, data: &mut Self::Data);
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum MouseState {
    /// No button held
    #[default]
    Up,
    /// Left button held, not moved yet
    Down(MouseEvent),
    /// Left button held and moved
    Drag(Drag),
}

/// Pointer state machine feeding a `MouseDelegate`
#[derive(Debug, Clone, Default)]
pub struct Mouse {
    state: MouseState,
}

impl Mouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the left button is held
    pub fn is_down(&self) -> bool {
        !matches!(self.state, MouseState::Up)
    }

    /// True while a drag is in progress
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, MouseState::Drag(_))
    }

    pub fn mouse_down<T: MouseDelegate>(
        &mut self,
        event: MouseEvent,
        delegate: &mut T,
        data: &mut T::Data,
    ) {
        if event.button != Some(MouseButton::Left) {
            return;
        }
        self.state = MouseState::Down(event);
        delegate.left_down(event, data);
    }

    pub fn mouse_moved<T: MouseDelegate>(
        &mut self,
        event: MouseEvent,
        delegate: &mut T,
        data: &mut T::Data,
    ) {
        match self.state {
            MouseState::Up => delegate.mouse_moved(event, data),
            MouseState::Down(down) => {
                let drag = Drag {
                    start: down.pos,
                    prev: down.pos,
                    current: event.pos,
                };
                self.state = MouseState::Drag(drag);
                delegate.left_drag_began(event, drag, data);
            }
            MouseState::Drag(prev) => {
                let drag = Drag {
                    start: prev.start,
                    prev: prev.current,
                    current: event.pos,
                };
                self.state = MouseState::Drag(drag);
                delegate.left_drag_changed(event, drag, data);
            }
        }
    }

    pub fn mouse_up<T: MouseDelegate>(
        &mut self,
        event: MouseEvent,
        delegate: &mut T,
        data: &mut T::Data,
    ) {
        if event.button != Some(MouseButton::Left) {
            return;
        }
        match std::mem::take(&mut self.state) {
            MouseState::Up => return,
            MouseState::Down(_) => delegate.left_click(event, data),
            MouseState::Drag(drag) => {
                let drag = Drag {
                    start: drag.start,
                    prev: drag.current,
                    current: event.pos,
                };
                delegate.left_drag_ended(event, drag, data);
            }
        }
        delegate.left_up(event, data);
    }

    /// Abandon the current gesture
    pub fn cancel<T: MouseDelegate>(&mut self, delegate: &mut T, data: &mut T::Data) {
        if self.is_down() {
            self.state = MouseState::Up;
            delegate.cancel(data);
        }
    }
}
