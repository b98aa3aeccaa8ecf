// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Viewport: maps between screen pixels and design-space units.
//!
//! `screen = design * zoom + offset`. Zoom only affects interaction (hit
//! radii, snap distance); the deformation itself works in design space.

use crate::settings;
use kurbo::{Point, Vec2};

/// Zoom scale and pan offset of the editing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPort {
    /// Screen pixels per design unit
    pub zoom: f64,

    /// Screen position of the design-space origin
    pub offset: Vec2,
}

impl ViewPort {
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            offset: Vec2::ZERO,
        }
    }

    /// Convert a screen position to design space
    pub fn screen_to_design(&self, screen: Point) -> Point {
        ((screen - self.offset).to_vec2() / self.zoom).to_point()
    }

    /// Convert a design-space position to screen space
    pub fn to_screen(&self, design: Point) -> Point {
        (design.to_vec2() * self.zoom + self.offset).to_point()
    }

    /// Set the zoom, clamped to the editor limits
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(settings::editor::MIN_ZOOM, settings::editor::MAX_ZOOM);
    }

    /// Step the zoom for one wheel notch.
    ///
    /// Positive `delta_y` zooms in, negative zooms out; zero is ignored.
    pub fn zoom_by_wheel(&mut self, delta_y: f64) {
        let step = settings::editor::WHEEL_ZOOM_STEP;
        if delta_y > 0.0 {
            self.set_zoom(self.zoom + step);
        } else if delta_y < 0.0 {
            self.set_zoom(self.zoom - step);
        }
        tracing::debug!("Wheel zoom: delta_y={:.2}, zoom={:.2}", delta_y, self.zoom);
    }

    /// Convert a screen-pixel distance to design units
    pub fn screen_distance_to_design(&self, distance: f64) -> f64 {
        distance / self.zoom
    }

    /// Handle radius in design units, so handles keep a constant on-screen
    /// size
    pub fn handle_radius(&self) -> f64 {
        self.screen_distance_to_design(settings::handles::RADIUS)
    }
}

impl Default for ViewPort {
    fn default() -> Self {
        Self::new()
    }
}
