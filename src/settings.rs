// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Tunable constants for the deformation engine.
//!
//! Values are grouped by concern below and re-exported through the public
//! sub-modules at the bottom of the file. Runtime overrides for a subset of
//! these live in `config::DeformConfig`.

// ============================================================================
// EDITOR SETTINGS
// ============================================================================
/// Minimum zoom level (2% of original size)
const MIN_ZOOM: f64 = 0.02;

/// Maximum zoom level (50x original size)
const MAX_ZOOM: f64 = 50.0;

/// Zoom change per wheel notch
const WHEEL_ZOOM_STEP: f64 = 0.02;

// ============================================================================
// HANDLE SETTINGS
// ============================================================================
/// Radius of a cage vertex handle in screen pixels.
///
/// Also used as the hit radius when picking a vertex to drag.
const HANDLE_RADIUS: f64 = 6.0;

// ============================================================================
// SNAP SETTINGS
// ============================================================================
/// Distance (screen pixels) within which a dragged vertex snaps to the x or
/// y coordinate of another cage vertex. Divided by zoom before use.
const SNAP_DISTANCE: f64 = 10.0;

// ============================================================================
// SAMPLING SETTINGS
// ============================================================================
/// Pieces per path segment at the lowest density.
///
/// Medium doubles this, high quadruples it.
const BASE_SUBDIVISIONS: usize = 4;

// ============================================================================
// CAGE SETTINGS
// ============================================================================
/// Default target number of boundary vertices for a generated cage
const DEFAULT_COMPLEXITY: usize = 12;

/// Smallest complexity accepted by the rectangle generator
const MIN_COMPLEXITY: usize = 3;

/// Padding added around a path's bounding box before generating a cage,
/// as a fraction of the box's larger side
const FRAME_MARGIN: f64 = 0.05;

/// Distance below which a point is considered to sit on a cage vertex
const COINCIDENCE_EPSILON: f64 = 1e-12;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Editor settings (zoom)
pub mod editor {
    /// Minimum zoom level (2% of original size)
    pub const MIN_ZOOM: f64 = super::MIN_ZOOM;

    /// Maximum zoom level (50x original size)
    pub const MAX_ZOOM: f64 = super::MAX_ZOOM;

    /// Zoom change per wheel notch
    pub const WHEEL_ZOOM_STEP: f64 = super::WHEEL_ZOOM_STEP;
}

/// Cage vertex handle settings
pub mod handles {
    /// Handle radius in screen pixels
    pub const RADIUS: f64 = super::HANDLE_RADIUS;

    /// Hit radius in screen pixels
    pub const HIT_RADIUS: f64 = super::HANDLE_RADIUS;
}

/// Vertex-to-vertex snapping during drags
pub mod snap {
    /// Snap distance in screen pixels
    pub const DISTANCE: f64 = super::SNAP_DISTANCE;
}

/// Path sampling settings
pub mod sampling {
    /// Pieces per segment at low density
    pub const BASE_SUBDIVISIONS: usize = super::BASE_SUBDIVISIONS;
}

/// Cage generation and solver settings
pub mod cage {
    /// Default generated cage complexity
    pub const DEFAULT_COMPLEXITY: usize = super::DEFAULT_COMPLEXITY;

    /// Minimum generated cage complexity
    pub const MIN_COMPLEXITY: usize = super::MIN_COMPLEXITY;

    /// Cage frame padding (fraction of the larger bounding box side)
    pub const FRAME_MARGIN: f64 = super::FRAME_MARGIN;

    /// Point/vertex coincidence tolerance for the weight solver
    pub const COINCIDENCE_EPSILON: f64 = super::COINCIDENCE_EPSILON;
}
