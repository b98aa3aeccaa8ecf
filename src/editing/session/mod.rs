// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Deformation session - owns the cage, the sampled source path, and the
//! solved weights for one loaded image

mod hit_testing;
mod pipeline;

pub use hit_testing::snap_to_vertices;

use super::viewport::ViewPort;
use crate::config::DeformConfig;
use crate::deform::{CagePolygon, WeightTable};
use crate::error::{DeformError, Result};
use crate::path::{Density, PathDescription, SampledPath};
use crate::settings;
use kurbo::{BezPath, Point, Rect};

/// Editing session for one source image
///
/// All state lives here and every operation takes `&mut self`, so there is
/// exactly one writer for the cage and the weights. Independent sessions
/// can coexist.
#[derive(Debug, Clone)]
pub struct DeformationSession {
    /// The validated source path
    source: PathDescription,

    /// Rectangle that generated cages are laid out on
    frame: Rect,

    /// Current subdivision density
    density: Density,

    /// Target vertex count for generated cages
    complexity: usize,

    /// The cage as currently edited
    cage: CagePolygon,

    /// The cage the weights were solved against. Same vertex count as
    /// `cage` at all times.
    rest_cage: CagePolygon,

    /// Sampled source points and the element structure around them
    sampled: SampledPath,

    /// One weight row per sampled point
    weights: WeightTable,

    /// Sampled points after deformation by `cage`
    deformed: Vec<Point>,

    /// Number of weight solves run so far
    solve_count: u64,

    /// Zoom and pan, for hit testing and snapping only
    pub viewport: ViewPort,

    /// Interaction and generation settings
    pub config: DeformConfig,
}

impl DeformationSession {
    /// Create a session for a path, with the cage framing the path's
    /// padded bounding box
    pub fn new(source: PathDescription, config: DeformConfig) -> Result<Self> {
        let frame = padded_bounds(&source)?;
        Self::with_frame(source, frame, config)
    }

    /// Validate a kurbo path and create a session for it
    pub fn from_bezpath(path: &BezPath, config: DeformConfig) -> Result<Self> {
        Self::new(PathDescription::from_bezpath(path)?, config)
    }

    /// Create a session with an explicit cage frame (the image canvas)
    pub fn with_frame(source: PathDescription, frame: Rect, config: DeformConfig) -> Result<Self> {
        let density = config.density;
        let complexity = config.complexity;
        let cage = CagePolygon::rectangle(frame, complexity)?;

        let mut session = Self {
            source,
            frame,
            density,
            complexity,
            rest_cage: cage.clone(),
            cage,
            sampled: SampledPath::default(),
            weights: WeightTable::default(),
            deformed: Vec::new(),
            solve_count: 0,
            viewport: ViewPort::new(),
            config,
        };
        session.run_pipeline(pipeline::Rebuild::full())?;

        tracing::info!(
            "Created deformation session: {} sampled points, {} cage vertices",
            session.sampled.len(),
            session.cage.len()
        );
        Ok(session)
    }

    /// The cage as currently edited
    pub fn cage(&self) -> &CagePolygon {
        &self.cage
    }

    /// The cage the current weights were solved against
    pub fn rest_cage(&self) -> &CagePolygon {
        &self.rest_cage
    }

    pub fn source(&self) -> &PathDescription {
        &self.source
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn complexity(&self) -> usize {
        self.complexity
    }

    /// Sampled (undeformed) points and their element structure
    pub fn sampled(&self) -> &SampledPath {
        &self.sampled
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Sampled points after deformation, in sampling order
    pub fn deformed_points(&self) -> &[Point] {
        &self.deformed
    }

    /// Number of weight solves since the session was created
    pub fn solve_count(&self) -> u64 {
        self.solve_count
    }

    /// The deformed image
    pub fn render(&self) -> BezPath {
        self.sampled.render(&self.deformed)
    }

    /// The deformed image as SVG path data
    pub fn to_svg(&self) -> String {
        self.render().to_svg()
    }

    /// The control polygon outline
    pub fn cage_outline(&self) -> BezPath {
        self.cage.to_bezpath()
    }
}

/// Bounding box of a path, padded on every side so the path sits strictly
/// inside the generated cage
/// The path bounds padded on every side by a fraction of the larger side.
///
/// A path with no extent at all cannot be framed.
fn padded_bounds(source: &PathDescription) -> Result<Rect> {
    let bbox = source.bounding_box();
    let extent = bbox.width().max(bbox.height());
    if extent <= 0.0 {
        return Err(DeformError::InvalidPath(format!(
            "path has zero extent at {:?}",
            bbox.origin()
        )));
    }
    let margin = extent * settings::cage::FRAME_MARGIN;
    Ok(bbox.inflate(margin, margin))
}
