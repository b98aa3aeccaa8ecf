// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Geometry sampler: splits every path segment into smaller pieces so the
//! deformation, which moves discrete points, still bends the outline
//! smoothly.
//!
//! Every piece keeps its curve type, so a cubic becomes several shorter
//! cubics whose control points are sampled (and later deformed) alongside
//! the on-curve points. Segment end points are copied exactly, which keeps
//! corners sharp at any density.

use super::{PathDescription, Segment};
use crate::error::Result;
use crate::settings;
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// Subdivision density level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    /// 1x base subdivisions
    Low,
    /// 2x base subdivisions
    #[default]
    Medium,
    /// 4x base subdivisions
    High,
}

impl Density {
    /// Map a discrete UI level (0, 1, 2, ...) to a density
    pub fn from_level(level: u32) -> Self {
        match level {
            0 => Density::Low,
            1 => Density::Medium,
            _ => Density::High,
        }
    }

    /// Multiplier applied to the base subdivision count
    pub fn multiplier(self) -> usize {
        match self {
            Density::Low => 1,
            Density::Medium => 2,
            Density::High => 4,
        }
    }

    /// Number of pieces each segment is split into
    pub fn subdivisions(self) -> usize {
        settings::sampling::BASE_SUBDIVISIONS * self.multiplier()
    }
}

/// One output element, with positions stored as indices into the sampled
/// point list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementTemplate {
    MoveTo(usize),
    LineTo(usize),
    QuadTo(usize, usize),
    CurveTo(usize, usize, usize),
    ClosePath,
}

/// The sampled form of a path: addressable points plus the element
/// structure that stitches them back into a path
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampledPath {
    points: Vec<Point>,
    elements: Vec<ElementTemplate>,
}

impl SampledPath {
    /// Sampled positions, in path order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Element templates referencing `points` by index
    pub fn elements(&self) -> &[ElementTemplate] {
        &self.elements
    }

    /// Number of sampled points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Build a path from the element templates using `positions` in place
    /// of the sampled points.
    pub fn render(&self, positions: &[Point]) -> BezPath {
        debug_assert_eq!(positions.len(), self.points.len());

        let mut path = BezPath::new();
        for el in &self.elements {
            match *el {
                ElementTemplate::MoveTo(i) => path.move_to(positions[i]),
                ElementTemplate::LineTo(i) => path.line_to(positions[i]),
                ElementTemplate::QuadTo(c, i) => path.quad_to(positions[c], positions[i]),
                ElementTemplate::CurveTo(c1, c2, i) => {
                    path.curve_to(positions[c1], positions[c2], positions[i])
                }
                ElementTemplate::ClosePath => path.close_path(),
            }
        }
        path
    }

    /// The undeformed sampled path
    pub fn to_bezpath(&self) -> BezPath {
        self.render(&self.points)
    }

    fn push_point(&mut self, point: Point) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }
}

/// Validate and sample a kurbo path.
///
/// Fails with `InvalidPath` when the path is empty or malformed.
pub fn sample(path: &BezPath, density: Density) -> Result<SampledPath> {
    let description = PathDescription::from_bezpath(path)?;
    Ok(sample_description(&description, density))
}

/// Sample an already validated path
pub fn sample_description(path: &PathDescription, density: Density) -> SampledPath {
    let pieces = density.subdivisions();
    let mut sampled = SampledPath::default();

    for subpath in path.subpaths() {
        let start_index = sampled.push_point(subpath.start);
        sampled.elements.push(ElementTemplate::MoveTo(start_index));

        let last_segment = subpath.segments.len().saturating_sub(1);
        for (seg_index, segment) in subpath.segments.iter().enumerate() {
            let closes_subpath = subpath.closed && seg_index == last_segment;
            for k in 0..pieces {
                let t0 = k as f64 / pieces as f64;
                let t1 = (k + 1) as f64 / pieces as f64;
                let piece = segment.subsegment(t0..t1);
                let is_last_piece = k + 1 == pieces;

                let el = match piece {
                    Segment::Line(_) => {
                        let end = end_index(
                            &mut sampled,
                            segment,
                            &piece,
                            is_last_piece,
                            closes_subpath,
                            start_index,
                        );
                        ElementTemplate::LineTo(end)
                    }
                    Segment::Quadratic(quad) => {
                        let c = sampled.push_point(quad.p1);
                        let end = end_index(
                            &mut sampled,
                            segment,
                            &piece,
                            is_last_piece,
                            closes_subpath,
                            start_index,
                        );
                        ElementTemplate::QuadTo(c, end)
                    }
                    Segment::Cubic(cubic) => {
                        let c1 = sampled.push_point(cubic.p1);
                        let c2 = sampled.push_point(cubic.p2);
                        let end = end_index(
                            &mut sampled,
                            segment,
                            &piece,
                            is_last_piece,
                            closes_subpath,
                            start_index,
                        );
                        ElementTemplate::CurveTo(c1, c2, end)
                    }
                };
                sampled.elements.push(el);
            }
        }

        if subpath.closed {
            sampled.elements.push(ElementTemplate::ClosePath);
        }
    }

    tracing::debug!(
        "Sampled {} segments into {} points at {:?} density",
        path.segment_count(),
        sampled.len(),
        density
    );

    sampled
}

/// Index of a piece's end point.
///
/// The final piece of a segment takes the segment's exact end point, and
/// the final piece of a closed subpath reuses the start point so the
/// contour stays closed after deformation.
fn end_index(
    sampled: &mut SampledPath,
    segment: &Segment,
    piece: &Segment,
    is_last_piece: bool,
    closes_subpath: bool,
    start_index: usize,
) -> usize {
    if !is_last_piece {
        return sampled.push_point(piece.end());
    }
    if closes_subpath {
        return start_index;
    }
    sampled.push_point(segment.end())
}
