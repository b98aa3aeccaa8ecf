// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Source path representation: the validated input to the deformation
//! pipeline.
//!
//! A `PathDescription` is a list of subpaths, each a start point followed by
//! line, quadratic, or cubic segments. It is built from `kurbo` path
//! elements, so any collaborator that can produce a `BezPath` can feed the
//! engine. Validation happens once, here; the sampler can then assume a
//! well-formed path.

pub mod sample;
pub mod segment;

pub use sample::{Density, ElementTemplate, SampledPath};
pub use segment::Segment;

use crate::error::{DeformError, Result};
use kurbo::{BezPath, Line, PathEl, Point, Rect, Shape};

/// One contour of the source path
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    /// Start point (the `MoveTo`)
    pub start: Point,

    /// Drawing segments in order
    pub segments: Vec<Segment>,

    /// Whether the subpath is closed.
    ///
    /// The last segment of a closed subpath always ends exactly at `start`;
    /// an implicit closing line is made explicit during validation.
    pub closed: bool,
}

impl Subpath {
    fn new(start: Point) -> Self {
        Self {
            start,
            segments: Vec::new(),
            closed: false,
        }
    }

    /// Current end point (the start point when there are no segments yet)
    pub fn end(&self) -> Point {
        self.segments.last().map_or(self.start, Segment::end)
    }
}

/// A validated vector-path description
#[derive(Debug, Clone, PartialEq)]
pub struct PathDescription {
    subpaths: Vec<Subpath>,
}

impl PathDescription {
    /// Validate a kurbo path
    pub fn from_bezpath(path: &BezPath) -> Result<Self> {
        Self::from_elements(path.elements().iter().copied())
    }

    /// Validate a sequence of path elements.
    ///
    /// Fails with `InvalidPath` when the sequence is empty, draws before a
    /// `MoveTo` (including after a `ClosePath`), or holds non-finite
    /// coordinates. Subpaths consisting of a lone `MoveTo` are dropped.
    pub fn from_elements(elements: impl IntoIterator<Item = PathEl>) -> Result<Self> {
        let mut subpaths = Vec::new();
        let mut current: Option<Subpath> = None;

        for (index, el) in elements.into_iter().enumerate() {
            if !el_is_finite(&el) {
                return Err(DeformError::InvalidPath(format!(
                    "element {index} has a non-finite coordinate"
                )));
            }

            match el {
                PathEl::MoveTo(p) => {
                    if let Some(done) = current.take() {
                        push_subpath(&mut subpaths, done);
                    }
                    current = Some(Subpath::new(p));
                }
                PathEl::ClosePath => {
                    let Some(mut subpath) = current.take() else {
                        return Err(DeformError::InvalidPath(format!(
                            "element {index} closes a subpath that was never started"
                        )));
                    };
                    let end = subpath.end();
                    if end != subpath.start && !subpath.segments.is_empty() {
                        let start = subpath.start;
                        subpath.segments.push(Segment::Line(Line::new(end, start)));
                    }
                    subpath.closed = true;
                    push_subpath(&mut subpaths, subpath);
                }
                drawing => {
                    let Some(subpath) = current.as_mut() else {
                        return Err(DeformError::InvalidPath(format!(
                            "element {index} draws without a preceding MoveTo"
                        )));
                    };
                    if let Some(segment) = Segment::from_el(subpath.end(), drawing) {
                        subpath.segments.push(segment);
                    }
                }
            }
        }

        if let Some(done) = current.take() {
            push_subpath(&mut subpaths, done);
        }

        if subpaths.is_empty() {
            return Err(DeformError::InvalidPath(
                "path has no drawable segments".to_string(),
            ));
        }

        Ok(Self { subpaths })
    }

    /// The validated subpaths
    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    /// Total number of drawing segments across all subpaths
    pub fn segment_count(&self) -> usize {
        self.subpaths.iter().map(|s| s.segments.len()).sum()
    }

    /// Convert back to a kurbo path
    pub fn to_bezpath(&self) -> BezPath {
        let mut path = BezPath::new();
        for subpath in &self.subpaths {
            path.move_to(subpath.start);
            for segment in &subpath.segments {
                path.push(segment.to_el());
            }
            if subpath.closed {
                path.close_path();
            }
        }
        path
    }

    /// Tight bounding box of the path
    pub fn bounding_box(&self) -> Rect {
        self.to_bezpath().bounding_box()
    }
}

fn push_subpath(subpaths: &mut Vec<Subpath>, subpath: Subpath) {
    if subpath.segments.is_empty() {
        tracing::debug!("Dropping empty subpath at {:?}", subpath.start);
        return;
    }
    subpaths.push(subpath);
}

fn el_is_finite(el: &PathEl) -> bool {
    let finite = |p: &Point| p.x.is_finite() && p.y.is_finite();
    match el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => finite(p),
        PathEl::QuadTo(p1, p2) => finite(p1) && finite(p2),
        PathEl::CurveTo(p1, p2, p3) => finite(p1) && finite(p2) && finite(p3),
        PathEl::ClosePath => true,
    }
}
