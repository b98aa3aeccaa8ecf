// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! A single drawable segment of a subpath

use kurbo::{CubicBez, Line, ParamCurve, PathEl, Point, QuadBez};
use std::ops::Range;

/// A segment of a path: a line or a bezier curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// A straight line segment
    Line(Line),
    /// A quadratic bezier curve
    Quadratic(QuadBez),
    /// A cubic bezier curve
    Cubic(CubicBez),
}

impl Segment {
    /// Build the segment that a drawing element adds after `from`.
    ///
    /// Returns `None` for `MoveTo` and `ClosePath`, which do not draw.
    pub fn from_el(from: Point, el: PathEl) -> Option<Self> {
        match el {
            PathEl::LineTo(p) => Some(Segment::Line(Line::new(from, p))),
            PathEl::QuadTo(p1, p2) => Some(Segment::Quadratic(QuadBez::new(from, p1, p2))),
            PathEl::CurveTo(p1, p2, p3) => {
                Some(Segment::Cubic(CubicBez::new(from, p1, p2, p3)))
            }
            PathEl::MoveTo(_) | PathEl::ClosePath => None,
        }
    }

    /// Start point of the segment
    pub fn start(&self) -> Point {
        match self {
            Segment::Line(line) => line.p0,
            Segment::Quadratic(quad) => quad.p0,
            Segment::Cubic(cubic) => cubic.p0,
        }
    }

    /// End point of the segment
    pub fn end(&self) -> Point {
        match self {
            Segment::Line(line) => line.p1,
            Segment::Quadratic(quad) => quad.p2,
            Segment::Cubic(cubic) => cubic.p3,
        }
    }

    /// The portion of this segment between two parameter values
    pub fn subsegment(&self, range: Range<f64>) -> Segment {
        match self {
            Segment::Line(line) => Segment::Line(line.subsegment(range)),
            Segment::Quadratic(quad) => Segment::Quadratic(quad.subsegment(range)),
            Segment::Cubic(cubic) => Segment::Cubic(cubic.subsegment(range)),
        }
    }

    /// The drawing element for this segment (start point implied)
    pub fn to_el(&self) -> PathEl {
        match self {
            Segment::Line(line) => PathEl::LineTo(line.p1),
            Segment::Quadratic(quad) => PathEl::QuadTo(quad.p1, quad.p2),
            Segment::Cubic(cubic) => PathEl::CurveTo(cubic.p1, cubic.p2, cubic.p3),
        }
    }
}
