// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! The control polygon ("cage") whose vertices drive the deformation.
//!
//! Vertex order is meaningful: it defines the winding and which vertices
//! share an edge, and solved weights refer to vertices by index. The edge
//! from the last vertex back to the first is always implied.

use crate::error::{DeformError, Result};
use crate::settings;
use kurbo::{BezPath, Point, Rect};

/// An ordered, closed control polygon with at least three vertices
#[derive(Debug, Clone, PartialEq)]
pub struct CagePolygon {
    vertices: Vec<Point>,
}

impl CagePolygon {
    /// Create a cage from vertices, rejecting degenerate polygons
    pub fn new(vertices: Vec<Point>) -> Result<Self> {
        validate(&vertices)?;
        Ok(Self { vertices })
    }

    /// Generate a rectangular cage around `bounds`.
    ///
    /// `complexity` is the target number of boundary vertices; each side is
    /// split into `ceil(complexity / 4)` pieces. Vertices start at the
    /// top-left corner `(x0, y0)` and run down the left side, along the
    /// bottom, up the right side, and back along the top.
    pub fn rectangle(bounds: Rect, complexity: usize) -> Result<Self> {
        let per_side = Self::pieces_per_side(complexity)?;
        let corners = [
            Point::new(bounds.x0, bounds.y0),
            Point::new(bounds.x0, bounds.y1),
            Point::new(bounds.x1, bounds.y1),
            Point::new(bounds.x1, bounds.y0),
        ];

        let mut vertices = Vec::with_capacity(4 * per_side);
        for side in 0..4 {
            let from = corners[side];
            let to = corners[(side + 1) % 4];
            for k in 0..per_side {
                vertices.push(from.lerp(to, k as f64 / per_side as f64));
            }
        }

        Self::new(vertices)
    }

    /// Vertex count `rectangle` produces for a complexity value
    pub fn vertex_count_for(complexity: usize) -> Result<usize> {
        Ok(4 * Self::pieces_per_side(complexity)?)
    }

    fn pieces_per_side(complexity: usize) -> Result<usize> {
        if complexity < settings::cage::MIN_COMPLEXITY {
            return Err(DeformError::DegenerateCage(format!(
                "complexity {complexity} is below the minimum of {}",
                settings::cage::MIN_COMPLEXITY
            )));
        }
        Ok(complexity.div_ceil(4))
    }

    /// The vertices in polygon order
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false for a constructed cage; present for API symmetry
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Position of one vertex
    pub fn vertex(&self, index: usize) -> Result<Point> {
        self.vertices
            .get(index)
            .copied()
            .ok_or(DeformError::IndexOutOfRange {
                index,
                len: self.vertices.len(),
            })
    }

    /// Replace every vertex. The cage is left unchanged on error.
    pub fn replace(&mut self, vertices: Vec<Point>) -> Result<()> {
        validate(&vertices)?;
        self.vertices = vertices;
        Ok(())
    }

    /// Move a single vertex. The cage is left unchanged on error.
    pub fn set_vertex(&mut self, index: usize, position: Point) -> Result<()> {
        let len = self.vertices.len();
        let slot = self
            .vertices
            .get_mut(index)
            .ok_or(DeformError::IndexOutOfRange { index, len })?;
        if !position.is_finite() {
            return Err(DeformError::DegenerateCage(format!(
                "vertex {index} moved to non-finite position {position:?}"
            )));
        }
        *slot = position;
        Ok(())
    }

    /// Signed area (shoelace formula)
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    /// The closed outline of the cage, for drawing the control overlay
    pub fn to_bezpath(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.vertices.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for v in iter {
                path.line_to(*v);
            }
            path.close_path();
        }
        path
    }
}

fn signed_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}

/// Check that a vertex list can support a weight solve
pub(crate) fn validate(vertices: &[Point]) -> Result<()> {
    if vertices.iter().any(|v| !v.x.is_finite() || !v.y.is_finite()) {
        return Err(DeformError::DegenerateCage(
            "cage has a non-finite vertex".to_string(),
        ));
    }

    let mut distinct: Vec<Point> = Vec::with_capacity(vertices.len());
    for v in vertices {
        if !distinct.contains(v) {
            distinct.push(*v);
        }
    }
    if distinct.len() < 3 {
        return Err(DeformError::DegenerateCage(format!(
            "cage needs at least 3 distinct vertices, got {}",
            distinct.len()
        )));
    }

    // Collinear: every vertex lies on the line through the first vertex and
    // the vertex farthest from it.
    let origin = distinct[0];
    let far = distinct
        .iter()
        .copied()
        .max_by(|a, b| origin.distance_squared(*a).total_cmp(&origin.distance_squared(*b)))
        .unwrap_or(origin);
    let axis = far - origin;
    let extent_sq = axis.hypot2();
    let spread = distinct
        .iter()
        .map(|v| axis.cross(*v - origin).abs())
        .fold(0.0, f64::max);
    if spread <= 1e-9 * extent_sq {
        return Err(DeformError::DegenerateCage(
            "all cage vertices are collinear".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> CagePolygon {
        CagePolygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn rectangle_matches_default_twelve_vertex_layout() {
        let cage = CagePolygon::rectangle(Rect::new(0.0, 0.0, 300.0, 300.0), 12).unwrap();
        let expected: Vec<Point> = [
            (0.0, 0.0),
            (0.0, 100.0),
            (0.0, 200.0),
            (0.0, 300.0),
            (100.0, 300.0),
            (200.0, 300.0),
            (300.0, 300.0),
            (300.0, 200.0),
            (300.0, 100.0),
            (300.0, 0.0),
            (200.0, 0.0),
            (100.0, 0.0),
        ]
        .into_iter()
        .map(Point::from)
        .collect();

        assert_eq!(cage.len(), 12);
        for (got, want) in cage.vertices().iter().zip(&expected) {
            assert!(got.distance(*want) < 1e-9, "{got:?} != {want:?}");
        }
    }

    #[test]
    fn vertex_count_rounds_up_to_whole_sides() {
        assert_eq!(CagePolygon::vertex_count_for(3).unwrap(), 4);
        assert_eq!(CagePolygon::vertex_count_for(4).unwrap(), 4);
        assert_eq!(CagePolygon::vertex_count_for(5).unwrap(), 8);
        assert_eq!(CagePolygon::vertex_count_for(12).unwrap(), 12);
        assert!(CagePolygon::vertex_count_for(2).is_err());
    }

    #[test]
    fn degenerate_cages_are_rejected() {
        let two = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        assert!(matches!(
            CagePolygon::new(two),
            Err(DeformError::DegenerateCage(_))
        ));

        let repeated = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 0.0),
        ];
        assert!(CagePolygon::new(repeated).is_err());

        let collinear = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
        ];
        assert!(CagePolygon::new(collinear).is_err());

        let flat_rect = CagePolygon::rectangle(Rect::new(0.0, 0.0, 10.0, 0.0), 8);
        assert!(flat_rect.is_err());
    }

    #[test]
    fn set_vertex_out_of_range() {
        let mut cage = unit_square();
        let err = cage.set_vertex(4, Point::ZERO).unwrap_err();
        assert_eq!(err, DeformError::IndexOutOfRange { index: 4, len: 4 });
        assert_eq!(cage, unit_square());
    }

    #[test]
    fn set_vertex_rejects_non_finite_positions() {
        let mut cage = unit_square();
        for bad in [
            Point::new(f64::NAN, 0.0),
            Point::new(0.5, f64::INFINITY),
            Point::new(f64::NEG_INFINITY, f64::NAN),
        ] {
            let err = cage.set_vertex(1, bad).unwrap_err();
            assert!(matches!(err, DeformError::DegenerateCage(_)));
        }
        assert_eq!(cage, unit_square());
    }

    #[test]
    fn set_vertex_moves_only_that_vertex() {
        let mut cage = unit_square();
        cage.set_vertex(2, Point::new(2.0, 2.0)).unwrap();
        assert_eq!(cage.vertex(2).unwrap(), Point::new(2.0, 2.0));
        assert_eq!(cage.vertex(0).unwrap(), Point::new(0.0, 0.0));
    }

    #[test]
    fn failed_replace_keeps_old_vertices() {
        let mut cage = unit_square();
        assert!(cage.replace(vec![Point::ZERO, Point::ZERO, Point::ZERO]).is_err());
        assert_eq!(cage, unit_square());

        cage.replace(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 3.0),
        ])
        .unwrap();
        assert_eq!(cage.len(), 3);
    }

    #[test]
    fn outline_is_closed() {
        let path = unit_square().to_bezpath();
        assert_eq!(path.elements().len(), 5);
        assert_eq!(path.elements().last(), Some(&kurbo::PathEl::ClosePath));
        assert!((unit_square().signed_area().abs() - 1.0).abs() < 1e-12);
    }
}
