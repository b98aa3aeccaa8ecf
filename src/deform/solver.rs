// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Mean-value coordinate solver.
//!
//! For each sampled point P and cage vertices V[0..n], the angle A[i] that
//! edge (V[i], V[i+1]) subtends at P comes from the law of cosines. The raw
//! weight of vertex j is `(tan(A[j-1]/2) + tan(A[j]/2)) / |P - V[j]|`, and
//! the row is normalized to sum to one.
//!
//! When P sits on a vertex, or the raw weights do not sum to a usable
//! number, the row is one-hot on the nearest vertex (lowest index on ties).
//! Rows never contain NaN.
//!
//! Solving is O(points x vertices) and only runs when the cage topology or
//! the sampling changes; vertex drags reuse the stored table.

use super::cage::{self, CagePolygon};
use crate::error::Result;
use crate::settings;
use kurbo::Point;

/// Row-major weights: one row per sampled point, one column per cage
/// vertex
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightTable {
    vertex_count: usize,
    weights: Vec<f64>,
}

impl WeightTable {
    /// Number of cage vertices each row refers to
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of rows (sampled points)
    pub fn len(&self) -> usize {
        if self.vertex_count == 0 {
            0
        } else {
            self.weights.len() / self.vertex_count
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weights of one sampled point
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.vertex_count;
        &self.weights[start..start + self.vertex_count]
    }

    /// Iterate over all rows in point order
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.weights.chunks_exact(self.vertex_count.max(1))
    }
}

/// Solve weights for every point against the cage.
///
/// Fails with `DegenerateCage` if the cage cannot support a solve; in that
/// case nothing is computed.
pub fn solve(points: &[Point], cage: &CagePolygon) -> Result<WeightTable> {
    cage::validate(cage.vertices())?;

    let vertices = cage.vertices();
    let n = vertices.len();
    let mut weights = vec![0.0; points.len() * n];
    let mut fallbacks = 0usize;

    for (point, row) in points.iter().zip(weights.chunks_exact_mut(n)) {
        if !mean_value_weights(*point, vertices, row) {
            fallbacks += 1;
        }
    }

    tracing::debug!(
        "Solved weights for {} points against {} cage vertices ({} fallbacks)",
        points.len(),
        n,
        fallbacks
    );

    Ok(WeightTable {
        vertex_count: n,
        weights,
    })
}

/// Write the mean-value coordinates of `point` into `out`.
///
/// Returns false when the nearest-vertex fallback was used.
pub fn mean_value_weights(point: Point, vertices: &[Point], out: &mut [f64]) -> bool {
    debug_assert_eq!(vertices.len(), out.len());
    let n = vertices.len();

    let (nearest, nearest_dist) = nearest_vertex(point, vertices);
    if nearest_dist <= settings::cage::COINCIDENCE_EPSILON {
        one_hot(out, nearest);
        return false;
    }

    // tan(A/2) of the edge ending at vertex j, carried across iterations
    let mut prev_tan = half_angle_tan(point, vertices[n - 1], vertices[0]);
    let mut sum = 0.0;
    for j in 0..n {
        let next = vertices[(j + 1) % n];
        let tan = half_angle_tan(point, vertices[j], next);
        let w = (prev_tan + tan) / point.distance(vertices[j]);
        out[j] = w;
        sum += w;
        prev_tan = tan;
    }

    if sum == 0.0 || !sum.is_finite() {
        one_hot(out, nearest);
        return false;
    }

    for w in out.iter_mut() {
        *w /= sum;
    }
    true
}

/// tan(A/2), where A is the angle the edge (a, b) subtends at `p`
fn half_angle_tan(p: Point, a: Point, b: Point) -> f64 {
    let r0i = p.distance(a);
    let r0j = p.distance(b);
    let rij = a.distance(b);

    let ratio = (r0i * r0i + r0j * r0j - rij * rij) / (2.0 * r0i * r0j);
    let angle = if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(-1.0, 1.0).acos()
    };
    (angle / 2.0).tan()
}

fn nearest_vertex(p: Point, vertices: &[Point]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, v) in vertices.iter().enumerate() {
        let d = p.distance(*v);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

fn one_hot(out: &mut [f64], index: usize) {
    out.fill(0.0);
    out[index] = 1.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    fn unit_square() -> CagePolygon {
        CagePolygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ])
        .unwrap()
    }

    /// An L-shaped (non-convex) cage
    fn l_shape() -> CagePolygon {
        CagePolygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 4.0),
            Point::new(4.0, 4.0),
            Point::new(4.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 0.0),
        ])
        .unwrap()
    }

    fn assert_partition_of_unity(row: &[f64]) {
        let sum: f64 = row.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6, "weights sum to {sum}");
        assert!(row.iter().all(|w| *w >= 0.0), "negative weight in {row:?}");
    }

    #[test]
    fn center_of_unit_square_weights_equally() {
        let table = solve(&[Point::new(0.5, 0.5)], &unit_square()).unwrap();
        for w in table.row(0) {
            assert!((w - 0.25).abs() < 1e-6, "weight {w}");
        }
    }

    #[test]
    fn interior_points_form_partition_of_unity() {
        let points = [
            Point::new(0.1, 0.1),
            Point::new(0.9, 0.2),
            Point::new(0.5, 0.99),
            Point::new(0.3, 0.7),
        ];
        let table = solve(&points, &unit_square()).unwrap();
        assert_eq!(table.len(), points.len());
        for row in table.rows() {
            assert_partition_of_unity(row);
        }
    }

    #[test]
    fn non_convex_cage_weights_stay_normalized() {
        let points = [
            Point::new(1.0, 1.0),
            Point::new(1.0, 3.0),
            Point::new(3.0, 3.0),
            Point::new(0.5, 1.8),
        ];
        let table = solve(&points, &l_shape()).unwrap();
        for row in table.rows() {
            assert_partition_of_unity(row);
        }
    }

    #[test]
    fn point_on_vertex_is_one_hot() {
        let cage = unit_square();
        for (k, v) in cage.vertices().iter().enumerate() {
            let table = solve(&[*v], &cage).unwrap();
            for (i, w) in table.row(0).iter().enumerate() {
                let expected = if i == k { 1.0 } else { 0.0 };
                assert_eq!(*w, expected);
            }
        }
    }

    #[test]
    fn point_on_edge_interpolates_endpoints() {
        let table = solve(&[Point::new(0.0, 0.25)], &unit_square()).unwrap();
        let row = table.row(0);
        assert!(row.iter().all(|w| w.is_finite()));
        assert!((row[0] - 0.75).abs() < 1e-6);
        assert!((row[1] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn solving_twice_is_identical() {
        let cage = CagePolygon::rectangle(Rect::new(0.0, 0.0, 300.0, 200.0), 12).unwrap();
        let points: Vec<Point> = (0..50)
            .map(|i| Point::new(5.0 + i as f64 * 5.0, 10.0 + i as f64 * 3.0))
            .collect();
        let a = solve(&points, &cage).unwrap();
        let b = solve(&points, &cage).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_cage_fails_before_solving() {
        // A cage that became collinear through vertex moves
        let mut cage = unit_square();
        cage.set_vertex(1, Point::new(0.5, 0.0)).unwrap();
        cage.set_vertex(2, Point::new(0.75, 0.0)).unwrap();
        assert!(solve(&[Point::new(0.5, 0.5)], &cage).is_err());
    }

    #[test]
    fn far_outside_points_never_produce_nan() {
        let table = solve(&[Point::new(1e9, -1e9)], &unit_square()).unwrap();
        assert!(table.row(0).iter().all(|w| w.is_finite()));
    }

    #[test]
    fn overflowing_weight_sum_falls_back_to_nearest_vertex() {
        // Squared distances overflow, so every half-angle degenerates
        let big = 1e159;
        let vertices = [
            Point::new(0.0, 0.0),
            Point::new(0.0, big),
            Point::new(big, big),
            Point::new(big, 0.0),
        ];
        let mut row = [0.0; 4];
        let solved = mean_value_weights(Point::new(1e160, 1e160), &vertices, &mut row);

        assert!(!solved);
        assert_eq!(row, [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn fallback_tie_goes_to_lowest_index() {
        // At this distance every vertex of the unit square is equally near
        let table = solve(&[Point::new(1e160, 1e160)], &unit_square()).unwrap();
        assert_eq!(table.row(0), &[1.0, 0.0, 0.0, 0.0]);
    }
}
