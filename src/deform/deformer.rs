// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Deformer: rebuilds point positions from stored weights and the current
//! cage. Runs for every sampled point on every drag frame.

use super::solver::WeightTable;
use kurbo::Point;

/// Weighted sum of cage vertices
#[inline]
pub fn deform_point(weights: &[f64], vertices: &[Point]) -> Point {
    debug_assert_eq!(weights.len(), vertices.len());

    let mut x = 0.0;
    let mut y = 0.0;
    for (w, v) in weights.iter().zip(vertices) {
        x += w * v.x;
        y += w * v.y;
    }
    Point::new(x, y)
}

/// Deform every row of `table` into `out`, reusing its allocation
pub fn deform_into(table: &WeightTable, vertices: &[Point], out: &mut Vec<Point>) {
    debug_assert_eq!(table.vertex_count(), vertices.len());

    out.clear();
    out.reserve(table.len());
    out.extend(table.rows().map(|row| deform_point(row, vertices)));
}
