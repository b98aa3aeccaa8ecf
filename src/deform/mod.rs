// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Cage model, weight solver, and deformer

pub mod cage;
pub mod deformer;
pub mod solver;

pub use cage::CagePolygon;
pub use deformer::{deform_into, deform_point};
pub use solver::{WeightTable, mean_value_weights, solve};
