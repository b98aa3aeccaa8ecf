// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Event handling components for a host UI

pub mod cage_canvas;

pub use cage_canvas::CageCanvas;
