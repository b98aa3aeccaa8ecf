// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Interaction tools

pub mod cage;

pub use cage::{CageTool, DragState};
