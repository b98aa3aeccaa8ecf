// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! File-backed data model

pub mod document;

pub use document::{SceneDocument, SegmentSpec, SubpathSpec, VertexMove};
