// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! JSON scene documents: a source path, optional session overrides, and a
//! list of vertex moves to replay

use crate::config::DeformConfig;
use crate::editing::DeformationSession;
use crate::path::{Density, PathDescription};
use anyhow::{Context, Result};
use kurbo::{BezPath, PathEl, Point, Rect};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One drawing segment of a subpath
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SegmentSpec {
    Line { to: [f64; 2] },
    Quad { ctrl: [f64; 2], to: [f64; 2] },
    Cubic {
        ctrl1: [f64; 2],
        ctrl2: [f64; 2],
        to: [f64; 2],
    },
}

/// A subpath: a start point followed by segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubpathSpec {
    pub start: [f64; 2],
    #[serde(default)]
    pub segments: Vec<SegmentSpec>,
    #[serde(default)]
    pub closed: bool,
}

/// Move cage vertex `vertex` to `to` (design space)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexMove {
    pub vertex: usize,
    pub to: [f64; 2],
}

/// A scene loaded from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Canvas size. When both are given the cage frames the canvas instead
    /// of the path bounds.
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,

    pub subpaths: Vec<SubpathSpec>,

    /// Overrides the configured density
    #[serde(default)]
    pub density: Option<Density>,

    /// Overrides the configured cage complexity
    #[serde(default)]
    pub complexity: Option<usize>,

    /// Explicit cage vertices, replacing the generated rectangle
    #[serde(default)]
    pub cage: Option<Vec<[f64; 2]>>,

    #[serde(default)]
    pub moves: Vec<VertexMove>,
}

fn point(p: [f64; 2]) -> Point {
    Point::new(p[0], p[1])
}

impl SceneDocument {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse scene document")
    }

    /// Load a scene from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene {}", path.display()))?;
        let doc = Self::from_json_str(&text)
            .with_context(|| format!("Invalid scene {}", path.display()))?;
        tracing::info!(
            "Loaded scene from {}: {} subpaths, {} moves",
            path.display(),
            doc.subpaths.len(),
            doc.moves.len()
        );
        Ok(doc)
    }

    /// The path as kurbo elements, in document order
    pub fn elements(&self) -> Vec<PathEl> {
        let mut elements = Vec::new();
        for subpath in &self.subpaths {
            elements.push(PathEl::MoveTo(point(subpath.start)));
            for segment in &subpath.segments {
                elements.push(match *segment {
                    SegmentSpec::Line { to } => PathEl::LineTo(point(to)),
                    SegmentSpec::Quad { ctrl, to } => PathEl::QuadTo(point(ctrl), point(to)),
                    SegmentSpec::Cubic { ctrl1, ctrl2, to } => {
                        PathEl::CurveTo(point(ctrl1), point(ctrl2), point(to))
                    }
                });
            }
            if subpath.closed {
                elements.push(PathEl::ClosePath);
            }
        }
        elements
    }

    pub fn to_bezpath(&self) -> BezPath {
        BezPath::from_vec(self.elements())
    }

    /// The validated source path
    pub fn path_description(&self) -> Result<PathDescription> {
        PathDescription::from_elements(self.elements()).context("Scene path is invalid")
    }

    /// Canvas rectangle, if the scene gives both dimensions
    pub fn frame(&self) -> Option<Rect> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(Rect::new(0.0, 0.0, w, h)),
            _ => None,
        }
    }

    /// Build a session for this scene and replay its vertex moves
    pub fn build_session(&self, config: &DeformConfig) -> Result<DeformationSession> {
        let mut config = config.clone();
        if let Some(density) = self.density {
            config.density = density;
        }
        if let Some(complexity) = self.complexity {
            config.complexity = complexity;
        }

        let source = self.path_description()?;
        let mut session = match self.frame() {
            Some(frame) => DeformationSession::with_frame(source, frame, config),
            None => DeformationSession::new(source, config),
        }
        .context("Failed to create deformation session")?;

        if let Some(cage) = &self.cage {
            let vertices = cage.iter().copied().map(point).collect();
            session
                .replace_cage(vertices)
                .context("Scene cage is invalid")?;
        }

        for (i, m) in self.moves.iter().enumerate() {
            session
                .set_vertex(m.vertex, point(m.to))
                .with_context(|| format!("Failed to apply move {}", i))?;
        }

        Ok(session)
    }
}
