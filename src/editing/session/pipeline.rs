// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! The session pipeline (sample, solve, deform) and the session controls
//! that drive it.
//!
//! There is one pipeline. A `Rebuild` says which inputs changed; if any of
//! them affects topology (source, density, or cage identity) the sampler
//! and solver run, otherwise only the deformer does. New state is computed
//! before anything is committed, so a failed run leaves the session as it
//! was.

use super::{DeformationSession, padded_bounds};
use crate::deform::{CagePolygon, deformer, solver};
use crate::error::Result;
use crate::path::{Density, PathDescription, sample};
use kurbo::{BezPath, Point, Rect};

/// Inputs that changed since the last pipeline run
#[derive(Debug, Default)]
pub(super) struct Rebuild {
    /// New source path and cage frame
    source: Option<(PathDescription, Rect)>,
    /// New subdivision density
    density: Option<Density>,
    /// New cage, which also becomes the rest cage
    cage: Option<CagePolygon>,
    /// Re-sample and re-solve even if no input changed
    force: bool,
}

impl Rebuild {
    /// Only the cage vertex positions changed
    pub(super) fn deform_only() -> Self {
        Self::default()
    }

    /// Re-run every stage with the current inputs
    pub(super) fn full() -> Self {
        Self {
            force: true,
            ..Self::default()
        }
    }

    fn with_cage(cage: CagePolygon) -> Self {
        Self {
            cage: Some(cage),
            ..Self::default()
        }
    }

    fn topology_changed(&self) -> bool {
        self.force || self.source.is_some() || self.density.is_some() || self.cage.is_some()
    }
}

impl DeformationSession {
    pub(super) fn run_pipeline(&mut self, rebuild: Rebuild) -> Result<()> {
        if rebuild.topology_changed() {
            let source = rebuild.source.as_ref().map_or(&self.source, |(s, _)| s);
            let density = rebuild.density.unwrap_or(self.density);
            let rest = rebuild.cage.as_ref().unwrap_or(&self.rest_cage);

            let sampled = sample::sample_description(source, density);
            let weights = solver::solve(sampled.points(), rest)?;

            if let Some((source, frame)) = rebuild.source {
                self.source = source;
                self.frame = frame;
            }
            if let Some(cage) = rebuild.cage {
                self.rest_cage = cage.clone();
                self.cage = cage;
            }
            self.density = density;
            self.sampled = sampled;
            self.weights = weights;
            self.solve_count += 1;
        }

        deformer::deform_into(&self.weights, self.cage.vertices(), &mut self.deformed);
        Ok(())
    }

    /// Load a new source path, framing a fresh rectangle cage around it
    pub fn load(&mut self, path: &BezPath) -> Result<()> {
        let source = PathDescription::from_bezpath(path).inspect_err(|e| {
            tracing::warn!("Rejected source path: {}", e);
        })?;
        let frame = padded_bounds(&source).inspect_err(|e| {
            tracing::warn!("Rejected source path: {}", e);
        })?;
        self.load_with_frame(source, frame)
    }

    /// Load a new source path with an explicit cage frame
    pub fn load_with_frame(&mut self, source: PathDescription, frame: Rect) -> Result<()> {
        let cage = CagePolygon::rectangle(frame, self.complexity)?;
        self.run_pipeline(Rebuild {
            source: Some((source, frame)),
            cage: Some(cage),
            ..Rebuild::default()
        })?;
        tracing::info!(
            "Loaded source: {} sampled points, {} cage vertices",
            self.sampled.len(),
            self.cage.len()
        );
        Ok(())
    }

    /// Change the generated cage complexity.
    ///
    /// If the new complexity yields the current vertex count the edited
    /// cage and its weights are kept; otherwise a fresh rectangle cage is
    /// generated and solved.
    pub fn set_complexity(&mut self, complexity: usize) -> Result<()> {
        let count = CagePolygon::vertex_count_for(complexity)?;
        if count == self.cage.len() {
            tracing::debug!(
                "Complexity {} keeps {} vertices, reusing cage",
                complexity,
                count
            );
            self.complexity = complexity;
            return self.run_pipeline(Rebuild::deform_only());
        }

        let cage = CagePolygon::rectangle(self.frame, complexity)?;
        self.run_pipeline(Rebuild::with_cage(cage))?;
        self.complexity = complexity;
        Ok(())
    }

    /// Change the subdivision density.
    ///
    /// The source is re-sampled and solved against the rest cage, then
    /// deformed by the current cage, so the visible deformation is kept.
    pub fn set_density(&mut self, density: Density) -> Result<()> {
        if density == self.density {
            return Ok(());
        }
        self.run_pipeline(Rebuild {
            density: Some(density),
            ..Rebuild::default()
        })
    }

    /// Move one cage vertex and re-deform. Weights are reused.
    pub fn set_vertex(&mut self, index: usize, position: Point) -> Result<()> {
        self.cage.set_vertex(index, position)?;
        self.run_pipeline(Rebuild::deform_only())
    }

    /// Replace the whole cage.
    ///
    /// With the same vertex count this is a deform-only update; with a
    /// different count the weights are solved against the new cage.
    pub fn replace_cage(&mut self, vertices: Vec<Point>) -> Result<()> {
        if vertices.len() == self.cage.len() {
            self.cage.replace(vertices)?;
            return self.run_pipeline(Rebuild::deform_only());
        }
        let cage = CagePolygon::new(vertices)?;
        self.run_pipeline(Rebuild::with_cage(cage))
    }

    /// Discard all cage edits and solve against a fresh rectangle cage
    pub fn reset(&mut self) -> Result<()> {
        let cage = CagePolygon::rectangle(self.frame, self.complexity)?;
        self.run_pipeline(Rebuild::with_cage(cage))?;
        tracing::info!("Reset cage to {} vertex rectangle", self.cage.len());
        Ok(())
    }
}
