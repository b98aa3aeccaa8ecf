// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration, loaded from TOML.
//!
//! Every field is optional in the file; missing fields fall back to the
//! constants in `settings`.

use crate::path::Density;
use crate::settings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeformConfig {
    /// Target boundary vertex count for generated cages
    pub complexity: usize,

    /// Subdivision density for new sessions
    pub density: Density,

    /// Vertex-to-vertex snap distance in screen pixels
    pub snap_distance: f64,

    /// Vertex handle hit radius in screen pixels
    pub hit_radius: f64,
}

impl Default for DeformConfig {
    fn default() -> Self {
        Self {
            complexity: settings::cage::DEFAULT_COMPLEXITY,
            density: Density::default(),
            snap_distance: settings::snap::DISTANCE,
            hit_radius: settings::handles::HIT_RADIUS,
        }
    }
}

impl DeformConfig {
    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Failed to parse config")?;
        if config.complexity < settings::cage::MIN_COMPLEXITY {
            anyhow::bail!(
                "complexity must be at least {}, got {}",
                settings::cage::MIN_COMPLEXITY,
                config.complexity
            );
        }
        Ok(config)
    }

    /// Load a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
