// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Cagewarp: cage-based deformation of vector paths using mean-value
//! coordinates

use anyhow::{Context, Result};
use std::path::PathBuf;

pub mod components;
pub mod config;
pub mod deform;
pub mod editing;
pub mod error;
pub mod model;
pub mod path;
pub mod settings;
pub mod tools;

pub use config::DeformConfig;
pub use deform::{CagePolygon, WeightTable};
pub use editing::{DeformationSession, ViewPort};
pub use error::DeformError;
pub use model::SceneDocument;
pub use path::{Density, PathDescription, SampledPath};

const USAGE: &str = "Usage: cagewarp <scene.json> [--config <config.toml>]";

/// Command-line arguments for the `cagewarp` binary
#[derive(Debug, Clone, PartialEq)]
struct Args {
    scene: PathBuf,
    config: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut scene = None;
        let mut config = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let value = args.next().context("--config needs a file path")?;
                    config = Some(PathBuf::from(value));
                }
                flag if flag.starts_with("--") => {
                    anyhow::bail!("Unknown option {}\n{}", flag, USAGE);
                }
                _ if scene.is_none() => scene = Some(PathBuf::from(&arg)),
                _ => anyhow::bail!("Unexpected argument {}\n{}", arg, USAGE),
            }
        }
        let scene = scene.context(USAGE)?;
        Ok(Self { scene, config })
    }
}

/// Entry point for the `cagewarp` binary
pub fn run() -> Result<()> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cagewarp=info".parse().context("Bad log directive")?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => DeformConfig::load(path)?,
        None => DeformConfig::default(),
    };
    let scene = SceneDocument::load(&args.scene)?;
    let session = scene.build_session(&config)?;

    tracing::info!(
        "Deformed {} points with a {}-vertex cage",
        session.deformed_points().len(),
        session.cage().len()
    );
    println!("{}", session.to_svg());
    println!("{}", session.cage_outline().to_svg());
    Ok(())
}
