// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Error type shared by the sampler, cage model, and session.

/// Failures surfaced by the deformation pipeline.
///
/// Any of these aborts the current pipeline run; the session keeps the
/// state it had before the call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeformError {
    /// The input path description is empty or malformed
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The cage cannot support a weight solve
    #[error("degenerate cage: {0}")]
    DegenerateCage(String),

    /// A vertex index past the end of the cage
    #[error("vertex index {index} out of range for cage of {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T, E = DeformError> = std::result::Result<T, E>;
