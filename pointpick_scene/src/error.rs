// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for scene extraction and picking configuration.

use thiserror::Error;

/// A renderable that cannot contribute points to the pick snapshot.
///
/// Extraction logs these and skips the renderable; they never abort a rebuild.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Point cloud without a position attribute.
    #[error("point cloud has no position buffer")]
    MissingPositions,

    /// Position buffer whose length is not a whole number of `xyz` triples.
    #[error("position buffer length {len} is not a multiple of 3")]
    RaggedPositions {
        /// Number of scalars in the buffer.
        len: usize,
    },

    /// World transform containing NaN or infinite entries.
    #[error("world transform is not finite")]
    NonFiniteTransform,
}

/// Invalid picking configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Sampling every 0th point is meaningless.
    #[error("sample rate must be at least 1")]
    ZeroSampleRate,

    /// Pick radius must be positive and finite.
    #[error("pick radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// Quantization precision must be positive and finite.
    #[error("quantization precision must be positive and finite, got {0}")]
    InvalidPrecision(f64),

    /// Quadtree leaves must hold at least one entry.
    #[error("quadtree leaf capacity must be at least 1")]
    ZeroCapacity,
}
