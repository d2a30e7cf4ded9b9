// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Blattscan.

use thiserror::Error;

/// Top-level error type for all Blattscan operations.
///
/// Every error is local to a single pipeline invocation. The pipeline either
/// produces a fully rectified and binarized image or produces nothing; no
/// stage is retried and no fallback output is synthesised.
#[derive(Debug, Error)]
pub enum ScanError {
    // -- Pipeline errors --
    #[error("failed to decode input image: {0}")]
    Decode(String),

    #[error("no four-sided outline found among the {candidates} largest contours")]
    OutlineNotFound { candidates: usize },

    #[error("degenerate document geometry: derived output rectangle is {width}x{height}")]
    DegenerateGeometry { width: u32, height: u32 },

    #[error("image encoding failed: {0}")]
    Encode(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScanError>;
