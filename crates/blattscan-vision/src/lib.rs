// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// blattscan-vision — Document scanning pipeline for Blattscan.
//
// Provides edge extraction (CLAHE + Gaussian smoothing + Canny), contour
// ranking, quadrilateral outline selection, perspective rectification, and
// adaptive binarization, plus the codec collaborator that keeps decode/encode
// out of the algorithmic core.

pub mod binarize;
pub mod codec;
pub mod contours;
pub mod edges;
pub mod geometry;
pub mod outline;
pub mod pipeline;
pub mod rectify;

// Re-export the primary entry points so callers can use
// `blattscan_vision::ScanPipeline` etc.
pub use codec::ImageCodec;
pub use outline::{LargestQuadFirst, OutlineSelector};
pub use pipeline::{ScanOutput, ScanPipeline};
