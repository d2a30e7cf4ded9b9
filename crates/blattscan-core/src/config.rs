// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunable parameters for the scanning pipeline.
///
/// The defaults are the reference values the pipeline was calibrated with;
/// callers normally use `PipelineConfig::default()` and override individual
/// fields only when a specific capture setup demands it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Height of the downscaled working copy used for detection.
    pub working_height: u32,
    /// CLAHE clip limit for local contrast equalization.
    pub clahe_clip_limit: f32,
    /// CLAHE tile grid dimension (grid is `n x n` tiles).
    pub clahe_tile_grid: u32,
    /// Gaussian smoothing kernel size before edge detection (odd).
    pub blur_kernel: u32,
    /// Canny hysteresis low threshold.
    pub canny_low: f32,
    /// Canny hysteresis high threshold.
    pub canny_high: f32,
    /// How many of the largest contours to consider as outline candidates.
    pub max_candidates: usize,
    /// Polygon simplification tolerance as a fraction of contour perimeter.
    pub approx_epsilon_ratio: f64,
    /// Adaptive threshold neighbourhood size (odd).
    pub threshold_block_size: u32,
    /// Constant subtracted from the local mean before classification.
    pub threshold_offset: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            working_height: 500,
            clahe_clip_limit: 3.0,
            clahe_tile_grid: 8,
            blur_kernel: 5,
            canny_low: 50.0,
            canny_high: 200.0,
            max_candidates: 5,
            approx_epsilon_ratio: 0.02,
            threshold_block_size: 11,
            threshold_offset: 15.0,
        }
    }
}

impl PipelineConfig {
    /// Deserialize a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
