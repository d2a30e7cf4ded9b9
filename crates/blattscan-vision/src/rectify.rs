// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectification — project the detected outline back to full resolution and
// warp the original image into a flat top-down crop.

use blattscan_core::error::Result;
use blattscan_core::types::Quad;
use image::{DynamicImage, RgbImage};
use tracing::{debug, instrument};

use crate::geometry;

/// Warp the full-resolution original into an upright rectangular crop.
///
/// `outline` is in working-copy coordinates; `scale_ratio` is original height
/// divided by working height. Detection runs on the downscaled copy for
/// speed, but the warp always samples the original so no resolution is lost.
#[instrument(skip(original, outline), fields(scale_ratio))]
pub fn rectify(original: &DynamicImage, outline: &Quad, scale_ratio: f32) -> Result<RgbImage> {
    let full_res = outline.scaled(scale_ratio);
    let ordered = geometry::order_corners(full_res.corners);

    debug!(
        top_left = %ordered.top_left(),
        top_right = %ordered.top_right(),
        bottom_right = %ordered.bottom_right(),
        bottom_left = %ordered.bottom_left(),
        "Outline scaled to original resolution"
    );

    let (projection, width, height) = geometry::perspective_transform(&ordered)?;
    let warped = geometry::warp(original, &projection, width, height);

    debug!(width, height, "Rectification complete");
    Ok(warped)
}
