// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Binarization — locally adaptive thresholding of the rectified crop into a
// black-and-white "scanned" rendition.

use blattscan_core::config::PipelineConfig;
use image::{GrayImage, Luma, RgbImage};
use imageproc::filter::gaussian_blur_f32;
use tracing::debug;

/// Threshold the rectified crop against a Gaussian-weighted local mean.
///
/// For each pixel the cutoff is the Gaussian-weighted mean of its
/// neighbourhood (window `config.threshold_block_size`, sigma chosen so the
/// kernel support matches the window) minus `config.threshold_offset`.
/// Pixels brighter than their local cutoff become white (255), the rest
/// black (0). The local statistic adapts to illumination gradients across
/// the page that a single global threshold would misclassify.
pub fn binarize(rectified: &RgbImage, config: &PipelineConfig) -> GrayImage {
    let gray = image::imageops::grayscale(rectified);

    // Sigma such that the +/- 3-sigma support spans the configured window.
    let sigma = ((config.threshold_block_size.max(3) - 1) as f32 / 6.0).max(0.1);
    let local_mean = gaussian_blur_f32(&gray, sigma);

    let offset = config.threshold_offset;
    let output = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let value = gray.get_pixel(x, y).0[0] as f32;
        let threshold = local_mean.get_pixel(x, y).0[0] as f32 - offset;
        if value > threshold {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    });

    debug!(
        width = output.width(),
        height = output.height(),
        block_size = config.threshold_block_size,
        offset,
        "Binarization complete"
    );
    output
}
