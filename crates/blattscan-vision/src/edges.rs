// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge extraction — grayscale conversion, contrast-limited adaptive histogram
// equalization (CLAHE), Gaussian smoothing, and Canny edge detection.
//
// Equalizing contrast per tile before edge detection keeps document borders
// detectable under shadows and uneven scene lighting, where a single global
// threshold loses them. `imageproc` only ships global histogram equalization,
// so the tile-based variant is implemented here.

use blattscan_core::config::PipelineConfig;
use image::{DynamicImage, GrayImage, Luma};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use tracing::debug;

/// Convert a color image into a binary edge map.
///
/// Pipeline: grayscale → CLAHE (per `config.clahe_*`) → Gaussian smoothing
/// (kernel `config.blur_kernel`) → Canny with hysteresis thresholds
/// `config.canny_low` / `config.canny_high`. Edge pixels are 255, background 0.
pub fn extract_edges(image: &DynamicImage, config: &PipelineConfig) -> GrayImage {
    let gray = image.to_luma8();
    debug!(
        width = gray.width(),
        height = gray.height(),
        "Converted working copy to grayscale"
    );

    let equalized = clahe(&gray, config.clahe_clip_limit, config.clahe_tile_grid);
    debug!(
        clip_limit = config.clahe_clip_limit,
        tile_grid = config.clahe_tile_grid,
        "Applied tile-based histogram equalization"
    );

    let sigma = sigma_for_kernel(config.blur_kernel);
    let blurred = gaussian_blur_f32(&equalized, sigma);
    debug!(kernel = config.blur_kernel, sigma, "Applied Gaussian smoothing");

    let edges = canny(&blurred, config.canny_low, config.canny_high);
    debug!(
        low = config.canny_low,
        high = config.canny_high,
        "Canny edge detection complete"
    );
    edges
}

/// Gaussian sigma equivalent to a `kernel x kernel` smoothing kernel
/// (the standard kernel-to-sigma relation for odd kernel sizes).
fn sigma_for_kernel(kernel: u32) -> f32 {
    0.3 * ((kernel as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Contrast-limited adaptive histogram equalization.
///
/// The image is divided into a `grid x grid` tile grid. Each tile gets its
/// own clipped histogram (excess above the clip limit redistributed evenly)
/// and an equalization lookup table built from the clipped CDF. Every pixel
/// is then remapped by bilinearly blending the LUTs of the four nearest tile
/// centres, which removes the visible tile seams plain per-tile equalization
/// would produce.
pub fn clahe(gray: &GrayImage, clip_limit: f32, grid: u32) -> GrayImage {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 || grid == 0 {
        return gray.clone();
    }

    let grid = grid.min(width).min(height);
    let tile_w = width.div_ceil(grid);
    let tile_h = height.div_ceil(grid);

    // One 256-entry LUT per tile.
    let mut luts = vec![[0u8; 256]; (grid * grid) as usize];

    for ty in 0..grid {
        for tx in 0..grid {
            let x0 = tx * tile_w;
            let y0 = ty * tile_h;
            let x1 = (x0 + tile_w).min(width);
            let y1 = (y0 + tile_h).min(height);

            let mut histogram = [0u32; 256];
            for y in y0..y1 {
                for x in x0..x1 {
                    histogram[gray.get_pixel(x, y).0[0] as usize] += 1;
                }
            }

            let tile_pixels = ((x1 - x0) * (y1 - y0)).max(1);
            let limit = ((clip_limit * tile_pixels as f32 / 256.0).max(1.0)) as u32;

            // Clip the histogram and redistribute the excess evenly.
            let mut excess: u32 = 0;
            for count in histogram.iter_mut() {
                if *count > limit {
                    excess += *count - limit;
                    *count = limit;
                }
            }
            let bonus = excess / 256;
            let mut remainder = excess % 256;
            for count in histogram.iter_mut() {
                *count += bonus;
                if remainder > 0 {
                    *count += 1;
                    remainder -= 1;
                }
            }

            // Equalization LUT from the cumulative distribution.
            let lut = &mut luts[(ty * grid + tx) as usize];
            let scale = 255.0 / tile_pixels as f32;
            let mut cumulative: u32 = 0;
            for (value, count) in histogram.iter().enumerate() {
                cumulative += count;
                lut[value] = (cumulative as f32 * scale).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    // Remap every pixel by bilinear interpolation between the four
    // surrounding tile LUTs.
    let mut output = GrayImage::new(width, height);
    for y in 0..height {
        // Position relative to tile centres, clamped so border pixels use the
        // nearest tile row/column instead of blending past the grid.
        let fy = ((y as f32 + 0.5 - tile_h as f32 / 2.0) / tile_h as f32)
            .clamp(0.0, (grid - 1) as f32);
        let ty0 = fy.floor() as u32;
        let ty1 = (ty0 + 1).min(grid - 1);
        let wy = fy - ty0 as f32;

        for x in 0..width {
            let fx = ((x as f32 + 0.5 - tile_w as f32 / 2.0) / tile_w as f32)
                .clamp(0.0, (grid - 1) as f32);
            let tx0 = fx.floor() as u32;
            let tx1 = (tx0 + 1).min(grid - 1);
            let wx = fx - tx0 as f32;

            let value = gray.get_pixel(x, y).0[0] as usize;
            let top = luts[(ty0 * grid + tx0) as usize][value] as f32 * (1.0 - wx)
                + luts[(ty0 * grid + tx1) as usize][value] as f32 * wx;
            let bottom = luts[(ty1 * grid + tx0) as usize][value] as f32 * (1.0 - wx)
                + luts[(ty1 * grid + tx1) as usize][value] as f32 * wx;
            let blended = top * (1.0 - wy) + bottom * wy;

            output.put_pixel(x, y, Luma([blended.round().clamp(0.0, 255.0) as u8]));
        }
    }

    output
}
