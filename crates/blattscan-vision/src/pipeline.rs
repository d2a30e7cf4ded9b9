// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan pipeline — orchestrates edge extraction, contour ranking, outline
// selection, rectification, and binarization for one image at a time.
//
// The pipeline is synchronous and CPU-bound with no internal I/O waits.
// Failure at any stage is terminal for the invocation; nothing is retried
// and no partial output escapes. Concurrent scans are independent pipeline
// instances with no shared mutable state.

use blattscan_core::config::PipelineConfig;
use blattscan_core::error::{Result, ScanError};
use blattscan_core::types::ScanStage;
use image::{DynamicImage, GrayImage};
use tracing::{info, instrument};

use crate::binarize::binarize;
use crate::codec::{self, ImageCodec};
use crate::contours::rank_contours;
use crate::edges::extract_edges;
use crate::outline::{LargestQuadFirst, OutlineSelector};
use crate::rectify::rectify;

/// The two images produced by a successful scan.
pub struct ScanOutput {
    /// The original resized to the working reference height, for preview and
    /// side-by-side comparison.
    pub original_preview: DynamicImage,
    /// The binarized, rectified document. Dimensions follow the detected
    /// quadrilateral's aspect ratio.
    pub scanned: GrayImage,
}

/// Document scanning pipeline.
///
/// Detection runs on a downscaled working copy for speed; rectification
/// always warps the full-resolution original. The outline selection policy
/// is pluggable via [`OutlineSelector`].
pub struct ScanPipeline {
    config: PipelineConfig,
    selector: Box<dyn OutlineSelector>,
}

impl ScanPipeline {
    /// Pipeline with default configuration and the first-four-sided-contour
    /// selection policy.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Pipeline with a custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        let selector = Box::new(LargestQuadFirst::new(config.approx_epsilon_ratio));
        Self { config, selector }
    }

    /// Replace the outline selection policy.
    pub fn with_selector(mut self, selector: Box<dyn OutlineSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Decode raw image bytes and scan the result.
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub fn scan_bytes(&self, data: &[u8]) -> Result<ScanOutput> {
        let original = ImageCodec::from_bytes(data)?.into_dynamic();
        self.scan_image(&original)
    }

    /// Run the full pipeline on an already-decoded image.
    #[instrument(skip(self, original), fields(width = original.width(), height = original.height()))]
    pub fn scan_image(&self, original: &DynamicImage) -> Result<ScanOutput> {
        info!(stage = %ScanStage::Loaded, "Scan started");

        // Working copy for detection; also serves as the preview output.
        let (working, scale_ratio) =
            codec::resize_to_height(original, self.config.working_height);

        let edge_map = extract_edges(&working, &self.config);
        info!(stage = %ScanStage::EdgesExtracted, "Edge map computed");

        let candidates = rank_contours(&edge_map, self.config.max_candidates);
        info!(
            stage = %ScanStage::ContoursRanked,
            candidates = candidates.len(),
            "Contours ranked"
        );
        drop(edge_map);

        let outline = self.selector.select(&candidates).ok_or(ScanError::OutlineNotFound {
            candidates: self.config.max_candidates,
        })?;
        info!(
            stage = %ScanStage::OutlineFound,
            top_left = %outline.corners[0],
            "Document outline selected"
        );

        let rectified = rectify(original, &outline, scale_ratio)?;
        info!(
            stage = %ScanStage::Rectified,
            width = rectified.width(),
            height = rectified.height(),
            "Perspective corrected"
        );

        let scanned = binarize(&rectified, &self.config);
        info!(stage = %ScanStage::Binarized, "Adaptive threshold applied");

        info!(stage = %ScanStage::Done, "Scan complete");
        Ok(ScanOutput {
            original_preview: working,
            scanned,
        })
    }
}

impl Default for ScanPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blattscan_core::types::{Point, Quad};
    use image::{Rgb, RgbImage};

    /// Fill a convex quadrilateral (corners in clockwise order) with `value`.
    fn fill_quad(img: &mut RgbImage, corners: [(f32, f32); 4], value: u8) {
        let inside = |x: f32, y: f32| {
            for i in 0..4 {
                let (x0, y0) = corners[i];
                let (x1, y1) = corners[(i + 1) % 4];
                // Clockwise winding: interior points lie to the right of each
                // directed edge (positive cross product in image coordinates).
                if (x1 - x0) * (y - y0) - (y1 - y0) * (x - x0) < 0.0 {
                    return false;
                }
            }
            true
        };
        for y in 0..img.height() {
            for x in 0..img.width() {
                if inside(x as f32, y as f32) {
                    img.put_pixel(x, y, Rgb([value, value, value]));
                }
            }
        }
    }

    /// Photograph-like synthetic input: a bright, slightly skewed letter-ratio
    /// page on a dark background at full resolution 800x1000.
    fn letter_page_photo() -> (DynamicImage, [(f32, f32); 4]) {
        let corners = [
            (150.0, 140.0), // top-left
            (618.0, 148.0), // top-right
            (626.0, 754.0), // bottom-right
            (158.0, 746.0), // bottom-left
        ];
        let mut img = RgbImage::from_pixel(800, 1000, Rgb([40u8, 40, 40]));
        fill_quad(&mut img, corners, 235);
        (DynamicImage::ImageRgb8(img), corners)
    }

    /// End-to-end: the synthetic page scans successfully and the output
    /// aspect ratio is within 5% of letter (8.5:11).
    #[test]
    fn end_to_end_letter_page() {
        let (photo, _) = letter_page_photo();
        let output = ScanPipeline::new().scan_image(&photo).expect("scan");

        assert_eq!(output.original_preview.height(), 500);

        let aspect = output.scanned.width() as f32 / output.scanned.height() as f32;
        let letter = 8.5 / 11.0;
        assert!(
            (aspect - letter).abs() / letter < 0.05,
            "aspect {} deviates more than 5% from letter {}",
            aspect,
            letter
        );

        // The rectified page interior is blank paper: overwhelmingly white.
        let white = output.scanned.pixels().filter(|p| p.0[0] == 255).count();
        let total = (output.scanned.width() * output.scanned.height()) as usize;
        assert!(white * 10 > total * 9, "scanned page should be mostly white");
    }

    /// A featureless frame aborts with `OutlineNotFound`, never a guessed
    /// quadrilateral.
    #[test]
    fn blank_frame_reports_outline_not_found() {
        let blank = DynamicImage::ImageRgb8(RgbImage::from_pixel(640, 480, Rgb([128u8, 128, 128])));
        match ScanPipeline::new().scan_image(&blank) {
            Err(ScanError::OutlineNotFound { candidates }) => assert_eq!(candidates, 5),
            other => panic!("expected OutlineNotFound, got {:?}", other.as_ref().err()),
        }
    }

    /// Undecodable bytes abort with `Decode` before any pipeline stage runs.
    #[test]
    fn garbage_bytes_report_decode_error() {
        match ScanPipeline::new().scan_bytes(b"not an image at all") {
            Err(ScanError::Decode(_)) => {}
            other => panic!("expected Decode, got {:?}", other.as_ref().err()),
        }
    }

    /// Round-trip property: warping a detected quadrilateral and re-detecting
    /// it in the warped result yields the destination rectangle's corners.
    #[test]
    fn warp_then_redetect_yields_destination_rectangle() {
        let (photo, corners) = letter_page_photo();

        let quad = crate::geometry::order_corners([
            Point::new(corners[0].0, corners[0].1),
            Point::new(corners[1].0, corners[1].1),
            Point::new(corners[2].0, corners[2].1),
            Point::new(corners[3].0, corners[3].1),
        ]);
        let (projection, width, height) =
            crate::geometry::perspective_transform(&quad).expect("transform");
        let warped = crate::geometry::warp(&photo, &projection, width, height);

        // Pad with background so the page boundary is detectable.
        let margin = 30u32;
        let mut padded =
            RgbImage::from_pixel(width + 2 * margin, height + 2 * margin, Rgb([40u8, 40, 40]));
        for (x, y, pixel) in warped.enumerate_pixels() {
            padded.put_pixel(x + margin, y + margin, *pixel);
        }

        let padded = DynamicImage::ImageRgb8(padded);
        let config = PipelineConfig::default();
        let edge_map = extract_edges(&padded, &config);
        let candidates = rank_contours(&edge_map, config.max_candidates);
        let redetected = LargestQuadFirst::default()
            .select(&candidates)
            .expect("warped page should be redetectable");
        let redetected = crate::geometry::order_corners(redetected.corners);

        let expected = Quad::new([
            Point::new(margin as f32, margin as f32),
            Point::new((margin + width - 1) as f32, margin as f32),
            Point::new((margin + width - 1) as f32, (margin + height - 1) as f32),
            Point::new(margin as f32, (margin + height - 1) as f32),
        ]);
        for (found, wanted) in redetected.corners.iter().zip(expected.corners.iter()) {
            assert!(
                found.distance(wanted) < 5.0,
                "corner {} too far from {}",
                found,
                wanted
            );
        }
    }
}
