// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadrilateral outline selection — pick the most plausible four-sided
// contour approximating the document boundary.

use blattscan_core::types::{Point, Quad};
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use tracing::debug;

use crate::contours::Contour;

/// Strategy for selecting a document outline from ranked contours.
///
/// The selection policy is deliberately isolated behind this trait so that
/// alternatives (convexity scoring, angle-quality ranking) can be swapped in
/// without touching the rest of the pipeline.
pub trait OutlineSelector: Send + Sync {
    /// Return the document outline, or `None` if no candidate qualifies.
    /// Corners are in detection order; callers canonicalize separately.
    fn select(&self, contours: &[Contour]) -> Option<Quad>;
}

/// Default policy: first contour (in descending area order) whose simplified
/// polygon has exactly four vertices wins.
///
/// Simplification is Ramer-Douglas-Peucker with tolerance proportional to the
/// contour perimeter. The policy makes no attempt at convexity or angle
/// scoring; on frames with spurious large quadrilateral artifacts it can pick
/// the wrong shape. That is a known limitation of the policy, kept as the
/// default on purpose.
#[derive(Debug, Clone)]
pub struct LargestQuadFirst {
    /// Simplification tolerance as a fraction of the contour perimeter.
    pub epsilon_ratio: f64,
}

impl LargestQuadFirst {
    pub fn new(epsilon_ratio: f64) -> Self {
        Self { epsilon_ratio }
    }
}

impl Default for LargestQuadFirst {
    fn default() -> Self {
        Self { epsilon_ratio: 0.02 }
    }
}

impl OutlineSelector for LargestQuadFirst {
    fn select(&self, contours: &[Contour]) -> Option<Quad> {
        for (rank, contour) in contours.iter().enumerate() {
            let perimeter = arc_length(&contour.points, true);
            let simplified =
                approximate_polygon_dp(&contour.points, self.epsilon_ratio * perimeter, true);

            debug!(
                rank,
                perimeter,
                vertices = simplified.len(),
                "Outline candidate simplified"
            );

            if simplified.len() == 4 {
                let corners = [
                    Point::new(simplified[0].x as f32, simplified[0].y as f32),
                    Point::new(simplified[1].x as f32, simplified[1].y as f32),
                    Point::new(simplified[2].x as f32, simplified[2].y as f32),
                    Point::new(simplified[3].x as f32, simplified[3].y as f32),
                ];
                return Some(Quad::new(corners));
            }
        }
        None
    }
}
