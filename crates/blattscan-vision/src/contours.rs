// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour extraction — trace closed boundaries from a binary edge map and
// rank them by enclosed area.

use imageproc::contours::find_contours;
use imageproc::point::Point;
use tracing::debug;

/// A traced closed boundary with its enclosed area.
///
/// Read-only after extraction. Only the boundary polygon matters for outline
/// detection; hole/nesting topology from the tracer is discarded.
#[derive(Debug, Clone)]
pub struct Contour {
    /// Boundary points in trace order.
    pub points: Vec<Point<i32>>,
    /// Enclosed area (shoelace formula over the boundary polygon).
    pub area: f64,
}

/// Trace all closed contours in a binary edge map and return the `max`
/// largest by enclosed area, in descending order.
///
/// Uses Suzuki-Abe border following via `imageproc::contours::find_contours`.
/// The document boundary is assumed to be among the largest closed shapes in
/// the frame, so truncation doubles as noise rejection.
pub fn rank_contours(edges: &image::GrayImage, max: usize) -> Vec<Contour> {
    let traced = find_contours::<i32>(edges);
    let total = traced.len();

    let mut contours: Vec<Contour> = traced
        .into_iter()
        .filter(|c| c.points.len() >= 4)
        .map(|c| {
            let area = shoelace_area(&c.points);
            Contour {
                points: c.points,
                area,
            }
        })
        .collect();

    contours.sort_by(|a, b| b.area.partial_cmp(&a.area).unwrap_or(std::cmp::Ordering::Equal));
    contours.truncate(max);

    debug!(
        traced = total,
        kept = contours.len(),
        "Contours ranked by area"
    );
    contours
}

/// Polygon area via the shoelace formula. Vertices are taken in order; the
/// result is orientation-independent.
fn shoelace_area(points: &[Point<i32>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0f64;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x as f64 * points[j].y as f64;
        area -= points[j].x as f64 * points[i].y as f64;
    }
    area.abs() / 2.0
}
