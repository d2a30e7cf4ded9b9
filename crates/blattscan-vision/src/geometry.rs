// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometry utilities — canonical corner ordering, perspective transform
// computation, and inverse-mapped warping.

use blattscan_core::error::{Result, ScanError};
use blattscan_core::types::{Point, Quad};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use tracing::debug;

/// Order four arbitrary corner points into canonical order:
/// {top-left, top-right, bottom-right, bottom-left}.
///
/// The top-left corner has the smallest coordinate sum (x + y) and the
/// bottom-right the largest. The remaining two are disambiguated by the
/// coordinate difference (y − x): smallest is top-right, largest is
/// bottom-left. This works for any non-degenerate convex quadrilateral
/// regardless of rotation or scale; degenerate inputs (three collinear
/// points) are undefined.
pub fn order_corners(points: [Point; 4]) -> Quad {
    let sum = |p: &Point| p.x + p.y;
    let diff = |p: &Point| p.y - p.x;

    let mut top_left = 0;
    let mut bottom_right = 0;
    let mut top_right = 0;
    let mut bottom_left = 0;

    for i in 1..4 {
        if sum(&points[i]) < sum(&points[top_left]) {
            top_left = i;
        }
        if sum(&points[i]) > sum(&points[bottom_right]) {
            bottom_right = i;
        }
        if diff(&points[i]) < diff(&points[top_right]) {
            top_right = i;
        }
        if diff(&points[i]) > diff(&points[bottom_left]) {
            bottom_left = i;
        }
    }

    Quad::new([
        points[top_left],
        points[top_right],
        points[bottom_right],
        points[bottom_left],
    ])
}

/// Compute the projective transform mapping an ordered quadrilateral onto an
/// axis-aligned rectangle, together with the rectangle's dimensions.
///
/// The output size is derived from the quadrilateral rather than fixed:
/// width is the longer of the two horizontal edges, height the longer of the
/// two vertical edges. This preserves the document's approximate real aspect
/// ratio. Destination corners are (0,0), (w−1,0), (w−1,h−1), (0,h−1).
///
/// Fails with `DegenerateGeometry` when either derived dimension rounds to
/// zero or the four-point correspondence has no solution.
pub fn perspective_transform(quad: &Quad) -> Result<(Projection, u32, u32)> {
    let tl = quad.top_left();
    let tr = quad.top_right();
    let br = quad.bottom_right();
    let bl = quad.bottom_left();

    let width = tl.distance(&tr).max(bl.distance(&br)).round() as u32;
    let height = tl.distance(&bl).max(tr.distance(&br)).round() as u32;

    if width == 0 || height == 0 {
        return Err(ScanError::DegenerateGeometry { width, height });
    }

    let src: [(f32, f32); 4] = [
        (tl.x, tl.y),
        (tr.x, tr.y),
        (br.x, br.y),
        (bl.x, bl.y),
    ];
    let dest: [(f32, f32); 4] = [
        (0.0, 0.0),
        (width as f32 - 1.0, 0.0),
        (width as f32 - 1.0, height as f32 - 1.0),
        (0.0, height as f32 - 1.0),
    ];

    let projection = Projection::from_control_points(src, dest)
        .ok_or(ScanError::DegenerateGeometry { width, height })?;

    debug!(width, height, "Perspective transform computed");
    Ok((projection, width, height))
}

/// Apply a projective transform to an image, producing a `width` x `height`
/// output. Each destination pixel samples the source through the inverse
/// transform with bilinear interpolation; out-of-bounds samples are black.
pub fn warp(image: &DynamicImage, projection: &Projection, width: u32, height: u32) -> RgbImage {
    let rgb_input = image.to_rgb8();
    let mut output = RgbImage::new(width, height);

    warp_into(
        &rgb_input,
        projection,
        Interpolation::Bilinear,
        Rgb([0u8, 0, 0]),
        &mut output,
    );

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_quad() -> [Point; 4] {
        [
            Point::new(10.0, 12.0),  // top-left
            Point::new(208.0, 8.0),  // top-right
            Point::new(215.0, 302.0), // bottom-right
            Point::new(4.0, 295.0),  // bottom-left
        ]
    }

    fn permutations_of_four() -> Vec<[usize; 4]> {
        let mut out = Vec::new();
        let mut indices = [0usize, 1, 2, 3];
        permute(&mut indices, 0, &mut out);
        out
    }

    fn permute(indices: &mut [usize; 4], k: usize, out: &mut Vec<[usize; 4]>) {
        if k == 4 {
            out.push(*indices);
            return;
        }
        for i in k..4 {
            indices.swap(k, i);
            permute(indices, k + 1, out);
            indices.swap(k, i);
        }
    }

    /// The canonical ordering is identical for every one of the 24 input
    /// permutations of a convex quadrilateral.
    #[test]
    fn order_corners_is_permutation_invariant() {
        let corners = reference_quad();
        let expected = order_corners(corners);

        for perm in permutations_of_four() {
            let shuffled = [
                corners[perm[0]],
                corners[perm[1]],
                corners[perm[2]],
                corners[perm[3]],
            ];
            let ordered = order_corners(shuffled);
            assert_eq!(
                ordered, expected,
                "permutation {:?} produced a different ordering",
                perm
            );
        }
    }

    /// Canonical order starts at top-left and proceeds clockwise.
    #[test]
    fn order_corners_canonical_positions() {
        let quad = order_corners(reference_quad());
        assert_eq!(quad.top_left(), Point::new(10.0, 12.0));
        assert_eq!(quad.top_right(), Point::new(208.0, 8.0));
        assert_eq!(quad.bottom_right(), Point::new(215.0, 302.0));
        assert_eq!(quad.bottom_left(), Point::new(4.0, 295.0));
    }

    /// Output dimensions are the longer of each opposing edge pair.
    #[test]
    fn perspective_transform_derives_dimensions() {
        let quad = order_corners([
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 200.0),
            Point::new(0.0, 200.0),
        ]);
        let (_, width, height) = perspective_transform(&quad).expect("transform");
        assert_eq!(width, 100);
        assert_eq!(height, 200);
    }

    /// A quadrilateral collapsing to a line is rejected, not warped.
    #[test]
    fn perspective_transform_rejects_degenerate_quad() {
        let quad = Quad::new([
            Point::new(0.0, 0.0),
            Point::new(0.2, 0.0),
            Point::new(0.2, 0.1),
            Point::new(0.0, 0.1),
        ]);
        match perspective_transform(&quad) {
            Err(ScanError::DegenerateGeometry { .. }) => {}
            other => panic!("expected DegenerateGeometry, got {:?}", other.map(|_| ())),
        }
    }

    /// Warping an axis-aligned rectangle is equivalent to cropping it: the
    /// output is filled by the rectangle's content.
    #[test]
    fn warp_axis_aligned_rectangle_is_a_crop() {
        let mut img = RgbImage::from_pixel(300, 300, Rgb([0u8, 0, 0]));
        for y in 50..250 {
            for x in 100..200 {
                img.put_pixel(x, y, Rgb([255u8, 255, 255]));
            }
        }
        let dynamic = DynamicImage::ImageRgb8(img);

        let quad = order_corners([
            Point::new(100.0, 50.0),
            Point::new(199.0, 50.0),
            Point::new(199.0, 249.0),
            Point::new(100.0, 249.0),
        ]);
        let (projection, width, height) = perspective_transform(&quad).expect("transform");
        let warped = warp(&dynamic, &projection, width, height);

        assert_eq!((warped.width(), warped.height()), (width, height));
        // Sample well inside the rectangle: must be white.
        let centre = warped.get_pixel(width / 2, height / 2);
        assert_eq!(centre.0, [255, 255, 255]);
    }
}
