// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Blattscan document scanner.

use serde::{Deserialize, Serialize};

/// A 2D point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Scale both coordinates by a uniform factor.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// A quadrilateral given by exactly four corner points.
///
/// A freshly detected outline carries its corners in trace order. After
/// passing through `order_corners` the corners are canonical:
/// {top-left, top-right, bottom-right, bottom-left}, clockwise starting from
/// top-left. The accessors assume canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub corners: [Point; 4],
}

impl Quad {
    pub fn new(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    pub fn top_left(&self) -> Point {
        self.corners[0]
    }

    pub fn top_right(&self) -> Point {
        self.corners[1]
    }

    pub fn bottom_right(&self) -> Point {
        self.corners[2]
    }

    pub fn bottom_left(&self) -> Point {
        self.corners[3]
    }

    /// Scale every corner by a uniform factor (working-copy coordinates back
    /// to full resolution).
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            corners: [
                self.corners[0].scaled(factor),
                self.corners[1].scaled(factor),
                self.corners[2].scaled(factor),
                self.corners[3].scaled(factor),
            ],
        }
    }
}

/// Lifecycle states of a single pipeline invocation.
///
/// Transitions are strictly forward; any stage may abort the invocation with
/// a terminal `ScanError` instead of advancing. There is no retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanStage {
    /// Input decoded into a full-resolution image.
    Loaded,
    /// Binary edge map computed from the working copy.
    EdgesExtracted,
    /// Closed contours traced and ranked by area.
    ContoursRanked,
    /// A four-sided document outline selected.
    OutlineFound,
    /// Original image warped to a flat top-down crop.
    Rectified,
    /// Rectified crop thresholded to black and white.
    Binarized,
    /// Both outputs produced.
    Done,
}

impl std::fmt::Display for ScanStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Loaded => "loaded",
            Self::EdgesExtracted => "edges-extracted",
            Self::ContoursRanked => "contours-ranked",
            Self::OutlineFound => "outline-found",
            Self::Rectified => "rectified",
            Self::Binarized => "binarized",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}
