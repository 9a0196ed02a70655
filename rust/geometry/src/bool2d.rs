// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D Boolean Union for Silhouettes and Footprints
//!
//! Thin layer over the i_overlay crate. Every contour handed to the overlay is
//! normalised first (outer boundaries counter-clockwise, holes clockwise) so the
//! non-zero fill rule yields a proper union: overlapping regions stay filled and
//! holes that nothing else covers stay empty.

use crate::polygon::Polygon2D;
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;

/// Epsilon for floating point comparisons in 2D operations
#[cfg(test)]
const EPSILON_2D: f64 = 1e-9;

/// Minimum area threshold - polygons smaller than this are considered degenerate
pub const MIN_AREA_THRESHOLD: f64 = 1e-10;

/// Union any number of polygons into disjoint polygons with holes
///
/// Degenerate contours are dropped before the overlay runs. An empty result
/// means nothing with area survived.
pub fn union_polygons<'a, I>(polygons: I) -> Vec<Polygon2D>
where
    I: IntoIterator<Item = &'a Polygon2D>,
{
    let mut subject: Vec<Vec<[f64; 2]>> = Vec::new();

    for polygon in polygons {
        if !is_valid_contour(&polygon.exterior) {
            continue;
        }
        subject.push(contour_to_path(&ensure_ccw(&polygon.exterior)));
        for hole in &polygon.holes {
            if is_valid_contour(hole) {
                subject.push(contour_to_path(&ensure_cw(hole)));
            }
        }
    }

    if subject.is_empty() {
        return Vec::new();
    }

    let clip: Vec<Vec<[f64; 2]>> = Vec::new();
    let result = subject.overlay(&clip, OverlayRule::Union, FillRule::NonZero);

    shapes_to_polygons(&result)
}

/// Check if a contour is valid (has area, not degenerate)
pub fn is_valid_contour(contour: &[Point2<f64>]) -> bool {
    if contour.len() < 3 {
        return false;
    }

    let area = compute_signed_area(contour).abs();
    area > MIN_AREA_THRESHOLD
}

/// Compute the signed area of a 2D contour
/// Positive = counter-clockwise, Negative = clockwise
pub fn compute_signed_area(contour: &[Point2<f64>]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    let n = contour.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area += contour[i].x * contour[j].y;
        area -= contour[j].x * contour[i].y;
    }

    area * 0.5
}

/// Ensure contour has counter-clockwise winding (positive area)
pub fn ensure_ccw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let area = compute_signed_area(contour);
    if area < 0.0 {
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

/// Ensure contour has clockwise winding (for holes)
pub fn ensure_cw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let area = compute_signed_area(contour);
    if area > 0.0 {
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

/// Compute bounding box of a contour
pub fn contour_bounds(contour: &[Point2<f64>]) -> Option<(Point2<f64>, Point2<f64>)> {
    if contour.is_empty() {
        return None;
    }

    let mut min = contour[0];
    let mut max = contour[0];

    for p in contour.iter().skip(1) {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    Some((min, max))
}

// ============================================================================
// Internal Helper Functions
// ============================================================================

/// Convert a Point2 contour to i_overlay path format
fn contour_to_path(contour: &[Point2<f64>]) -> Vec<[f64; 2]> {
    contour.iter().map(|p| [p.x, p.y]).collect()
}

fn path_to_contour(path: &[[f64; 2]]) -> Vec<Point2<f64>> {
    path.iter().map(|p| Point2::new(p[0], p[1])).collect()
}

/// Convert i_overlay result shapes back to polygons
///
/// i_overlay returns Vec<Vec<Vec<[f64; 2]>>> where:
/// - Outer Vec: list of shapes
/// - Middle Vec: list of contours per shape (first is outer, rest are holes)
/// - Inner Vec: list of points per contour
fn shapes_to_polygons(shapes: &[Vec<Vec<[f64; 2]>>]) -> Vec<Polygon2D> {
    let mut polygons = Vec::with_capacity(shapes.len());

    for shape in shapes {
        let Some(outer) = shape.first() else {
            continue;
        };
        let outer = path_to_contour(outer);
        if !is_valid_contour(&outer) {
            continue;
        }

        let holes = shape
            .iter()
            .skip(1)
            .map(|path| path_to_contour(path))
            .filter(|hole| is_valid_contour(hole))
            .map(|hole| ensure_cw(&hole))
            .collect();

        polygons.push(Polygon2D::with_holes(ensure_ccw(&outer), holes));
    }

    polygons
}
