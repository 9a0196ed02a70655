// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Perimeter, area and elongation of a footprint

use crate::bool2d::compute_signed_area;
use crate::error::{Error, Result};
use crate::polygon::FootprintGeometry;
use nalgebra::Point2;

/// Shape metrics of a footprint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootprintMetrics {
    /// Total length of all rings
    pub perimeter: f64,
    /// Unsigned area summed over components
    pub area: f64,
    /// sqrt(area) / (perimeter / 4): 1.0 for a square, smaller when elongated
    pub elongation: f64,
}

impl FootprintMetrics {
    pub fn compute(geometry: &FootprintGeometry) -> Result<Self> {
        let mut perimeter = 0.0;
        for polygon in geometry.polygons() {
            perimeter += ring_length(&polygon.exterior);
            perimeter += polygon.holes.iter().map(|h| ring_length(h)).sum::<f64>();
        }

        if perimeter == 0.0 {
            return Err(Error::DegenerateMetrics);
        }

        let area = geometry.area();
        let elongation = area.sqrt() / (perimeter / 4.0);

        Ok(Self {
            perimeter,
            area,
            elongation,
        })
    }
}

/// Length of a ring, closing segment included
pub fn ring_length(contour: &[Point2<f64>]) -> f64 {
    let n = contour.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| (contour[(i + 1) % n] - contour[i]).norm())
        .sum()
}

/// Unsigned shoelace area of a ring
pub fn ring_area(contour: &[Point2<f64>]) -> f64 {
    compute_signed_area(contour).abs()
}
