// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Georeferencing of boundary rings
//!
//! Rotates, scales and translates local footprint rings into the target CRS
//! and rounds every coordinate to millimetres.

use crate::error::{Error, Result};
use crate::exterior::{BoundaryRings, Ring};
use crate::metrics::FootprintMetrics;
use crate::polygon::{FootprintGeometry, Polygon2D};
use ifc_footprint_core::{MapConversionParams, MapTransform, ScaleConvention};
use nalgebra::Point2;

/// Decimal places kept in target CRS coordinates
pub const COORDINATE_DECIMALS: i32 = 3;

/// Round a coordinate to [`COORDINATE_DECIMALS`] places
#[inline]
pub fn round_coordinate(value: f64) -> f64 {
    let factor = 10f64.powi(COORDINATE_DECIMALS);
    // +0.0 turns -0.0 into 0.0
    (value * factor).round() / factor + 0.0
}

/// Applies a map conversion to boundary rings
#[derive(Debug, Clone, Copy)]
pub struct Georeferencer {
    transform: MapTransform,
}

impl Georeferencer {
    /// Fails with `InvalidScale` when the scale is zero or not finite
    pub fn new(params: &MapConversionParams, convention: ScaleConvention) -> Result<Self> {
        Ok(Self {
            transform: params.transform(convention)?,
        })
    }

    pub fn transform(&self) -> &MapTransform {
        &self.transform
    }

    /// Local point to rounded target CRS point
    #[inline]
    pub fn to_map(&self, point: &Point2<f64>) -> Point2<f64> {
        let (e, n) = self.transform.local_to_map(point.x, point.y);
        Point2::new(round_coordinate(e), round_coordinate(n))
    }

    /// Target CRS point back to local coordinates
    #[inline]
    pub fn to_local(&self, point: &Point2<f64>) -> Point2<f64> {
        let (x, y) = self.transform.map_to_local(point.x, point.y);
        Point2::new(x, y)
    }

    /// Transform every ring into one polygon of the target CRS geometry
    pub fn georeference(&self, rings: &BoundaryRings) -> Result<FootprintGeometry> {
        let polygons = rings
            .rings()
            .iter()
            .map(|ring| {
                let points: Vec<Point2<f64>> =
                    ring.points().iter().map(|p| self.to_map(p)).collect();
                // Rounding can merge vertices of very small rings
                let ring = Ring::close(&points)?;
                Ok(Polygon2D::new(ring.open_points().to_vec()))
            })
            .collect::<Result<Vec<_>>>()?;

        FootprintGeometry::from_polygons(polygons)
            .ok_or_else(|| Error::DegenerateGeometry("no boundary rings".to_string()))
    }
}

/// Final footprint in target CRS coordinates with its metrics
#[derive(Debug, Clone, PartialEq)]
pub struct GeoreferencedFootprint {
    pub geometry: FootprintGeometry,
    pub perimeter: f64,
    pub area: f64,
    pub elongation: f64,
}

impl GeoreferencedFootprint {
    /// Attach metrics to a georeferenced geometry
    pub fn new(geometry: FootprintGeometry) -> Result<Self> {
        let metrics = FootprintMetrics::compute(&geometry)?;
        Ok(Self {
            geometry,
            perimeter: metrics.perimeter,
            area: metrics.area,
            elongation: metrics.elongation,
        })
    }

    pub fn to_wkt(&self) -> String {
        self.geometry.to_wkt()
    }
}
