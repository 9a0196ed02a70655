// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D polygon types shared by every footprint stage
//!
//! Contours are stored open: the closing vertex is implied and never repeated.

use crate::bool2d::compute_signed_area;
use nalgebra::Point2;
use std::fmt::Write;

/// Polygon with an outer boundary and optional holes
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2D {
    /// Outer boundary (counter-clockwise)
    pub exterior: Vec<Point2<f64>>,
    /// Holes (clockwise)
    pub holes: Vec<Vec<Point2<f64>>>,
}

impl Polygon2D {
    /// Create a polygon without holes
    pub fn new(exterior: Vec<Point2<f64>>) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }

    /// Create a polygon with holes
    pub fn with_holes(exterior: Vec<Point2<f64>>, holes: Vec<Vec<Point2<f64>>>) -> Self {
        Self { exterior, holes }
    }

    /// Unsigned area, holes subtracted
    pub fn area(&self) -> f64 {
        let outer = compute_signed_area(&self.exterior).abs();
        let holes: f64 = self
            .holes
            .iter()
            .map(|h| compute_signed_area(h).abs())
            .sum();
        outer - holes
    }
}

/// Footprint geometry: one connected region or several disjoint ones
#[derive(Debug, Clone, PartialEq)]
pub enum FootprintGeometry {
    Polygon(Polygon2D),
    MultiPolygon(Vec<Polygon2D>),
}

impl FootprintGeometry {
    /// Wrap polygons in the geometry type their count implies.
    ///
    /// Returns `None` for an empty list.
    pub fn from_polygons(mut polygons: Vec<Polygon2D>) -> Option<Self> {
        match polygons.len() {
            0 => None,
            1 => polygons.pop().map(FootprintGeometry::Polygon),
            _ => Some(FootprintGeometry::MultiPolygon(polygons)),
        }
    }

    /// All polygons of the geometry
    pub fn polygons(&self) -> &[Polygon2D] {
        match self {
            FootprintGeometry::Polygon(polygon) => std::slice::from_ref(polygon),
            FootprintGeometry::MultiPolygon(polygons) => polygons,
        }
    }

    /// Number of connected components
    pub fn component_count(&self) -> usize {
        self.polygons().len()
    }

    /// Geometry type tag as used in WKT and RDF simple features
    pub fn geometry_type(&self) -> &'static str {
        match self {
            FootprintGeometry::Polygon(_) => "Polygon",
            FootprintGeometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// Whether any component still carries holes
    pub fn has_holes(&self) -> bool {
        self.polygons().iter().any(|p| !p.holes.is_empty())
    }

    /// Unsigned area, holes subtracted
    pub fn area(&self) -> f64 {
        self.polygons().iter().map(Polygon2D::area).sum()
    }

    /// Well-Known Text, X before Y, rings closed
    pub fn to_wkt(&self) -> String {
        let mut wkt = String::new();
        match self {
            FootprintGeometry::Polygon(polygon) => {
                wkt.push_str("POLYGON ");
                write_polygon(&mut wkt, polygon);
            }
            FootprintGeometry::MultiPolygon(polygons) => {
                wkt.push_str("MULTIPOLYGON (");
                for (i, polygon) in polygons.iter().enumerate() {
                    if i > 0 {
                        wkt.push_str(", ");
                    }
                    write_polygon(&mut wkt, polygon);
                }
                wkt.push(')');
            }
        }
        wkt
    }
}

fn write_polygon(out: &mut String, polygon: &Polygon2D) {
    out.push('(');
    write_ring(out, &polygon.exterior);
    for hole in &polygon.holes {
        out.push_str(", ");
        write_ring(out, hole);
    }
    out.push(')');
}

fn write_ring(out: &mut String, contour: &[Point2<f64>]) {
    out.push('(');
    let closing = contour.first();
    for (i, p) in contour.iter().chain(closing).enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        // Writing to a String cannot fail
        let _ = write!(out, "{} {}", p.x, p.y);
    }
    out.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Polygon2D {
        Polygon2D::new(vec![
            Point2::new(x, y),
            Point2::new(x + size, y),
            Point2::new(x + size, y + size),
            Point2::new(x, y + size),
        ])
    }

    #[test]
    fn test_from_polygons_type() {
        assert!(FootprintGeometry::from_polygons(vec![]).is_none());

        let single = FootprintGeometry::from_polygons(vec![square(0.0, 0.0, 1.0)]).unwrap();
        assert_eq!(single.geometry_type(), "Polygon");
        assert_eq!(single.component_count(), 1);

        let multi =
            FootprintGeometry::from_polygons(vec![square(0.0, 0.0, 1.0), square(5.0, 0.0, 1.0)])
                .unwrap();
        assert_eq!(multi.geometry_type(), "MultiPolygon");
        assert_eq!(multi.component_count(), 2);
    }

    #[test]
    fn test_area_subtracts_holes() {
        let outer = square(0.0, 0.0, 10.0).exterior;
        let hole = square(4.0, 4.0, 2.0).exterior.into_iter().rev().collect();
        let polygon = Polygon2D::with_holes(outer, vec![hole]);
        assert!((polygon.area() - 96.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_wkt() {
        let geometry = FootprintGeometry::Polygon(square(100.0, 200.0, 1.5));
        assert_eq!(
            geometry.to_wkt(),
            "POLYGON ((100 200, 101.5 200, 101.5 201.5, 100 201.5, 100 200))"
        );
    }

    #[test]
    fn test_multipolygon_wkt() {
        let geometry = FootprintGeometry::MultiPolygon(vec![
            square(0.0, 0.0, 1.0),
            square(2.0, 0.0, 1.0),
        ]);
        assert_eq!(
            geometry.to_wkt(),
            "MULTIPOLYGON (((0 0, 1 0, 1 1, 0 1, 0 0)), ((2 0, 3 0, 3 1, 2 1, 2 0)))"
        );
    }
}
