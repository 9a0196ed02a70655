// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Exterior extraction: outer boundary rings without holes

use crate::bool2d::contour_bounds;
use crate::error::{Error, Result};
use crate::polygon::{FootprintGeometry, Polygon2D};
use nalgebra::Point2;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;

/// Closed boundary ring: the first point is repeated at the end
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<Point2<f64>>,
}

impl Ring {
    /// Close an open contour into a ring.
    ///
    /// Fails when the contour has fewer than 3 distinct vertices.
    pub fn close(contour: &[Point2<f64>]) -> Result<Self> {
        let distinct = distinct_vertex_count(contour);
        if distinct < 3 {
            return Err(Error::DegenerateGeometry(format!(
                "ring has {} distinct vertices",
                distinct
            )));
        }

        let mut points = contour.to_vec();
        if points.first() != points.last() {
            points.push(points[0]);
        }
        Ok(Self { points })
    }

    /// All points, closing point included
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Points without the closing duplicate
    pub fn open_points(&self) -> &[Point2<f64>] {
        &self.points[..self.points.len() - 1]
    }

    pub fn distinct_vertex_count(&self) -> usize {
        distinct_vertex_count(self.open_points())
    }

    pub fn bounds(&self) -> (Point2<f64>, Point2<f64>) {
        // A ring always holds at least 4 points
        contour_bounds(&self.points).unwrap_or((self.points[0], self.points[0]))
    }
}

/// Outer rings of every connected component, sorted by bounding-box minimum
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryRings {
    rings: Vec<Ring>,
}

impl BoundaryRings {
    /// Sort rings into a stable output order
    pub fn new(mut rings: Vec<Ring>) -> Self {
        rings.sort_by(compare_rings);
        Self { rings }
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Hole-free geometry with one polygon per ring
    pub fn to_geometry(&self) -> Option<FootprintGeometry> {
        let polygons = self
            .rings
            .iter()
            .map(|ring| Polygon2D::new(ring.open_points().to_vec()))
            .collect();
        FootprintGeometry::from_polygons(polygons)
    }
}

/// Strip holes from a footprint, keeping one closed outer ring per component
pub fn extract_exterior(geometry: &FootprintGeometry) -> Result<BoundaryRings> {
    let rings = geometry
        .polygons()
        .iter()
        .map(|polygon| Ring::close(&polygon.exterior))
        .collect::<Result<Vec<_>>>()?;

    Ok(BoundaryRings::new(rings))
}

fn distinct_vertex_count(contour: &[Point2<f64>]) -> usize {
    // +0.0 folds -0.0 into the same key
    let keys: FxHashSet<(u64, u64)> = contour
        .iter()
        .map(|p| ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits()))
        .collect();
    keys.len()
}

fn compare_rings(a: &Ring, b: &Ring) -> Ordering {
    let (a_min, _) = a.bounds();
    let (b_min, _) = b.bounds();
    a_min
        .x
        .total_cmp(&b_min.x)
        .then_with(|| a_min.y.total_cmp(&b_min.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(x, y),
            Point2::new(x + size, y),
            Point2::new(x + size, y + size),
            Point2::new(x, y + size),
        ]
    }

    #[test]
    fn test_polygon_holes_removed() {
        let hole = square(4.0, 4.0, 2.0).into_iter().rev().collect();
        let geometry =
            FootprintGeometry::Polygon(Polygon2D::with_holes(square(0.0, 0.0, 10.0), vec![hole]));

        let rings = extract_exterior(&geometry).unwrap();
        assert_eq!(rings.len(), 1);

        let ring = &rings.rings()[0];
        assert_eq!(ring.points().len(), 5);
        assert_eq!(ring.points().first(), ring.points().last());
        assert_eq!(ring.distinct_vertex_count(), 4);

        let flat = rings.to_geometry().unwrap();
        assert!(!flat.has_holes());
        assert!((flat.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_multipolygon_one_ring_per_component() {
        let geometry = FootprintGeometry::MultiPolygon(vec![
            Polygon2D::new(square(5.0, 0.0, 1.0)),
            Polygon2D::new(square(0.0, 0.0, 1.0)),
            Polygon2D::new(square(0.0, -3.0, 1.0)),
        ]);

        let rings = extract_exterior(&geometry).unwrap();
        assert_eq!(rings.len(), 3);

        // Sorted by bounding-box minimum x, then y
        let mins: Vec<_> = rings.rings().iter().map(|r| r.bounds().0).collect();
        assert_eq!(
            mins,
            vec![
                Point2::new(0.0, -3.0),
                Point2::new(0.0, 0.0),
                Point2::new(5.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_already_closed_contour() {
        let mut contour = square(0.0, 0.0, 1.0);
        contour.push(contour[0]);
        let ring = Ring::close(&contour).unwrap();
        assert_eq!(ring.points().len(), 5);
    }

    #[test]
    fn test_degenerate_ring() {
        let geometry = FootprintGeometry::Polygon(Polygon2D::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
        ]));
        assert!(matches!(
            extract_exterior(&geometry),
            Err(Error::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_idempotent() {
        let hole = square(1.0, 1.0, 1.0).into_iter().rev().collect();
        let geometry = FootprintGeometry::MultiPolygon(vec![
            Polygon2D::with_holes(square(0.0, 0.0, 3.0), vec![hole]),
            Polygon2D::new(square(-5.0, 2.0, 1.0)),
        ]);

        let once = extract_exterior(&geometry).unwrap();
        let twice = extract_exterior(&once.to_geometry().unwrap()).unwrap();
        assert_eq!(once, twice);
    }
}
