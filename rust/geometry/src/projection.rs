// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh Silhouette Projection
//!
//! Projects the faces of a triangle mesh that point towards a direction onto
//! the plane orthogonal to it, then unions the projected triangles into a 2D
//! silhouette. With the default up vector this is the roof-down view of an
//! element.

use crate::bool2d::{ensure_ccw, is_valid_contour, union_polygons};
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::polygon::Polygon2D;
use nalgebra::{Point2, Point3, Unit, Vector3};

/// Default fuzz band around "perpendicular" for the facing test
pub const DEFAULT_NORMAL_TOLERANCE: f64 = 0.01;

/// Below this cross-product length the reference axis counts as parallel
const PARALLEL_EPSILON: f64 = 1e-6;

/// Offset added to the reference axis when it is parallel to the direction
const REFERENCE_PERTURBATION: f64 = 1e-2;

/// Below this length a face normal cannot be normalised
const NORMAL_EPSILON: f64 = 1e-12;

/// Unit vector defining "up" and the projection axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction(Unit<Vector3<f64>>);

impl Direction {
    /// Normalise a vector into a direction
    pub fn new(vector: Vector3<f64>) -> Result<Self> {
        if !vector.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidDirection(format!(
                "non-finite component in ({}, {}, {})",
                vector.x, vector.y, vector.z
            )));
        }
        Unit::try_new(vector, NORMAL_EPSILON)
            .map(Direction)
            .ok_or_else(|| Error::InvalidDirection("zero-length vector".to_string()))
    }

    /// Direction from components
    pub fn from_components(x: f64, y: f64, z: f64) -> Result<Self> {
        Self::new(Vector3::new(x, y, z))
    }

    /// The default projection axis (0, 0, 1)
    pub fn up() -> Self {
        Direction(Vector3::z_axis())
    }

    #[inline]
    pub fn as_vector(&self) -> &Vector3<f64> {
        self.0.as_ref()
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::up()
    }
}

/// Orthonormal basis (b, c) of the plane orthogonal to a direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionBasis {
    direction: Vector3<f64>,
    b: Vector3<f64>,
    c: Vector3<f64>,
}

impl ProjectionBasis {
    /// Build the basis from the x axis, nudged towards +y when the direction
    /// is (anti)parallel to it
    pub fn new(direction: &Direction) -> Self {
        let d = *direction.as_vector();
        let mut reference = Vector3::x();
        if d.cross(&reference).norm() < PARALLEL_EPSILON {
            reference = Vector3::new(1.0, REFERENCE_PERTURBATION, 0.0);
        }

        let b = d.cross(&reference).normalize();
        let c = d.cross(&b);

        Self { direction: d, b, c }
    }

    /// First in-plane axis
    pub fn b(&self) -> &Vector3<f64> {
        &self.b
    }

    /// Second in-plane axis
    pub fn c(&self) -> &Vector3<f64> {
        &self.c
    }

    /// Remove the component along the projection direction
    #[inline]
    pub fn flatten(&self, point: &Point3<f64>) -> Vector3<f64> {
        let v = point.coords;
        v - v.dot(&self.direction) * self.direction
    }

    /// Planar coordinates of a point
    #[inline]
    pub fn project(&self, point: &Point3<f64>) -> Point2<f64> {
        let flat = self.flatten(point);
        Point2::new(flat.dot(&self.b), flat.dot(&self.c))
    }
}

/// Per-face outcome of the facing test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceClass {
    /// dot(normal, direction) > tolerance
    Visible,
    /// Facing away, edge-on, or within the tolerance band
    Hidden,
    /// Zero-area face or a face referencing a missing vertex
    Degenerate,
}

/// Face counts of one projection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceStats {
    pub visible: usize,
    pub hidden: usize,
    pub degenerate: usize,
    /// Visible faces whose 2D triangle had no area
    pub collapsed: usize,
}

/// 2D projection of one mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Silhouette {
    /// Disjoint regions, possibly with holes
    pub polygons: Vec<Polygon2D>,
    pub stats: FaceStats,
}

impl Silhouette {
    pub fn area(&self) -> f64 {
        self.polygons.iter().map(Polygon2D::area).sum()
    }
}

/// Projects meshes onto the plane orthogonal to a direction
#[derive(Debug, Clone)]
pub struct SilhouetteProjector {
    direction: Direction,
    tolerance: f64,
    basis: ProjectionBasis,
}

impl Default for SilhouetteProjector {
    fn default() -> Self {
        Self::new(Direction::up(), DEFAULT_NORMAL_TOLERANCE)
    }
}

impl SilhouetteProjector {
    /// Create a projector for a direction and normal tolerance
    pub fn new(direction: Direction, tolerance: f64) -> Self {
        Self {
            direction,
            tolerance,
            basis: ProjectionBasis::new(&direction),
        }
    }

    pub fn direction(&self) -> &Direction {
        &self.direction
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn basis(&self) -> &ProjectionBasis {
        &self.basis
    }

    /// Dot product of the unit face normal (edge1 × edge2) with the direction.
    ///
    /// `None` for faces without a normal.
    #[inline]
    pub fn facing(&self, corners: &[Point3<f64>; 3]) -> Option<f64> {
        let edge1 = corners[1] - corners[0];
        let edge2 = corners[2] - corners[0];
        let normal = edge1.cross(&edge2).try_normalize(NORMAL_EPSILON)?;
        Some(normal.dot(self.direction.as_vector()))
    }

    /// Classify a single face
    #[inline]
    pub fn classify(&self, corners: Option<&[Point3<f64>; 3]>) -> FaceClass {
        match corners.and_then(|c| self.facing(c)) {
            Some(dot) if dot > self.tolerance => FaceClass::Visible,
            Some(_) => FaceClass::Hidden,
            None => FaceClass::Degenerate,
        }
    }

    /// Classify every face of a mesh in face order
    pub fn classify_faces(&self, mesh: &Mesh) -> Vec<FaceClass> {
        mesh.triangles()
            .map(|corners| self.classify(corners.as_ref()))
            .collect()
    }

    /// Project the visible faces of a mesh into a silhouette
    pub fn project(&self, mesh: &Mesh) -> Result<Silhouette> {
        if mesh.is_empty() {
            return Err(Error::NoVisibleSurface);
        }

        let mut stats = FaceStats::default();
        let mut triangles: Vec<Polygon2D> = Vec::new();

        for corners in mesh.triangles() {
            match self.classify(corners.as_ref()) {
                FaceClass::Visible => stats.visible += 1,
                FaceClass::Hidden => {
                    stats.hidden += 1;
                    continue;
                }
                FaceClass::Degenerate => {
                    stats.degenerate += 1;
                    continue;
                }
            }

            let Some(corners) = corners else {
                continue;
            };
            let contour: Vec<Point2<f64>> =
                corners.iter().map(|p| self.basis.project(p)).collect();

            if is_valid_contour(&contour) {
                triangles.push(Polygon2D::new(ensure_ccw(&contour)));
            } else {
                stats.collapsed += 1;
            }
        }

        if triangles.is_empty() {
            return Err(Error::NoVisibleSurface);
        }

        let polygons = union_polygons(&triangles);
        if polygons.is_empty() {
            return Err(Error::NoVisibleSurface);
        }

        Ok(Silhouette { polygons, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Unit square at height z made of two triangles with the given winding
    fn square_mesh(z: f64, upward: bool) -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, z));
        mesh.add_vertex(Point3::new(1.0, 0.0, z));
        mesh.add_vertex(Point3::new(1.0, 1.0, z));
        mesh.add_vertex(Point3::new(0.0, 1.0, z));
        if upward {
            mesh.add_triangle(0, 1, 2);
            mesh.add_triangle(0, 2, 3);
        } else {
            mesh.add_triangle(0, 2, 1);
            mesh.add_triangle(0, 3, 2);
        }
        mesh
    }

    #[test]
    fn test_direction_rejects_zero() {
        assert!(Direction::from_components(0.0, 0.0, 0.0).is_err());
        assert!(Direction::from_components(f64::NAN, 0.0, 1.0).is_err());
        let d = Direction::from_components(0.0, 0.0, 5.0).unwrap();
        assert_eq!(d, Direction::up());
    }

    #[test]
    fn test_default_basis() {
        let basis = ProjectionBasis::new(&Direction::up());
        assert_relative_eq!(*basis.b(), Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(*basis.c(), Vector3::new(-1.0, 0.0, 0.0));

        let p = basis.project(&Point3::new(2.0, 3.0, 7.0));
        assert_relative_eq!(p, Point2::new(3.0, -2.0));
    }

    #[test]
    fn test_basis_parallel_reference() {
        for direction in [Vector3::x(), -Vector3::x()] {
            let direction = Direction::new(direction).unwrap();
            let basis = ProjectionBasis::new(&direction);
            let d = direction.as_vector();

            assert_relative_eq!(basis.b().norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(basis.c().norm(), 1.0, epsilon = 1e-12);
            assert!(basis.b().dot(d).abs() < 1e-12);
            assert!(basis.c().dot(d).abs() < 1e-12);
            assert!(basis.b().dot(basis.c()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_flatten_removes_direction_component() {
        let direction = Direction::from_components(1.0, 1.0, 1.0).unwrap();
        let basis = ProjectionBasis::new(&direction);
        let flat = basis.flatten(&Point3::new(3.0, -1.0, 4.0));
        assert!(flat.dot(direction.as_vector()).abs() < 1e-12);
    }

    #[test]
    fn test_project_unit_square() {
        let projector = SilhouetteProjector::default();
        let silhouette = projector.project(&square_mesh(1.0, true)).unwrap();

        assert_eq!(silhouette.polygons.len(), 1);
        assert_eq!(silhouette.stats.visible, 2);
        assert_relative_eq!(silhouette.area(), 1.0, epsilon = 1e-9);

        // Basis (+y, -x) turns the square into [0, 1] x [-1, 0]
        for p in &silhouette.polygons[0].exterior {
            assert!(p.x > -1e-9 && p.x < 1.0 + 1e-9);
            assert!(p.y > -1.0 - 1e-9 && p.y < 1e-9);
        }
    }

    #[test]
    fn test_downward_faces_hidden() {
        let projector = SilhouetteProjector::default();
        let result = projector.project(&square_mesh(0.0, false));
        assert_eq!(result, Err(Error::NoVisibleSurface));
    }

    #[test]
    fn test_vertical_faces_hidden() {
        // A wall in the XZ plane
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(4.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(4.0, 0.0, 3.0));
        mesh.add_vertex(Point3::new(0.0, 0.0, 3.0));
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);

        let projector = SilhouetteProjector::default();
        assert_eq!(
            projector.classify_faces(&mesh),
            vec![FaceClass::Hidden, FaceClass::Hidden]
        );
        assert_eq!(projector.project(&mesh), Err(Error::NoVisibleSurface));
    }

    #[test]
    fn test_tolerance_is_strict() {
        // Tilted face with dot(normal, up) of exactly cos(60°) = 0.5
        let angle = std::f64::consts::FRAC_PI_3;
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, angle.cos(), angle.sin()),
        ];
        let loose = SilhouetteProjector::new(Direction::up(), 0.49);
        let tight = SilhouetteProjector::new(Direction::up(), 0.51);

        let dot = loose.facing(&corners).unwrap();
        assert_relative_eq!(dot, 0.5, epsilon = 1e-12);
        assert_eq!(loose.classify(Some(&corners)), FaceClass::Visible);
        assert_eq!(tight.classify(Some(&corners)), FaceClass::Hidden);
    }

    #[test]
    fn test_classification_matches_dot_product() {
        // Fan of faces sweeping the normal from straight up to straight down
        let projector = SilhouetteProjector::default();
        let up = Direction::up();
        for step in 0..=36 {
            let angle = step as f64 * std::f64::consts::PI / 36.0;
            let corners = [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, angle.cos(), angle.sin()),
            ];
            let normal = (corners[1] - corners[0])
                .cross(&(corners[2] - corners[0]))
                .normalize();
            let dot = normal.dot(up.as_vector());

            let class = projector.classify(Some(&corners));
            if dot > DEFAULT_NORMAL_TOLERANCE {
                assert_eq!(class, FaceClass::Visible, "step {}", step);
            } else {
                assert_eq!(class, FaceClass::Hidden, "step {}", step);
            }
        }
    }

    #[test]
    fn test_degenerate_faces_dropped() {
        let mut mesh = square_mesh(1.0, true);
        // Collinear face and a face pointing past the vertex buffer
        mesh.add_vertex(Point3::new(2.0, 0.0, 1.0));
        mesh.add_triangle(0, 1, 4);
        mesh.add_triangle(0, 1, 42);

        let silhouette = SilhouetteProjector::default().project(&mesh).unwrap();
        assert_eq!(silhouette.stats.visible, 2);
        assert_eq!(silhouette.stats.degenerate, 2);
        assert_relative_eq!(silhouette.area(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_tolerance_collapses_edge_on_faces() {
        // With a negative tolerance edge-on faces pass the filter but project
        // onto a line
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(4.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(4.0, 0.0, 3.0));
        mesh.add_triangle(0, 1, 2);

        let projector = SilhouetteProjector::new(Direction::up(), -0.5);
        assert_eq!(projector.project(&mesh), Err(Error::NoVisibleSurface));
    }

    #[test]
    fn test_box_projects_top_only() {
        // Closed unit cube with outward normals
        let mut mesh = Mesh::new();
        for &(x, y, z) in &[
            (0.0, 0.0, 0.0),
            (2.0, 0.0, 0.0),
            (2.0, 3.0, 0.0),
            (0.0, 3.0, 0.0),
            (0.0, 0.0, 1.0),
            (2.0, 0.0, 1.0),
            (2.0, 3.0, 1.0),
            (0.0, 3.0, 1.0),
        ] {
            mesh.add_vertex(Point3::new(x, y, z));
        }
        // bottom, top, four sides
        for &(a, b, c) in &[
            (0, 2, 1),
            (0, 3, 2),
            (4, 5, 6),
            (4, 6, 7),
            (0, 1, 5),
            (0, 5, 4),
            (1, 2, 6),
            (1, 6, 5),
            (2, 3, 7),
            (2, 7, 6),
            (3, 0, 4),
            (3, 4, 7),
        ] {
            mesh.add_triangle(a, b, c);
        }

        let silhouette = SilhouetteProjector::default().project(&mesh).unwrap();
        assert_eq!(silhouette.stats.visible, 2);
        assert_eq!(silhouette.stats.hidden, 10);
        assert_relative_eq!(silhouette.area(), 6.0, epsilon = 1e-9);
    }
}
