// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Footprint Geometry Processing
//!
//! Derives a 2D building footprint from triangulated element meshes:
//!
//! 1. [`SilhouetteProjector`] projects the faces of one mesh that point along
//!    the up vector into a 2D silhouette.
//! 2. [`union_silhouettes`] merges all silhouettes into a Polygon or
//!    MultiPolygon (i_overlay union).
//! 3. [`extract_exterior`] keeps the outer ring of every component.
//! 4. [`Georeferencer`] moves the rings into the target CRS.
//! 5. [`FootprintMetrics`] measures perimeter, area and elongation.

pub mod aggregate;
pub mod bool2d;
pub mod error;
pub mod exterior;
pub mod georeference;
pub mod mesh;
pub mod metrics;
pub mod polygon;
pub mod projection;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use aggregate::union_silhouettes;
pub use error::{Error, Result};
pub use exterior::{extract_exterior, BoundaryRings, Ring};
pub use georeference::{round_coordinate, GeoreferencedFootprint, Georeferencer};
pub use mesh::Mesh;
pub use metrics::FootprintMetrics;
pub use polygon::{FootprintGeometry, Polygon2D};
pub use projection::{
    Direction, FaceClass, FaceStats, ProjectionBasis, Silhouette, SilhouetteProjector,
    DEFAULT_NORMAL_TOLERANCE,
};
