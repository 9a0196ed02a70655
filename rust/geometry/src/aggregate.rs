// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Footprint aggregation: union of element silhouettes

use crate::bool2d::union_polygons;
use crate::error::{Error, Result};
use crate::polygon::FootprintGeometry;
use crate::projection::Silhouette;

/// Union the silhouettes of all processed elements.
///
/// The geometry type follows the connectivity of the result: a single region
/// is a `Polygon`, disjoint regions a `MultiPolygon`. Holes are kept.
pub fn union_silhouettes(silhouettes: &[Silhouette]) -> Result<FootprintGeometry> {
    if silhouettes.is_empty() {
        return Err(Error::EmptyInput);
    }

    let polygons = union_polygons(silhouettes.iter().flat_map(|s| s.polygons.iter()));

    FootprintGeometry::from_polygons(polygons).ok_or_else(|| {
        Error::DegenerateGeometry("union of silhouettes has no area".to_string())
    })
}
