// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Result types of a footprint run.

use ifc_footprint_core::{MapConversionParams, ScaleConvention};
use ifc_footprint_geometry::GeoreferencedFootprint;
use serde::Serialize;

/// Why an element did not contribute to the footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The loader produced no shape for the element
    MissingShape,
    /// No face of the element points up
    NoVisibleSurface,
}

/// Element left out of the footprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedElement {
    pub id: String,
    pub class: String,
    pub reason: SkipReason,
}

/// Processing statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessingStats {
    pub elements: usize,
    pub projected: usize,
    pub skipped: usize,
    pub visible_faces: usize,
    pub hidden_faces: usize,
    pub degenerate_faces: usize,
    /// Visible faces that projected to zero area
    pub collapsed_faces: usize,
    pub projection_time_ms: u64,
    pub total_time_ms: u64,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct FootprintResult {
    pub footprint: GeoreferencedFootprint,
    pub map_conversion: MapConversionParams,
    pub scale_convention: ScaleConvention,
    /// Elements whose silhouettes were unioned, in model order
    pub elements: Vec<String>,
    pub skipped: Vec<SkippedElement>,
    pub stats: ProcessingStats,
}

/// Serializable view of a run, values as handed to downstream writers.
#[derive(Debug, Clone, Serialize)]
pub struct FootprintSummary {
    pub geometry_type: &'static str,
    pub wkt: String,
    pub perimeter: f64,
    pub area: f64,
    pub elongation: f64,
    /// CRS origin (x, y, height) with the scale applied
    pub origin: [f64; 3],
    pub rotation_radians: f64,
    pub scale_convention: String,
    pub elements: Vec<String>,
    pub skipped: Vec<SkippedElement>,
    pub stats: ProcessingStats,
}

impl FootprintResult {
    pub fn summary(&self) -> FootprintSummary {
        let (x, y, z) = self.map_conversion.origin(self.scale_convention);
        FootprintSummary {
            geometry_type: self.footprint.geometry.geometry_type(),
            wkt: self.footprint.to_wkt(),
            perimeter: self.footprint.perimeter,
            area: self.footprint.area,
            elongation: self.footprint.elongation,
            origin: [x, y, z],
            rotation_radians: self.map_conversion.rotation_radians,
            scale_convention: self.scale_convention.to_string(),
            elements: self.elements.clone(),
            skipped: self.skipped.clone(),
            stats: self.stats.clone(),
        }
    }

    /// Summary as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.summary())
    }
}
