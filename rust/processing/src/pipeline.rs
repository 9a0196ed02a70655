// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Footprint pipeline with parallel per-element projection.

use crate::config::FootprintConfig;
use crate::error::{FootprintError, Result, Stage};
use crate::source::{ElementShape, ModelSource};
use crate::types::{FootprintResult, ProcessingStats, SkipReason, SkippedElement};
use ifc_footprint_core::MapConversionParams;
use ifc_footprint_geometry::{
    extract_exterior, union_silhouettes, Direction, Error as GeometryError,
    GeoreferencedFootprint, Georeferencer, Silhouette, SilhouetteProjector, Vector3,
};
use rayon::prelude::*;

/// Per-element projection outcome.
#[derive(Debug, Clone)]
pub enum ElementOutcome {
    Projected(Silhouette),
    Skipped(SkipReason),
}

/// Runs the footprint stages against a model source.
#[derive(Debug, Clone)]
pub struct FootprintPipeline {
    config: FootprintConfig,
    projector: SilhouetteProjector,
}

impl FootprintPipeline {
    /// Fails when the configured up vector has no direction.
    pub fn new(config: FootprintConfig) -> Result<Self> {
        let [x, y, z] = config.up;
        let direction = Direction::new(Vector3::new(x, y, z)).map_err(FootprintError::Config)?;
        let projector = SilhouetteProjector::new(direction, config.normal_tolerance);
        Ok(Self { config, projector })
    }

    pub fn config(&self) -> &FootprintConfig {
        &self.config
    }

    /// Derive the georeferenced footprint of a model.
    pub fn run(&self, source: &dyn ModelSource) -> Result<FootprintResult> {
        let total_start = std::time::Instant::now();

        let records = source.map_conversions()?;
        if records.len() > 1 {
            tracing::warn!(
                count = records.len(),
                "Model defines several map conversions, using the first"
            );
        }
        let params =
            MapConversionParams::from_records(&records).map_err(|e| FootprintError::Stage {
                stage: Stage::MapConversion,
                source: e.into(),
            })?;

        let shapes = source.element_shapes(&self.config.element_classes)?;
        tracing::info!(
            elements = shapes.len(),
            classes = ?self.config.element_classes,
            worker_threads = self.config.worker_threads,
            "Starting footprint processing"
        );

        let projection_start = std::time::Instant::now();
        let outcomes = self.project_elements(&shapes)?;
        let projection_time = projection_start.elapsed();

        let mut stats = ProcessingStats {
            elements: shapes.len(),
            ..Default::default()
        };
        let mut silhouettes = Vec::with_capacity(outcomes.len());
        let mut elements = Vec::with_capacity(outcomes.len());
        let mut skipped = Vec::new();

        for (shape, outcome) in shapes.iter().zip(outcomes) {
            match outcome {
                ElementOutcome::Projected(silhouette) => {
                    stats.visible_faces += silhouette.stats.visible;
                    stats.hidden_faces += silhouette.stats.hidden;
                    stats.degenerate_faces += silhouette.stats.degenerate;
                    stats.collapsed_faces += silhouette.stats.collapsed;
                    elements.push(shape.id.clone());
                    silhouettes.push(silhouette);
                }
                ElementOutcome::Skipped(reason) => {
                    tracing::warn!(id = %shape.id, class = %shape.class, ?reason, "Skipping element");
                    skipped.push(SkippedElement {
                        id: shape.id.clone(),
                        class: shape.class.clone(),
                        reason,
                    });
                }
            }
        }
        stats.projected = silhouettes.len();
        stats.skipped = skipped.len();

        // Every element had a shape but none of them faces up
        if silhouettes.is_empty()
            && skipped
                .iter()
                .any(|s| s.reason == SkipReason::NoVisibleSurface)
        {
            return Err(FootprintError::Stage {
                stage: Stage::Projection,
                source: GeometryError::NoVisibleSurface,
            });
        }

        let unioned =
            union_silhouettes(&silhouettes).map_err(FootprintError::at(Stage::Aggregation))?;
        let rings = extract_exterior(&unioned).map_err(FootprintError::at(Stage::Exterior))?;
        tracing::debug!(
            geometry_type = unioned.geometry_type(),
            rings = rings.len(),
            "Footprint outline extracted"
        );

        let georeferencer = Georeferencer::new(&params, self.config.scale_convention)
            .map_err(FootprintError::at(Stage::Georeference))?;
        let geometry = georeferencer
            .georeference(&rings)
            .map_err(FootprintError::at(Stage::Georeference))?;
        let footprint =
            GeoreferencedFootprint::new(geometry).map_err(FootprintError::at(Stage::Metrics))?;

        stats.projection_time_ms = projection_time.as_millis() as u64;
        stats.total_time_ms = total_start.elapsed().as_millis() as u64;

        tracing::info!(
            geometry_type = footprint.geometry.geometry_type(),
            perimeter = footprint.perimeter,
            area = footprint.area,
            elongation = footprint.elongation,
            projected = stats.projected,
            skipped = stats.skipped,
            total_time_ms = stats.total_time_ms,
            "Footprint processing complete"
        );

        Ok(FootprintResult {
            footprint,
            map_conversion: params,
            scale_convention: self.config.scale_convention,
            elements,
            skipped,
            stats,
        })
    }

    /// Project every element on a bounded worker pool, results in input order.
    pub fn project_elements(&self, shapes: &[ElementShape]) -> Result<Vec<ElementOutcome>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.worker_threads.max(1))
            .build()?;

        pool.install(|| {
            shapes
                .par_iter()
                .map(|shape| self.project_element(shape))
                .collect::<std::result::Result<Vec<_>, _>>()
        })
        .map_err(FootprintError::at(Stage::Projection))
    }

    /// Project one element. Missing shapes and shapes without an upward face
    /// are skips, everything else is an error.
    pub fn project_element(
        &self,
        shape: &ElementShape,
    ) -> std::result::Result<ElementOutcome, GeometryError> {
        let Some(mesh) = shape.mesh.as_ref() else {
            return Ok(ElementOutcome::Skipped(SkipReason::MissingShape));
        };

        match self.projector.project(mesh) {
            Ok(silhouette) => {
                tracing::debug!(
                    id = %shape.id,
                    vertices = mesh.vertex_count(),
                    triangles = mesh.triangle_count(),
                    visible = silhouette.stats.visible,
                    hidden = silhouette.stats.hidden,
                    degenerate = silhouette.stats.degenerate,
                    collapsed = silhouette.stats.collapsed,
                    "Projected element"
                );
                Ok(ElementOutcome::Projected(silhouette))
            }
            Err(GeometryError::NoVisibleSurface) => {
                Ok(ElementOutcome::Skipped(SkipReason::NoVisibleSurface))
            }
            Err(e) => Err(e),
        }
    }
}
