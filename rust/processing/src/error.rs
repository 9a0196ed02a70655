// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline error types

use ifc_footprint_geometry::Error as GeometryError;
use std::fmt;
use thiserror::Error;

/// Result type for pipeline runs
pub type Result<T> = std::result::Result<T, FootprintError>;

/// Pipeline stage a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    MapConversion,
    Projection,
    Aggregation,
    Exterior,
    Georeference,
    Metrics,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::MapConversion => "map conversion",
            Stage::Projection => "projection",
            Stage::Aggregation => "aggregation",
            Stage::Exterior => "exterior extraction",
            Stage::Georeference => "georeference",
            Stage::Metrics => "metrics",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a model source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SourceError {
    pub message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that abort a footprint run
#[derive(Error, Debug)]
pub enum FootprintError {
    #[error("Input error: {0}")]
    Input(#[from] SourceError),

    #[error("Invalid configuration: {0}")]
    Config(GeometryError),

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: GeometryError,
    },

    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl FootprintError {
    pub(crate) fn at(stage: Stage) -> impl FnOnce(GeometryError) -> Self {
        move |source| FootprintError::Stage { stage, source }
    }

    /// Stage of a stage failure
    pub fn stage(&self) -> Option<Stage> {
        match self {
            FootprintError::Stage { stage, .. } => Some(*stage),
            FootprintError::Input(_) => Some(Stage::Load),
            _ => None,
        }
    }

    /// Underlying geometry error, if any
    pub fn geometry_error(&self) -> Option<&GeometryError> {
        match self {
            FootprintError::Stage { source, .. } | FootprintError::Config(source) => Some(source),
            _ => None,
        }
    }
}
