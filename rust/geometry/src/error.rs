// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during footprint geometry processing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid projection direction: {0}")]
    InvalidDirection(String),

    #[error("No face points towards the projection direction")]
    NoVisibleSurface,

    #[error("No silhouettes to aggregate")]
    EmptyInput,

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Footprint perimeter is zero")]
    DegenerateMetrics,

    #[error("Map conversion error: {0}")]
    CoreError(#[from] ifc_footprint_core::Error),
}
