// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for map conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving georeferencing parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Model defines no map conversion")]
    MissingMapConversion,

    #[error("Invalid map conversion scale: {0}")]
    InvalidScale(f64),

    #[error("Invalid map conversion x-axis: abscissa {abscissa}, ordinate {ordinate}")]
    InvalidAxis { abscissa: f64, ordinate: f64 },

    #[error("Unknown scale convention: {0}")]
    UnknownScaleConvention(String),
}
