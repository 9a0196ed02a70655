// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Map Conversion Support
//!
//! Resolves IfcMapConversion-style records into immutable parameters and
//! provides the local ↔ target CRS transform used to georeference footprints.
//!
//! The rotation stored in [`MapConversionParams`] follows the sign convention
//! of the footprint transform: `rotation_radians = -atan2(ordinate, abscissa)`.
//! The transform then rotates by `-(rotation_radians - CALIBRATION_OFFSET)`.

use crate::error::{Error, Result};
use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

/// Angle subtracted from the map rotation before georeferencing.
///
/// Projected footprints are expressed in the basis `(b, c) = (+y, -x)` produced
/// by the silhouette projection for the default up vector and reference axis,
/// i.e. turned by -90° relative to the model's XY frame. Subtracting a quarter
/// turn from the rotation cancels that. It has only been verified for the
/// default up vector `(0, 0, 1)`.
pub const CALIBRATION_OFFSET: f64 = FRAC_PI_2;

/// How the map conversion scale is applied to local lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleConvention {
    /// Local lengths are multiplied by the scale
    #[default]
    Multiply,
    /// Local lengths are divided by the scale
    Divide,
    /// Local lengths are already in target units; the scale is not applied
    Normalized,
}

impl ScaleConvention {
    /// Factor applied to local lengths for a given map conversion scale
    #[inline]
    pub fn factor(self, scale: f64) -> f64 {
        match self {
            ScaleConvention::Multiply => scale,
            ScaleConvention::Divide => 1.0 / scale,
            ScaleConvention::Normalized => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScaleConvention::Multiply => "multiply",
            ScaleConvention::Divide => "divide",
            ScaleConvention::Normalized => "normalized",
        }
    }
}

impl fmt::Display for ScaleConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaleConvention {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multiply" => Ok(ScaleConvention::Multiply),
            "divide" => Ok(ScaleConvention::Divide),
            "normalized" | "normalised" | "none" => Ok(ScaleConvention::Normalized),
            other => Err(Error::UnknownScaleConvention(other.to_string())),
        }
    }
}

/// Raw map conversion values as delivered by the model loader
///
/// Optional attributes are `None` when the source leaves them unset.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapConversionRecord {
    /// False easting (X offset to map CRS)
    pub eastings: f64,
    /// False northing (Y offset to map CRS)
    pub northings: f64,
    /// Orthogonal height (Z offset)
    pub orthogonal_height: f64,
    /// X-axis abscissa (cos of rotation angle)
    pub x_axis_abscissa: Option<f64>,
    /// X-axis ordinate (sin of rotation angle)
    pub x_axis_ordinate: Option<f64>,
    /// Scale factor
    pub scale: Option<f64>,
}

impl MapConversionRecord {
    /// Record with a translation only
    pub fn new(eastings: f64, northings: f64, orthogonal_height: f64) -> Self {
        Self {
            eastings,
            northings,
            orthogonal_height,
            x_axis_abscissa: None,
            x_axis_ordinate: None,
            scale: None,
        }
    }

    /// Set the x-axis direction
    pub fn with_axis(mut self, abscissa: f64, ordinate: f64) -> Self {
        self.x_axis_abscissa = Some(abscissa);
        self.x_axis_ordinate = Some(ordinate);
        self
    }

    /// Set the scale
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }
}

/// Resolved georeferencing parameters, immutable for a run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapConversionParams {
    /// X of the reference point in the target CRS
    pub delta_x: f64,
    /// Y of the reference point in the target CRS
    pub delta_y: f64,
    /// Height of the reference point in the target CRS
    pub elevation: f64,
    /// Rotation in radians, `-atan2(ordinate, abscissa)`
    pub rotation_radians: f64,
    /// Scale factor (1.0 when unset)
    pub scale: f64,
}

impl Default for MapConversionParams {
    fn default() -> Self {
        Self {
            delta_x: 0.0,
            delta_y: 0.0,
            elevation: 0.0,
            rotation_radians: 0.0,
            scale: 1.0,
        }
    }
}

impl MapConversionParams {
    /// Resolve parameters from a single record
    pub fn from_record(record: &MapConversionRecord) -> Result<Self> {
        let abscissa = record.x_axis_abscissa.unwrap_or(1.0);
        let ordinate = record.x_axis_ordinate.unwrap_or(0.0);
        if !(abscissa.is_finite() && ordinate.is_finite()) || (abscissa == 0.0 && ordinate == 0.0)
        {
            return Err(Error::InvalidAxis { abscissa, ordinate });
        }

        Ok(Self {
            delta_x: record.eastings,
            delta_y: record.northings,
            elevation: record.orthogonal_height,
            rotation_radians: -ordinate.atan2(abscissa),
            scale: record.scale.unwrap_or(1.0),
        })
    }

    /// Resolve parameters from all records in a model. The first record wins.
    pub fn from_records(records: &[MapConversionRecord]) -> Result<Self> {
        match records.first() {
            Some(record) => Self::from_record(record),
            None => Err(Error::MissingMapConversion),
        }
    }

    /// Rotation actually applied by the transform
    #[inline]
    pub fn effective_rotation(&self) -> f64 {
        self.rotation_radians - CALIBRATION_OFFSET
    }

    /// Reference point in the target CRS with the scale applied
    pub fn origin(&self, convention: ScaleConvention) -> (f64, f64, f64) {
        let s = convention.factor(self.scale);
        (self.delta_x * s, self.delta_y * s, self.elevation * s)
    }

    /// Build the 2D transform for these parameters
    pub fn transform(&self, convention: ScaleConvention) -> Result<MapTransform> {
        MapTransform::new(self, convention)
    }
}

/// Precomputed local → target CRS similarity transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapTransform {
    cos_r: f64,
    sin_r: f64,
    factor: f64,
    delta_x: f64,
    delta_y: f64,
}

impl MapTransform {
    /// Create a transform, rejecting scales that collapse or blow up geometry
    pub fn new(params: &MapConversionParams, convention: ScaleConvention) -> Result<Self> {
        if params.scale == 0.0 || !params.scale.is_finite() {
            return Err(Error::InvalidScale(params.scale));
        }

        let rotation = params.effective_rotation();
        Ok(Self {
            cos_r: rotation.cos(),
            sin_r: rotation.sin(),
            factor: convention.factor(params.scale),
            delta_x: params.delta_x,
            delta_y: params.delta_y,
        })
    }

    /// Factor applied to local lengths
    #[inline]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Transform local coordinates to map coordinates
    #[inline]
    pub fn local_to_map(&self, x: f64, y: f64) -> (f64, f64) {
        let s = self.factor;
        let e = s * (x * self.cos_r + y * self.sin_r) + self.delta_x;
        let n = s * (-x * self.sin_r + y * self.cos_r) + self.delta_y;
        (e, n)
    }

    /// Transform map coordinates to local coordinates
    #[inline]
    pub fn map_to_local(&self, e: f64, n: f64) -> (f64, f64) {
        let dx = (e - self.delta_x) / self.factor;
        let dy = (n - self.delta_y) / self.factor;

        // Inverse rotation: transpose of rotation matrix
        let x = self.cos_r * dx - self.sin_r * dy;
        let y = self.sin_r * dx + self.cos_r * dy;
        (x, y)
    }
}
