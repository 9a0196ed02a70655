// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC-Footprint Core
//!
//! Georeferencing parameters shared by the footprint pipeline.
//!
//! A building model carries one or more map conversion records tying its local
//! engineering frame to a projected CRS. This crate resolves those records into
//! [`MapConversionParams`] and exposes the similarity transform
//! ([`MapTransform`]) that moves footprint vertices into the target CRS.
//!
//! ```rust,ignore
//! use ifc_footprint_core::{MapConversionParams, MapConversionRecord, ScaleConvention};
//!
//! let records = vec![MapConversionRecord::new(84116.0, 431825.0, 0.0).with_axis(0.8, 0.6)];
//! let params = MapConversionParams::from_records(&records)?;
//! let transform = params.transform(ScaleConvention::Multiply)?;
//! let (e, n) = transform.local_to_map(10.0, 20.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for parameter types

pub mod error;
pub mod georef;

pub use error::{Error, Result};
pub use georef::{
    MapConversionParams, MapConversionRecord, MapTransform, ScaleConvention, CALIBRATION_OFFSET,
};
