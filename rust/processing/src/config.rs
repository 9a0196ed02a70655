// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline configuration loaded from environment variables.

use ifc_footprint_core::ScaleConvention;
use ifc_footprint_geometry::DEFAULT_NORMAL_TOLERANCE;
use std::str::FromStr;

/// Element classes used when none are configured
pub const DEFAULT_ELEMENT_CLASSES: &[&str] = &["IfcRoof", "IfcSlab"];

/// Footprint pipeline configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintConfig {
    /// Up vector used as projection axis.
    pub up: [f64; 3],
    /// Faces count as visible when dot(normal, up) exceeds this.
    pub normal_tolerance: f64,
    /// Number of worker threads for per-element projection.
    pub worker_threads: usize,
    /// How the map conversion scale is applied.
    pub scale_convention: ScaleConvention,
    /// Element classes whose shapes make up the footprint.
    pub element_classes: Vec<String>,
}

impl Default for FootprintConfig {
    fn default() -> Self {
        Self {
            up: [0.0, 0.0, 1.0],
            normal_tolerance: DEFAULT_NORMAL_TOLERANCE,
            worker_threads: num_cpus::get(),
            scale_convention: ScaleConvention::default(),
            element_classes: DEFAULT_ELEMENT_CLASSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl FootprintConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            up: lookup("FOOTPRINT_UP")
                .and_then(|v| parse_vector(&v))
                .unwrap_or(defaults.up),
            normal_tolerance: lookup("FOOTPRINT_NORMAL_TOLERANCE")
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|t| t.is_finite())
                .unwrap_or(defaults.normal_tolerance),
            worker_threads: lookup("FOOTPRINT_WORKER_THREADS")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.worker_threads),
            scale_convention: parse_or(
                lookup("FOOTPRINT_SCALE_CONVENTION"),
                defaults.scale_convention,
            ),
            element_classes: lookup("FOOTPRINT_ELEMENT_CLASSES")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect::<Vec<_>>()
                })
                .filter(|classes| !classes.is_empty())
                .unwrap_or(defaults.element_classes),
        }
    }

    pub fn with_up(mut self, up: [f64; 3]) -> Self {
        self.up = up;
        self
    }

    pub fn with_normal_tolerance(mut self, tolerance: f64) -> Self {
        self.normal_tolerance = tolerance;
        self
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.max(1);
        self
    }

    pub fn with_scale_convention(mut self, convention: ScaleConvention) -> Self {
        self.scale_convention = convention;
        self
    }

    pub fn with_element_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.element_classes = classes.into_iter().map(Into::into).collect();
        self
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parse "x,y,z"
fn parse_vector(value: &str) -> Option<[f64; 3]> {
    let parts: Vec<f64> = value
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [x, y, z] => Some([*x, *y, *z]),
        _ => None,
    }
}
