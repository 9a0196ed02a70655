// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model access for the footprint pipeline
//!
//! Parsing a building model is out of scope here. A loader exposes what the
//! pipeline needs through [`ModelSource`]: triangulated shapes per element and
//! the model's map conversion records.

use crate::error::SourceError;
use ifc_footprint_core::MapConversionRecord;
use ifc_footprint_geometry::Mesh;
use rustc_hash::FxHashSet;

/// Shape of one building element; `mesh` is `None` when the loader could not
/// produce one
#[derive(Debug, Clone, PartialEq)]
pub struct ElementShape {
    /// Element identifier (e.g. GlobalId)
    pub id: String,
    /// Element class (e.g. "IfcRoof")
    pub class: String,
    pub mesh: Option<Mesh>,
}

impl ElementShape {
    pub fn new(id: impl Into<String>, class: impl Into<String>, mesh: Option<Mesh>) -> Self {
        Self {
            id: id.into(),
            class: class.into(),
            mesh,
        }
    }
}

/// Loader interface consumed by the pipeline
pub trait ModelSource {
    /// Shapes of all elements of the requested classes, in model order.
    ///
    /// Class names compare case-insensitively. An empty class list requests
    /// every element.
    fn element_shapes(&self, classes: &[String]) -> Result<Vec<ElementShape>, SourceError>;

    /// All map conversion records of the model, in model order
    fn map_conversions(&self) -> Result<Vec<MapConversionRecord>, SourceError>;
}

/// Model source over shapes that were extracted beforehand
#[derive(Debug, Clone, Default)]
pub struct InMemoryModel {
    elements: Vec<ElementShape>,
    map_conversions: Vec<MapConversionRecord>,
}

impl InMemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, element: ElementShape) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_map_conversion(mut self, record: MapConversionRecord) -> Self {
        self.map_conversions.push(record);
        self
    }
}

impl ModelSource for InMemoryModel {
    fn element_shapes(&self, classes: &[String]) -> Result<Vec<ElementShape>, SourceError> {
        if classes.is_empty() {
            return Ok(self.elements.clone());
        }

        let wanted: FxHashSet<String> = classes.iter().map(|c| c.to_ascii_lowercase()).collect();
        Ok(self
            .elements
            .iter()
            .filter(|e| wanted.contains(&e.class.to_ascii_lowercase()))
            .cloned()
            .collect())
    }

    fn map_conversions(&self) -> Result<Vec<MapConversionRecord>, SourceError> {
        Ok(self.map_conversions.clone())
    }
}
