// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use nalgebra::Point3;

/// Triangle mesh of a single building element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f64>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Create a mesh from flat loader buffers
    pub fn from_buffers(positions: Vec<f64>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// Add a vertex
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>) {
        self.positions.push(position.x);
        self.positions.push(position.y);
        self.positions.push(position.z);
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }

    /// Vertex position, `None` when out of range
    #[inline]
    pub fn vertex(&self, index: u32) -> Option<Point3<f64>> {
        let base = index as usize * 3;
        let chunk = self.positions.get(base..base + 3)?;
        Some(Point3::new(chunk[0], chunk[1], chunk[2]))
    }

    /// Iterate over triangle corners in face order.
    ///
    /// Faces that reference a missing vertex yield `None`.
    pub fn triangles(&self) -> impl Iterator<Item = Option<[Point3<f64>; 3]>> + '_ {
        self.indices.chunks_exact(3).map(move |face| {
            Some([
                self.vertex(face[0])?,
                self.vertex(face[1])?,
                self.vertex(face[2])?,
            ])
        })
    }
}
