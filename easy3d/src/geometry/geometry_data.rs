/// Caller-supplied geometry and color input

use crate::error::Result;
use crate::engine_bail;
use super::primitives::Primitive;

/// Positions, triangle indices and normals of one object.
///
/// The three arrays always travel together; a default fallback replaces all
/// three at once, never one of them.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    /// Flat xyz positions
    pub vertices: Vec<f32>,
    /// Triangle list, 3 indices per triangle
    pub indices: Vec<u16>,
    /// Flat xyz normals, one per vertex
    pub normals: Vec<f32>,
}

impl GeometryData {
    pub fn new(vertices: Vec<f32>, indices: Vec<u16>, normals: Vec<f32>) -> Self {
        Self { vertices, indices, normals }
    }

    /// Owned copy of a built-in shape
    pub fn from_primitive(primitive: Primitive) -> Self {
        Self {
            vertices: primitive.vertices.to_vec(),
            indices: primitive.indices.to_vec(),
            normals: primitive.normals.to_vec(),
        }
    }

    /// Number of vertices (positions / 3)
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles (indices / 3)
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check array shapes and index range.
    ///
    /// # Errors
    ///
    /// `Error::Geometry` when positions or indices are not a multiple of 3,
    /// positions are empty, normal count differs from vertex count, or an
    /// index points past the last vertex.
    pub fn validate(&self) -> Result<()> {
        if self.vertices.len() % 3 != 0 {
            engine_bail!("easy3d::Geometry", Geometry,
                "vertex array length {} is not a multiple of 3", self.vertices.len());
        }
        if self.vertices.is_empty() {
            engine_bail!("easy3d::Geometry", Geometry, "vertex array is empty");
        }
        if self.indices.len() % 3 != 0 {
            engine_bail!("easy3d::Geometry", Geometry,
                "index array length {} is not a multiple of 3", self.indices.len());
        }
        if self.normals.len() != self.vertices.len() {
            engine_bail!("easy3d::Geometry", Geometry,
                "{} normal floats for {} vertex floats", self.normals.len(), self.vertices.len());
        }
        let vertex_count = self.vertex_count();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            engine_bail!("easy3d::Geometry", Geometry,
                "index {} out of range for {} vertices", index, vertex_count);
        }
        Ok(())
    }
}

/// Color input for an object, resolved once against its vertex count
#[derive(Debug, Clone, PartialEq)]
pub enum ColorInput {
    /// One RGBA color broadcast to every vertex
    Single([f32; 4]),
    /// One RGBA color per vertex, matched by index
    PerVertex(Vec<[f32; 4]>),
    /// Flat r,g,b,a floats used as-is
    Flat(Vec<f32>),
}

impl ColorInput {
    /// Expand to flat RGBA floats, 4 per vertex.
    ///
    /// # Errors
    ///
    /// `Error::Geometry` when a per-vertex list or flat array does not match
    /// `vertex_count`.
    pub fn resolve(&self, vertex_count: usize) -> Result<Vec<f32>> {
        match self {
            ColorInput::Single(rgba) => Ok(rgba.repeat(vertex_count)),
            ColorInput::PerVertex(colors) => {
                if colors.len() != vertex_count {
                    engine_bail!("easy3d::Geometry", Geometry,
                        "{} per-vertex colors for {} vertices", colors.len(), vertex_count);
                }
                Ok(colors.iter().flatten().copied().collect())
            }
            ColorInput::Flat(floats) => {
                if floats.len() != vertex_count * 4 {
                    engine_bail!("easy3d::Geometry", Geometry,
                        "{} color floats for {} vertices (expected {})",
                        floats.len(), vertex_count, vertex_count * 4);
                }
                Ok(floats.clone())
            }
        }
    }
}

impl From<[f32; 4]> for ColorInput {
    fn from(rgba: [f32; 4]) -> Self {
        ColorInput::Single(rgba)
    }
}

impl From<glam::Vec4> for ColorInput {
    fn from(rgba: glam::Vec4) -> Self {
        ColorInput::Single(rgba.to_array())
    }
}

impl From<Vec<[f32; 4]>> for ColorInput {
    fn from(colors: Vec<[f32; 4]>) -> Self {
        ColorInput::PerVertex(colors)
    }
}

impl From<Vec<f32>> for ColorInput {
    fn from(floats: Vec<f32>) -> Self {
        ColorInput::Flat(floats)
    }
}

#[cfg(test)]
#[path = "geometry_data_tests.rs"]
mod tests;
