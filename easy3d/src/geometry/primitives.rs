/// Built-in shape catalog
///
/// Shapes are static arrays: flat xyz positions, u16 triangle indices and
/// flat xyz normals. Colors are not stored per shape; callers broadcast a
/// single RGBA value (see `DEFAULT_PRIMITIVE_COLOR`).

use std::fmt;
use std::str::FromStr;
use crate::error::{Error, Result};

/// Color used when neither geometry nor colors were supplied
pub const DEFAULT_PRIMITIVE_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

/// Unit cube centered on the origin, 4 vertices per face (flat normals)
#[rustfmt::skip]
pub const CUBE_VERTICES: [f32; 72] = [
    -0.5, 0.5, 0.5,   0.5, 0.5, 0.5,   0.5,-0.5, 0.5,  -0.5,-0.5, 0.5, // front
    -0.5, 0.5,-0.5,  -0.5,-0.5,-0.5,   0.5,-0.5,-0.5,   0.5, 0.5,-0.5, // back
    -0.5, 0.5, 0.5,  -0.5, 0.5,-0.5,   0.5, 0.5,-0.5,   0.5, 0.5, 0.5, // top
    -0.5, 0.5, 0.5,  -0.5,-0.5, 0.5,  -0.5,-0.5,-0.5,  -0.5, 0.5,-0.5, // left
     0.5, 0.5, 0.5,   0.5, 0.5,-0.5,   0.5,-0.5,-0.5,   0.5,-0.5, 0.5, // right
    -0.5,-0.5, 0.5,   0.5,-0.5, 0.5,   0.5,-0.5,-0.5,  -0.5,-0.5,-0.5, // bottom
];

#[rustfmt::skip]
pub const CUBE_INDICES: [u16; 36] = [
     0,  2,  1,   0,  3,  2, // front
     4,  6,  5,   4,  7,  6, // back
     8, 10,  9,   8, 11, 10, // top
    12, 14, 13,  12, 15, 14, // left
    16, 18, 17,  16, 19, 18, // right
    20, 22, 21,  20, 23, 22, // bottom
];

#[rustfmt::skip]
pub const CUBE_NORMALS: [f32; 72] = [
     0.0, 0.0, 1.0,   0.0, 0.0, 1.0,   0.0, 0.0, 1.0,   0.0, 0.0, 1.0,
     0.0, 0.0,-1.0,   0.0, 0.0,-1.0,   0.0, 0.0,-1.0,   0.0, 0.0,-1.0,
     0.0, 1.0, 0.0,   0.0, 1.0, 0.0,   0.0, 1.0, 0.0,   0.0, 1.0, 0.0,
    -1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,  -1.0, 0.0, 0.0,
     1.0, 0.0, 0.0,   1.0, 0.0, 0.0,   1.0, 0.0, 0.0,   1.0, 0.0, 0.0,
     0.0,-1.0, 0.0,   0.0,-1.0, 0.0,   0.0,-1.0, 0.0,   0.0,-1.0, 0.0,
];

/// Unit quad in the XZ plane, facing +Y
#[rustfmt::skip]
const PLANE_VERTICES: [f32; 12] = [
    -0.5, 0.0, 0.5,   0.5, 0.0, 0.5,   0.5, 0.0,-0.5,  -0.5, 0.0,-0.5,
];

#[rustfmt::skip]
const PLANE_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[rustfmt::skip]
const PLANE_NORMALS: [f32; 12] = [
    0.0, 1.0, 0.0,   0.0, 1.0, 0.0,   0.0, 1.0, 0.0,   0.0, 1.0, 0.0,
];

/// Catalog entry names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveShape {
    Cube,
    Plane,
}

impl PrimitiveShape {
    /// Every catalog entry
    pub const ALL: [PrimitiveShape; 2] = [PrimitiveShape::Cube, PrimitiveShape::Plane];

    /// Catalog name ("cube", "plane")
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveShape::Cube => "cube",
            PrimitiveShape::Plane => "plane",
        }
    }

    /// Static geometry for this shape
    pub fn primitive(&self) -> Primitive {
        match self {
            PrimitiveShape::Cube => Primitive {
                vertices: &CUBE_VERTICES,
                indices: &CUBE_INDICES,
                normals: &CUBE_NORMALS,
            },
            PrimitiveShape::Plane => Primitive {
                vertices: &PLANE_VERTICES,
                indices: &PLANE_INDICES,
                normals: &PLANE_NORMALS,
            },
        }
    }
}

impl fmt::Display for PrimitiveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimitiveShape {
    type Err = Error;

    /// Case-insensitive catalog lookup. Unknown names are an error, never a cube.
    fn from_str(name: &str) -> Result<Self> {
        PrimitiveShape::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| Error::UnknownShape(format!(
                "no primitive named '{}' (available: cube, plane)", name
            )))
    }
}

/// Borrowed view of a built-in shape
#[derive(Debug, Clone, Copy)]
pub struct Primitive {
    pub vertices: &'static [f32],
    pub indices: &'static [u16],
    pub normals: &'static [f32],
}

impl Primitive {
    /// Number of vertices (positions / 3)
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// The default fallback geometry (cube)
    pub fn default_shape() -> Self {
        PrimitiveShape::Cube.primitive()
    }
}

#[cfg(test)]
#[path = "primitives_tests.rs"]
mod tests;
