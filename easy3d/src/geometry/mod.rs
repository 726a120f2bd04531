//! Geometry inputs
//!
//! - `primitives`: built-in shape catalog used as fallback geometry
//! - `GeometryData` / `ColorInput`: caller-supplied geometry, validated once

mod primitives;
mod geometry_data;

pub use primitives::{
    Primitive, PrimitiveShape, DEFAULT_PRIMITIVE_COLOR,
    CUBE_VERTICES, CUBE_INDICES, CUBE_NORMALS,
};
pub use geometry_data::{GeometryData, ColorInput};
