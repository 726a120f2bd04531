/// Scene object types
///
/// A `SceneObject` is the registry's record for one renderable: the resolved
/// CPU-side arrays, the transform triple with its cached model matrix, and
/// the four GPU buffers uploaded from those arrays.

use std::fmt;
use glam::{Mat4, Vec3};
use crate::error::Result;
use crate::engine_error;
use crate::geometry::{ColorInput, GeometryData, Primitive, PrimitiveShape, DEFAULT_PRIMITIVE_COLOR};
use crate::graphics_device::BufferHandle;
use crate::transform;

/// Color of objects created from the shape catalog when none is given
pub const DEFAULT_STANDARD_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// First value handed out for objects created without an id
pub const FIRST_GENERATED_ID: u64 = 1000;

// ===== OBJECT ID =====

/// Caller-visible object identifier: an integer or a name.
///
/// Integer literals convert directly (`ObjectId::from(5)`). A negative `i32`
/// has no integer form and becomes the name of its decimal text, so
/// `ObjectId::from(-5)` and `ObjectId::from("-5")` are the same id and
/// register over each other. Use `ObjectId::Int` with a `u64` to keep
/// integer ids apart from names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectId {
    Int(u64),
    Name(String),
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectId::Int(value) => write!(f, "{}", value),
            ObjectId::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<u64> for ObjectId {
    fn from(value: u64) -> Self {
        ObjectId::Int(value)
    }
}

impl From<u32> for ObjectId {
    fn from(value: u32) -> Self {
        ObjectId::Int(u64::from(value))
    }
}

impl From<i32> for ObjectId {
    fn from(value: i32) -> Self {
        match u64::try_from(value) {
            Ok(value) => ObjectId::Int(value),
            Err(_) => ObjectId::Name(value.to_string()),
        }
    }
}

impl From<&str> for ObjectId {
    fn from(name: &str) -> Self {
        ObjectId::Name(name.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(name: String) -> Self {
        ObjectId::Name(name)
    }
}

impl From<&ObjectId> for ObjectId {
    fn from(id: &ObjectId) -> Self {
        id.clone()
    }
}

// ===== BUFFERS =====

/// GPU buffers owned by one object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectBuffers {
    pub vertices: BufferHandle,
    pub normals: BufferHandle,
    pub colors: BufferHandle,
    pub indices: BufferHandle,
}

impl ObjectBuffers {
    /// All four handles, in allocation order
    pub fn handles(&self) -> [BufferHandle; 4] {
        [self.vertices, self.normals, self.colors, self.indices]
    }
}

// ===== DESCRIPTORS =====

/// Everything needed to create an object. Every field is optional.
///
/// Missing geometry means the whole built-in cube (positions, indices and
/// normals together). Missing colors means `DEFAULT_PRIMITIVE_COLOR` on
/// every vertex. Missing position/rotation is zero, missing scale is one.
#[derive(Debug, Clone, Default)]
pub struct ObjectDesc {
    /// Id to register under (generated when `None`)
    pub id: Option<ObjectId>,
    pub position: Option<Vec3>,
    /// Euler angles in radians
    pub rotation: Option<Vec3>,
    pub scale: Option<Vec3>,
    pub geometry: Option<GeometryData>,
    pub colors: Option<ColorInput>,
}

/// An `ObjectDesc` with every default filled in and every array validated
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedObject {
    pub geometry: GeometryData,
    /// Flat RGBA, 4 floats per vertex
    pub colors: Vec<f32>,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl ObjectDesc {
    /// Fill in defaults and validate, without touching the device.
    ///
    /// # Errors
    ///
    /// `Error::Geometry` for malformed geometry or colors that do not match
    /// the vertex count.
    pub fn resolve(self) -> Result<ResolvedObject> {
        let geometry = match self.geometry {
            Some(geometry) => geometry,
            None => GeometryData::from_primitive(Primitive::default_shape()),
        };
        geometry.validate()?;

        let colors = self
            .colors
            .unwrap_or(ColorInput::Single(DEFAULT_PRIMITIVE_COLOR))
            .resolve(geometry.vertex_count())?;

        Ok(ResolvedObject {
            geometry,
            colors,
            position: self.position.unwrap_or(Vec3::ZERO),
            rotation: self.rotation.unwrap_or(Vec3::ZERO),
            scale: self.scale.unwrap_or(Vec3::ONE),
        })
    }
}

/// Object built from a catalog shape with one color
#[derive(Debug, Clone)]
pub struct StandardObjectDesc {
    pub id: Option<ObjectId>,
    /// Catalog name, case-insensitive ("cube", "plane")
    pub shape: String,
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub scale: Option<Vec3>,
    /// RGBA broadcast to every vertex (default opaque red)
    pub color: Option<[f32; 4]>,
}

impl Default for StandardObjectDesc {
    fn default() -> Self {
        Self {
            id: None,
            shape: PrimitiveShape::Cube.name().to_string(),
            position: None,
            rotation: None,
            scale: None,
            color: None,
        }
    }
}

impl StandardObjectDesc {
    /// Look up the shape and build the equivalent `ObjectDesc`.
    ///
    /// # Errors
    ///
    /// `Error::UnknownShape` when the catalog has no entry for `shape`.
    pub fn into_object_desc(self) -> Result<ObjectDesc> {
        let shape = match self.shape.parse::<PrimitiveShape>() {
            Ok(shape) => shape,
            Err(err) => {
                engine_error!("easy3d::ObjectRegistry", "{}", err);
                return Err(err);
            }
        };

        Ok(ObjectDesc {
            id: self.id,
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
            geometry: Some(GeometryData::from_primitive(shape.primitive())),
            colors: Some(ColorInput::Single(self.color.unwrap_or(DEFAULT_STANDARD_COLOR))),
        })
    }
}

// ===== SCENE OBJECT =====

/// Registry record for one renderable object
#[derive(Debug, Clone)]
pub struct SceneObject {
    id: ObjectId,
    vertices: Vec<f32>,
    indices: Vec<u16>,
    normals: Vec<f32>,
    colors: Vec<f32>,
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
    model_matrix: Mat4,
    buffers: ObjectBuffers,
}

impl SceneObject {
    pub(crate) fn new(id: ObjectId, resolved: ResolvedObject, buffers: ObjectBuffers) -> Self {
        let ResolvedObject { geometry, colors, position, rotation, scale } = resolved;
        Self {
            id,
            vertices: geometry.vertices,
            indices: geometry.indices,
            normals: geometry.normals,
            colors,
            position,
            rotation,
            scale,
            model_matrix: transform::compose(position, rotation, scale),
            buffers,
        }
    }

    // ===== GETTERS =====

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// Flat xyz positions
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Flat xyz normals
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Flat RGBA, 4 floats per vertex
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// `compose(position, rotation, scale)`, always current
    pub fn model_matrix(&self) -> &Mat4 {
        &self.model_matrix
    }

    pub fn buffers(&self) -> &ObjectBuffers {
        &self.buffers
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    // ===== MUTATION (registry only) =====

    pub(crate) fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_model_matrix();
    }

    pub(crate) fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.update_model_matrix();
    }

    pub(crate) fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.update_model_matrix();
    }

    pub(crate) fn set_transform(&mut self, position: Vec3, rotation: Vec3, scale: Vec3) {
        self.position = position;
        self.rotation = rotation;
        self.scale = scale;
        self.update_model_matrix();
    }

    /// Swap in new colors and their buffer; returns the old color buffer
    pub(crate) fn replace_colors(&mut self, colors: Vec<f32>, buffer: BufferHandle) -> BufferHandle {
        self.colors = colors;
        std::mem::replace(&mut self.buffers.colors, buffer)
    }

    fn update_model_matrix(&mut self) {
        self.model_matrix = transform::compose(self.position, self.rotation, self.scale);
    }
}

#[cfg(test)]
#[path = "object_tests.rs"]
mod tests;
