/// Shader program source, attribute slots and uniform slots

use slotmap::new_key_type;

new_key_type! {
    /// Opaque handle to a compiled and linked shader program.
    pub struct ProgramHandle;
}

/// Vertex + fragment source text for one shader program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSource {
    /// Vertex stage source
    pub vertex: String,
    /// Fragment stage source
    pub fragment: String,
}

/// Per-vertex attribute streams consumed by the scene program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribute {
    /// xyz position, 3 floats
    Position,
    /// xyz normal, 3 floats
    Normal,
    /// rgba color, 4 floats
    Color,
}

impl VertexAttribute {
    /// Attribute name as declared in the generated shader source
    pub fn name(&self) -> &'static str {
        match self {
            VertexAttribute::Position => "aVertexPosition",
            VertexAttribute::Normal => "aNormalVector",
            VertexAttribute::Color => "aColor",
        }
    }

    /// Number of float components per vertex
    pub fn components(&self) -> u32 {
        match self {
            VertexAttribute::Position | VertexAttribute::Normal => 3,
            VertexAttribute::Color => 4,
        }
    }
}

/// Matrix uniforms consumed by the scene program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uniform {
    /// Camera projection matrix
    Projection,
    /// Camera view matrix
    View,
    /// Per-object model matrix
    Object,
}

impl Uniform {
    /// Uniform name as declared in the generated shader source
    pub fn name(&self) -> &'static str {
        match self {
            Uniform::Projection => "uProjectionMatrix",
            Uniform::View => "uViewMatrix",
            Uniform::Object => "uObjectMatrix",
        }
    }
}
