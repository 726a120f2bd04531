/// Buffer descriptor and handle

use slotmap::new_key_type;

new_key_type! {
    /// Opaque handle to a GPU buffer owned by a `GraphicsDevice`.
    ///
    /// A handle is valid until it is passed to `destroy_buffer`.
    pub struct BufferHandle;
}

/// Buffer usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Per-vertex float stream (positions, normals, colors)
    Attribute,
    /// Triangle index stream (u16)
    Index,
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u64,
    /// Buffer usage
    pub usage: BufferUsage,
    /// Debug label (e.g. "myCube/normals")
    pub label: String,
}

impl BufferDesc {
    /// Descriptor for a float attribute stream
    pub fn attribute(label: impl Into<String>, data: &[f32]) -> Self {
        Self {
            size: std::mem::size_of_val(data) as u64,
            usage: BufferUsage::Attribute,
            label: label.into(),
        }
    }

    /// Descriptor for a u16 index stream
    pub fn index(label: impl Into<String>, data: &[u16]) -> Self {
        Self {
            size: std::mem::size_of_val(data) as u64,
            usage: BufferUsage::Index,
            label: label.into(),
        }
    }
}
