/// GraphicsDevice trait - the raw graphics API binding

use crate::error::Result;
use crate::graphics_device::{
    BufferDesc, BufferHandle, ProgramSource, ProgramHandle,
    VertexAttribute, Uniform, DrawState, ClearFlags,
};

/// Viewport rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Viewport covering a whole surface
    pub fn full(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }
}

/// Graphics device trait
///
/// Implemented by backend-specific devices (WebGL/OpenGL ES wrappers, the
/// headless `MockGraphicsDevice`, ...). All calls are synchronous and made
/// from the thread that owns the `Scene`.
///
/// Buffers and programs are identified by handles. The device owns the
/// underlying objects; the scene layer owns the handles and is responsible
/// for calling `destroy_buffer`/`destroy_program` exactly once per handle.
pub trait GraphicsDevice {
    /// Create a buffer and upload its contents
    ///
    /// # Arguments
    ///
    /// * `desc` - Buffer descriptor (size, usage, label)
    /// * `data` - Initial contents, `desc.size` bytes
    fn create_buffer(&mut self, desc: &BufferDesc, data: &[u8]) -> Result<BufferHandle>;

    /// Release a buffer. The handle must not be used afterwards.
    fn destroy_buffer(&mut self, buffer: BufferHandle);

    /// Compile both stages and link them into a program
    ///
    /// # Errors
    ///
    /// Returns `Error::ShaderCompile` with the driver's info log on compile
    /// or link failure.
    fn create_program(&mut self, source: &ProgramSource) -> Result<ProgramHandle>;

    /// Release a program. The handle must not be used afterwards.
    fn destroy_program(&mut self, program: ProgramHandle);

    /// Make a program current for subsequent draws
    fn use_program(&mut self, program: ProgramHandle) -> Result<()>;

    /// Bind a float buffer to an attribute slot of the current program
    ///
    /// # Arguments
    ///
    /// * `attribute` - Attribute slot
    /// * `buffer` - Attribute buffer
    /// * `components` - Floats per vertex (3 or 4)
    fn bind_vertex_attribute(
        &mut self,
        attribute: VertexAttribute,
        buffer: BufferHandle,
        components: u32,
    ) -> Result<()>;

    /// Bind a u16 index buffer
    fn bind_index_buffer(&mut self, buffer: BufferHandle) -> Result<()>;

    /// Upload a column-major 4x4 matrix to a uniform of the current program
    fn set_uniform_matrix(&mut self, uniform: Uniform, matrix: &[f32; 16]) -> Result<()>;

    /// Draw indexed triangles from the bound index buffer
    ///
    /// # Arguments
    ///
    /// * `index_count` - Number of u16 indices (3 per triangle)
    fn draw_indexed(&mut self, index_count: u32) -> Result<()>;

    /// Apply depth/blend/cull state
    fn apply_draw_state(&mut self, state: &DrawState);

    /// Set the viewport
    fn set_viewport(&mut self, viewport: Viewport);

    /// Clear the requested framebuffer planes
    fn clear(&mut self, flags: ClearFlags, color: [f32; 4], depth: f32);
}
