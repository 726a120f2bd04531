/// Fixed-function state applied once per frame by `Renderer::clear`

use bitflags::bitflags;

bitflags! {
    /// Framebuffer planes to clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        /// Color attachment
        const COLOR = 1 << 0;
        /// Depth attachment
        const DEPTH = 1 << 1;
    }
}

/// Comparison operator for the depth test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Never pass
    Never,
    /// Pass if incoming depth < stored depth
    Less,
    /// Pass if incoming depth <= stored depth
    LessOrEqual,
    /// Always pass
    Always,
}

/// Blend factor for color blending equations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

/// Face culling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    /// No culling (both faces are rasterized)
    None,
    /// Cull faces pointing away from the camera
    Back,
}

/// Alpha blending equation: `src * src_factor + dst * dst_factor`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendState {
    pub src_factor: BlendFactor,
    pub dst_factor: BlendFactor,
}

impl BlendState {
    /// Standard "over" compositing
    pub const ALPHA: Self = Self {
        src_factor: BlendFactor::SrcAlpha,
        dst_factor: BlendFactor::OneMinusSrcAlpha,
    };
}

/// Global draw state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawState {
    /// Depth comparison (None = depth test disabled)
    pub depth_test: Option<CompareOp>,
    /// Enable writing to the depth buffer
    pub depth_write: bool,
    /// Blending (None = disabled)
    pub blend: Option<BlendState>,
    /// Face culling
    pub cull_mode: CullMode,
}

impl DrawState {
    /// Depth test "nearer wins", alpha blending, culling as requested.
    ///
    /// `render_reverse_faces` disables culling so the inside of transparent
    /// objects stays visible.
    pub fn scene(render_reverse_faces: bool) -> Self {
        Self {
            depth_test: Some(CompareOp::Less),
            depth_write: true,
            blend: Some(BlendState::ALPHA),
            cull_mode: if render_reverse_faces { CullMode::None } else { CullMode::Back },
        }
    }
}

impl Default for DrawState {
    fn default() -> Self {
        Self::scene(true)
    }
}
