/*!
# Easy3D

A minimal real-time 3D scene layer.

This crate manages a flat set of renderable objects (geometry + transform +
color), a camera, a single configurable lighting model, and produces the
draw calls for each frame through a backend-agnostic `GraphicsDevice` trait.

## Architecture

- **GraphicsDevice**: Backend trait (buffers, programs, draw state, draw calls)
- **Scene**: Owning context (device, object registry, camera, lighting, renderer)
- **ObjectRegistry**: Object records and their GPU buffer lifecycle
- **Renderer**: Global draw state, per-object draws, draw ordering
- **lighting**: Shader source generation with baked lighting constants
- **transform**: Model/view/projection matrix composition

Backend implementations provide concrete types that implement `GraphicsDevice`.
A headless `MockGraphicsDevice` records every command for tests and tooling.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod geometry;
pub mod lighting;
pub mod transform;
pub mod scene;

// Main easy3d namespace module
pub mod easy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Log sink owner
    pub use crate::engine::Engine;

    // Scene entry point
    pub use crate::scene::{Scene, SceneConfig};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Graphics device sub-module
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // Geometry sub-module
    pub mod geometry {
        pub use crate::geometry::*;
    }

    // Lighting sub-module
    pub mod lighting {
        pub use crate::lighting::*;
    }

    // Transform sub-module
    pub mod transform {
        pub use crate::transform::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
