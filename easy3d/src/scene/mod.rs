//! Scene module
//!
//! Object registry, camera, renderer and the `Scene` context tying them to
//! one graphics device.

mod object;
mod registry;
mod camera;
mod renderer;
mod scene_config;
mod scene;

pub use object::{
    ObjectId, ObjectBuffers, ObjectDesc, ResolvedObject, SceneObject, StandardObjectDesc,
    DEFAULT_STANDARD_COLOR, FIRST_GENERATED_ID,
};
pub use registry::ObjectRegistry;
pub use camera::{Camera, Projection, DEFAULT_CAMERA_POSITION};
pub use renderer::{Renderer, FrameStats, DEFAULT_CLEAR_COLOR};
pub use scene_config::SceneConfig;
pub use scene::Scene;
