/// Scene construction parameters

use glam::{Vec3, Vec4};
use winit::dpi::PhysicalSize;
use crate::lighting::LightingConfig;
use super::camera::{Projection, DEFAULT_CAMERA_POSITION};
use super::renderer::DEFAULT_CLEAR_COLOR;

/// Everything `Scene::new` needs besides the device
///
/// ```
/// use easy3d::easy3d::SceneConfig;
/// use easy3d::glam::Vec4;
/// use winit::dpi::PhysicalSize;
///
/// let config = SceneConfig {
///     surface_size: PhysicalSize::new(1280, 720),
///     clear_color: Vec4::new(0.1, 0.1, 0.1, 1.0),
///     ..Default::default()
/// };
/// assert!(config.sort_objects);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Drawable surface size in pixels (viewport and derived aspect ratio)
    pub surface_size: PhysicalSize<u32>,
    pub clear_color: Vec4,
    pub lighting: LightingConfig,
    pub camera_position: Vec3,
    /// Euler angles in radians
    pub camera_rotation: Vec3,
    pub projection: Projection,
    /// Draw far objects first
    pub sort_objects: bool,
    /// Rasterize back faces
    pub render_reverse_faces: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            surface_size: PhysicalSize::new(800, 600),
            clear_color: DEFAULT_CLEAR_COLOR,
            lighting: LightingConfig::default(),
            camera_position: DEFAULT_CAMERA_POSITION,
            camera_rotation: Vec3::ZERO,
            projection: Projection::default(),
            sort_objects: true,
            render_reverse_faces: true,
        }
    }
}
