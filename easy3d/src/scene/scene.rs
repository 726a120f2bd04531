/// Scene - owning context for one drawable surface
///
/// Bundles the graphics device, the object registry, the camera, the
/// lighting settings with their compiled program, and the renderer settings.
/// Scenes are plain values; several can live side by side.

use glam::{Mat4, Vec3, Vec4};
use winit::dpi::PhysicalSize;
use crate::error::Result;
use crate::{engine_debug, engine_info, engine_warn};
use crate::geometry::ColorInput;
use crate::graphics_device::{GraphicsDevice, ProgramHandle};
use crate::lighting::{generate_program_source, LightingConfig};
use super::camera::{Camera, Projection};
use super::object::{ObjectDesc, ObjectId, SceneObject, StandardObjectDesc};
use super::registry::ObjectRegistry;
use super::renderer::{FrameStats, Renderer};
use super::scene_config::SceneConfig;

/// A renderable scene bound to one graphics device.
///
/// GPU resources are released by `destroy`. Dropping a scene without
/// calling it leaves the device's buffers and program allocated.
pub struct Scene {
    device: Box<dyn GraphicsDevice>,
    registry: ObjectRegistry,
    camera: Camera,
    lighting: LightingConfig,
    /// `None` only after `destroy`, until the next successful lighting change
    program: Option<ProgramHandle>,
    renderer: Renderer,
}

impl Scene {
    /// Create a scene and compile its initial program.
    ///
    /// # Errors
    ///
    /// * `Error::Configuration` - empty surface or invalid projection
    /// * `Error::ShaderCompile` - the initial program failed to build
    ///
    /// # Example
    ///
    /// ```
    /// use easy3d::easy3d::{Scene, SceneConfig};
    /// use easy3d::easy3d::device::mock_graphics_device::MockGraphicsDevice;
    /// use easy3d::easy3d::scene::StandardObjectDesc;
    ///
    /// let mut scene = Scene::new(MockGraphicsDevice::new(), SceneConfig::default()).unwrap();
    /// scene.create_standard_object(StandardObjectDesc::default()).unwrap();
    /// scene.clear();
    /// let stats = scene.render_all();
    /// assert_eq!(stats.draw_calls, 1);
    /// scene.destroy();
    /// ```
    pub fn new<D: GraphicsDevice + 'static>(device: D, config: SceneConfig) -> Result<Self> {
        let camera = Camera::new(
            config.camera_position,
            config.camera_rotation,
            config.projection,
            config.surface_size,
        )?;

        let mut device: Box<dyn GraphicsDevice> = Box::new(device);
        let program = device.create_program(&generate_program_source(&config.lighting))?;

        engine_info!("easy3d::Scene", "Scene created ({}x{})",
            config.surface_size.width, config.surface_size.height);

        Ok(Self {
            device,
            registry: ObjectRegistry::new(),
            camera,
            lighting: config.lighting,
            program: Some(program),
            renderer: Renderer::new(
                config.render_reverse_faces,
                config.sort_objects,
                config.clear_color,
            ),
        })
    }

    /// Release every object buffer and the program.
    ///
    /// The scene stays usable: objects can be created again, and draws are
    /// refused until a lighting change rebuilds the program.
    pub fn destroy(&mut self) {
        self.registry.clear(self.device.as_mut());
        if let Some(program) = self.program.take() {
            self.device.destroy_program(program);
        }
        engine_info!("easy3d::Scene", "Scene destroyed");
    }

    // ===== ACCESSORS =====

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn lighting(&self) -> &LightingConfig {
        &self.lighting
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Current program, if one is built
    pub fn program(&self) -> Option<ProgramHandle> {
        self.program
    }

    /// Device access for hosts that issue their own draws between ours
    pub fn device_mut(&mut self) -> &mut dyn GraphicsDevice {
        self.device.as_mut()
    }

    // ===== OBJECTS =====

    /// See `ObjectRegistry::create`
    pub fn create_object(&mut self, desc: ObjectDesc) -> Result<ObjectId> {
        self.registry.create(self.device.as_mut(), desc)
    }

    /// See `ObjectRegistry::create_standard`
    pub fn create_standard_object(&mut self, desc: StandardObjectDesc) -> Result<ObjectId> {
        self.registry.create_standard(self.device.as_mut(), desc)
    }

    /// Release an object. Returns false for an unknown id.
    pub fn delete_object(&mut self, id: impl Into<ObjectId>) -> bool {
        self.registry.delete(self.device.as_mut(), id)
    }

    pub fn object(&self, id: impl Into<ObjectId>) -> Option<&SceneObject> {
        self.registry.get(id)
    }

    /// Live ids in registration order
    pub fn object_ids(&self) -> &[ObjectId] {
        self.registry.ids()
    }

    pub fn object_count(&self) -> usize {
        self.registry.len()
    }

    pub fn set_object_position(&mut self, id: impl Into<ObjectId>, position: Vec3) -> Result<()> {
        self.registry.set_position(id, position)
    }

    pub fn set_object_rotation(&mut self, id: impl Into<ObjectId>, rotation: Vec3) -> Result<()> {
        self.registry.set_rotation(id, rotation)
    }

    pub fn set_object_scale(&mut self, id: impl Into<ObjectId>, scale: Vec3) -> Result<()> {
        self.registry.set_scale(id, scale)
    }

    pub fn set_object_transform(
        &mut self,
        id: impl Into<ObjectId>,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> Result<()> {
        self.registry.set_transform(id, position, rotation, scale)
    }

    pub fn object_position(&self, id: impl Into<ObjectId>) -> Result<Vec3> {
        self.registry.position(id)
    }

    pub fn object_rotation(&self, id: impl Into<ObjectId>) -> Result<Vec3> {
        self.registry.rotation(id)
    }

    pub fn object_scale(&self, id: impl Into<ObjectId>) -> Result<Vec3> {
        self.registry.scale(id)
    }

    /// Re-upload an object's colors
    pub fn set_object_colors(
        &mut self,
        id: impl Into<ObjectId>,
        colors: impl Into<ColorInput>,
    ) -> Result<()> {
        self.registry.set_colors(self.device.as_mut(), id, colors)
    }

    // ===== CAMERA =====

    pub fn set_camera_position(&mut self, position: Vec3) {
        self.camera.set_position(position);
    }

    pub fn set_camera_rotation(&mut self, rotation: Vec3) {
        self.camera.set_rotation(rotation);
    }

    pub fn camera_position(&self) -> Vec3 {
        self.camera.position()
    }

    pub fn camera_rotation(&self) -> Vec3 {
        self.camera.rotation()
    }

    /// Explicit view matrix, kept until the next camera position/rotation change
    pub fn set_view_matrix(&mut self, matrix: Mat4) {
        self.camera.set_view_matrix(matrix);
    }

    /// Replace the perspective. `aspect: None` follows the surface size.
    pub fn set_perspective(&mut self, fov_y: f32, aspect: Option<f32>, near: f32, far: f32) -> Result<()> {
        self.camera.set_projection(Projection { fov_y, aspect, near, far })
    }

    /// Surface size changed (window resize)
    pub fn resize(&mut self, surface_size: PhysicalSize<u32>) -> Result<()> {
        self.camera.resize(surface_size)
    }

    // ===== LIGHTING =====
    //
    // Every successful setter recompiles and relinks the program, even when
    // the value did not change. Not meant to be called every frame.

    /// Set the ambient light level, in [0.01, 0.99]. Rebuilds the program.
    pub fn set_ambient_light_level(&mut self, level: f32) -> Result<()> {
        let mut lighting = self.lighting;
        lighting.set_ambient(level)?;
        self.apply_lighting(lighting)
    }

    /// Toggle directional shading. Rebuilds the program.
    pub fn enable_directional_lighting(&mut self, enable: bool) -> Result<()> {
        let mut lighting = self.lighting;
        lighting.set_directional(enable);
        self.apply_lighting(lighting)
    }

    /// Set the direction light comes from (normalized). Rebuilds the program.
    pub fn set_directional_lighting_direction(&mut self, direction: Vec3) -> Result<()> {
        let mut lighting = self.lighting;
        lighting.set_direction(direction)?;
        self.apply_lighting(lighting)
    }

    /// Build a program for `lighting` and switch to it.
    ///
    /// On failure the previous program and settings stay in place.
    fn apply_lighting(&mut self, lighting: LightingConfig) -> Result<()> {
        let program = match self.device.create_program(&generate_program_source(&lighting)) {
            Ok(program) => program,
            Err(err) => {
                match self.program {
                    Some(_) => engine_warn!("easy3d::Scene",
                        "Lighting change not applied, keeping previous program"),
                    None => engine_warn!("easy3d::Scene",
                        "Lighting change not applied, draws stay refused"),
                }
                return Err(err);
            }
        };
        if let Some(previous) = self.program.replace(program) {
            self.device.destroy_program(previous);
        }
        self.lighting = lighting;
        engine_debug!("easy3d::Scene", "Program rebuilt (ambient {}, directional {})",
            lighting.ambient(), lighting.directional());
        Ok(())
    }

    // ===== RENDERING =====

    pub fn enable_rendering_reverse_faces(&mut self, enable: bool) {
        self.renderer.enable_rendering_reverse_faces(enable);
    }

    pub fn enable_sorting_objects(&mut self, enable: bool) {
        self.renderer.enable_sorting_objects(enable);
    }

    pub fn set_clear_color(&mut self, color: Vec4) {
        self.renderer.set_clear_color(color);
    }

    /// Apply draw state and clear color + depth over the whole surface
    pub fn clear(&mut self) {
        self.renderer.clear(self.device.as_mut(), &self.camera);
    }

    /// Ids in the order `render_all` would draw them now
    pub fn draw_order(&self) -> Vec<ObjectId> {
        self.renderer.draw_order(&self.registry, self.camera.position())
    }

    /// Draw one object
    pub fn render_one(&mut self, id: impl Into<ObjectId>) -> Result<()> {
        let id = id.into();
        self.renderer.render_one(self.device.as_mut(), self.program, &self.registry, &self.camera, &id)
    }

    /// Draw every object in `draw_order`
    pub fn render_all(&mut self) -> FrameStats {
        self.renderer.render_all(self.device.as_mut(), self.program, &self.registry, &self.camera)
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
