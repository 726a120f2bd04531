/// Renderer - frame setup, per-object draws and draw ordering
///
/// The renderer holds only its settings. Everything it draws is passed in
/// per call: the device, the current program, the registry and the camera.

use glam::{Vec3, Vec4};
use crate::error::{Error, Result};
use crate::{engine_bail, engine_error, engine_trace};
use crate::graphics_device::{
    ClearFlags, DrawState, GraphicsDevice, ProgramHandle, Uniform, VertexAttribute, Viewport,
};
use super::camera::Camera;
use super::object::{ObjectId, SceneObject};
use super::registry::ObjectRegistry;

/// Default clear color (opaque black)
pub const DEFAULT_CLEAR_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

/// Result of one `render_all` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Successful draw calls
    pub draw_calls: usize,
    /// Triangles submitted by successful draws
    pub triangles: usize,
    /// Objects whose draw failed
    pub failed: usize,
}

/// Renderer settings and draw logic
#[derive(Debug, Clone)]
pub struct Renderer {
    render_reverse_faces: bool,
    sort_objects: bool,
    clear_color: Vec4,
}

impl Renderer {
    pub fn new(render_reverse_faces: bool, sort_objects: bool, clear_color: Vec4) -> Self {
        Self { render_reverse_faces, sort_objects, clear_color }
    }

    // ===== SETTINGS =====

    /// Rasterize back faces too (default true). When false, back faces are culled.
    pub fn enable_rendering_reverse_faces(&mut self, enable: bool) {
        self.render_reverse_faces = enable;
    }

    /// Draw far objects first (default true). When false, registration order is used.
    pub fn enable_sorting_objects(&mut self, enable: bool) {
        self.sort_objects = enable;
    }

    pub fn set_clear_color(&mut self, color: Vec4) {
        self.clear_color = color;
    }

    pub fn renders_reverse_faces(&self) -> bool {
        self.render_reverse_faces
    }

    pub fn sorts_objects(&self) -> bool {
        self.sort_objects
    }

    pub fn clear_color(&self) -> Vec4 {
        self.clear_color
    }

    // ===== FRAME =====

    /// Apply the global draw state, set the viewport and clear color + depth
    pub fn clear(&self, device: &mut dyn GraphicsDevice, camera: &Camera) {
        let surface = camera.surface_size();
        device.apply_draw_state(&DrawState::scene(self.render_reverse_faces));
        device.set_viewport(Viewport::full(surface.width, surface.height));
        device.clear(ClearFlags::COLOR | ClearFlags::DEPTH, self.clear_color.to_array(), 1.0);
    }

    /// Ids in the order `render_all` draws them
    ///
    /// With sorting enabled: farthest from the camera first, ties kept in
    /// registration order. Computed fresh on every call.
    pub fn draw_order(&self, registry: &ObjectRegistry, camera_position: Vec3) -> Vec<ObjectId> {
        if !self.sort_objects {
            return registry.ids().to_vec();
        }
        let mut by_distance: Vec<(f32, &ObjectId)> = registry
            .iter()
            .map(|object| (object.position().distance(camera_position), object.id()))
            .collect();
        by_distance.sort_by(|a, b| b.0.total_cmp(&a.0));
        by_distance.into_iter().map(|(_, id)| id.clone()).collect()
    }

    /// Draw one object.
    ///
    /// # Errors
    ///
    /// * `Error::ShaderCompile` - no valid program (draw refused)
    /// * `Error::UnknownObject` - id not registered (draw skipped)
    /// * device errors from binding or drawing
    pub fn render_one(
        &self,
        device: &mut dyn GraphicsDevice,
        program: Option<ProgramHandle>,
        registry: &ObjectRegistry,
        camera: &Camera,
        id: &ObjectId,
    ) -> Result<()> {
        let Some(program) = program else {
            engine_bail!("easy3d::Renderer", ShaderCompile,
                "no valid shader program, draw of object {} refused", id);
        };
        let Some(object) = registry.get(id) else {
            engine_bail!("easy3d::Renderer", UnknownObject, "cannot draw object {}", id);
        };
        draw_object(device, program, camera, object)
    }

    /// Draw every registered object in `draw_order`.
    ///
    /// A failed draw is logged and counted; the remaining objects are still
    /// drawn.
    pub fn render_all(
        &self,
        device: &mut dyn GraphicsDevice,
        program: Option<ProgramHandle>,
        registry: &ObjectRegistry,
        camera: &Camera,
    ) -> FrameStats {
        let mut stats = FrameStats::default();
        let Some(program) = program else {
            engine_error!("easy3d::Renderer",
                "no valid shader program, {} draw(s) refused", registry.len());
            stats.failed = registry.len();
            return stats;
        };

        for id in self.draw_order(registry, camera.position()) {
            let result = match registry.get(&id) {
                Some(object) => draw_object(device, program, camera, object)
                    .map(|()| object.triangle_count()),
                None => Err(Error::UnknownObject(format!("cannot draw object {}", id))),
            };
            match result {
                Ok(triangles) => {
                    stats.draw_calls += 1;
                    stats.triangles += triangles;
                }
                Err(err) => {
                    engine_error!("easy3d::Renderer", "Object {} skipped: {}", id, err);
                    stats.failed += 1;
                }
            }
        }

        engine_trace!("easy3d::Renderer", "Frame: {} draws, {} triangles, {} failed",
            stats.draw_calls, stats.triangles, stats.failed);
        stats
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(true, true, DEFAULT_CLEAR_COLOR)
    }
}

fn draw_object(
    device: &mut dyn GraphicsDevice,
    program: ProgramHandle,
    camera: &Camera,
    object: &SceneObject,
) -> Result<()> {
    let buffers = object.buffers();
    device.use_program(program)?;
    device.bind_vertex_attribute(
        VertexAttribute::Position, buffers.vertices, VertexAttribute::Position.components())?;
    device.bind_vertex_attribute(
        VertexAttribute::Normal, buffers.normals, VertexAttribute::Normal.components())?;
    device.bind_vertex_attribute(
        VertexAttribute::Color, buffers.colors, VertexAttribute::Color.components())?;
    device.bind_index_buffer(buffers.indices)?;
    device.set_uniform_matrix(Uniform::Projection, &camera.projection_matrix().to_cols_array())?;
    device.set_uniform_matrix(Uniform::View, &camera.view_matrix().to_cols_array())?;
    device.set_uniform_matrix(Uniform::Object, &object.model_matrix().to_cols_array())?;
    device.draw_indexed(object.index_count() as u32)
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
