/// Camera - position/rotation driven view plus a perspective projection
///
/// Both matrices are cached. The view matrix is recomputed on every
/// position/rotation change unless the caller supplied one explicitly; the
/// projection matrix only when the perspective changes or, for a derived
/// aspect ratio, when the surface is resized.

use glam::{Mat4, Vec3};
use winit::dpi::PhysicalSize;
use crate::error::Result;
use crate::{engine_bail, engine_debug};
use crate::transform;

/// Default camera position (one unit back from the origin)
pub const DEFAULT_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Width / height; `None` follows the surface size
    pub aspect: Option<f32>,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 1.0,
            aspect: None,
            near: 1.0,
            far: 1000.0,
        }
    }
}

impl Projection {
    /// # Errors
    ///
    /// `Error::Configuration` unless `fov_y` is in (0, PI), `near > 0`,
    /// `far > near` and any explicit aspect is positive (all finite).
    pub fn validate(&self) -> Result<()> {
        if !(self.fov_y.is_finite() && self.fov_y > 0.0 && self.fov_y < std::f32::consts::PI) {
            engine_bail!("easy3d::Camera", Configuration,
                "field of view {} outside (0, PI)", self.fov_y);
        }
        if !(self.near.is_finite() && self.near > 0.0) {
            engine_bail!("easy3d::Camera", Configuration,
                "near plane {} must be positive", self.near);
        }
        if !(self.far.is_finite() && self.far > self.near) {
            engine_bail!("easy3d::Camera", Configuration,
                "far plane {} must be beyond near plane {}", self.far, self.near);
        }
        if let Some(aspect) = self.aspect {
            if !(aspect.is_finite() && aspect > 0.0) {
                engine_bail!("easy3d::Camera", Configuration,
                    "aspect ratio {} must be positive", aspect);
            }
        }
        Ok(())
    }

    /// Aspect ratio actually used for a surface
    pub fn effective_aspect(&self, surface_size: PhysicalSize<u32>) -> f32 {
        self.aspect
            .unwrap_or(surface_size.width as f32 / surface_size.height as f32)
    }

    /// Projection matrix for a surface
    pub fn matrix(&self, surface_size: PhysicalSize<u32>) -> Mat4 {
        transform::perspective(self.fov_y, self.effective_aspect(surface_size), self.near, self.far)
    }
}

/// Scene camera
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    rotation: Vec3,
    view_matrix: Mat4,
    /// Set by `set_view_matrix`, cleared by the next position/rotation change
    view_override: bool,
    projection: Projection,
    projection_matrix: Mat4,
    surface_size: PhysicalSize<u32>,
}

impl Camera {
    /// # Errors
    ///
    /// `Error::Configuration` for an invalid projection or an empty surface.
    pub fn new(
        position: Vec3,
        rotation: Vec3,
        projection: Projection,
        surface_size: PhysicalSize<u32>,
    ) -> Result<Self> {
        validate_surface(surface_size)?;
        projection.validate()?;
        Ok(Self {
            position,
            rotation,
            view_matrix: transform::compose_view(position, rotation),
            view_override: false,
            projection,
            projection_matrix: projection.matrix(surface_size),
            surface_size,
        })
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Euler angles in radians
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Whether the view matrix was set explicitly
    pub fn has_view_override(&self) -> bool {
        self.view_override
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    pub fn surface_size(&self) -> PhysicalSize<u32> {
        self.surface_size
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view();
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.update_view();
    }

    /// Use an explicit view matrix until the next position/rotation change
    pub fn set_view_matrix(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
        self.view_override = true;
    }

    /// Replace the perspective parameters. Nothing changes on error.
    pub fn set_projection(&mut self, projection: Projection) -> Result<()> {
        projection.validate()?;
        self.projection = projection;
        self.projection_matrix = projection.matrix(self.surface_size);
        Ok(())
    }

    /// Record a new surface size.
    ///
    /// The projection is recomputed only when its aspect follows the surface.
    pub fn resize(&mut self, surface_size: PhysicalSize<u32>) -> Result<()> {
        validate_surface(surface_size)?;
        self.surface_size = surface_size;
        if self.projection.aspect.is_none() {
            self.projection_matrix = self.projection.matrix(surface_size);
            engine_debug!("easy3d::Camera", "Projection rebuilt for {}x{} surface",
                surface_size.width, surface_size.height);
        }
        Ok(())
    }

    fn update_view(&mut self) {
        self.view_matrix = transform::compose_view(self.position, self.rotation);
        self.view_override = false;
    }
}

pub(crate) fn validate_surface(surface_size: PhysicalSize<u32>) -> Result<()> {
    if surface_size.width == 0 || surface_size.height == 0 {
        engine_bail!("easy3d::Camera", Configuration,
            "surface size {}x{} is empty", surface_size.width, surface_size.height);
    }
    Ok(())
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
