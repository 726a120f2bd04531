//! Transform composition
//!
//! Pure functions turning position/rotation/scale triples into matrices.
//! Rotations are Euler angles in radians, applied as X then Y then Z
//! (`EulerRot::XYZ`).

use glam::{EulerRot, Mat4, Vec3};

/// Rotation matrix for per-axis Euler angles (radians)
pub fn rotation_matrix(rotation: Vec3) -> Mat4 {
    Mat4::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}

/// Model matrix: translation · rotation · scale.
///
/// Scale is applied first, then rotation, then translation, so an object
/// scales and rotates about its own origin before being placed in the world.
pub fn compose(position: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
    Mat4::from_translation(position) * rotation_matrix(rotation) * Mat4::from_scale(scale)
}

/// View matrix for a camera at `position` with Euler `rotation`.
///
/// Moving the camera is moving the world the other way: the rotation built
/// from the negated angles is applied after the translation by the negated
/// position.
pub fn compose_view(position: Vec3, rotation: Vec3) -> Mat4 {
    rotation_matrix(-rotation) * Mat4::from_translation(-position)
}

/// Right-handed perspective projection with OpenGL clip depth [-1, 1]
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh_gl(fov_y, aspect, near, far)
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
