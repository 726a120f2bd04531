/// Tests for transform composition

use super::*;
use std::f32::consts::FRAC_PI_2;

const EPSILON: f32 = 1e-5;

// ============================================================================
// compose
// ============================================================================

#[test]
fn test_compose_identity() {
    let m = compose(Vec3::ZERO, Vec3::ZERO, Vec3::ONE);
    assert!(m.abs_diff_eq(Mat4::IDENTITY, EPSILON));
}

#[test]
fn test_compose_translation_only() {
    let m = compose(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::ONE);
    let p = m.transform_point3(Vec3::ZERO);
    assert!(p.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), EPSILON));
}

#[test]
fn test_compose_scales_before_translating() {
    // Scale must not scale the translation.
    let m = compose(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO, Vec3::splat(2.0));
    let p = m.transform_point3(Vec3::new(1.0, 0.0, 0.0));
    assert!(p.abs_diff_eq(Vec3::new(12.0, 0.0, 0.0), EPSILON));
}

#[test]
fn test_compose_rotates_about_own_origin() {
    // +X rotated 90 degrees about Y lands on -Z, then moves to the position.
    let m = compose(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, FRAC_PI_2, 0.0), Vec3::ONE);
    let p = m.transform_point3(Vec3::X);
    assert!(p.abs_diff_eq(Vec3::new(0.0, 5.0, -1.0), EPSILON));
}

#[test]
fn test_compose_scale_then_rotate() {
    // Non-uniform scale on X, then 90 degrees about Z: the stretched axis ends up on Y.
    let m = compose(Vec3::ZERO, Vec3::new(0.0, 0.0, FRAC_PI_2), Vec3::new(3.0, 1.0, 1.0));
    let p = m.transform_point3(Vec3::X);
    assert!(p.abs_diff_eq(Vec3::new(0.0, 3.0, 0.0), EPSILON));
}

// ============================================================================
// compose_view
// ============================================================================

#[test]
fn test_view_at_origin_is_identity() {
    assert!(compose_view(Vec3::ZERO, Vec3::ZERO).abs_diff_eq(Mat4::IDENTITY, EPSILON));
}

#[test]
fn test_view_moves_world_opposite_to_camera() {
    let view = compose_view(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
    let p = view.transform_point3(Vec3::ZERO);
    assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -5.0), EPSILON));
}

#[test]
fn test_view_undoes_single_axis_camera_transform() {
    let position = Vec3::new(1.0, -2.0, 3.0);
    let rotation = Vec3::new(0.0, 0.7, 0.0);
    let camera_world = compose(position, rotation, Vec3::ONE);
    let view = compose_view(position, rotation);
    assert!((view * camera_world).abs_diff_eq(Mat4::IDENTITY, EPSILON));
}

// ============================================================================
// perspective
// ============================================================================

#[test]
fn test_perspective_maps_near_plane_to_minus_one() {
    let proj = perspective(1.0, 1.0, 1.0, 1000.0);
    let clip = proj * glam::Vec4::new(0.0, 0.0, -1.0, 1.0);
    assert!((clip.z / clip.w + 1.0).abs() < 1e-4);
}
