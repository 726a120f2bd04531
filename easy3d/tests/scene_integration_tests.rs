//! Integration tests for the Scene pipeline
//!
//! Drive a Scene end to end through the public API and observe the device
//! through the MockGraphicsDevice probe. No GPU required.
//!
//! Run with: cargo test --test scene_integration_tests

use easy3d::easy3d::{Error, Scene, SceneConfig};
use easy3d::easy3d::device::mock_graphics_device::{MockCommand, MockGraphicsDevice, MockProbe};
use easy3d::easy3d::device::ClearFlags;
use easy3d::easy3d::geometry::{ColorInput, GeometryData};
use easy3d::easy3d::scene::{ObjectDesc, ObjectId, StandardObjectDesc};
use easy3d::easy3d::transform;
use easy3d::glam::{Mat4, Vec3, Vec4};

// ============================================================================
// HELPERS
// ============================================================================

fn create_scene() -> (Scene, MockProbe) {
    let (device, probe) = MockGraphicsDevice::with_probe();
    let scene = Scene::new(device, SceneConfig::default()).unwrap();
    (scene, probe)
}

fn cube_at(id: u64, position: Vec3) -> ObjectDesc {
    ObjectDesc {
        id: Some(ObjectId::Int(id)),
        position: Some(position),
        ..Default::default()
    }
}

fn quad() -> GeometryData {
    GeometryData::new(
        vec![-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 1.0, 1.0, 0.0, -1.0, 1.0, 0.0],
        vec![0, 1, 2, 0, 2, 3],
        vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
    )
}

// ============================================================================
// FRAME
// ============================================================================

#[test]
fn test_integration_one_draw_per_object() {
    let (mut scene, probe) = create_scene();
    for id in 0..5u64 {
        scene.create_object(cube_at(id, Vec3::new(id as f32, 0.0, -5.0))).unwrap();
    }
    probe.clear_commands();

    scene.clear();
    let stats = scene.render_all();

    assert_eq!(stats.draw_calls, 5);
    assert_eq!(stats.triangles, 60);
    assert_eq!(stats.failed, 0);
    assert_eq!(probe.draw_count(), 5);

    let clears = probe
        .commands()
        .into_iter()
        .filter(|c| matches!(c, MockCommand::Clear { .. }))
        .count();
    assert_eq!(clears, 1);
}

#[test]
fn test_integration_clear_uses_configured_color() {
    let (mut scene, probe) = create_scene();
    scene.set_clear_color(Vec4::new(0.2, 0.4, 0.6, 1.0));
    probe.clear_commands();

    scene.clear();

    assert!(probe.commands().contains(&MockCommand::Clear {
        flags: ClearFlags::COLOR | ClearFlags::DEPTH,
        color: [0.2, 0.4, 0.6, 1.0],
        depth: 1.0,
    }));
}

#[test]
fn test_integration_farthest_first() {
    let (mut scene, probe) = create_scene();
    scene.set_camera_position(Vec3::ZERO);
    scene.create_object(cube_at(1, Vec3::new(0.0, 0.0, 1.0))).unwrap();
    scene.create_object(cube_at(5, Vec3::new(0.0, 0.0, 5.0))).unwrap();
    scene.create_object(cube_at(3, Vec3::new(0.0, 0.0, 3.0))).unwrap();

    let expected = vec![ObjectId::Int(5), ObjectId::Int(3), ObjectId::Int(1)];
    assert_eq!(scene.draw_order(), expected);

    scene.render_all();
    let drawn: Vec<f32> = probe.draw_calls().iter().map(|d| d.model_translation()[2]).collect();
    assert_eq!(drawn, vec![5.0, 3.0, 1.0]);

    scene.enable_sorting_objects(false);
    assert_eq!(
        scene.draw_order(),
        vec![ObjectId::Int(1), ObjectId::Int(5), ObjectId::Int(3)]
    );
}

#[test]
fn test_integration_uniforms_reflect_camera() {
    let (mut scene, probe) = create_scene();
    scene.create_object(cube_at(1, Vec3::ZERO)).unwrap();
    scene.set_camera_position(Vec3::new(0.0, 0.0, 10.0));
    scene.set_camera_rotation(Vec3::new(0.0, 0.3, 0.0));

    scene.render_one(1).unwrap();

    let draw = &probe.draw_calls()[0];
    let expected = transform::compose_view(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.3, 0.0));
    assert_eq!(draw.view, expected.to_cols_array());
    assert_eq!(draw.model, Mat4::IDENTITY.to_cols_array());
}

// ============================================================================
// OBJECT LIFECYCLE
// ============================================================================

#[test]
fn test_integration_replace_releases_first_buffers() {
    let (mut scene, probe) = create_scene();
    scene.create_object(cube_at(1, Vec3::ZERO)).unwrap();
    let first = scene.object(1).unwrap().buffers().handles();

    scene.create_object(ObjectDesc {
        id: Some(ObjectId::Int(1)),
        geometry: Some(quad()),
        ..Default::default()
    }).unwrap();

    assert_eq!(probe.destroyed_buffers(), first.to_vec());
    assert_eq!(probe.live_buffer_count(), 4);
    assert_eq!(scene.object_count(), 1);
    assert_eq!(scene.object(1).unwrap().vertex_count(), 4);
}

#[test]
fn test_integration_delete_then_get() {
    let (mut scene, _probe) = create_scene();
    scene.create_object(cube_at(1, Vec3::ZERO)).unwrap();

    assert!(scene.delete_object(1));
    assert!(matches!(scene.object_position(1), Err(Error::UnknownObject(_))));
    assert!(matches!(scene.render_one(1), Err(Error::UnknownObject(_))));
    assert!(!scene.delete_object(1));
}

#[test]
fn test_integration_position_round_trip() {
    let (mut scene, _probe) = create_scene();
    scene.create_object(cube_at(1, Vec3::ZERO)).unwrap();

    scene.set_object_position(1, Vec3::new(1.0, 2.0, 3.0)).unwrap();
    let mut copy = scene.object_position(1).unwrap();
    assert_eq!(copy, Vec3::new(1.0, 2.0, 3.0));
    copy.y = -50.0;
    assert_eq!(scene.object_position(1).unwrap(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_integration_compose_identity() {
    assert_eq!(transform::compose(Vec3::ZERO, Vec3::ZERO, Vec3::ONE), Mat4::IDENTITY);
}

#[test]
fn test_integration_bad_indices_rejected() {
    let (mut scene, probe) = create_scene();
    scene.create_object(cube_at(1, Vec3::ZERO)).unwrap();

    let mut geometry = quad();
    geometry.indices = vec![0, 1];
    let result = scene.create_object(ObjectDesc {
        geometry: Some(geometry),
        ..Default::default()
    });

    assert!(matches!(result, Err(Error::Geometry(_))));
    assert_eq!(scene.object_count(), 1);
    assert_eq!(probe.buffers_created(), 4);
}

#[test]
fn test_integration_unknown_shape() {
    let (mut scene, _probe) = create_scene();
    let result = scene.create_standard_object(StandardObjectDesc {
        shape: "dodecahedron".to_string(),
        ..Default::default()
    });
    assert!(matches!(result, Err(Error::UnknownShape(_))));
    assert_eq!(scene.object_count(), 0);
}

#[test]
fn test_integration_per_vertex_colors_uploaded() {
    let (mut scene, probe) = create_scene();
    let colors = ColorInput::PerVertex(vec![
        [1.0, 0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0, 1.0],
        [0.0, 0.0, 1.0, 1.0],
        [1.0, 1.0, 1.0, 0.5],
    ]);
    let id = scene.create_object(ObjectDesc {
        geometry: Some(quad()),
        colors: Some(colors),
        ..Default::default()
    }).unwrap();

    let buffer = scene.object(&id).unwrap().buffers().colors;
    let uploaded = probe.buffer_floats(buffer).unwrap();
    assert_eq!(uploaded.len(), 16);
    assert_eq!(&uploaded[12..], &[1.0, 1.0, 1.0, 0.5]);
}

#[test]
fn test_integration_allocation_failure_rolls_back() {
    let (mut scene, probe) = create_scene();
    probe.set_buffer_budget(Some(3));

    let result = scene.create_object(ObjectDesc::default());

    assert!(matches!(result, Err(Error::Backend(_))));
    assert_eq!(probe.live_buffer_count(), 0);
    assert_eq!(scene.object_count(), 0);
}

// ============================================================================
// LIGHTING
// ============================================================================

#[test]
fn test_integration_same_ambient_twice_rebuilds_twice() {
    let (mut scene, probe) = create_scene();
    let before = probe.programs_created();

    scene.set_ambient_light_level(0.5).unwrap();
    scene.set_ambient_light_level(0.5).unwrap();

    assert_eq!(probe.programs_created(), before + 2);
    assert_eq!(probe.live_program_count(), 1);
}

#[test]
fn test_integration_nan_ambient_keeps_program_usable() {
    let (mut scene, probe) = create_scene();
    scene.create_object(cube_at(1, Vec3::ZERO)).unwrap();
    let program = scene.program().unwrap();

    let result = scene.set_ambient_light_level(f32::NAN);
    assert!(matches!(result, Err(Error::Configuration(_))));
    assert_eq!(scene.program(), Some(program));

    scene.render_one(1).unwrap();
    assert_eq!(probe.draw_calls()[0].program, program);
}

#[test]
fn test_integration_lighting_baked_into_program() {
    let (mut scene, probe) = create_scene();
    scene.set_directional_lighting_direction(Vec3::new(0.0, 0.0, 2.0)).unwrap();
    scene.set_ambient_light_level(0.6).unwrap();

    let source = probe.program_source(scene.program().unwrap()).unwrap();
    assert!(source.fragment.contains("vec3(0.0000, 0.0000, 1.0000)"));
    assert!(source.fragment.contains("0.2000"));

    scene.enable_directional_lighting(false).unwrap();
    let source = probe.program_source(scene.program().unwrap()).unwrap();
    assert!(source.fragment.contains("gl_FragColor = vColor;"));
}

// ============================================================================
// TEARDOWN
// ============================================================================

#[test]
fn test_integration_destroy() {
    let (mut scene, probe) = create_scene();
    for id in 0..3u64 {
        scene.create_object(cube_at(id, Vec3::ZERO)).unwrap();
    }

    scene.destroy();

    assert_eq!(probe.live_buffer_count(), 0);
    assert_eq!(probe.live_program_count(), 0);
}

#[test]
fn test_integration_independent_scenes() {
    let (mut first, first_probe) = create_scene();
    let (mut second, second_probe) = create_scene();

    first.create_object(cube_at(1, Vec3::ZERO)).unwrap();
    second.set_ambient_light_level(0.9).unwrap();

    assert_eq!(first_probe.live_buffer_count(), 4);
    assert_eq!(second_probe.live_buffer_count(), 0);
    assert_eq!(first.lighting().ambient(), 0.25);
    assert_eq!(second.lighting().ambient(), 0.9);
}
