/// Tests for ObjectRegistry
///
/// Buffer lifecycle is checked through the MockGraphicsDevice probe.

use super::*;
use crate::error::Error;
use crate::geometry::GeometryData;
use crate::graphics_device::mock_graphics_device::{MockGraphicsDevice, MockProbe};

// ============================================================================
// Helper Functions
// ============================================================================

fn setup() -> (ObjectRegistry, MockGraphicsDevice, MockProbe) {
    let (device, probe) = MockGraphicsDevice::with_probe();
    (ObjectRegistry::new(), device, probe)
}

fn desc_with_id(id: impl Into<ObjectId>) -> ObjectDesc {
    ObjectDesc { id: Some(id.into()), ..Default::default() }
}

fn triangle() -> GeometryData {
    GeometryData::new(
        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        vec![0, 1, 2],
        vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
    )
}

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_create_allocates_four_buffers() {
    let (mut registry, mut device, probe) = setup();
    let id = registry.create(&mut device, desc_with_id(1)).unwrap();

    assert_eq!(id, ObjectId::Int(1));
    assert_eq!(registry.len(), 1);
    assert_eq!(probe.live_buffer_count(), 4);

    let buffers = *registry.get(1).unwrap().buffers();
    assert_eq!(probe.buffer_label(buffers.vertices).as_deref(), Some("1/vertices"));
    assert_eq!(probe.buffer_label(buffers.indices).as_deref(), Some("1/indices"));
    assert_eq!(probe.buffer_floats(buffers.colors).unwrap().len(), 96);
}

#[test]
fn test_generated_ids_start_at_1000_and_skip_live() {
    let (mut registry, mut device, _probe) = setup();
    registry.create(&mut device, desc_with_id(1001)).unwrap();

    let first = registry.create(&mut device, ObjectDesc::default()).unwrap();
    let second = registry.create(&mut device, ObjectDesc::default()).unwrap();
    assert_eq!(first, ObjectId::Int(1000));
    assert_eq!(second, ObjectId::Int(1002));
}

#[test]
fn test_failed_create_does_not_consume_generated_id() {
    let (mut registry, mut device, probe) = setup();

    probe.set_buffer_budget(Some(0));
    let result = registry.create(&mut device, ObjectDesc::default());
    assert!(matches!(result, Err(Error::Backend(_))));

    probe.set_buffer_budget(None);
    let id = registry.create(&mut device, ObjectDesc::default()).unwrap();
    assert_eq!(id, ObjectId::Int(1000));
}

#[test]
fn test_replace_releases_previous_buffers_only() {
    let (mut registry, mut device, probe) = setup();
    registry.create(&mut device, desc_with_id("a")).unwrap();
    registry.create(&mut device, desc_with_id("b")).unwrap();
    let first = registry.get("a").unwrap().buffers().handles();

    registry.create(&mut device, desc_with_id("a")).unwrap();

    assert_eq!(probe.destroyed_buffers(), first.to_vec());
    assert_eq!(probe.live_buffer_count(), 8);
    assert_eq!(registry.len(), 2);
    // replacement keeps the original slot
    assert_eq!(registry.ids(), &[ObjectId::from("a"), ObjectId::from("b")]);
}

#[test]
fn test_invalid_geometry_changes_nothing() {
    let (mut registry, mut device, probe) = setup();
    registry.create(&mut device, desc_with_id(1)).unwrap();

    let mut geometry = triangle();
    geometry.indices = vec![0, 1];
    let result = registry.create(&mut device, ObjectDesc {
        id: Some(ObjectId::Int(1)),
        geometry: Some(geometry),
        ..Default::default()
    });

    assert!(matches!(result, Err(Error::Geometry(_))));
    assert_eq!(registry.len(), 1);
    assert_eq!(probe.buffers_created(), 4);
    assert_eq!(registry.get(1).unwrap().vertex_count(), 24);
}

#[test]
fn test_failed_allocation_rolls_back() {
    let (mut registry, mut device, probe) = setup();
    registry.create(&mut device, desc_with_id(1)).unwrap();
    let original = registry.get(1).unwrap().buffers().handles();

    probe.set_buffer_budget(Some(2));
    let result = registry.create(&mut device, desc_with_id(1));

    assert!(matches!(result, Err(Error::Backend(_))));
    // the two new buffers were released, the original object is intact
    assert_eq!(probe.destroyed_buffers().len(), 2);
    assert_eq!(probe.live_buffer_count(), 4);
    assert_eq!(registry.get(1).unwrap().buffers().handles(), original);
    for buffer in original {
        assert!(probe.is_buffer_alive(buffer));
    }
}

#[test]
fn test_create_standard() {
    let (mut registry, mut device, probe) = setup();
    let id = registry
        .create_standard(&mut device, StandardObjectDesc {
            shape: "plane".to_string(),
            ..Default::default()
        })
        .unwrap();

    let object = registry.get(&id).unwrap();
    assert_eq!(object.vertex_count(), 4);
    assert_eq!(probe.buffer_floats(object.buffers().colors).unwrap()[..4], [1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_create_standard_unknown_shape() {
    let (mut registry, mut device, probe) = setup();
    let result = registry.create_standard(&mut device, StandardObjectDesc {
        shape: "sphere".to_string(),
        ..Default::default()
    });
    assert!(matches!(result, Err(Error::UnknownShape(_))));
    assert!(registry.is_empty());
    assert_eq!(probe.buffers_created(), 0);
}

// ============================================================================
// Deletion
// ============================================================================

#[test]
fn test_delete_releases_and_forgets() {
    let (mut registry, mut device, probe) = setup();
    registry.create(&mut device, desc_with_id(7)).unwrap();

    assert!(registry.delete(&mut device, 7));
    assert!(!registry.contains(7));
    assert!(registry.ids().is_empty());
    assert_eq!(probe.live_buffer_count(), 0);
    assert!(matches!(registry.position(7), Err(Error::UnknownObject(_))));
}

#[test]
fn test_delete_unknown_returns_false() {
    let (mut registry, mut device, probe) = setup();
    assert!(!registry.delete(&mut device, "ghost"));
    assert!(probe.destroyed_buffers().is_empty());
}

#[test]
fn test_clear_releases_everything() {
    let (mut registry, mut device, probe) = setup();
    for id in 0..3 {
        registry.create(&mut device, desc_with_id(id)).unwrap();
    }
    registry.clear(&mut device);
    assert!(registry.is_empty());
    assert_eq!(probe.live_buffer_count(), 0);
    assert_eq!(probe.destroyed_buffers().len(), 12);
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn test_transform_round_trip_is_a_copy() {
    let (mut registry, mut device, _probe) = setup();
    registry.create(&mut device, desc_with_id(1)).unwrap();

    registry.set_position(1, Vec3::new(1.0, 2.0, 3.0)).unwrap();
    let mut position = registry.position(1).unwrap();
    assert_eq!(position, Vec3::new(1.0, 2.0, 3.0));

    position.x = 100.0;
    assert_eq!(registry.position(1).unwrap(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_setters_update_model_matrix() {
    let (mut registry, mut device, _probe) = setup();
    registry.create(&mut device, desc_with_id(1)).unwrap();

    registry.set_rotation(1, Vec3::new(0.0, 1.0, 0.0)).unwrap();
    registry.set_scale(1, Vec3::splat(3.0)).unwrap();
    registry.set_position(1, Vec3::X).unwrap();

    let expected = crate::transform::compose(Vec3::X, Vec3::new(0.0, 1.0, 0.0), Vec3::splat(3.0));
    assert_eq!(*registry.get(1).unwrap().model_matrix(), expected);

    registry.set_transform(1, Vec3::ZERO, Vec3::ZERO, Vec3::ONE).unwrap();
    assert_eq!(*registry.get(1).unwrap().model_matrix(), glam::Mat4::IDENTITY);
}

#[test]
fn test_setter_on_unknown_id() {
    let (mut registry, _device, _probe) = setup();
    assert!(matches!(registry.set_position(9, Vec3::ONE), Err(Error::UnknownObject(_))));
    assert!(matches!(registry.scale("nope"), Err(Error::UnknownObject(_))));
}

// ============================================================================
// Colors
// ============================================================================

#[test]
fn test_set_colors_swaps_buffer() {
    let (mut registry, mut device, probe) = setup();
    registry.create(&mut device, ObjectDesc {
        id: Some(ObjectId::Int(1)),
        geometry: Some(triangle()),
        ..Default::default()
    }).unwrap();
    let old = registry.get(1).unwrap().buffers().colors;

    registry.set_colors(&mut device, 1, [0.0, 0.0, 1.0, 1.0]).unwrap();

    let object = registry.get(1).unwrap();
    assert_ne!(object.buffers().colors, old);
    assert!(!probe.is_buffer_alive(old));
    assert_eq!(object.colors(), [0.0, 0.0, 1.0, 1.0].repeat(3).as_slice());
    assert_eq!(probe.live_buffer_count(), 4);
}

#[test]
fn test_set_colors_rejects_wrong_count() {
    let (mut registry, mut device, probe) = setup();
    registry.create(&mut device, desc_with_id(1)).unwrap();

    let result = registry.set_colors(&mut device, 1, vec![1.0f32; 8]);
    assert!(matches!(result, Err(Error::Geometry(_))));
    assert_eq!(probe.buffers_created(), 4);
}
