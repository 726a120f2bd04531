/// Object registry - owns every SceneObject and its GPU buffers
///
/// Objects live in a hash map keyed by id; a separate list keeps the
/// registration order used when draw sorting is disabled. Both are updated
/// together: an id is in the list exactly when it is in the map.

use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::{engine_debug, engine_err, engine_trace, engine_warn};
use crate::geometry::ColorInput;
use crate::graphics_device::{BufferDesc, BufferHandle, GraphicsDevice};
use super::object::{
    ObjectBuffers, ObjectDesc, ObjectId, ResolvedObject, SceneObject,
    StandardObjectDesc, FIRST_GENERATED_ID,
};

/// Registry of renderable objects
#[derive(Debug)]
pub struct ObjectRegistry {
    objects: FxHashMap<ObjectId, SceneObject>,
    /// Registration order (replacement keeps the original slot)
    order: Vec<ObjectId>,
    next_generated_id: u64,
}

impl ObjectRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            objects: FxHashMap::default(),
            order: Vec::new(),
            next_generated_id: FIRST_GENERATED_ID,
        }
    }

    // ===== CREATION =====

    /// Create an object and upload its buffers.
    ///
    /// An existing object with the same id is released and replaced once the
    /// new buffers are allocated; it keeps its place in registration order.
    ///
    /// # Errors
    ///
    /// * `Error::Geometry` - malformed arrays (nothing allocated)
    /// * `Error::Backend` - allocation failed (partial allocations released)
    pub fn create(&mut self, device: &mut dyn GraphicsDevice, mut desc: ObjectDesc) -> Result<ObjectId> {
        let requested_id = desc.id.take();
        let resolved = desc.resolve()?;
        let (id, generated) = match requested_id {
            Some(id) => (id, None),
            None => {
                let value = self.next_free_id();
                (ObjectId::Int(value), Some(value))
            }
        };

        let buffers = upload_buffers(device, &id, &resolved)?;
        if let Some(value) = generated {
            self.next_generated_id = value + 1;
        }
        let object = SceneObject::new(id.clone(), resolved, buffers);

        match self.objects.insert(id.clone(), object) {
            Some(previous) => {
                release_buffers(device, previous.buffers());
                engine_debug!("easy3d::ObjectRegistry", "Replaced object {}", id);
            }
            None => {
                self.order.push(id.clone());
                engine_trace!("easy3d::ObjectRegistry", "Created object {}", id);
            }
        }
        Ok(id)
    }

    /// Create an object from a catalog shape with a single color.
    ///
    /// # Errors
    ///
    /// `Error::UnknownShape` when the shape name is not in the catalog, plus
    /// everything `create` can return.
    pub fn create_standard(
        &mut self,
        device: &mut dyn GraphicsDevice,
        desc: StandardObjectDesc,
    ) -> Result<ObjectId> {
        let desc = desc.into_object_desc()?;
        self.create(device, desc)
    }

    /// First counter value not taken by a live object. The counter itself
    /// only advances once a create succeeds.
    fn next_free_id(&self) -> u64 {
        let mut value = self.next_generated_id;
        while self.objects.contains_key(&ObjectId::Int(value)) {
            value += 1;
        }
        value
    }

    // ===== DELETION =====

    /// Release an object's buffers and forget it.
    ///
    /// Returns false (and logs a warning) if the id is not registered.
    pub fn delete(&mut self, device: &mut dyn GraphicsDevice, id: impl Into<ObjectId>) -> bool {
        let id = id.into();
        match self.objects.remove(&id) {
            Some(object) => {
                release_buffers(device, object.buffers());
                self.order.retain(|live| live != &id);
                engine_trace!("easy3d::ObjectRegistry", "Deleted object {}", id);
                true
            }
            None => {
                engine_warn!("easy3d::ObjectRegistry", "delete: no object with id {}", id);
                false
            }
        }
    }

    /// Release every object
    pub fn clear(&mut self, device: &mut dyn GraphicsDevice) {
        for id in self.order.drain(..) {
            if let Some(object) = self.objects.remove(&id) {
                release_buffers(device, object.buffers());
            }
        }
        self.objects.clear();
    }

    // ===== TRANSFORM =====

    /// Set an object's position and recompute its model matrix
    pub fn set_position(&mut self, id: impl Into<ObjectId>, position: Vec3) -> Result<()> {
        self.object_mut(id.into())?.set_position(position);
        Ok(())
    }

    /// Set an object's Euler rotation (radians) and recompute its model matrix
    pub fn set_rotation(&mut self, id: impl Into<ObjectId>, rotation: Vec3) -> Result<()> {
        self.object_mut(id.into())?.set_rotation(rotation);
        Ok(())
    }

    /// Set an object's scale and recompute its model matrix
    pub fn set_scale(&mut self, id: impl Into<ObjectId>, scale: Vec3) -> Result<()> {
        self.object_mut(id.into())?.set_scale(scale);
        Ok(())
    }

    /// Set position, rotation and scale with a single matrix recomputation
    pub fn set_transform(
        &mut self,
        id: impl Into<ObjectId>,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> Result<()> {
        self.object_mut(id.into())?.set_transform(position, rotation, scale);
        Ok(())
    }

    pub fn position(&self, id: impl Into<ObjectId>) -> Result<Vec3> {
        Ok(self.object(id.into())?.position())
    }

    pub fn rotation(&self, id: impl Into<ObjectId>) -> Result<Vec3> {
        Ok(self.object(id.into())?.rotation())
    }

    pub fn scale(&self, id: impl Into<ObjectId>) -> Result<Vec3> {
        Ok(self.object(id.into())?.scale())
    }

    // ===== COLORS =====

    /// Replace an object's colors with a freshly uploaded buffer.
    ///
    /// # Errors
    ///
    /// * `Error::UnknownObject` - id not registered
    /// * `Error::Geometry` - colors do not match the vertex count
    /// * `Error::Backend` - allocation failed (object unchanged)
    pub fn set_colors(
        &mut self,
        device: &mut dyn GraphicsDevice,
        id: impl Into<ObjectId>,
        colors: impl Into<ColorInput>,
    ) -> Result<()> {
        let id = id.into();
        let object = self.object_mut(id)?;
        let colors = colors.into().resolve(object.vertex_count())?;
        let buffer = upload_floats(device, object.id(), "colors", &colors)?;
        let previous = object.replace_colors(colors, buffer);
        device.destroy_buffer(previous);
        Ok(())
    }

    // ===== QUERIES =====

    pub fn get(&self, id: impl Into<ObjectId>) -> Option<&SceneObject> {
        self.objects.get(&id.into())
    }

    pub fn contains(&self, id: impl Into<ObjectId>) -> bool {
        self.objects.contains_key(&id.into())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Live ids in registration order
    pub fn ids(&self) -> &[ObjectId] {
        &self.order
    }

    /// Live objects in registration order
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> + '_ {
        self.order.iter().filter_map(|id| self.objects.get(id))
    }

    fn object(&self, id: ObjectId) -> Result<&SceneObject> {
        match self.objects.get(&id) {
            Some(object) => Ok(object),
            None => Err(engine_err!("easy3d::ObjectRegistry", UnknownObject,
                "no object with id {}", id)),
        }
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut SceneObject> {
        match self.objects.get_mut(&id) {
            Some(object) => Ok(object),
            None => Err(engine_err!("easy3d::ObjectRegistry", UnknownObject,
                "no object with id {}", id)),
        }
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ===== BUFFER HELPERS =====

fn upload_floats(
    device: &mut dyn GraphicsDevice,
    id: &ObjectId,
    stream: &str,
    data: &[f32],
) -> Result<BufferHandle> {
    let desc = BufferDesc::attribute(format!("{}/{}", id, stream), data);
    device.create_buffer(&desc, bytemuck::cast_slice(data))
}

/// Upload vertices, normals, colors, then indices. On failure every buffer
/// already created is released before the error is returned.
fn upload_buffers(
    device: &mut dyn GraphicsDevice,
    id: &ObjectId,
    resolved: &ResolvedObject,
) -> Result<ObjectBuffers> {
    let mut allocated: Vec<BufferHandle> = Vec::with_capacity(4);
    match upload_streams(device, id, resolved, &mut allocated) {
        Ok(buffers) => Ok(buffers),
        Err(err) => {
            engine_warn!("easy3d::ObjectRegistry",
                "Object {}: releasing {} buffer(s) after failed allocation", id, allocated.len());
            for buffer in allocated {
                device.destroy_buffer(buffer);
            }
            Err(err)
        }
    }
}

fn upload_streams(
    device: &mut dyn GraphicsDevice,
    id: &ObjectId,
    resolved: &ResolvedObject,
    allocated: &mut Vec<BufferHandle>,
) -> Result<ObjectBuffers> {
    let vertices = upload_floats(device, id, "vertices", &resolved.geometry.vertices)?;
    allocated.push(vertices);
    let normals = upload_floats(device, id, "normals", &resolved.geometry.normals)?;
    allocated.push(normals);
    let colors = upload_floats(device, id, "colors", &resolved.colors)?;
    allocated.push(colors);

    let index_data = &resolved.geometry.indices;
    let desc = BufferDesc::index(format!("{}/indices", id), index_data);
    let indices = device.create_buffer(&desc, bytemuck::cast_slice(index_data))?;
    allocated.push(indices);

    Ok(ObjectBuffers { vertices, normals, colors, indices })
}

fn release_buffers(device: &mut dyn GraphicsDevice, buffers: &ObjectBuffers) {
    for buffer in buffers.handles() {
        device.destroy_buffer(buffer);
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
