/// Mock graphics device (no GPU required)
///
/// Records every command and keeps buffers/programs in slot maps so stale
/// handles are detected. State lives behind a shared `MockProbe`, which the
/// caller keeps after handing the device to a `Scene`.

use std::sync::{Arc, Mutex, MutexGuard};
use slotmap::SlotMap;
use crate::error::Result;
use crate::engine_bail;
use crate::graphics_device::{
    GraphicsDevice, BufferDesc, BufferHandle, BufferUsage, ProgramSource, ProgramHandle,
    VertexAttribute, Uniform, DrawState, ClearFlags, Viewport,
};

// ============================================================================
// Recorded commands
// ============================================================================

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum MockCommand {
    CreateBuffer { buffer: BufferHandle, usage: BufferUsage, size: u64 },
    DestroyBuffer(BufferHandle),
    CreateProgram(ProgramHandle),
    DestroyProgram(ProgramHandle),
    UseProgram(ProgramHandle),
    BindVertexAttribute { attribute: VertexAttribute, buffer: BufferHandle, components: u32 },
    BindIndexBuffer(BufferHandle),
    SetUniformMatrix { uniform: Uniform, matrix: [f32; 16] },
    DrawIndexed { index_count: u32 },
    ApplyDrawState(DrawState),
    SetViewport(Viewport),
    Clear { flags: ClearFlags, color: [f32; 4], depth: f32 },
}

/// Snapshot of the bound state at the time of a draw
#[derive(Debug, Clone, PartialEq)]
pub struct MockDrawCall {
    pub program: ProgramHandle,
    pub position_buffer: Option<BufferHandle>,
    pub index_buffer: Option<BufferHandle>,
    pub index_count: u32,
    pub model: [f32; 16],
    pub view: [f32; 16],
    pub projection: [f32; 16],
}

impl MockDrawCall {
    /// Translation column of the model matrix
    pub fn model_translation(&self) -> [f32; 3] {
        [self.model[12], self.model[13], self.model[14]]
    }
}

#[derive(Debug)]
struct MockBuffer {
    desc: BufferDesc,
    data: Vec<u8>,
}

#[derive(Debug, Default)]
struct BoundState {
    program: Option<ProgramHandle>,
    position_buffer: Option<BufferHandle>,
    index_buffer: Option<BufferHandle>,
    model: [f32; 16],
    view: [f32; 16],
    projection: [f32; 16],
}

#[derive(Debug, Default)]
struct MockState {
    buffers: SlotMap<BufferHandle, MockBuffer>,
    programs: SlotMap<ProgramHandle, ProgramSource>,
    commands: Vec<MockCommand>,
    draws: Vec<MockDrawCall>,
    bound: BoundState,
    buffers_created: usize,
    destroyed_buffers: Vec<BufferHandle>,
    programs_created: usize,
    programs_destroyed: usize,
    reject_programs: bool,
    buffer_budget: Option<usize>,
}

// ============================================================================
// Probe
// ============================================================================

/// Shared view into a `MockGraphicsDevice`
#[derive(Debug, Clone)]
pub struct MockProbe {
    state: Arc<Mutex<MockState>>,
}

impl MockProbe {
    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// All recorded commands, oldest first
    pub fn commands(&self) -> Vec<MockCommand> {
        self.lock().commands.clone()
    }

    /// Forget recorded commands and draws (counters are kept)
    pub fn clear_commands(&self) {
        let mut state = self.lock();
        state.commands.clear();
        state.draws.clear();
    }

    /// Draw calls recorded since the last `clear_commands`
    pub fn draw_calls(&self) -> Vec<MockDrawCall> {
        self.lock().draws.clone()
    }

    /// Number of draw calls recorded since the last `clear_commands`
    pub fn draw_count(&self) -> usize {
        self.lock().draws.len()
    }

    /// Buffers currently alive on the device
    pub fn live_buffer_count(&self) -> usize {
        self.lock().buffers.len()
    }

    /// Total buffers ever created
    pub fn buffers_created(&self) -> usize {
        self.lock().buffers_created
    }

    /// Handles passed to `destroy_buffer`, in call order
    pub fn destroyed_buffers(&self) -> Vec<BufferHandle> {
        self.lock().destroyed_buffers.clone()
    }

    /// Whether a buffer handle is still alive
    pub fn is_buffer_alive(&self, buffer: BufferHandle) -> bool {
        self.lock().buffers.contains_key(buffer)
    }

    /// Uploaded contents of a live buffer
    pub fn buffer_data(&self, buffer: BufferHandle) -> Option<Vec<u8>> {
        self.lock().buffers.get(buffer).map(|b| b.data.clone())
    }

    /// Uploaded contents of a live float buffer
    pub fn buffer_floats(&self, buffer: BufferHandle) -> Option<Vec<f32>> {
        self.buffer_data(buffer).map(|bytes| {
            bytes
                .chunks_exact(4)
                .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                .collect()
        })
    }

    /// Label of a live buffer
    pub fn buffer_label(&self, buffer: BufferHandle) -> Option<String> {
        self.lock().buffers.get(buffer).map(|b| b.desc.label.clone())
    }

    /// Total successful `create_program` calls
    pub fn programs_created(&self) -> usize {
        self.lock().programs_created
    }

    /// Total `destroy_program` calls
    pub fn programs_destroyed(&self) -> usize {
        self.lock().programs_destroyed
    }

    /// Programs currently alive on the device
    pub fn live_program_count(&self) -> usize {
        self.lock().programs.len()
    }

    /// Source of a live program
    pub fn program_source(&self, program: ProgramHandle) -> Option<ProgramSource> {
        self.lock().programs.get(program).cloned()
    }

    /// Make every following `create_program` call fail (or succeed again)
    pub fn set_reject_programs(&self, reject: bool) {
        self.lock().reject_programs = reject;
    }

    /// Allow only `count` more buffer allocations (None = unlimited)
    pub fn set_buffer_budget(&self, count: Option<usize>) {
        self.lock().buffer_budget = count;
    }
}

// ============================================================================
// Mock device
// ============================================================================

/// Headless graphics device that records commands instead of drawing
#[derive(Debug)]
pub struct MockGraphicsDevice {
    state: Arc<Mutex<MockState>>,
}

impl MockGraphicsDevice {
    /// Create a new mock device
    pub fn new() -> Self {
        Self { state: Arc::new(Mutex::new(MockState::default())) }
    }

    /// Create a mock device together with a probe into it
    pub fn with_probe() -> (Self, MockProbe) {
        let device = Self::new();
        let probe = device.probe();
        (device, probe)
    }

    /// Shared view into this device's state
    pub fn probe(&self) -> MockProbe {
        MockProbe { state: Arc::clone(&self.state) }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: &BufferDesc, data: &[u8]) -> Result<BufferHandle> {
        let mut state = self.lock();
        if let Some(budget) = state.buffer_budget.as_mut() {
            if *budget == 0 {
                engine_bail!("easy3d::mock", Backend,
                    "create_buffer '{}': out of memory", desc.label);
            }
            *budget -= 1;
        }
        if data.len() as u64 != desc.size {
            engine_bail!("easy3d::mock", Backend,
                "create_buffer '{}': {} bytes supplied for a {} byte buffer",
                desc.label, data.len(), desc.size);
        }
        let buffer = state.buffers.insert(MockBuffer { desc: desc.clone(), data: data.to_vec() });
        state.buffers_created += 1;
        state.commands.push(MockCommand::CreateBuffer { buffer, usage: desc.usage, size: desc.size });
        Ok(buffer)
    }

    fn destroy_buffer(&mut self, buffer: BufferHandle) {
        let mut state = self.lock();
        state.buffers.remove(buffer);
        state.destroyed_buffers.push(buffer);
        state.commands.push(MockCommand::DestroyBuffer(buffer));
    }

    fn create_program(&mut self, source: &ProgramSource) -> Result<ProgramHandle> {
        let mut state = self.lock();
        if state.reject_programs {
            engine_bail!("easy3d::mock", ShaderCompile, "link failed: program rejected");
        }
        let program = state.programs.insert(source.clone());
        state.programs_created += 1;
        state.commands.push(MockCommand::CreateProgram(program));
        Ok(program)
    }

    fn destroy_program(&mut self, program: ProgramHandle) {
        let mut state = self.lock();
        state.programs.remove(program);
        state.programs_destroyed += 1;
        if state.bound.program == Some(program) {
            state.bound.program = None;
        }
        state.commands.push(MockCommand::DestroyProgram(program));
    }

    fn use_program(&mut self, program: ProgramHandle) -> Result<()> {
        let mut state = self.lock();
        if !state.programs.contains_key(program) {
            engine_bail!("easy3d::mock", Backend, "use_program: stale program handle");
        }
        state.bound.program = Some(program);
        state.commands.push(MockCommand::UseProgram(program));
        Ok(())
    }

    fn bind_vertex_attribute(
        &mut self,
        attribute: VertexAttribute,
        buffer: BufferHandle,
        components: u32,
    ) -> Result<()> {
        let mut state = self.lock();
        match state.buffers.get(buffer) {
            Some(b) if b.desc.usage == BufferUsage::Attribute => {}
            Some(_) => engine_bail!("easy3d::mock", Backend,
                "bind_vertex_attribute({}): not an attribute buffer", attribute.name()),
            None => engine_bail!("easy3d::mock", Backend,
                "bind_vertex_attribute({}): stale buffer handle", attribute.name()),
        }
        if attribute == VertexAttribute::Position {
            state.bound.position_buffer = Some(buffer);
        }
        state.commands.push(MockCommand::BindVertexAttribute { attribute, buffer, components });
        Ok(())
    }

    fn bind_index_buffer(&mut self, buffer: BufferHandle) -> Result<()> {
        let mut state = self.lock();
        match state.buffers.get(buffer) {
            Some(b) if b.desc.usage == BufferUsage::Index => {}
            Some(_) => engine_bail!("easy3d::mock", Backend,
                "bind_index_buffer: not an index buffer"),
            None => engine_bail!("easy3d::mock", Backend,
                "bind_index_buffer: stale buffer handle"),
        }
        state.bound.index_buffer = Some(buffer);
        state.commands.push(MockCommand::BindIndexBuffer(buffer));
        Ok(())
    }

    fn set_uniform_matrix(&mut self, uniform: Uniform, matrix: &[f32; 16]) -> Result<()> {
        let mut state = self.lock();
        if state.bound.program.is_none() {
            engine_bail!("easy3d::mock", Backend,
                "set_uniform_matrix({}): no program in use", uniform.name());
        }
        match uniform {
            Uniform::Projection => state.bound.projection = *matrix,
            Uniform::View => state.bound.view = *matrix,
            Uniform::Object => state.bound.model = *matrix,
        }
        state.commands.push(MockCommand::SetUniformMatrix { uniform, matrix: *matrix });
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32) -> Result<()> {
        let mut state = self.lock();
        let Some(program) = state.bound.program else {
            engine_bail!("easy3d::mock", Backend, "draw_indexed: no program in use");
        };
        let draw = MockDrawCall {
            program,
            position_buffer: state.bound.position_buffer,
            index_buffer: state.bound.index_buffer,
            index_count,
            model: state.bound.model,
            view: state.bound.view,
            projection: state.bound.projection,
        };
        state.draws.push(draw);
        state.commands.push(MockCommand::DrawIndexed { index_count });
        Ok(())
    }

    fn apply_draw_state(&mut self, draw_state: &DrawState) {
        self.lock().commands.push(MockCommand::ApplyDrawState(*draw_state));
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.lock().commands.push(MockCommand::SetViewport(viewport));
    }

    fn clear(&mut self, flags: ClearFlags, color: [f32; 4], depth: f32) {
        self.lock().commands.push(MockCommand::Clear { flags, color, depth });
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
