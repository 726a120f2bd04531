/// Graphics device module - the backend binding consumed by the scene layer

// Module declarations
pub mod graphics_device;
pub mod buffer;
pub mod program;
pub mod draw_state;

// Headless device that records commands (tests, tooling, CI)
pub mod mock_graphics_device;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use buffer::*;
pub use program::*;
pub use draw_state::*;
