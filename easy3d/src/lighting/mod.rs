//! Lighting parameterization
//!
//! Turns the lighting settings into shader source with every lighting
//! constant baked in as a literal. Nothing lighting-related is uploaded per
//! draw; the price is a full compile + link whenever a setting changes.

mod lighting_config;
mod shader_source;

pub use lighting_config::{
    LightingConfig,
    DEFAULT_AMBIENT_LIGHT_LEVEL, DEFAULT_LIGHT_DIRECTION,
    MIN_AMBIENT_LIGHT_LEVEL, MAX_AMBIENT_LIGHT_LEVEL,
};
pub use shader_source::{generate_program_source, LightingTerms};
