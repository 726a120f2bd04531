/// Lighting settings and their validation

use glam::Vec3;
use crate::error::Result;
use crate::engine_bail;

/// Lowest accepted ambient light level
pub const MIN_AMBIENT_LIGHT_LEVEL: f32 = 0.01;
/// Highest accepted ambient light level
pub const MAX_AMBIENT_LIGHT_LEVEL: f32 = 0.99;
/// Ambient light level of a new scene
pub const DEFAULT_AMBIENT_LIGHT_LEVEL: f32 = 0.25;
/// Direction the light comes from in a new scene (normalized on use)
pub const DEFAULT_LIGHT_DIRECTION: Vec3 = Vec3::new(0.74, 0.6, 0.4);

/// Single directional light over an ambient floor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingConfig {
    ambient: f32,
    directional: bool,
    direction: Vec3,
}

impl LightingConfig {
    /// Build a validated configuration
    ///
    /// # Errors
    ///
    /// `Error::Configuration` when `ambient` is not finite or outside
    /// [0.01, 0.99], or `direction` cannot be normalized.
    pub fn new(ambient: f32, directional: bool, direction: Vec3) -> Result<Self> {
        let mut config = Self::default();
        config.set_ambient(ambient)?;
        config.set_direction(direction)?;
        config.directional = directional;
        Ok(config)
    }

    /// Brightness of faces pointing straight away from the light
    pub fn ambient(&self) -> f32 {
        self.ambient
    }

    /// Whether directional shading is applied
    pub fn directional(&self) -> bool {
        self.directional
    }

    /// Normalized light direction
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Set the ambient floor. Leaves the config untouched on error.
    pub fn set_ambient(&mut self, ambient: f32) -> Result<()> {
        if !ambient.is_finite() {
            engine_bail!("easy3d::Lighting", Configuration,
                "ambient light level must be a number, got {}", ambient);
        }
        if !(MIN_AMBIENT_LIGHT_LEVEL..=MAX_AMBIENT_LIGHT_LEVEL).contains(&ambient) {
            engine_bail!("easy3d::Lighting", Configuration,
                "ambient light level {} outside [{}, {}]",
                ambient, MIN_AMBIENT_LIGHT_LEVEL, MAX_AMBIENT_LIGHT_LEVEL);
        }
        self.ambient = ambient;
        Ok(())
    }

    /// Enable or disable directional shading
    pub fn set_directional(&mut self, enable: bool) {
        self.directional = enable;
    }

    /// Set the light direction; stored normalized. Leaves the config untouched on error.
    pub fn set_direction(&mut self, direction: Vec3) -> Result<()> {
        match direction.try_normalize() {
            Some(unit) => {
                self.direction = unit;
                Ok(())
            }
            None => engine_bail!("easy3d::Lighting", Configuration,
                "light direction {} cannot be normalized", direction),
        }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: DEFAULT_AMBIENT_LIGHT_LEVEL,
            directional: true,
            direction: DEFAULT_LIGHT_DIRECTION.normalize(),
        }
    }
}

#[cfg(test)]
#[path = "lighting_config_tests.rs"]
mod tests;
