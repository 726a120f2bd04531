//! Error types for the Easy3D scene layer
//!
//! Every failure is reported through the log sink (see `engine_err!`) and
//! returned as an `Error` value. Nothing here panics across component
//! boundaries; callers check results and carry on with the next frame.

use std::fmt;

/// Result type for Easy3D operations
pub type Result<T> = std::result::Result<T, Error>;

/// Easy3D errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid scene, camera or lighting parameters (nothing was changed)
    Configuration(String),

    /// Malformed vertex/index/normal/color arrays (nothing was allocated)
    Geometry(String),

    /// Shape name with no entry in the primitive catalog
    UnknownShape(String),

    /// Shader compile or link failure
    ShaderCompile(String),

    /// Operation referencing an object id that is not registered
    UnknownObject(String),

    /// Backend-specific failure (buffer allocation, etc.)
    Backend(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Error::Geometry(msg) => write!(f, "Geometry error: {}", msg),
            Error::UnknownShape(msg) => write!(f, "Unknown shape: {}", msg),
            Error::ShaderCompile(msg) => write!(f, "Shader compile error: {}", msg),
            Error::UnknownObject(msg) => write!(f, "Unknown object: {}", msg),
            Error::Backend(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an `Error` variant and report it through the log sink.
///
/// # Example
///
/// ```text
/// let err = engine_err!("easy3d::Scene", Geometry, "{} indices", count);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::easy3d::Error::$variant(message)
    }};
}

/// Report an error through the log sink and return it from the current function.
///
/// # Example
///
/// ```text
/// engine_bail!("easy3d::Scene", Configuration, "fov must be positive");
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $variant, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
