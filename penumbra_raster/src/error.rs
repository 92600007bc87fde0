//! Error types for the rasterizer core
//!
//! Only cold paths (target creation, attachment) report errors.
//! Shader stages and per-pixel access never do.

use std::fmt;

/// Result type for rasterizer core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Rasterizer core errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Pixel storage could not be reserved
    OutOfMemory,

    /// Invalid resource (zero-sized target, stale key, duplicate name)
    InvalidResource(String),

    /// Unknown attachment slot, or a target format the slot does not accept
    InvalidAttachment(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfMemory => write!(f, "Out of memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InvalidAttachment(msg) => write!(f, "Invalid attachment: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
