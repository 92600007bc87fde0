/*!
# Penumbra Raster

Framebuffer and shader-stage core of a software rasterizer.

This crate owns the pieces a triangle rasterizer builds on: typed render
targets, a framebuffer that binds them to attachment slots and reconciles
their sizes, and the shader-stage contract a program must satisfy to run
in the pipeline. Triangle setup, clipping and traversal live elsewhere.

## Architecture

- **Texture / TargetManager**: fixed-format pixel stores, addressed by `TargetKey`
- **Framebuffer**: non-owning color/depth attachments, clear and size queries
- **Engine**: process-wide clear-color register and logger
- **ShaderProgram**: vertex/fragment stage pair with typed uniforms and attributes
- **ShadowCasting**: depth-only program that renders shadow maps
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod texture;
pub mod framebuffer;
pub mod shader;

// Main penumbra namespace module
pub mod penumbra {
    // Error types
    pub use crate::error::{Error, Result};

    // Process-wide state
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Render targets and framebuffers
    pub mod render {
        pub use crate::texture::*;
        pub use crate::framebuffer::*;
    }

    // Shader stages
    pub mod shader {
        pub use crate::shader::*;
    }
}

// Re-export math library at crate root
pub use glam;
