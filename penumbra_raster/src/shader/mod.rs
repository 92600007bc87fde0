//! Shader module
//!
//! The stage contract every program implements, the varying storage passed
//! between stages, and the built-in programs.

mod shader;
mod shader_context;
mod shadow_casting;

pub use shader::{ShaderProgram, VertexOutput};
pub use shader_context::{ShaderContext, Varyings, MAX_VARYINGS};
pub use shadow_casting::{ShadowCasting, ShadowCastingUniform, ShadowCastingVertexAttribute};
