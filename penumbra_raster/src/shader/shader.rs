/// Shader stage contract.
///
/// A program is a pair of pure functions. The vertex stage maps one vertex
/// attribute to a clip-space position and may write varyings; the fragment
/// stage reads the interpolated varyings and produces a color. Uniform and
/// attribute layouts are associated types, so the rasterizer drives any
/// program without knowing its inputs.
///
/// Stages run once per vertex or covered pixel. They do not validate their
/// inputs and do not report errors.

use glam::Vec4;
use super::shader_context::ShaderContext;

/// Result of one vertex stage invocation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VertexOutput {
    /// Position before perspective division
    pub clip_position: Vec4,
    /// Varyings written by the stage
    pub context: ShaderContext,
}

/// Vertex/fragment stage pair
pub trait ShaderProgram {
    /// Per-draw constants, immutable for the whole draw call
    type Uniform;
    /// Per-vertex input
    type VertexAttribute;

    /// Transform one vertex to clip space, writing varyings into `output`
    fn vertex(
        output: &mut ShaderContext,
        uniform: &Self::Uniform,
        attribute: &Self::VertexAttribute,
    ) -> Vec4;

    /// Shade one fragment from its interpolated varyings
    fn fragment(input: &ShaderContext, uniform: &Self::Uniform) -> Vec4;

    /// Run the vertex stage with a fresh context
    fn shade_vertex(uniform: &Self::Uniform, attribute: &Self::VertexAttribute) -> VertexOutput {
        let mut context = ShaderContext::new();
        let clip_position = Self::vertex(&mut context, uniform, attribute);
        VertexOutput { clip_position, context }
    }
}
