/// Shadow casting program
///
/// Renders a shadow map: geometry is transformed into the light's clip space
/// and only depth is kept. For the algorithm see
/// <https://en.wikipedia.org/wiki/Shadow_mapping>.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use super::shader::ShaderProgram;
use super::shader_context::ShaderContext;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShadowCastingUniform {
    /// Object space to light clip space
    pub local2clip: Mat4,
}

impl ShadowCastingUniform {
    /// Compose `projection * view * model` for one object seen from one light
    pub fn from_light(model: Mat4, light_view: Mat4, light_projection: Mat4) -> Self {
        Self {
            local2clip: light_projection * light_view * model,
        }
    }
}

impl Default for ShadowCastingUniform {
    fn default() -> Self {
        Self { local2clip: Mat4::IDENTITY }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct ShadowCastingVertexAttribute {
    /// Object-space position
    pub position: Vec3,
}

/// Depth-only program used to fill a shadow map
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadowCasting;

impl ShaderProgram for ShadowCasting {
    type Uniform = ShadowCastingUniform;
    type VertexAttribute = ShadowCastingVertexAttribute;

    #[inline]
    fn vertex(
        _output: &mut ShaderContext,
        uniform: &ShadowCastingUniform,
        attribute: &ShadowCastingVertexAttribute,
    ) -> Vec4 {
        uniform.local2clip * attribute.position.extend(1.0)
    }

    // Depth comes from the interpolated clip-space z/w; the color is discarded.
    #[inline]
    fn fragment(_input: &ShaderContext, _uniform: &ShadowCastingUniform) -> Vec4 {
        Vec4::ZERO
    }
}

#[cfg(test)]
#[path = "shadow_casting_tests.rs"]
mod tests;
