/// Varying storage shared by one vertex/fragment invocation pair.
///
/// The vertex stage writes varyings by slot index; the rasterizer blends the
/// written slots of a primitive's three vertices and hands the result to the
/// fragment stage, which reads the same indices back. Slots that were never
/// written are not interpolated.

use std::ops::{Add, Mul};
use glam::{Vec2, Vec3, Vec4};

/// Slots available per varying kind
pub const MAX_VARYINGS: usize = 8;

// Usage is tracked in a u8 mask
const _: () = assert!(MAX_VARYINGS <= u8::BITS as usize);

/// Fixed-capacity slots of one varying kind
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Varyings<T> {
    values: [T; MAX_VARYINGS],
    used: u8,
}

impl<T: Copy> Varyings<T> {
    /// Value of slot `index`, `None` past `MAX_VARYINGS`
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.values.get(index).copied()
    }

    /// Writable slot `index`, marked as used; `None` past `MAX_VARYINGS`
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let value = self.values.get_mut(index)?;
        self.used |= 1 << index;
        Some(value)
    }

    #[inline]
    pub fn is_used(&self, index: usize) -> bool {
        index < MAX_VARYINGS && self.used & (1 << index) != 0
    }

    /// Indices of written slots, ascending
    pub fn used(&self) -> impl Iterator<Item = usize> + '_ {
        (0..MAX_VARYINGS).filter(move |&index| self.is_used(index))
    }

    pub fn used_count(&self) -> usize {
        self.used.count_ones() as usize
    }

    fn reset(&mut self) {
        self.used = 0;
    }
}

impl<T> Varyings<T>
where
    T: Copy + Default + Add<Output = T> + Mul<f32, Output = T>,
{
    /// Weighted sum of the slots used by `corners[0]`
    fn blend(corners: [&Self; 3], weights: Vec3) -> Self {
        let mut out = Self::default();
        for index in corners[0].used() {
            out.values[index] = corners[0].values[index] * weights.x
                + corners[1].values[index] * weights.y
                + corners[2].values[index] * weights.z;
            out.used |= 1 << index;
        }
        out
    }
}

/// Per-invocation varyings, grouped by kind
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShaderContext {
    floats: Varyings<f32>,
    vec2s: Varyings<Vec2>,
    vec3s: Varyings<Vec3>,
    vec4s: Varyings<Vec4>,
}

impl ShaderContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn float(&self, index: usize) -> Option<f32> {
        self.floats.get(index)
    }

    #[inline]
    pub fn float_mut(&mut self, index: usize) -> Option<&mut f32> {
        self.floats.get_mut(index)
    }

    #[inline]
    pub fn vec2(&self, index: usize) -> Option<Vec2> {
        self.vec2s.get(index)
    }

    #[inline]
    pub fn vec2_mut(&mut self, index: usize) -> Option<&mut Vec2> {
        self.vec2s.get_mut(index)
    }

    #[inline]
    pub fn vec3(&self, index: usize) -> Option<Vec3> {
        self.vec3s.get(index)
    }

    #[inline]
    pub fn vec3_mut(&mut self, index: usize) -> Option<&mut Vec3> {
        self.vec3s.get_mut(index)
    }

    #[inline]
    pub fn vec4(&self, index: usize) -> Option<Vec4> {
        self.vec4s.get(index)
    }

    #[inline]
    pub fn vec4_mut(&mut self, index: usize) -> Option<&mut Vec4> {
        self.vec4s.get_mut(index)
    }

    pub fn floats(&self) -> &Varyings<f32> {
        &self.floats
    }

    pub fn vec2s(&self) -> &Varyings<Vec2> {
        &self.vec2s
    }

    pub fn vec3s(&self) -> &Varyings<Vec3> {
        &self.vec3s
    }

    pub fn vec4s(&self) -> &Varyings<Vec4> {
        &self.vec4s
    }

    /// True when no slot of any kind has been written
    pub fn is_empty(&self) -> bool {
        self.floats.used_count() == 0
            && self.vec2s.used_count() == 0
            && self.vec3s.used_count() == 0
            && self.vec4s.used_count() == 0
    }

    /// Forget which slots were written, for reuse by the next invocation
    pub fn reset(&mut self) {
        self.floats.reset();
        self.vec2s.reset();
        self.vec3s.reset();
        self.vec4s.reset();
    }

    /// Blend the varyings of a triangle's three vertices
    ///
    /// `weights` are barycentric weights for `corners`, already perspective
    /// corrected by the caller. Only slots written in `corners[0]` are
    /// blended; every vertex of a primitive runs the same vertex stage, so
    /// all three share one layout.
    pub fn interpolate(corners: [&ShaderContext; 3], weights: Vec3) -> ShaderContext {
        ShaderContext {
            floats: Varyings::blend(corners.map(|c| &c.floats), weights),
            vec2s: Varyings::blend(corners.map(|c| &c.vec2s), weights),
            vec3s: Varyings::blend(corners.map(|c| &c.vec3s), weights),
            vec4s: Varyings::blend(corners.map(|c| &c.vec4s), weights),
        }
    }
}

#[cfg(test)]
#[path = "shader_context_tests.rs"]
mod tests;
