/// Tests for ShaderContext
///
/// These tests validate slot access, usage tracking and barycentric
/// interpolation of varyings.

use super::*;

// ============================================================================
// Tests: Slot access
// ============================================================================

#[test]
fn test_new_context_is_empty() {
    let ctx = ShaderContext::new();
    assert!(ctx.is_empty());
    assert_eq!(ctx.floats().used().count(), 0);
}

#[test]
fn test_write_then_read_each_kind() {
    let mut ctx = ShaderContext::new();
    *ctx.float_mut(0).unwrap() = 0.5;
    *ctx.vec2_mut(1).unwrap() = Vec2::new(1.0, 2.0);
    *ctx.vec3_mut(2).unwrap() = Vec3::new(1.0, 2.0, 3.0);
    *ctx.vec4_mut(7).unwrap() = Vec4::ONE;

    assert_eq!(ctx.float(0), Some(0.5));
    assert_eq!(ctx.vec2(1), Some(Vec2::new(1.0, 2.0)));
    assert_eq!(ctx.vec3(2), Some(Vec3::new(1.0, 2.0, 3.0)));
    assert_eq!(ctx.vec4(7), Some(Vec4::ONE));
    assert!(!ctx.is_empty());
}

#[test]
fn test_out_of_range_slot() {
    let mut ctx = ShaderContext::new();
    assert!(ctx.float_mut(MAX_VARYINGS).is_none());
    assert!(ctx.vec4(MAX_VARYINGS).is_none());
    assert!(ctx.is_empty());
}

#[test]
fn test_usage_tracking() {
    let mut ctx = ShaderContext::new();
    ctx.vec3_mut(5);
    ctx.vec3_mut(1);
    ctx.vec3_mut(5);

    let used: Vec<usize> = ctx.vec3s().used().collect();
    assert_eq!(used, vec![1, 5]);
    assert_eq!(ctx.vec3s().used_count(), 2);
    assert!(ctx.vec3s().is_used(5));
    assert!(!ctx.vec3s().is_used(0));
    assert!(!ctx.vec3s().is_used(MAX_VARYINGS));
}

#[test]
fn test_reset_clears_usage() {
    let mut ctx = ShaderContext::new();
    *ctx.float_mut(3).unwrap() = 1.0;
    *ctx.vec4_mut(0).unwrap() = Vec4::ONE;

    ctx.reset();

    assert!(ctx.is_empty());
}

// ============================================================================
// Tests: Interpolation
// ============================================================================

#[test]
fn test_interpolate_blends_used_slots() {
    let mut a = ShaderContext::new();
    let mut b = ShaderContext::new();
    let mut c = ShaderContext::new();
    *a.float_mut(0).unwrap() = 0.0;
    *b.float_mut(0).unwrap() = 1.0;
    *c.float_mut(0).unwrap() = 2.0;
    *a.vec3_mut(2).unwrap() = Vec3::X;
    *b.vec3_mut(2).unwrap() = Vec3::Y;
    *c.vec3_mut(2).unwrap() = Vec3::Z;

    let out = ShaderContext::interpolate([&a, &b, &c], Vec3::new(0.25, 0.25, 0.5));

    assert_eq!(out.float(0), Some(1.25));
    assert_eq!(out.vec3(2), Some(Vec3::new(0.25, 0.25, 0.5)));
    assert!(out.floats().is_used(0));
    assert!(out.vec3s().is_used(2));
    assert_eq!(out.vec2s().used_count(), 0);
}

#[test]
fn test_interpolate_at_vertex_returns_vertex_values() {
    let mut a = ShaderContext::new();
    let mut b = ShaderContext::new();
    let c = ShaderContext::new();
    *a.vec4_mut(1).unwrap() = Vec4::new(1.0, 2.0, 3.0, 4.0);
    *b.vec4_mut(1).unwrap() = Vec4::ZERO;

    let out = ShaderContext::interpolate([&a, &b, &c], Vec3::X);
    assert_eq!(out.vec4(1), Some(Vec4::new(1.0, 2.0, 3.0, 4.0)));
}

#[test]
fn test_interpolate_empty_contexts() {
    let ctx = ShaderContext::new();
    let out = ShaderContext::interpolate([&ctx, &ctx, &ctx], Vec3::splat(1.0 / 3.0));
    assert!(out.is_empty());
}
