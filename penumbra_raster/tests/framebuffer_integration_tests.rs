//! Integration tests for framebuffers and render targets
//!
//! These tests drive the public API the way a renderer does: allocate
//! targets, bind them, clear, and inspect the pixels.
//!
//! Run with: cargo test --test framebuffer_integration_tests

use penumbra_raster::penumbra::render::{
    AttachmentType, ClearColor, Framebuffer, TargetKey, TargetManager, TextureFormat,
};
use penumbra_raster::penumbra::Error;
use penumbra_raster::glam::Vec4;

/// Expected size given the slots currently bound
fn expected_size(tm: &TargetManager, bound: &[Option<TargetKey>; 2]) -> (u32, u32) {
    let mut size: Option<(u32, u32)> = None;
    for key in bound.iter().flatten() {
        let tex = tm.render_target(*key).unwrap();
        size = Some(match size {
            Some((w, h)) => (w.min(tex.width()), h.min(tex.height())),
            None => (tex.width(), tex.height()),
        });
    }
    size.unwrap_or((0, 0))
}

// ============================================================================
// SIZE RECONCILIATION
// ============================================================================

#[test]
fn test_integration_size_tracks_minimum_over_attach_sequence() {
    let mut tm = TargetManager::new();
    let colors: Vec<TargetKey> = [(64, 32), (16, 128), (200, 7), (1, 1)]
        .iter()
        .map(|&(w, h)| tm.create_render_target(TextureFormat::Rgba8, w, h).unwrap())
        .collect();
    let depths: Vec<TargetKey> = [(48, 48), (300, 2), (9, 90)]
        .iter()
        .map(|&(w, h)| tm.create_render_target(TextureFormat::DepthFloat, w, h).unwrap())
        .collect();

    let mut fb = Framebuffer::new();
    let mut bound: [Option<TargetKey>; 2] = [None, None];

    // Deterministic LCG so the sequence is reproducible
    let mut state: u32 = 0x2545_f491;
    for _ in 0..500 {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let pick = (state >> 16) as usize;

        let (slot, index, choices) = if pick % 2 == 0 {
            (AttachmentType::Color, 0, &colors)
        } else {
            (AttachmentType::Depth, 1, &depths)
        };
        let target = match (pick / 2) % (choices.len() + 1) {
            0 => None,
            n => Some(choices[n - 1]),
        };

        fb.attach(slot, target, &tm).unwrap();
        bound[index] = target;

        assert_eq!(fb.size(), expected_size(&tm, &bound));
        assert_eq!(fb.attachment(slot), target);
    }
}

#[test]
fn test_integration_mismatched_formats_never_mutate() {
    let mut tm = TargetManager::new();
    let color = tm.create_render_target(TextureFormat::Srgb8A8, 32, 32).unwrap();
    let depth = tm.create_render_target(TextureFormat::DepthFloat, 16, 16).unwrap();
    let mut fb = Framebuffer::new();
    fb.attach(AttachmentType::Color, Some(color), &tm).unwrap();
    fb.attach(AttachmentType::Depth, Some(depth), &tm).unwrap();

    let before = fb.clone();
    assert!(matches!(
        fb.attach(AttachmentType::Color, Some(depth), &tm),
        Err(Error::InvalidAttachment(_))
    ));
    assert!(matches!(
        fb.attach(AttachmentType::Depth, Some(color), &tm),
        Err(Error::InvalidAttachment(_))
    ));
    assert!(matches!(
        fb.attach_raw(42, None, &tm),
        Err(Error::InvalidAttachment(_))
    ));

    assert_eq!(fb, before);
}

// ============================================================================
// END-TO-END
// ============================================================================

#[test]
fn test_integration_depth_64_color_128() {
    let mut tm = TargetManager::new();
    let depth = tm.create_render_target(TextureFormat::DepthFloat, 64, 64).unwrap();
    let color = tm.create_render_target(TextureFormat::Rgba8, 128, 128).unwrap();

    let mut fb = Framebuffer::new();
    fb.attach(AttachmentType::Depth, Some(depth), &tm).unwrap();
    fb.attach(AttachmentType::Color, Some(color), &tm).unwrap();
    assert_eq!(fb.width(), 64);
    assert_eq!(fb.height(), 64);

    let clear_color = ClearColor::new(0.2, 0.4, 0.6, 1.0);
    fb.clear(&mut tm, clear_color);

    let depth_tex = tm.render_target(fb.attachment(AttachmentType::Depth).unwrap()).unwrap();
    assert!(depth_tex.texels_depth().unwrap().iter().all(|&d| d == 1.0));

    let color_tex = tm.render_target(fb.attachment(AttachmentType::Color).unwrap()).unwrap();
    assert_eq!(color_tex.texels_rgba8().unwrap().len(), 128 * 128);
    for y in 0..128 {
        for x in 0..128 {
            let pixel = color_tex.pixel(x, y).unwrap();
            assert!(pixel.abs_diff_eq(clear_color.to_vec4(), 1.0 / 255.0));
        }
    }
}

#[test]
fn test_integration_clear_while_detached_leaves_target_untouched() {
    let mut tm = TargetManager::new();
    let color = tm.create_render_target(TextureFormat::Rgba8, 8, 8).unwrap();
    let depth = tm.create_render_target(TextureFormat::DepthFloat, 8, 8).unwrap();
    let mut fb = Framebuffer::new();
    fb.attach(AttachmentType::Color, Some(color), &tm).unwrap();
    fb.attach(AttachmentType::Depth, Some(depth), &tm).unwrap();

    fb.clear(&mut tm, ClearColor::new(1.0, 0.0, 0.0, 1.0));
    fb.attach(AttachmentType::Color, None, &tm).unwrap();
    fb.clear(&mut tm, ClearColor::new(0.0, 0.0, 1.0, 1.0));

    let color_tex = tm.render_target(color).unwrap();
    assert!(color_tex.texels_rgba8().unwrap().iter().all(|t| *t == [255, 0, 0, 255]));
    assert_eq!(fb.size(), (8, 8));
}

#[test]
fn test_integration_srgb_target_clears_to_encoded_color() {
    let mut tm = TargetManager::new();
    let color = tm.create_render_target(TextureFormat::Srgb8A8, 4, 4).unwrap();
    let mut fb = Framebuffer::new();
    fb.attach(AttachmentType::Color, Some(color), &tm).unwrap();

    fb.clear(&mut tm, ClearColor::new(0.5, 0.5, 0.5, 0.5));

    let tex = tm.render_target(color).unwrap();
    assert!(tex.texels_rgba8().unwrap().iter().all(|t| *t == [188, 188, 188, 128]));
    assert!(tex.pixel(3, 3).unwrap().abs_diff_eq(Vec4::splat(0.5), 0.01));
}

#[test]
fn test_integration_framebuffers_share_targets() {
    let mut tm = TargetManager::new();
    let shadow_map = tm.create_named_render_target("shadow_map", TextureFormat::DepthFloat, 32, 32).unwrap();
    let debug = tm.create_named_render_target("debug", TextureFormat::Rgba8, 32, 32).unwrap();

    let mut shadow_pass = Framebuffer::new();
    shadow_pass.attach(AttachmentType::Depth, tm.find("shadow_map"), &tm).unwrap();
    let mut debug_pass = Framebuffer::new();
    debug_pass.attach(AttachmentType::Color, Some(debug), &tm).unwrap();
    debug_pass.attach(AttachmentType::Depth, Some(shadow_map), &tm).unwrap();

    drop(debug_pass);
    shadow_pass.clear(&mut tm, ClearColor::default());

    assert_eq!(tm.render_target_count(), 2);
    assert_eq!(tm.render_target(shadow_map).unwrap().depth(31, 31), Some(1.0));
}
