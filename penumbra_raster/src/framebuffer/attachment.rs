/// Attachment slots, clear values and clear flags

use bitflags::bitflags;
use glam::Vec4;
use crate::error::{Error, Result};
use crate::texture::TextureFormat;

/// Depth written to every pixel of a depth attachment on clear (far plane)
pub const DEPTH_CLEAR_VALUE: f32 = 1.0;

/// Role a render target plays within a framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentType {
    Color = 0,
    Depth = 1,
}

impl AttachmentType {
    /// Number of attachment slots in a framebuffer
    pub const COUNT: usize = 2;

    pub const ALL: [AttachmentType; Self::COUNT] = [AttachmentType::Color, AttachmentType::Depth];

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Whether a target of `format` may be bound to this slot
    ///
    /// Attachment | Texture Format
    /// ---------- | ---------------------
    /// Color      | `Rgba8`, `Srgb8A8`
    /// Depth      | `DepthFloat`
    pub fn accepts(self, format: TextureFormat) -> bool {
        match self {
            AttachmentType::Color => matches!(format, TextureFormat::Rgba8 | TextureFormat::Srgb8A8),
            AttachmentType::Depth => matches!(format, TextureFormat::DepthFloat),
        }
    }
}

impl TryFrom<u32> for AttachmentType {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(AttachmentType::Color),
            1 => Ok(AttachmentType::Depth),
            other => Err(Error::InvalidAttachment(format!("Unknown attachment slot {}", other))),
        }
    }
}

/// Linear RGBA clear value, every channel within [0,1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClearColor {
    red: f32,
    green: f32,
    blue: f32,
    alpha: f32,
}

#[inline]
fn unit(value: f32) -> f32 {
    // f32::clamp passes NaN through
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

impl ClearColor {
    /// All channels zero
    pub const TRANSPARENT: ClearColor = ClearColor { red: 0.0, green: 0.0, blue: 0.0, alpha: 0.0 };

    /// Build a clear color, clamping each channel to [0,1]
    pub fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red: unit(red),
            green: unit(green),
            blue: unit(blue),
            alpha: unit(alpha),
        }
    }

    pub fn red(&self) -> f32 {
        self.red
    }

    pub fn green(&self) -> f32 {
        self.green
    }

    pub fn blue(&self) -> f32 {
        self.blue
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.red, self.green, self.blue, self.alpha)
    }
}

impl From<Vec4> for ClearColor {
    fn from(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

bitflags! {
    /// Which attachment slots a clear touches
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u8 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
    }
}

impl ClearFlags {
    pub fn includes(self, attachment: AttachmentType) -> bool {
        match attachment {
            AttachmentType::Color => self.contains(ClearFlags::COLOR),
            AttachmentType::Depth => self.contains(ClearFlags::DEPTH),
        }
    }
}

#[cfg(test)]
#[path = "attachment_tests.rs"]
mod tests;
