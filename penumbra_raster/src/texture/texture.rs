/// Texture: a fixed-format, fixed-size 2D pixel store used as a render target.
///
/// Color formats store four 8-bit channels per pixel, depth stores one f32.
/// Pixels are row-major, origin at the top-left, and every write through this
/// API takes linear floating-point values (sRGB encoding happens on store).

use glam::Vec4;
use crate::error::{Error, Result};
use crate::engine_bail;

/// Pixel format of a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// Four 8-bit linear channels
    Rgba8,
    /// Four 8-bit channels, RGB sRGB-encoded, alpha linear
    Srgb8A8,
    /// One 32-bit float channel
    DepthFloat,
}

impl TextureFormat {
    pub fn is_color(self) -> bool {
        matches!(self, TextureFormat::Rgba8 | TextureFormat::Srgb8A8)
    }

    pub fn is_depth(self) -> bool {
        matches!(self, TextureFormat::DepthFloat)
    }

    /// Size of one pixel in bytes
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Rgba8 | TextureFormat::Srgb8A8 => 4,
            TextureFormat::DepthFloat => std::mem::size_of::<f32>(),
        }
    }
}

/// Read-only properties of a created texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

impl TextureInfo {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[derive(Debug, Clone)]
enum Texels {
    Color(Vec<[u8; 4]>),
    Depth(Vec<f32>),
}

/// A 2D pixel store with a fixed format and extent
#[derive(Debug, Clone)]
pub struct Texture {
    info: TextureInfo,
    texels: Texels,
}

impl Texture {
    /// Allocate a zero-initialized texture
    ///
    /// # Errors
    ///
    /// - `InvalidResource` if either dimension is 0
    /// - `OutOfMemory` if the pixel storage cannot be reserved
    pub fn new(format: TextureFormat, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            engine_bail!("penumbra::Texture", InvalidResource,
                "Texture extent {}x{} is empty", width, height);
        }

        let info = TextureInfo { width, height, format };
        let count = info.pixel_count();
        let texels = if format.is_depth() {
            Texels::Depth(zeroed(count, 0.0)?)
        } else {
            Texels::Color(zeroed(count, [0; 4])?)
        };

        Ok(Self { info, texels })
    }

    pub fn info(&self) -> TextureInfo {
        self.info
    }

    pub fn width(&self) -> u32 {
        self.info.width
    }

    pub fn height(&self) -> u32 {
        self.info.height
    }

    pub fn format(&self) -> TextureFormat {
        self.info.format
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.info.width && y < self.info.height {
            Some(y as usize * self.info.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Write a linear color to one pixel
    ///
    /// Channels are clamped to [0,1]. Depth textures store the red channel.
    /// Writes outside the extent are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Vec4) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        match &mut self.texels {
            Texels::Color(texels) => texels[index] = encode_color(self.info.format, color),
            Texels::Depth(texels) => texels[index] = color.x,
        }
    }

    /// Read one pixel back as a linear color
    ///
    /// Depth textures return `(depth, 0, 0, 1)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Vec4> {
        let index = self.index(x, y)?;
        Some(match &self.texels {
            Texels::Color(texels) => decode_color(self.info.format, texels[index]),
            Texels::Depth(texels) => Vec4::new(texels[index], 0.0, 0.0, 1.0),
        })
    }

    /// Write one depth value. Ignored on color textures and outside the extent.
    #[inline]
    pub fn set_depth(&mut self, x: u32, y: u32, depth: f32) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        if let Texels::Depth(texels) = &mut self.texels {
            texels[index] = depth;
        }
    }

    /// Read one depth value, `None` on color textures or outside the extent
    #[inline]
    pub fn depth(&self, x: u32, y: u32) -> Option<f32> {
        let index = self.index(x, y)?;
        match &self.texels {
            Texels::Depth(texels) => Some(texels[index]),
            Texels::Color(_) => None,
        }
    }

    /// Write `color` to every pixel of the full extent. No-op on depth textures.
    pub fn fill_color(&mut self, color: Vec4) {
        if let Texels::Color(texels) = &mut self.texels {
            texels.fill(encode_color(self.info.format, color));
        }
    }

    /// Write `depth` to every pixel of the full extent. No-op on color textures.
    pub fn fill_depth(&mut self, depth: f32) {
        if let Texels::Depth(texels) = &mut self.texels {
            texels.fill(depth);
        }
    }

    /// Raw encoded color pixels, `None` for depth textures
    pub fn texels_rgba8(&self) -> Option<&[[u8; 4]]> {
        match &self.texels {
            Texels::Color(texels) => Some(texels),
            Texels::Depth(_) => None,
        }
    }

    /// Raw depth pixels, `None` for color textures
    pub fn texels_depth(&self) -> Option<&[f32]> {
        match &self.texels {
            Texels::Depth(texels) => Some(texels),
            Texels::Color(_) => None,
        }
    }
}

fn zeroed<T: Copy>(count: usize, value: T) -> Result<Vec<T>> {
    let mut texels = Vec::new();
    if texels.try_reserve_exact(count).is_err() {
        crate::engine_error!("penumbra::Texture",
            "Failed to reserve storage for {} pixels", count);
        return Err(Error::OutOfMemory);
    }
    texels.resize(count, value);
    Ok(texels)
}

// ===== COLOR ENCODING =====

#[inline]
fn unorm8(value: f32) -> u8 {
    // NaN casts to 0
    (value.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

#[inline]
fn linear_to_srgb(value: f32) -> f32 {
    let value = value.clamp(0.0, 1.0);
    if value <= 0.003_130_8 {
        value * 12.92
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
fn srgb_to_linear(value: f32) -> f32 {
    if value <= 0.040_45 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode a linear color into the 8-bit layout of `format`
pub fn encode_color(format: TextureFormat, color: Vec4) -> [u8; 4] {
    match format {
        TextureFormat::Srgb8A8 => [
            unorm8(linear_to_srgb(color.x)),
            unorm8(linear_to_srgb(color.y)),
            unorm8(linear_to_srgb(color.z)),
            unorm8(color.w),
        ],
        _ => [unorm8(color.x), unorm8(color.y), unorm8(color.z), unorm8(color.w)],
    }
}

/// Decode an 8-bit pixel of `format` back to a linear color
pub fn decode_color(format: TextureFormat, texel: [u8; 4]) -> Vec4 {
    let [r, g, b, a] = texel.map(|c| c as f32 / 255.0);
    match format {
        TextureFormat::Srgb8A8 => Vec4::new(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a),
        _ => Vec4::new(r, g, b, a),
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
