//! Render target module
//!
//! Fixed-format pixel stores and the manager that owns them.

mod texture;
mod target_manager;

pub use texture::{Texture, TextureFormat, TextureInfo, encode_color, decode_color};
pub use target_manager::{TargetKey, TargetManager};
