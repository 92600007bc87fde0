//! Framebuffer module
//!
//! Attachment slots, clear values and the framebuffer that binds render
//! targets together for a pass.

mod attachment;
mod framebuffer;

pub use attachment::{AttachmentType, ClearColor, ClearFlags, DEPTH_CLEAR_VALUE};
pub use framebuffer::Framebuffer;
