/// Framebuffer: a set of render targets bound to attachment slots.
///
/// The framebuffer holds `TargetKey`s, never textures. Dropping it, or
/// detaching a slot, leaves the target and its pixels untouched in the
/// `TargetManager` that owns them.
///
/// The effective size is the per-axis minimum over every attached target,
/// recomputed on each successful attach and on detach. With nothing
/// attached it is 0x0.

use crate::error::Result;
use crate::engine_bail;
use crate::texture::{TargetKey, TargetManager, Texture};
use super::attachment::{AttachmentType, ClearColor, ClearFlags, DEPTH_CLEAR_VALUE};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    attachments: [Option<TargetKey>; AttachmentType::COUNT],
}

impl Framebuffer {
    /// Create a framebuffer with no attachments and a 0x0 size
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `target` to `attachment`, or unbind the slot when `target` is `None`
    ///
    /// The previous target in the slot is only dereferenced. On success the
    /// framebuffer size is recomputed from all attached targets.
    ///
    /// Attachment Type | Texture Format
    /// --------------- | ---------------------
    /// Color           | `Rgba8`, `Srgb8A8`
    /// Depth           | `DepthFloat`
    ///
    /// # Errors
    ///
    /// Nothing is modified when the call fails:
    /// - `InvalidResource` if `target` is not a live key of `targets`
    /// - `InvalidAttachment` if the target's format does not match the slot
    pub fn attach(
        &mut self,
        attachment: AttachmentType,
        target: Option<TargetKey>,
        targets: &TargetManager,
    ) -> Result<()> {
        if let Some(key) = target {
            let Some(texture) = targets.render_target(key) else {
                engine_bail!("penumbra::Framebuffer", InvalidResource,
                    "Render target {:?} does not exist", key);
            };
            if !attachment.accepts(texture.format()) {
                engine_bail!("penumbra::Framebuffer", InvalidAttachment,
                    "{:?} target cannot be bound as {:?} attachment", texture.format(), attachment);
            }
        }

        self.attachments[attachment.index()] = target;
        self.update_size(targets);

        crate::engine_trace!("penumbra::Framebuffer",
            "{:?} slot set to {:?}, size {}x{}", attachment, target, self.width, self.height);
        Ok(())
    }

    /// `attach` for an untyped slot value (0 = color, 1 = depth)
    ///
    /// # Errors
    ///
    /// `InvalidAttachment` for any other slot value, plus the errors of `attach`.
    pub fn attach_raw(
        &mut self,
        slot: u32,
        target: Option<TargetKey>,
        targets: &TargetManager,
    ) -> Result<()> {
        let Ok(attachment) = AttachmentType::try_from(slot) else {
            engine_bail!("penumbra::Framebuffer", InvalidAttachment,
                "Unknown attachment slot {}", slot);
        };
        self.attach(attachment, target, targets)
    }

    /// Unbind a slot, returning the key it held
    pub fn detach(&mut self, attachment: AttachmentType, targets: &TargetManager) -> Option<TargetKey> {
        let previous = self.attachments[attachment.index()].take();
        self.update_size(targets);
        previous
    }

    /// Resolve the target bound to `attachment` in `targets`
    ///
    /// Keys that are dead in `targets`, or that resolve to a format the slot
    /// does not accept (a key from another manager), yield `None`.
    fn resolve<'a>(&self, attachment: AttachmentType, targets: &'a TargetManager) -> Option<&'a Texture> {
        self.attachments[attachment.index()]
            .and_then(|key| targets.render_target(key))
            .filter(|texture| attachment.accepts(texture.format()))
    }

    fn update_size(&mut self, targets: &TargetManager) {
        let mut size: Option<(u32, u32)> = None;
        for texture in AttachmentType::ALL.into_iter().filter_map(|attachment| self.resolve(attachment, targets)) {
            size = Some(match size {
                Some((w, h)) => (w.min(texture.width()), h.min(texture.height())),
                None => (texture.width(), texture.height()),
            });
        }
        (self.width, self.height) = size.unwrap_or((0, 0));
    }

    /// Clear every attached target to its full extent
    ///
    /// Color targets receive `clear_color`, depth targets receive
    /// `DEPTH_CLEAR_VALUE`. Unattached slots, keys no longer alive in
    /// `targets` and keys resolving to a format the slot does not accept
    /// are skipped.
    pub fn clear(&self, targets: &mut TargetManager, clear_color: ClearColor) {
        self.clear_with(ClearFlags::all(), targets, clear_color);
    }

    /// Clear only the slots selected by `flags`
    pub fn clear_with(&self, flags: ClearFlags, targets: &mut TargetManager, clear_color: ClearColor) {
        for attachment in AttachmentType::ALL {
            if !flags.includes(attachment) {
                continue;
            }
            let Some(texture) = self.attachments[attachment.index()]
                .and_then(|key| targets.render_target_mut(key))
                .filter(|texture| attachment.accepts(texture.format()))
            else {
                continue;
            };
            match attachment {
                AttachmentType::Color => texture.fill_color(clear_color.to_vec4()),
                AttachmentType::Depth => texture.fill_depth(DEPTH_CLEAR_VALUE),
            }
        }
    }

    /// Effective width, 0 with no attachments
    ///
    /// Computed from the targets alive at the last `attach` or `detach`.
    /// Removing an attached target from its manager does not shrink or
    /// grow the framebuffer until the next `attach` or `detach`.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Effective height, 0 with no attachments
    ///
    /// Follows the same recompute rule as `width`.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The key bound to `attachment`, exactly as passed to `attach`
    ///
    /// The key is returned even after its target was removed from the
    /// manager. Check liveness with `TargetManager::contains`.
    pub fn attachment(&self, attachment: AttachmentType) -> Option<TargetKey> {
        self.attachments[attachment.index()]
    }

    /// `attachment` for an untyped slot value; `None` for unknown slots
    pub fn attachment_raw(&self, attachment: u32) -> Option<TargetKey> {
        AttachmentType::try_from(attachment)
            .ok()
            .and_then(|attachment| self.attachment(attachment))
    }

    /// Bound slots in slot order
    pub fn attachments(&self) -> impl Iterator<Item = (AttachmentType, TargetKey)> + '_ {
        AttachmentType::ALL
            .into_iter()
            .filter_map(|attachment| self.attachment(attachment).map(|key| (attachment, key)))
    }

    pub fn has_attachments(&self) -> bool {
        self.attachments.iter().any(Option::is_some)
    }
}

#[cfg(test)]
#[path = "framebuffer_tests.rs"]
mod tests;
