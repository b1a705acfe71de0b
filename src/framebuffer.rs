use crate::deferred_drop::Drc;
use crate::{
    DeviceContext, Extents2D, Format, GfxResult, RenderPass, ResourceType, ResourceUsage,
    SampleCount, Texture,
};

/// One texture subresource attached to a framebuffer slot.
pub struct FramebufferAttachmentDef<'a> {
    pub texture: &'a Texture,
    pub mip_level: u32,
    pub array_slice: Option<u32>,
}

/// Used to create a `Framebuffer`
pub struct FramebufferDef<'a> {
    pub render_pass: &'a RenderPass,
    pub color_attachments: &'a [FramebufferAttachmentDef<'a>],
    pub depth_stencil_attachment: Option<FramebufferAttachmentDef<'a>>,
}

/// Why a framebuffer failed its completeness check. Incompleteness is
/// logged at creation but does not fail it; rendering into an incomplete
/// framebuffer is dropped at replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FramebufferCompleteness {
    MissingAttachment,
    AttachmentCountMismatch,
    FormatMismatch,
    SampleCountMismatch,
    NotRenderable,
}

#[derive(Clone)]
pub(crate) struct FramebufferAttachment {
    pub(crate) texture: Texture,
    pub(crate) mip_level: u32,
    pub(crate) array_slice: Option<u32>,
}

pub(crate) struct FramebufferInner {
    render_pass: RenderPass,
    pub(crate) color_attachments: Vec<FramebufferAttachment>,
    pub(crate) depth_stencil_attachment: Option<FramebufferAttachment>,
    extents: Extents2D,
    incompleteness: Vec<FramebufferCompleteness>,
}

/// Binds concrete texture subresources to the slots of a render pass.
/// Holds a reference on every attached texture. The renderable area is the
/// intersection of all attachment extents; differing sizes are never
/// upsampled.
#[derive(Clone)]
pub struct Framebuffer {
    pub(crate) inner: Drc<FramebufferInner>,
}

fn attachment_extents(attachment: &FramebufferAttachment) -> Extents2D {
    let base = attachment.texture.definition().extents;
    let level = Format::level_extents(base, attachment.mip_level);
    Extents2D {
        width: level.width,
        height: level.height,
    }
}

impl Framebuffer {
    pub(crate) fn new(device_context: &DeviceContext, def: &FramebufferDef<'_>) -> GfxResult<Self> {
        for attachment in def.color_attachments {
            let resource_type = attachment.texture.resource_type();
            assert!(
                matches!(
                    resource_type,
                    ResourceType::Texture2D | ResourceType::Texture2DArray
                ),
                "color attachments must be 2d or 2d-array textures"
            );
            assert!(attachment.mip_level < attachment.texture.definition().mip_count);
            if let Some(slice) = attachment.array_slice {
                assert!(slice < attachment.texture.definition().array_length);
            }
        }

        let color_attachments: Vec<FramebufferAttachment> = def
            .color_attachments
            .iter()
            .map(|a| FramebufferAttachment {
                texture: a.texture.clone(),
                mip_level: a.mip_level,
                array_slice: a.array_slice,
            })
            .collect();
        let depth_stencil_attachment =
            def.depth_stencil_attachment
                .as_ref()
                .map(|a| FramebufferAttachment {
                    texture: a.texture.clone(),
                    mip_level: a.mip_level,
                    array_slice: a.array_slice,
                });

        // Renderable area is the intersection of every attachment.
        let mut extents = Extents2D {
            width: u32::MAX,
            height: u32::MAX,
        };
        let mut any_attachment = false;
        for attachment in color_attachments
            .iter()
            .chain(depth_stencil_attachment.iter())
        {
            let e = attachment_extents(attachment);
            extents.width = extents.width.min(e.width);
            extents.height = extents.height.min(e.height);
            any_attachment = true;
        }
        if !any_attachment {
            extents = Extents2D {
                width: 0,
                height: 0,
            };
        }

        let render_pass = def.render_pass;
        let mut incompleteness = Vec::new();
        if !any_attachment {
            incompleteness.push(FramebufferCompleteness::MissingAttachment);
        }
        if color_attachments.len() != render_pass.color_formats().len() {
            incompleteness.push(FramebufferCompleteness::AttachmentCountMismatch);
        }
        for (attachment, expected_format) in
            color_attachments.iter().zip(render_pass.color_formats())
        {
            if attachment.texture.format() != *expected_format {
                incompleteness.push(FramebufferCompleteness::FormatMismatch);
            }
            if !attachment
                .texture
                .definition()
                .usage_flags
                .intersects(ResourceUsage::AS_RENDER_TARGET)
            {
                incompleteness.push(FramebufferCompleteness::NotRenderable);
            }
        }
        if let Some(attachment) = &depth_stencil_attachment {
            match render_pass.depth_stencil_format() {
                Some(format) if attachment.texture.format() == format => {}
                _ => incompleteness.push(FramebufferCompleteness::FormatMismatch),
            }
            if !attachment
                .texture
                .definition()
                .usage_flags
                .intersects(ResourceUsage::AS_DEPTH_STENCIL)
            {
                incompleteness.push(FramebufferCompleteness::NotRenderable);
            }
        }
        for attachment in color_attachments
            .iter()
            .chain(depth_stencil_attachment.iter())
        {
            if attachment.texture.definition().sample_count != render_pass.sample_count() {
                incompleteness.push(FramebufferCompleteness::SampleCountMismatch);
                break;
            }
        }
        for reason in &incompleteness {
            log::error!("framebuffer is incomplete: {:?}", reason);
        }

        Ok(Self {
            inner: device_context.deferred_dropper().new_drc(FramebufferInner {
                render_pass: render_pass.clone(),
                color_attachments,
                depth_stencil_attachment,
                extents,
                incompleteness,
            }),
        })
    }

    pub fn render_pass(&self) -> &RenderPass {
        &self.inner.render_pass
    }

    pub fn extents(&self) -> Extents2D {
        self.inner.extents
    }

    pub fn width_and_height(&self) -> (u32, u32) {
        (self.inner.extents.width, self.inner.extents.height)
    }

    /// True when any attachment carries more than one sample.
    pub fn is_multisample_target(&self) -> bool {
        self.inner
            .color_attachments
            .iter()
            .chain(self.inner.depth_stencil_attachment.iter())
            .any(|a| a.texture.definition().sample_count != SampleCount::SampleCount1)
    }

    pub fn color_attachment_count(&self) -> usize {
        self.inner.color_attachments.len()
    }

    pub fn color_attachment(&self, index: usize) -> &Texture {
        &self.inner.color_attachments[index].texture
    }

    pub fn depth_stencil_attachment(&self) -> Option<&Texture> {
        self.inner
            .depth_stencil_attachment
            .as_ref()
            .map(|a| &a.texture)
    }

    pub fn is_complete(&self) -> bool {
        self.inner.incompleteness.is_empty()
    }

    pub fn incompleteness(&self) -> &[FramebufferCompleteness] {
        &self.inner.incompleteness
    }
}
