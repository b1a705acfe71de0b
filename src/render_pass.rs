use crate::deferred_drop::Drc;
use crate::{DeviceContext, Format, GfxError, GfxResult, SampleCount};

/// Used to create a `RenderPass`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RenderPassDef {
    pub color_formats: Vec<Format>,
    pub depth_stencil_format: Option<Format>,
    pub sample_count: SampleCount,
}

impl Default for RenderPassDef {
    fn default() -> Self {
        Self {
            color_formats: vec![Format::R8G8B8A8_UNORM],
            depth_stencil_format: None,
            sample_count: SampleCount::SampleCount1,
        }
    }
}

impl RenderPassDef {
    pub fn verify(&self) {
        assert!(
            !self.color_formats.is_empty() || self.depth_stencil_format.is_some(),
            "render pass with no attachments"
        );
        assert!(self.color_formats.len() <= crate::MAX_RENDER_TARGET_ATTACHMENTS);
        for format in &self.color_formats {
            assert!(!format.has_depth(), "depth format in a color slot");
            assert_ne!(*format, Format::UNDEFINED);
        }
        if let Some(format) = self.depth_stencil_format {
            assert!(format.has_depth());
        }
    }
}

pub(crate) struct RenderPassInner {
    definition: RenderPassDef,
}

/// Shape of a rendering episode: attachment formats and sample count.
/// Framebuffers and graphics pipelines are both validated against one.
#[derive(Clone)]
pub struct RenderPass {
    pub(crate) inner: Drc<RenderPassInner>,
}

impl RenderPass {
    pub(crate) fn new(device_context: &DeviceContext, def: &RenderPassDef) -> GfxResult<Self> {
        def.verify();
        let caps = device_context.capabilities();
        if def.color_formats.len() as u32 > caps.max_render_target_attachments {
            return Err(GfxError::CapabilityUnsupported(format!(
                "{} color attachments (device maximum {})",
                def.color_formats.len(),
                caps.max_render_target_attachments
            )));
        }

        Ok(Self {
            inner: device_context.deferred_dropper().new_drc(RenderPassInner {
                definition: def.clone(),
            }),
        })
    }

    pub fn definition(&self) -> &RenderPassDef {
        &self.inner.definition
    }

    pub fn color_formats(&self) -> &[Format] {
        &self.inner.definition.color_formats
    }

    pub fn depth_stencil_format(&self) -> Option<Format> {
        self.inner.definition.depth_stencil_format
    }

    pub fn sample_count(&self) -> SampleCount {
        self.inner.definition.sample_count
    }
}
