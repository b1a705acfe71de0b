use raw_window_handle::HasRawWindowHandle;

use crate::backends::BackendSwapchain;
use crate::{
    DeviceContext, Extents3D, Format, GfxResult, MemoryUsage, PresentSuccessResult,
    ResourceCreation, ResourceFlags, ResourceUsage, SampleCount, Texture, TextureDef,
};

/// Used to create a `Swapchain`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwapchainDef {
    pub width: u32,
    pub height: u32,
    /// 0 disables vertical sync; 1 waits one interval per present.
    pub vertical_sync_interval: u32,
}

fn backbuffer_def(width: u32, height: u32, format: Format) -> TextureDef {
    TextureDef {
        extents: Extents3D {
            width,
            height,
            depth: 1,
        },
        array_length: 1,
        mip_count: 1,
        format,
        usage_flags: ResourceUsage::AS_RENDER_TARGET,
        resource_flags: ResourceFlags::empty(),
        creation_flags: ResourceCreation::empty(),
        memory_usage: MemoryUsage::GpuOnly,
        sample_count: SampleCount::SampleCount1,
        tiled: false,
    }
}

/// Owns the presentable backbuffer for one window. The backbuffer doubles
/// as the default render target: recording a render-target record with no
/// framebuffer routes rendering here.
pub struct Swapchain {
    device_context: DeviceContext,
    swapchain_def: SwapchainDef,
    format: Format,
    backbuffer: Texture,
    frame_index: u64,
    backend_swapchain: BackendSwapchain,
}

impl Drop for Swapchain {
    fn drop(&mut self) {
        self.device_context
            .inner
            .backend_device_context
            .clear_default_render_target();
        self.backend_swapchain.destroy(&self.device_context);
    }
}

impl Swapchain {
    pub(crate) fn new(
        device_context: &DeviceContext,
        raw_window_handle: &dyn HasRawWindowHandle,
        swapchain_def: &SwapchainDef,
    ) -> GfxResult<Self> {
        assert!(swapchain_def.width >= 1 && swapchain_def.height >= 1);

        let format = Format::B8G8R8A8_UNORM;
        let backbuffer = Texture::new(
            device_context,
            &backbuffer_def(swapchain_def.width, swapchain_def.height, format),
            None,
        )?;
        let backend_swapchain =
            BackendSwapchain::new(device_context, raw_window_handle, swapchain_def);
        device_context
            .inner
            .backend_device_context
            .set_default_render_target(&backbuffer);

        Ok(Self {
            device_context: device_context.clone(),
            swapchain_def: *swapchain_def,
            format,
            backbuffer,
            frame_index: 0,
            backend_swapchain,
        })
    }

    pub fn definition(&self) -> &SwapchainDef {
        &self.swapchain_def
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn extents(&self) -> (u32, u32) {
        (self.swapchain_def.width, self.swapchain_def.height)
    }

    /// Number of completed presents.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn backbuffer(&self) -> &Texture {
        &self.backbuffer
    }

    pub fn set_vertical_sync_interval(&mut self, interval: u32) {
        self.swapchain_def.vertical_sync_interval = interval;
    }

    /// Shows the current backbuffer and advances the frame index. Also
    /// retires any deferred reclamation that has aged out.
    pub fn present(&mut self) -> GfxResult<PresentSuccessResult> {
        self.backend_swapchain.present(&self.device_context)?;
        self.frame_index += 1;
        self.device_context.free_gpu_memory();
        Ok(PresentSuccessResult::Success)
    }

    /// Drops the old backbuffer and allocates one at the new size. The
    /// default render target follows the new backbuffer.
    pub fn resize(&mut self, width: u32, height: u32) -> GfxResult<()> {
        assert!(width >= 1 && height >= 1);
        if width == self.swapchain_def.width && height == self.swapchain_def.height {
            return Ok(());
        }
        let backbuffer = Texture::new(
            &self.device_context,
            &backbuffer_def(width, height, self.format),
            None,
        )?;
        self.device_context
            .inner
            .backend_device_context
            .set_default_render_target(&backbuffer);
        self.backbuffer = backbuffer;
        self.swapchain_def.width = width;
        self.swapchain_def.height = height;
        Ok(())
    }
}
