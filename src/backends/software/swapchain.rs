use raw_window_handle::HasRawWindowHandle;

use crate::{DeviceContext, GfxResult, SwapchainDef};

pub(crate) struct SoftwareSwapchain {
    handle: u32,
}

impl SoftwareSwapchain {
    pub fn new(
        device_context: &DeviceContext,
        _raw_window_handle: &dyn HasRawWindowHandle,
        swapchain_def: &SwapchainDef,
    ) -> Self {
        log::debug!(
            "created {}x{} swapchain",
            swapchain_def.width,
            swapchain_def.height
        );
        Self {
            handle: device_context
                .inner
                .backend_device_context
                .allocate_handle(),
        }
    }

    pub fn handle(&self) -> u32 {
        self.handle
    }

    pub fn present(&self, _device_context: &DeviceContext) -> GfxResult<()> {
        Ok(())
    }

    pub fn destroy(&self, _device_context: &DeviceContext) {}
}
