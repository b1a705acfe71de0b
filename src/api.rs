use crate::backends::BackendApi;
use crate::{DeviceCapabilities, DeviceContext, GfxResult};

/// General configuration for the whole renderer.
pub struct ApiDef {
    /// Capability profile the device is created with. The reference
    /// backend honors whatever profile it is handed, so callers can run
    /// against a reduced feature set.
    pub capabilities: DeviceCapabilities,
}

impl Default for ApiDef {
    fn default() -> Self {
        Self {
            capabilities: DeviceCapabilities::default(),
        }
    }
}

/// Root object of the API. Creating it initializes the backend and a
/// single device context. It must outlive every object created from it;
/// `destroy` verifies that no stray references remain.
pub struct GfxApi {
    device_context: Option<DeviceContext>,
    backend_api: BackendApi,
}

impl Drop for GfxApi {
    fn drop(&mut self) {
        self.destroy().unwrap_or_else(|e| {
            log::error!("error while destroying api: {}", e);
        });
    }
}

impl GfxApi {
    /// # Safety
    ///
    /// The created API must not be dropped while any window it presents to
    /// is still in use by the caller.
    pub unsafe fn new(api_def: &ApiDef) -> GfxResult<Self> {
        let backend_api = BackendApi::new(api_def)?;
        let device_context = DeviceContext::new(api_def.capabilities);
        Ok(Self {
            device_context: Some(device_context),
            backend_api,
        })
    }

    pub fn destroy(&mut self) -> GfxResult<()> {
        if let Some(device_context) = self.device_context.take() {
            // Device-held frontend handles (bound state, default render
            // target) would otherwise keep the context alive forever.
            device_context.inner.backend_device_context.release_retained_resources();
            // Everything already released must be reclaimed now, not a few
            // frames from now, or the references below would still exist.
            device_context.deferred_dropper().destroy();

            let inner = std::sync::Arc::try_unwrap(device_context.inner).map_err(|arc| {
                format!(
                    "Could not destroy device, {} references to it exist",
                    std::sync::Arc::strong_count(&arc)
                )
            })?;
            std::mem::drop(inner);

            self.backend_api.destroy()?;
        }
        Ok(())
    }

    pub fn device_context(&self) -> &DeviceContext {
        self.device_context.as_ref().unwrap()
    }
}
