use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Mutex;

use fnv::FnvHashMap;

use crate::{
    ApiDef, CreationStrategy, DeviceCapabilities, DeviceContext, Framebuffer, FrameStatistics,
    GfxResult, Pipeline, QueryPool, ResourceGroup, RootSignature, SamplerDef, Texture,
    VertexArray,
};

pub(crate) struct SoftwareApi;

impl SoftwareApi {
    pub fn new(_api_def: &ApiDef) -> GfxResult<Self> {
        log::info!("creating software backend api");
        Ok(Self)
    }

    pub fn destroy(&mut self) -> GfxResult<()> {
        Ok(())
    }
}

/// Ambient bind points, one per object category that old-style
/// construction goes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BindSlot {
    Buffer,
    Texture,
    VertexArray,
}

#[derive(Default)]
struct BindTable {
    buffer: Option<u32>,
    texture: Option<u32>,
    vertex_array: Option<u32>,
}

impl BindTable {
    fn slot(&mut self, slot: BindSlot) -> &mut Option<u32> {
        match slot {
            BindSlot::Buffer => &mut self.buffer,
            BindSlot::Texture => &mut self.texture,
            BindSlot::VertexArray => &mut self.vertex_array,
        }
    }
}

/// Scoped takeover of one ambient bind point. Construction on a device
/// without direct state access happens inside one of these; dropping it
/// restores whatever was bound before, so a caller-visible binding is
/// never clobbered.
pub(crate) struct BindScope<'a> {
    device: &'a SoftwareDeviceContext,
    slot: BindSlot,
    previous: Option<u32>,
}

impl<'a> BindScope<'a> {
    pub fn handle_is_bound(&self, handle: u32) -> bool {
        self.device.bound(self.slot) == Some(handle)
    }
}

impl<'a> Drop for BindScope<'a> {
    fn drop(&mut self) {
        let mut table = self.device.bind_table.lock().unwrap();
        *table.slot(self.slot) = self.previous;
    }
}

/// What rendering records currently target.
#[derive(Clone)]
pub(crate) enum RenderTargetBinding {
    /// The swapchain backbuffer, when one exists.
    Default,
    Framebuffer(Framebuffer),
}

/// Ambient interpreter state. Persists across submissions, like the state
/// machine of a real device.
#[derive(Default)]
pub(crate) struct ReplayState {
    pub render_target: Option<RenderTargetBinding>,
    pub viewport: Option<(u32, u32, u32, u32)>,
    pub root_signature: Option<RootSignature>,
    pub pipeline: Option<Pipeline>,
    pub vertex_array: Option<VertexArray>,
    pub resource_groups: FnvHashMap<u32, ResourceGroup>,
    /// Counter snapshots (draws, dispatches) taken when a scoped query
    /// began, keyed by pool handle and query index.
    pub query_starts: FnvHashMap<(u32, u32), (u64, u64)>,
    /// Queries written this submission; they complete when it retires.
    pub pending_queries: Vec<(QueryPool, u32)>,
    /// Id of the pipeline whose state was last applied. Survives
    /// submissions so redundant rebinds are skipped across them too.
    pub applied_pipeline_id: Option<u16>,
}

pub(crate) struct SoftwareDeviceContext {
    capabilities: DeviceCapabilities,
    next_object_handle: AtomicU32,
    next_timestamp: AtomicU64,
    bind_table: Mutex<BindTable>,
    pub(crate) replay: Mutex<ReplayState>,
    pub(crate) statistics: Mutex<FrameStatistics>,
    default_render_target: Mutex<Option<Texture>>,
}

impl SoftwareDeviceContext {
    pub fn new(capabilities: DeviceCapabilities) -> Self {
        Self {
            capabilities,
            next_object_handle: AtomicU32::new(1),
            next_timestamp: AtomicU64::new(1),
            bind_table: Mutex::new(BindTable::default()),
            replay: Mutex::new(ReplayState::default()),
            statistics: Mutex::new(FrameStatistics::default()),
            default_render_target: Mutex::new(None),
        }
    }

    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    pub fn allocate_handle(&self) -> u32 {
        self.next_object_handle.fetch_add(1, Ordering::Relaxed)
    }

    pub fn next_timestamp(&self) -> u64 {
        self.next_timestamp.fetch_add(1, Ordering::Relaxed)
    }

    /// Which construction path resources take on this device.
    pub fn creation_strategy(&self) -> CreationStrategy {
        if self.capabilities.supports_direct_state_access {
            CreationStrategy::Direct
        } else {
            CreationStrategy::Bind
        }
    }

    /// Binds `handle` to the slot for the duration of the returned scope.
    pub fn bind_for_setup(&self, slot: BindSlot, handle: u32) -> BindScope<'_> {
        let mut table = self.bind_table.lock().unwrap();
        let previous = std::mem::replace(table.slot(slot), Some(handle));
        BindScope {
            device: self,
            slot,
            previous,
        }
    }

    pub fn bound(&self, slot: BindSlot) -> Option<u32> {
        *self.bind_table.lock().unwrap().slot(slot)
    }

    pub fn unbind_destroyed(&self, slot: BindSlot, handle: u32) {
        let mut table = self.bind_table.lock().unwrap();
        let bound = table.slot(slot);
        if *bound == Some(handle) {
            *bound = None;
        }
    }

    pub fn set_default_render_target(&self, texture: &Texture) {
        *self.default_render_target.lock().unwrap() = Some(texture.clone());
    }

    pub fn clear_default_render_target(&self) {
        *self.default_render_target.lock().unwrap() = None;
    }

    pub fn default_render_target(&self) -> Option<Texture> {
        self.default_render_target.lock().unwrap().clone()
    }

    /// Drops every frontend handle the device state machine retains.
    /// Required before tearing the device down, since retained handles
    /// would otherwise keep it alive through their own device references.
    pub fn release_retained_resources(&self) {
        *self.replay.lock().unwrap() = ReplayState::default();
        *self.default_render_target.lock().unwrap() = None;
        *self.bind_table.lock().unwrap() = BindTable::default();
    }
}

pub(crate) struct SoftwareRootSignature {
    handle: u32,
}

impl SoftwareRootSignature {
    pub fn new(device_context: &DeviceContext) -> Self {
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

    pub fn destroy(&self, _device_context: &DeviceContext) {}
}

pub(crate) struct SoftwareSampler {
    handle: u32,
}

impl SoftwareSampler {
    pub fn new(device_context: &DeviceContext, _sampler_def: &SamplerDef) -> Self {
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

    pub fn destroy(&self, _device_context: &DeviceContext) {}
}
