use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use raw_window_handle::HasRawWindowHandle;

use crate::backends::BackendDeviceContext;
use crate::deferred_drop::DeferredDropper;
use crate::handle_pool::HandlePool;
use crate::{
    Buffer, BufferDef, CommandBuffer, ComputePipelineDef, ComputeProgramDef, Framebuffer,
    FramebufferDef, GfxError, GfxResult, GraphicsPipelineDef, GraphicsProgramDef, Pipeline,
    Program, QueryPool, QueryPoolDef, RenderPass, RenderPassDef, ResourceGroup, ResourceGroupDef,
    RootSignature, RootSignatureDef, Sampler, SamplerDef, ShaderModule, ShaderModuleDef,
    Swapchain, SwapchainDef, Texture, TextureDef, TextureOrigin, VertexArray, VertexArrayDef,
};

/// Describes what the active backend instance supports. Read-only; every
/// creation path consults this to pick its code path, and external callers
/// branch on it before issuing creation calls.
#[derive(Clone, Copy, Debug)]
pub struct DeviceCapabilities {
    pub max_render_target_attachments: u32,
    pub max_anisotropy: f32,
    pub max_patch_control_points: u8,
    pub max_texture_dimension: u32,
    pub max_vertex_attribute_count: u32,

    /// The backend can address a new object directly while constructing it,
    /// without disturbing the ambient bind state.
    pub supports_direct_state_access: bool,

    /// The backend can ingest precompiled shader bytecode. When absent,
    /// only source-based module creation is legal.
    pub supports_shader_bytecode: bool,

    /// Shader stages may be compiled independently and joined at draw time
    /// rather than linked into one monolithic program.
    pub supports_separable_programs: bool,

    /// Task/mesh shader stages are available.
    pub supports_mesh_shaders: bool,

    pub texture_origin: TextureOrigin,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self::modern()
    }
}

impl DeviceCapabilities {
    /// Full-featured profile of the reference backend.
    pub fn modern() -> Self {
        Self {
            max_render_target_attachments: crate::MAX_RENDER_TARGET_ATTACHMENTS as u32,
            max_anisotropy: 16.0,
            max_patch_control_points: crate::MAX_PATCH_CONTROL_POINTS,
            max_texture_dimension: 16384,
            max_vertex_attribute_count: crate::MAX_VERTEX_INPUT_BINDINGS as u32,
            supports_direct_state_access: true,
            supports_shader_bytecode: true,
            supports_separable_programs: true,
            supports_mesh_shaders: true,
            texture_origin: TextureOrigin::UpperLeft,
        }
    }

    /// Capability profile of an old-style backend: construction goes
    /// through the ambient bind state, programs are monolithic, no
    /// bytecode ingestion, no mesh pipeline.
    pub fn legacy() -> Self {
        Self {
            max_render_target_attachments: 4,
            max_anisotropy: 4.0,
            max_patch_control_points: 16,
            max_texture_dimension: 4096,
            max_vertex_attribute_count: crate::MAX_VERTEX_INPUT_BINDINGS as u32,
            supports_direct_state_access: false,
            supports_shader_bytecode: false,
            supports_separable_programs: false,
            supports_mesh_shaders: false,
            texture_origin: TextureOrigin::LowerLeft,
        }
    }
}

pub(crate) struct DeviceContextInner {
    capabilities: DeviceCapabilities,
    deferred_dropper: DeferredDropper,
    destroyed: AtomicBool,
    vertex_array_ids: Mutex<HandlePool>,
    pipeline_ids: Mutex<HandlePool>,

    pub(crate) backend_device_context: BackendDeviceContext,
}

impl std::fmt::Debug for DeviceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceContext").finish()
    }
}

impl Drop for DeviceContextInner {
    fn drop(&mut self) {
        if !self.destroyed.swap(true, Ordering::AcqRel) {
            log::trace!("destroying device");
            self.deferred_dropper.destroy();
            log::trace!("destroyed device");
        }
    }
}

impl DeviceContextInner {
    fn new(capabilities: DeviceCapabilities) -> Self {
        Self {
            capabilities,
            deferred_dropper: DeferredDropper::new(3),
            destroyed: AtomicBool::new(false),
            vertex_array_ids: Mutex::new(HandlePool::new("vertex array")),
            pipeline_ids: Mutex::new(HandlePool::new("pipeline state")),
            backend_device_context: BackendDeviceContext::new(capabilities),
        }
    }
}

/// Cloneable handle to the device. All resource factories live here; each
/// returns a reference-counted handle or an `Err`, never panicking on
/// recoverable failures.
#[derive(Clone)]
pub struct DeviceContext {
    pub(crate) inner: Arc<DeviceContextInner>,
}

impl DeviceContext {
    pub(crate) fn new(capabilities: DeviceCapabilities) -> Self {
        Self {
            inner: Arc::new(DeviceContextInner::new(capabilities)),
        }
    }

    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.inner.capabilities
    }

    //
    // Factory surface
    //

    pub fn create_buffer(
        &self,
        buffer_def: &BufferDef,
        initial_data: Option<&[u8]>,
    ) -> GfxResult<Buffer> {
        Buffer::new(self, buffer_def, initial_data)
    }

    pub fn create_texture(
        &self,
        texture_def: &TextureDef,
        initial_data: Option<&[u8]>,
    ) -> GfxResult<Texture> {
        Texture::new(self, texture_def, initial_data)
    }

    pub fn create_sampler(&self, sampler_def: &SamplerDef) -> Sampler {
        Sampler::new(self, sampler_def)
    }

    pub fn create_vertex_array(&self, vertex_array_def: &VertexArrayDef<'_>) -> GfxResult<VertexArray> {
        VertexArray::new(self, vertex_array_def)
    }

    pub fn create_shader_module(&self, def: ShaderModuleDef<'_>) -> GfxResult<ShaderModule> {
        ShaderModule::new(self, def)
    }

    pub fn create_graphics_program(&self, def: &GraphicsProgramDef<'_>) -> GfxResult<Program> {
        Program::new_graphics(self, def)
    }

    pub fn create_compute_program(&self, def: &ComputeProgramDef<'_>) -> GfxResult<Program> {
        Program::new_compute(self, def)
    }

    pub fn create_root_signature(&self, def: &RootSignatureDef) -> GfxResult<RootSignature> {
        RootSignature::new(self, def)
    }

    pub fn create_resource_group(&self, def: &ResourceGroupDef<'_>) -> GfxResult<ResourceGroup> {
        ResourceGroup::new(self, def)
    }

    pub fn create_render_pass(&self, def: &RenderPassDef) -> GfxResult<RenderPass> {
        RenderPass::new(self, def)
    }

    pub fn create_framebuffer(&self, def: &FramebufferDef<'_>) -> GfxResult<Framebuffer> {
        Framebuffer::new(self, def)
    }

    pub fn create_graphics_pipeline(&self, def: &GraphicsPipelineDef<'_>) -> GfxResult<Pipeline> {
        Pipeline::new_graphics_pipeline(self, def)
    }

    pub fn create_compute_pipeline(&self, def: &ComputePipelineDef<'_>) -> GfxResult<Pipeline> {
        Pipeline::new_compute_pipeline(self, def)
    }

    pub fn create_query_pool(&self, def: &QueryPoolDef) -> GfxResult<QueryPool> {
        QueryPool::new(self, def)
    }

    pub fn create_swapchain(
        &self,
        raw_window_handle: &dyn HasRawWindowHandle,
        swapchain_def: &SwapchainDef,
    ) -> GfxResult<Swapchain> {
        Swapchain::new(self, raw_window_handle, swapchain_def)
    }

    /// Replays a recorded command buffer against the backend, dispatching
    /// each record exactly once, in insertion order. Failures inside a
    /// record are logged by the underlying call and replay continues.
    pub fn submit_command_buffer(&self, command_buffer: &CommandBuffer) {
        self.backend_submit_command_buffer(command_buffer);
    }

    /// Reclaims resources whose last reference was released long enough ago
    /// that no in-flight frame can still address them. Call once per frame.
    pub fn free_gpu_memory(&self) {
        self.inner.deferred_dropper.flush();
    }

    pub(crate) fn deferred_dropper(&self) -> &DeferredDropper {
        &self.inner.deferred_dropper
    }

    //
    // Dense ID pools
    //

    pub(crate) fn allocate_vertex_array_id(&self) -> GfxResult<u16> {
        self.inner
            .vertex_array_ids
            .lock()
            .unwrap()
            .allocate()
            .ok_or(GfxError::IdSpaceExhausted("vertex array"))
    }

    pub(crate) fn release_vertex_array_id(&self, id: u16) {
        self.inner.vertex_array_ids.lock().unwrap().release(id);
    }

    pub(crate) fn allocate_pipeline_id(&self) -> GfxResult<u16> {
        self.inner
            .pipeline_ids
            .lock()
            .unwrap()
            .allocate()
            .ok_or(GfxError::IdSpaceExhausted("pipeline state"))
    }

    pub(crate) fn release_pipeline_id(&self, id: u16) {
        self.inner.pipeline_ids.lock().unwrap().release(id);
    }
}
