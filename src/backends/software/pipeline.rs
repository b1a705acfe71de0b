use crate::{
    BlendState, ComputePipelineDef, DepthState, DeviceContext, GfxError, GfxResult,
    GraphicsPipelineDef, PrimitiveTopology, RasterizerState,
};

/// Fixed-function state captured at pipeline creation, applied as a block
/// when the pipeline becomes active.
pub(crate) struct SoftwarePipeline {
    handle: u32,
    program_handle: u32,
    fixed_function: Option<FixedFunctionState>,
}

pub(crate) struct FixedFunctionState {
    pub blend_state: BlendState,
    pub depth_state: DepthState,
    pub rasterizer_state: RasterizerState,
    pub primitive_topology: PrimitiveTopology,
}

impl SoftwarePipeline {
    pub fn new_graphics(
        device_context: &DeviceContext,
        def: &GraphicsPipelineDef<'_>,
    ) -> GfxResult<Self> {
        if !def.program.link_succeeded() {
            return Err(GfxError::from("pipeline over a program that failed to link"));
        }
        Ok(Self {
            handle: device_context
                .inner
                .backend_device_context
                .allocate_handle(),
            program_handle: def.program.inner.backend_program.handle(),
            fixed_function: Some(FixedFunctionState {
                blend_state: def.blend_state.clone(),
                depth_state: def.depth_state.clone(),
                rasterizer_state: def.rasterizer_state.clone(),
                primitive_topology: def.primitive_topology,
            }),
        })
    }

    pub fn new_compute(
        device_context: &DeviceContext,
        def: &ComputePipelineDef<'_>,
    ) -> GfxResult<Self> {
        if !def.program.link_succeeded() {
            return Err(GfxError::from("pipeline over a program that failed to link"));
        }
        Ok(Self {
            handle: device_context
                .inner
                .backend_device_context
                .allocate_handle(),
            program_handle: def.program.inner.backend_program.handle(),
            fixed_function: None,
        })
    }

    pub fn handle(&self) -> u32 {
        self.handle
    }

    pub fn program_handle(&self) -> u32 {
        self.program_handle
    }

    pub fn fixed_function(&self) -> Option<&FixedFunctionState> {
        self.fixed_function.as_ref()
    }

    pub fn destroy(&self, _device_context: &DeviceContext) {}
}
