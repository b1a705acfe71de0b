use crate::backends::BackendPipeline;
use crate::deferred_drop::Drc;
use crate::{
    BlendState, DepthState, DeviceContext, GfxResult, PipelineType, PrimitiveTopology, Program,
    RasterizerState, RenderPass, RootSignature, VertexLayout,
};

/// Used to create a graphics `Pipeline`
pub struct GraphicsPipelineDef<'a> {
    pub program: &'a Program,
    pub root_signature: &'a RootSignature,
    pub vertex_layout: &'a VertexLayout,
    pub blend_state: &'a BlendState,
    pub depth_state: &'a DepthState,
    pub rasterizer_state: &'a RasterizerState,
    pub primitive_topology: PrimitiveTopology,
    pub render_pass: &'a RenderPass,
}

/// Used to create a compute `Pipeline`
pub struct ComputePipelineDef<'a> {
    pub program: &'a Program,
    pub root_signature: &'a RootSignature,
}

pub(crate) struct PipelineInner {
    device_context: DeviceContext,
    pipeline_type: PipelineType,
    program: Program,
    root_signature: RootSignature,
    render_pass: Option<RenderPass>,
    id: u16,
    pub(crate) backend_pipeline: BackendPipeline,
}

impl Drop for PipelineInner {
    fn drop(&mut self) {
        self.backend_pipeline.destroy(&self.device_context);
        self.device_context.release_pipeline_id(self.id);
    }
}

/// Immutable baked render state: program plus all fixed-function state.
/// Carries a dense 16-bit id, recycled on destruction, that the replay
/// path uses to skip redundant rebinds.
#[derive(Clone)]
pub struct Pipeline {
    pub(crate) inner: Drc<PipelineInner>,
}

impl Pipeline {
    pub(crate) fn new_graphics_pipeline(
        device_context: &DeviceContext,
        def: &GraphicsPipelineDef<'_>,
    ) -> GfxResult<Self> {
        assert_eq!(def.program.pipeline_type(), PipelineType::Graphics);
        def.blend_state
            .verify(def.render_pass.color_formats().len());
        if let PrimitiveTopology::PatchList(control_points) = def.primitive_topology {
            assert!(control_points >= 1 && control_points <= crate::MAX_PATCH_CONTROL_POINTS);
            assert!(
                control_points <= device_context.capabilities().max_patch_control_points,
                "patch control point count exceeds device maximum"
            );
        }

        let id = device_context.allocate_pipeline_id()?;
        let backend_pipeline = match BackendPipeline::new_graphics(device_context, def) {
            Ok(p) => p,
            Err(e) => {
                // Hand the id back before surfacing the failure so the
                // dense range stays gap-free.
                device_context.release_pipeline_id(id);
                return Err(e);
            }
        };

        Ok(Self {
            inner: device_context.deferred_dropper().new_drc(PipelineInner {
                device_context: device_context.clone(),
                pipeline_type: PipelineType::Graphics,
                program: def.program.clone(),
                root_signature: def.root_signature.clone(),
                render_pass: Some(def.render_pass.clone()),
                id,
                backend_pipeline,
            }),
        })
    }

    pub(crate) fn new_compute_pipeline(
        device_context: &DeviceContext,
        def: &ComputePipelineDef<'_>,
    ) -> GfxResult<Self> {
        assert_eq!(def.program.pipeline_type(), PipelineType::Compute);

        let id = device_context.allocate_pipeline_id()?;
        let backend_pipeline = match BackendPipeline::new_compute(device_context, def) {
            Ok(p) => p,
            Err(e) => {
                device_context.release_pipeline_id(id);
                return Err(e);
            }
        };

        Ok(Self {
            inner: device_context.deferred_dropper().new_drc(PipelineInner {
                device_context: device_context.clone(),
                pipeline_type: PipelineType::Compute,
                program: def.program.clone(),
                root_signature: def.root_signature.clone(),
                render_pass: None,
                id,
                backend_pipeline,
            }),
        })
    }

    pub fn pipeline_type(&self) -> PipelineType {
        self.inner.pipeline_type
    }

    pub fn pipeline_id(&self) -> u16 {
        self.inner.id
    }

    pub fn program(&self) -> &Program {
        &self.inner.program
    }

    pub fn root_signature(&self) -> &RootSignature {
        &self.inner.root_signature
    }

    pub fn render_pass(&self) -> Option<&RenderPass> {
        self.inner.render_pass.as_ref()
    }

    pub fn reference_count(&self) -> usize {
        self.inner.strong_count()
    }
}
