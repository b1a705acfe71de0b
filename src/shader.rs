use std::sync::Mutex;

use fnv::FnvHashMap;

use crate::backends::BackendProgram;
use crate::deferred_drop::Drc;
use crate::{
    DescriptorRangeType, DeviceContext, GfxError, GfxResult, PipelineType, RootSignature,
    ShaderModule, ShaderStageFlags, VertexLayout,
};

/// How the backend joined the stages of a program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkStrategy {
    /// All stages linked into one backend object.
    Monolithic,
    /// Stages kept as independent backend objects joined at draw time.
    Separable,
}

/// Binding slot a descriptor range resolved to at link time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedBinding {
    /// Uniform-buffer ranges take sequential indices in signature order.
    UniformBufferIndex(u32),
    /// Texture and structured-buffer ranges bind the unit named by their
    /// base register.
    TextureUnit(u32),
    SamplerSlot(u32),
}

/// Used to create a graphics `Program`
pub struct GraphicsProgramDef<'a> {
    pub stages: &'a [&'a ShaderModule],
    pub root_signature: &'a RootSignature,
    pub vertex_layout: &'a VertexLayout,
}

/// Used to create a compute `Program`
pub struct ComputeProgramDef<'a> {
    pub compute_module: &'a ShaderModule,
    pub root_signature: &'a RootSignature,
}

pub(crate) struct ProgramInner {
    device_context: DeviceContext,
    pipeline_type: PipelineType,
    stages: Vec<ShaderModule>,
    root_signature: RootSignature,
    link_strategy: LinkStrategy,
    link_succeeded: bool,
    link_log: String,
    attribute_locations: Vec<(String, u32)>,
    resolved_bindings: Vec<ResolvedBinding>,
    uniform_values: Mutex<FnvHashMap<String, Vec<f32>>>,
    pub(crate) backend_program: BackendProgram,
}

impl Drop for ProgramInner {
    fn drop(&mut self) {
        self.backend_program.destroy(&self.device_context);
    }
}

/// A set of shader stages linked against a root signature. Linking happens
/// exactly once, at creation; the outcome never changes afterwards. A
/// program whose link failed is still a valid object, but every use of it
/// is inert and reports failure.
#[derive(Clone)]
pub struct Program {
    pub(crate) inner: Drc<ProgramInner>,
}

fn is_classic_stage_set(stages: ShaderStageFlags) -> bool {
    stages.contains(ShaderStageFlags::VERTEX)
        && !stages.intersects(ShaderStageFlags::TASK | ShaderStageFlags::MESH)
        && stages.contains(ShaderStageFlags::TESSELLATION_CONTROL)
            == stages.contains(ShaderStageFlags::TESSELLATION_EVALUATION)
}

fn is_mesh_stage_set(stages: ShaderStageFlags) -> bool {
    stages.contains(ShaderStageFlags::MESH)
        && !stages.intersects(
            ShaderStageFlags::VERTEX
                | ShaderStageFlags::TESSELLATION_CONTROL
                | ShaderStageFlags::TESSELLATION_EVALUATION
                | ShaderStageFlags::GEOMETRY,
        )
}

/// Deterministic binding assignment from a root signature: the Nth
/// uniform-buffer range (in signature order) takes binding index N,
/// texture and structured-buffer ranges take the unit named by their base
/// register, and sampler ranges take their base register slot. Identical
/// on every backend.
pub(crate) fn resolve_bindings(root_signature: &RootSignature) -> Vec<ResolvedBinding> {
    let mut resolved = Vec::new();
    let mut next_uniform_index = 0u32;
    for (_, range) in root_signature.descriptor_ranges() {
        resolved.push(match range.range_type {
            DescriptorRangeType::UniformBuffer => {
                let index = next_uniform_index;
                next_uniform_index += 1;
                ResolvedBinding::UniformBufferIndex(index)
            }
            DescriptorRangeType::Texture | DescriptorRangeType::StructuredBuffer => {
                ResolvedBinding::TextureUnit(range.base_register)
            }
            DescriptorRangeType::Sampler => ResolvedBinding::SamplerSlot(range.base_register),
        });
    }
    resolved
}

impl Program {
    pub(crate) fn new_graphics(
        device_context: &DeviceContext,
        def: &GraphicsProgramDef<'_>,
    ) -> GfxResult<Self> {
        assert!(!def.stages.is_empty());
        let mut stage_flags = ShaderStageFlags::empty();
        for module in def.stages {
            assert!(
                !stage_flags.intersects(module.stage()),
                "duplicate shader stage in program"
            );
            stage_flags |= module.stage();
        }
        assert!(
            !stage_flags.intersects(ShaderStageFlags::COMPUTE),
            "compute stage in a graphics program"
        );
        assert!(
            is_classic_stage_set(stage_flags) || is_mesh_stage_set(stage_flags),
            "incomplete graphics stage set"
        );

        if is_mesh_stage_set(stage_flags)
            && !device_context.capabilities().supports_mesh_shaders
        {
            return Err(GfxError::CapabilityUnsupported(
                "mesh shading pipeline".to_owned(),
            ));
        }

        let stages: Vec<ShaderModule> = def.stages.iter().copied().cloned().collect();
        Self::link(
            device_context,
            PipelineType::Graphics,
            stages,
            def.root_signature,
            def.vertex_layout,
        )
    }

    pub(crate) fn new_compute(
        device_context: &DeviceContext,
        def: &ComputeProgramDef<'_>,
    ) -> GfxResult<Self> {
        assert_eq!(def.compute_module.stage(), ShaderStageFlags::COMPUTE);
        Self::link(
            device_context,
            PipelineType::Compute,
            vec![def.compute_module.clone()],
            def.root_signature,
            &VertexLayout::default(),
        )
    }

    fn link(
        device_context: &DeviceContext,
        pipeline_type: PipelineType,
        stages: Vec<ShaderModule>,
        root_signature: &RootSignature,
        vertex_layout: &VertexLayout,
    ) -> GfxResult<Self> {
        let link_strategy = if device_context.capabilities().supports_separable_programs {
            LinkStrategy::Separable
        } else {
            LinkStrategy::Monolithic
        };

        let backend_program = BackendProgram::new(device_context, &stages, link_strategy);
        let link_succeeded = backend_program.link_succeeded();
        let link_log = backend_program.link_log().to_owned();
        if !link_succeeded {
            log::error!("program link failed: {}", link_log);
        }

        // Attribute locations follow the layout's declaration order, and
        // binding slots the signature's range order. Computed once here;
        // never revisited.
        let attribute_locations = vertex_layout
            .attributes
            .iter()
            .enumerate()
            .map(|(index, attribute)| (attribute.name.clone(), index as u32))
            .collect();
        let resolved_bindings = if link_succeeded {
            resolve_bindings(root_signature)
        } else {
            Vec::new()
        };

        Ok(Self {
            inner: device_context.deferred_dropper().new_drc(ProgramInner {
                device_context: device_context.clone(),
                pipeline_type,
                stages,
                root_signature: root_signature.clone(),
                link_strategy,
                link_succeeded,
                link_log,
                attribute_locations,
                resolved_bindings,
                uniform_values: Mutex::new(FnvHashMap::default()),
                backend_program,
            }),
        })
    }

    pub fn pipeline_type(&self) -> PipelineType {
        self.inner.pipeline_type
    }

    pub fn root_signature(&self) -> &RootSignature {
        &self.inner.root_signature
    }

    pub fn stage_count(&self) -> usize {
        self.inner.stages.len()
    }

    pub fn link_strategy(&self) -> LinkStrategy {
        self.inner.link_strategy
    }

    pub fn link_succeeded(&self) -> bool {
        self.inner.link_succeeded
    }

    pub fn link_log(&self) -> &str {
        &self.inner.link_log
    }

    /// Location assigned to a vertex attribute by name, if the program
    /// linked and the layout declares it.
    pub fn attribute_location(&self, name: &str) -> Option<u32> {
        if !self.inner.link_succeeded {
            return None;
        }
        self.inner
            .attribute_locations
            .iter()
            .find(|(attribute_name, _)| attribute_name == name)
            .map(|(_, location)| *location)
    }

    /// Binding slots in flat descriptor-range order.
    pub fn resolved_bindings(&self) -> &[ResolvedBinding] {
        &self.inner.resolved_bindings
    }

    /// Stores a named float uniform. Returns `false` without effect on a
    /// program whose link failed.
    pub fn set_uniform_f32(&self, name: &str, values: &[f32]) -> bool {
        if !self.inner.link_succeeded {
            return false;
        }
        self.inner
            .uniform_values
            .lock()
            .unwrap()
            .insert(name.to_owned(), values.to_vec());
        true
    }

    pub fn uniform_f32(&self, name: &str) -> Option<Vec<f32>> {
        self.inner.uniform_values.lock().unwrap().get(name).cloned()
    }

    pub fn reference_count(&self) -> usize {
        self.inner.strong_count()
    }
}
