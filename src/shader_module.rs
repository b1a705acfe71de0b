use crate::backends::BackendShaderModule;
use crate::deferred_drop::Drc;
use crate::{DeviceContext, GfxError, GfxResult, ResourceType, ShaderStageFlags};

/// Used to create a `ShaderModule`
#[derive(Clone, Copy, Debug)]
pub enum ShaderModuleDef<'a> {
    /// Shader source text, compiled by the backend at creation time.
    Source {
        stage: ShaderStageFlags,
        source: &'a str,
    },
    /// Precompiled bytecode blob. Only legal when the device reports
    /// bytecode support.
    Bytecode {
        stage: ShaderStageFlags,
        bytecode: &'a [u8],
    },
}

impl<'a> ShaderModuleDef<'a> {
    pub fn stage(&self) -> ShaderStageFlags {
        match self {
            Self::Source { stage, .. } | Self::Bytecode { stage, .. } => *stage,
        }
    }
}

pub(crate) struct ShaderModuleInner {
    device_context: DeviceContext,
    stage: ShaderStageFlags,
    pub(crate) backend_shader_module: BackendShaderModule,
}

impl Drop for ShaderModuleInner {
    fn drop(&mut self) {
        self.backend_shader_module.destroy(&self.device_context);
    }
}

/// One compiled shader stage. Compilation failure does not fail creation;
/// the module is returned with its log and fails any program it is linked
/// into.
#[derive(Clone)]
pub struct ShaderModule {
    pub(crate) inner: Drc<ShaderModuleInner>,
}

impl ShaderModule {
    pub(crate) fn new(device_context: &DeviceContext, def: ShaderModuleDef<'_>) -> GfxResult<Self> {
        let stage = def.stage();
        assert_eq!(stage.bits().count_ones(), 1, "exactly one stage per module");

        let caps = device_context.capabilities();
        if matches!(def, ShaderModuleDef::Bytecode { .. }) && !caps.supports_shader_bytecode {
            return Err(GfxError::CapabilityUnsupported(
                "shader bytecode ingestion".to_owned(),
            ));
        }
        if stage.intersects(ShaderStageFlags::TASK | ShaderStageFlags::MESH)
            && !caps.supports_mesh_shaders
        {
            return Err(GfxError::CapabilityUnsupported(
                "task/mesh shader stages".to_owned(),
            ));
        }

        let backend_shader_module = BackendShaderModule::new(device_context, &def);
        if !backend_shader_module.compile_succeeded() {
            log::error!(
                "{:?} shader module failed to compile: {}",
                stage,
                backend_shader_module.compile_log()
            );
        }

        Ok(Self {
            inner: device_context.deferred_dropper().new_drc(ShaderModuleInner {
                device_context: device_context.clone(),
                stage,
                backend_shader_module,
            }),
        })
    }

    pub fn stage(&self) -> ShaderStageFlags {
        self.inner.stage
    }

    pub fn compile_succeeded(&self) -> bool {
        self.inner.backend_shader_module.compile_succeeded()
    }

    pub fn compile_log(&self) -> &str {
        self.inner.backend_shader_module.compile_log()
    }

    pub fn resource_type(&self) -> ResourceType {
        let stage = self.inner.stage;
        if stage == ShaderStageFlags::VERTEX {
            ResourceType::VertexShader
        } else if stage == ShaderStageFlags::TESSELLATION_CONTROL {
            ResourceType::TessellationControlShader
        } else if stage == ShaderStageFlags::TESSELLATION_EVALUATION {
            ResourceType::TessellationEvaluationShader
        } else if stage == ShaderStageFlags::GEOMETRY {
            ResourceType::GeometryShader
        } else if stage == ShaderStageFlags::FRAGMENT {
            ResourceType::FragmentShader
        } else if stage == ShaderStageFlags::TASK {
            ResourceType::TaskShader
        } else if stage == ShaderStageFlags::MESH {
            ResourceType::MeshShader
        } else {
            ResourceType::ComputeShader
        }
    }
}
