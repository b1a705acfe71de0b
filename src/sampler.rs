use crate::backends::BackendSampler;
use crate::deferred_drop::Drc;
use crate::types::DecimalF32;
use crate::{AddressMode, CompareOp, DeviceContext, FilterType, MipMapMode};

/// Used to create a `Sampler`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerDef {
    pub min_filter: FilterType,
    pub mag_filter: FilterType,
    pub mip_map_mode: MipMapMode,
    pub address_mode_u: AddressMode,
    pub address_mode_v: AddressMode,
    pub address_mode_w: AddressMode,
    pub mip_lod_bias: f32,
    pub max_anisotropy: f32,
    pub compare_op: CompareOp,
}

impl Eq for SamplerDef {}

impl std::hash::Hash for SamplerDef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.min_filter.hash(state);
        self.mag_filter.hash(state);
        self.mip_map_mode.hash(state);
        self.address_mode_u.hash(state);
        self.address_mode_v.hash(state);
        self.address_mode_w.hash(state);
        DecimalF32(self.mip_lod_bias).hash(state);
        DecimalF32(self.max_anisotropy).hash(state);
        self.compare_op.hash(state);
    }
}

impl Default for SamplerDef {
    fn default() -> Self {
        Self {
            min_filter: FilterType::Nearest,
            mag_filter: FilterType::Nearest,
            mip_map_mode: MipMapMode::Nearest,
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            address_mode_w: AddressMode::ClampToEdge,
            mip_lod_bias: 0.0,
            max_anisotropy: 1.0,
            compare_op: CompareOp::Never,
        }
    }
}

pub(crate) struct SamplerInner {
    device_context: DeviceContext,
    pub(crate) sampler_def: SamplerDef,
    pub(crate) backend_sampler: BackendSampler,
}

impl Drop for SamplerInner {
    fn drop(&mut self) {
        self.backend_sampler.destroy(&self.device_context);
    }
}

#[derive(Clone)]
pub struct Sampler {
    pub(crate) inner: Drc<SamplerInner>,
}

impl Sampler {
    pub(crate) fn new(device_context: &DeviceContext, sampler_def: &SamplerDef) -> Self {
        let mut def = *sampler_def;
        let max_supported = device_context.capabilities().max_anisotropy;
        if def.max_anisotropy > max_supported {
            log::warn!(
                "sampler anisotropy {} clamped to device maximum {}",
                def.max_anisotropy,
                max_supported
            );
            def.max_anisotropy = max_supported;
        }
        let backend_sampler = BackendSampler::new(device_context, &def);
        Self {
            inner: device_context.deferred_dropper().new_drc(SamplerInner {
                device_context: device_context.clone(),
                sampler_def: def,
                backend_sampler,
            }),
        }
    }

    pub fn definition(&self) -> &SamplerDef {
        &self.inner.sampler_def
    }
}
