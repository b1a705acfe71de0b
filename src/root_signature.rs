use crate::backends::BackendRootSignature;
use crate::deferred_drop::Drc;
use crate::{DeviceContext, GfxResult, ShaderStageFlags};

/// What kind of resource a descriptor range binds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DescriptorRangeType {
    Texture,
    Sampler,
    UniformBuffer,
    StructuredBuffer,
}

/// A contiguous run of registers of one resource kind inside a descriptor
/// table. `base_register` is the register space position the shader
/// declares; the binding slot a program actually uses is assigned at link
/// time from the range's position in the signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DescriptorRange {
    pub name: String,
    pub range_type: DescriptorRangeType,
    pub base_register: u32,
    pub count: u32,
    pub visibility: ShaderStageFlags,
}

/// One root parameter of a signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RootParameter {
    DescriptorTable(Vec<DescriptorRange>),
    InlineConstants {
        register: u32,
        count: u32,
        visibility: ShaderStageFlags,
    },
}

/// Used to create a `RootSignature`
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RootSignatureDef {
    pub parameters: Vec<RootParameter>,
}

impl RootSignatureDef {
    pub fn verify(&self) {
        assert!(!self.parameters.is_empty());
        for parameter in &self.parameters {
            match parameter {
                RootParameter::DescriptorTable(ranges) => {
                    assert!(!ranges.is_empty());
                    for range in ranges {
                        assert!(range.count >= 1);
                        assert!(!range.visibility.is_empty());
                    }
                }
                RootParameter::InlineConstants { count, .. } => {
                    assert!(*count >= 1);
                }
            }
        }
    }
}

pub(crate) struct RootSignatureInner {
    device_context: DeviceContext,
    pub(crate) definition: RootSignatureDef,
    pub(crate) backend_root_signature: BackendRootSignature,
}

impl Drop for RootSignatureInner {
    fn drop(&mut self) {
        self.backend_root_signature.destroy(&self.device_context);
    }
}

/// Describes the full set of resources a family of programs binds. The
/// order of parameters and of the ranges inside them is significant:
/// link-time binding assignment walks them front to back.
#[derive(Clone)]
pub struct RootSignature {
    pub(crate) inner: Drc<RootSignatureInner>,
}

impl RootSignature {
    pub(crate) fn new(device_context: &DeviceContext, def: &RootSignatureDef) -> GfxResult<Self> {
        def.verify();
        let backend_root_signature = BackendRootSignature::new(device_context);
        Ok(Self {
            inner: device_context.deferred_dropper().new_drc(RootSignatureInner {
                device_context: device_context.clone(),
                definition: def.clone(),
                backend_root_signature,
            }),
        })
    }

    pub fn definition(&self) -> &RootSignatureDef {
        &self.inner.definition
    }

    pub fn parameter(&self, index: usize) -> &RootParameter {
        &self.inner.definition.parameters[index]
    }

    pub fn parameter_count(&self) -> usize {
        self.inner.definition.parameters.len()
    }

    /// Walks every descriptor range of every table parameter in signature
    /// order, yielding the flat range index alongside the range.
    pub fn descriptor_ranges(&self) -> impl Iterator<Item = (usize, &DescriptorRange)> {
        self.inner
            .definition
            .parameters
            .iter()
            .filter_map(|parameter| match parameter {
                RootParameter::DescriptorTable(ranges) => Some(ranges.iter()),
                RootParameter::InlineConstants { .. } => None,
            })
            .flatten()
            .enumerate()
    }
}
