use crate::deferred_drop::Drc;
use crate::{
    Buffer, DescriptorRangeType, DeviceContext, GfxResult, ResourceUsage, RootParameter,
    RootSignature, Sampler, Texture,
};

/// One resource bound into a descriptor-table slot.
#[derive(Clone)]
pub enum ResourceGroupBinding {
    Texture(Texture),
    Sampler(Sampler),
    UniformBuffer(Buffer),
    StructuredBuffer(Buffer),
}

impl ResourceGroupBinding {
    fn matches(&self, range_type: DescriptorRangeType) -> bool {
        matches!(
            (self, range_type),
            (Self::Texture(_), DescriptorRangeType::Texture)
                | (Self::Sampler(_), DescriptorRangeType::Sampler)
                | (Self::UniformBuffer(_), DescriptorRangeType::UniformBuffer)
                | (Self::StructuredBuffer(_), DescriptorRangeType::StructuredBuffer)
        )
    }
}

/// Used to create a `ResourceGroup`. Bindings fill the parameter's ranges
/// front to back, one entry per descriptor.
pub struct ResourceGroupDef<'a> {
    pub root_signature: &'a RootSignature,
    pub parameter_index: u32,
    pub bindings: &'a [ResourceGroupBinding],
}

pub(crate) struct ResourceGroupInner {
    root_signature: RootSignature,
    parameter_index: u32,
    bindings: Vec<ResourceGroupBinding>,
}

/// A baked set of resources for one descriptor-table parameter of a root
/// signature. Holds a reference on everything bound into it.
#[derive(Clone)]
pub struct ResourceGroup {
    pub(crate) inner: Drc<ResourceGroupInner>,
}

impl ResourceGroup {
    pub(crate) fn new(device_context: &DeviceContext, def: &ResourceGroupDef<'_>) -> GfxResult<Self> {
        let parameter_index = def.parameter_index as usize;
        assert!(parameter_index < def.root_signature.parameter_count());
        let ranges = match def.root_signature.parameter(parameter_index) {
            RootParameter::DescriptorTable(ranges) => ranges,
            RootParameter::InlineConstants { .. } => {
                panic!("resource group built against an inline-constant parameter")
            }
        };

        let descriptor_count: u32 = ranges.iter().map(|range| range.count).sum();
        assert_eq!(
            def.bindings.len() as u32,
            descriptor_count,
            "binding count does not fill the parameter"
        );

        let mut next_binding = 0usize;
        for range in ranges {
            for _ in 0..range.count {
                let binding = &def.bindings[next_binding];
                next_binding += 1;
                assert!(
                    binding.matches(range.range_type),
                    "binding kind does not match descriptor range {:?}",
                    range.name
                );
                match binding {
                    ResourceGroupBinding::UniformBuffer(buffer) => {
                        assert!(buffer
                            .definition()
                            .usage_flags
                            .intersects(ResourceUsage::AS_CONST_BUFFER));
                    }
                    ResourceGroupBinding::StructuredBuffer(buffer) => {
                        assert!(buffer
                            .definition()
                            .usage_flags
                            .intersects(ResourceUsage::AS_SHADER_RESOURCE));
                    }
                    ResourceGroupBinding::Texture(texture) => {
                        assert!(texture
                            .definition()
                            .usage_flags
                            .intersects(ResourceUsage::AS_SHADER_RESOURCE));
                    }
                    ResourceGroupBinding::Sampler(_) => {}
                }
            }
        }

        Ok(Self {
            inner: device_context.deferred_dropper().new_drc(ResourceGroupInner {
                root_signature: def.root_signature.clone(),
                parameter_index: def.parameter_index,
                bindings: def.bindings.to_vec(),
            }),
        })
    }

    pub fn root_signature(&self) -> &RootSignature {
        &self.inner.root_signature
    }

    pub fn parameter_index(&self) -> u32 {
        self.inner.parameter_index
    }

    pub fn bindings(&self) -> &[ResourceGroupBinding] {
        &self.inner.bindings
    }
}
