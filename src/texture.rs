use crate::backends::BackendTexture;
use crate::deferred_drop::Drc;
use crate::{
    CreationStrategy, DeviceContext, Extents3D, Format, GfxResult, MemoryUsage, ResourceCreation,
    ResourceFlags, ResourceType, ResourceUsage, SampleCount,
};

/// Used to create a `Texture`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureDef {
    pub extents: Extents3D,
    pub array_length: u32,
    pub mip_count: u32,
    pub format: Format,
    pub usage_flags: ResourceUsage,
    pub resource_flags: ResourceFlags,
    pub creation_flags: ResourceCreation,
    pub memory_usage: MemoryUsage,
    pub sample_count: SampleCount,
    pub tiled: bool,
}

impl Default for TextureDef {
    fn default() -> Self {
        Self {
            extents: Extents3D {
                width: 0,
                height: 0,
                depth: 0,
            },
            array_length: 1,
            mip_count: 1,
            format: Format::UNDEFINED,
            usage_flags: ResourceUsage::empty(),
            resource_flags: ResourceFlags::empty(),
            creation_flags: ResourceCreation::empty(),
            memory_usage: MemoryUsage::GpuOnly,
            sample_count: SampleCount::SampleCount1,
            tiled: false,
        }
    }
}

impl TextureDef {
    pub fn is_render_target(&self) -> bool {
        self.usage_flags
            .intersects(ResourceUsage::AS_RENDER_TARGET | ResourceUsage::AS_DEPTH_STENCIL)
    }

    pub fn verify(&self) {
        assert!(self.extents.width >= 1);
        assert!(self.extents.height >= 1);
        assert!(self.extents.depth >= 1);
        assert!(self.array_length >= 1);
        assert!(self.mip_count >= 1);
        assert_ne!(self.format, Format::UNDEFINED);
        assert!(
            !self
                .usage_flags
                .intersects(ResourceUsage::BUFFER_ONLY_USAGE_FLAGS),
            "texture created with buffer-only usage flags"
        );
        if self.usage_flags.intersects(ResourceUsage::AS_DEPTH_STENCIL) {
            assert!(self.format.has_depth());
        }
        if self.resource_flags.contains(ResourceFlags::TEXTURE_CUBE) {
            assert_eq!(self.array_length % 6, 0);
        }
        let max_extent = self
            .extents
            .width
            .max(self.extents.height)
            .max(self.extents.depth);
        assert!(
            self.mip_count <= 32 - max_extent.leading_zeros(),
            "mip chain longer than the extents allow"
        );
        if self.sample_count != SampleCount::SampleCount1 {
            assert_eq!(
                self.mip_count, 1,
                "multisample textures cannot carry mip chains"
            );
            assert!(
                self.is_render_target(),
                "multisample textures must be render targets"
            );
            assert!(
                !self.creation_flags.intersects(
                    ResourceCreation::DATA_CONTAINS_MIPMAPS | ResourceCreation::GENERATE_MIPMAPS
                ),
                "multisample textures cannot take mip creation flags"
            );
        }
        // Cannot be both a cubemap and a 3D image
        if self.extents.depth > 1 {
            assert!(!self.resource_flags.contains(ResourceFlags::TEXTURE_CUBE));
            assert_eq!(self.array_length, 1);
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        if self.resource_flags.contains(ResourceFlags::TEXTURE_CUBE) {
            if self.array_length > 6 {
                ResourceType::TextureCubeArray
            } else {
                ResourceType::TextureCube
            }
        } else if self.extents.depth > 1 {
            ResourceType::Texture3D
        } else if self.extents.height > 1 {
            if self.array_length > 1 {
                ResourceType::Texture2DArray
            } else {
                ResourceType::Texture2D
            }
        } else if self.array_length > 1 {
            ResourceType::Texture1DArray
        } else {
            ResourceType::Texture1D
        }
    }

    /// Byte offset into a tightly packed mip-major upload for each mip
    /// level. Level 0 for every array slice comes first, then level 1 for
    /// every slice, and so on.
    pub fn mip_byte_offsets(&self) -> Vec<u64> {
        let mut offsets = Vec::with_capacity(self.mip_count as usize);
        let mut cursor = 0u64;
        for level in 0..self.mip_count {
            offsets.push(cursor);
            cursor += self.format.level_size_in_bytes(self.extents, level)
                * u64::from(self.array_length);
        }
        offsets
    }

    /// Total byte size of the texture with the full mip chain.
    pub fn total_size_in_bytes(&self) -> u64 {
        let mut total = 0u64;
        for level in 0..self.mip_count {
            total += self.format.level_size_in_bytes(self.extents, level)
                * u64::from(self.array_length);
        }
        total
    }
}

pub(crate) struct TextureInner {
    pub(crate) texture_def: TextureDef,
    pub(crate) device_context: DeviceContext,
    pub(crate) backend_texture: BackendTexture,
}

impl Drop for TextureInner {
    fn drop(&mut self) {
        self.backend_texture.destroy(&self.device_context);
    }
}

/// Image resource. Cloning is a reference-count increment.
#[derive(Clone)]
pub struct Texture {
    pub(crate) inner: Drc<TextureInner>,
}

impl PartialEq for Texture {
    fn eq(&self, other: &Self) -> bool {
        self.inner.backend_texture.handle() == other.inner.backend_texture.handle()
    }
}

impl Texture {
    pub(crate) fn new(
        device_context: &DeviceContext,
        texture_def: &TextureDef,
        initial_data: Option<&[u8]>,
    ) -> GfxResult<Self> {
        texture_def.verify();
        let caps = device_context.capabilities();
        assert!(texture_def.extents.width <= caps.max_texture_dimension);
        assert!(texture_def.extents.height <= caps.max_texture_dimension);

        if let Some(data) = initial_data {
            assert!(
                !texture_def.is_render_target(),
                "render targets cannot take initial data"
            );
            assert_eq!(
                texture_def.sample_count,
                SampleCount::SampleCount1,
                "multisample textures cannot take initial data"
            );
            let expected = if texture_def
                .creation_flags
                .contains(ResourceCreation::DATA_CONTAINS_MIPMAPS)
            {
                texture_def.total_size_in_bytes()
            } else {
                texture_def.format.level_size_in_bytes(texture_def.extents, 0)
                    * u64::from(texture_def.array_length)
            };
            assert_eq!(data.len() as u64, expected, "initial data size mismatch");
        }

        let backend_texture = BackendTexture::new(device_context, texture_def, initial_data);

        Ok(Self {
            inner: device_context.deferred_dropper().new_drc(TextureInner {
                texture_def: *texture_def,
                device_context: device_context.clone(),
                backend_texture,
            }),
        })
    }

    pub fn definition(&self) -> &TextureDef {
        &self.inner.texture_def
    }

    pub fn extents(&self) -> &Extents3D {
        &self.inner.texture_def.extents
    }

    pub fn format(&self) -> Format {
        self.inner.texture_def.format
    }

    pub fn device_context(&self) -> &DeviceContext {
        &self.inner.device_context
    }

    pub fn resource_type(&self) -> ResourceType {
        self.inner.texture_def.resource_type()
    }

    pub fn creation_strategy(&self) -> CreationStrategy {
        self.inner.backend_texture.creation_strategy()
    }

    /// Per-level byte offsets of the packed mip chain, matching the layout
    /// uploads are consumed in.
    pub fn mip_byte_offsets(&self) -> Vec<u64> {
        self.inner.texture_def.mip_byte_offsets()
    }

    /// Copies one mip level of one array slice back to the CPU.
    pub fn read_level(&self, mip_level: u32, array_slice: u32) -> GfxResult<Vec<u8>> {
        let def = &self.inner.texture_def;
        if mip_level >= def.mip_count || array_slice >= def.array_length {
            return Err(crate::GfxError::from("texture read out of range"));
        }
        Ok(self
            .inner
            .backend_texture
            .read_level(def, mip_level, array_slice))
    }

    pub fn reference_count(&self) -> usize {
        self.inner.strong_count()
    }
}
