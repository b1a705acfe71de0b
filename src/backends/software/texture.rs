use std::sync::Mutex;

use crate::backends::software::device::BindSlot;
use crate::{
    ColorClearValue, CreationStrategy, DeviceContext, Format, ResourceCreation, TextureDef,
};

/// Encodes a clear color as one packed texel of the given format. Formats
/// the interpreter cannot encode (compressed, depth) yield `None`.
pub(crate) fn encode_clear_color(format: Format, color: &ColorClearValue) -> Option<Vec<u8>> {
    fn unorm8(value: f32) -> u8 {
        (value.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
    }
    let [r, g, b, a] = color.0;
    match format {
        Format::R8_UNORM => Some(vec![unorm8(r)]),
        Format::R8G8_UNORM => Some(vec![unorm8(r), unorm8(g)]),
        Format::R8G8B8A8_UNORM | Format::R8G8B8A8_SRGB => {
            Some(vec![unorm8(r), unorm8(g), unorm8(b), unorm8(a)])
        }
        Format::B8G8R8A8_UNORM => Some(vec![unorm8(b), unorm8(g), unorm8(r), unorm8(a)]),
        Format::R32_SFLOAT => Some(r.to_le_bytes().to_vec()),
        Format::R32_UINT => Some((r as u32).to_le_bytes().to_vec()),
        Format::R32G32_SFLOAT => {
            let mut texel = r.to_le_bytes().to_vec();
            texel.extend_from_slice(&g.to_le_bytes());
            Some(texel)
        }
        Format::R32G32B32A32_SFLOAT => {
            let mut texel = Vec::with_capacity(16);
            for value in [r, g, b, a] {
                texel.extend_from_slice(&value.to_le_bytes());
            }
            Some(texel)
        }
        _ => None,
    }
}

pub(crate) struct SoftwareTexture {
    handle: u32,
    strategy: CreationStrategy,
    mip_offsets: Vec<u64>,
    storage: Mutex<Vec<u8>>,
}

impl SoftwareTexture {
    pub fn new(
        device_context: &DeviceContext,
        texture_def: &TextureDef,
        initial_data: Option<&[u8]>,
    ) -> Self {
        let device = &device_context.inner.backend_device_context;
        let handle = device.allocate_handle();
        let strategy = device.creation_strategy();
        let mip_offsets = texture_def.mip_byte_offsets();
        let mut storage = vec![0u8; texture_def.total_size_in_bytes() as usize];

        {
            // Construction path mirrors buffers; uploads on a bind-style
            // device go through the texture bind point.
            let _scope = match strategy {
                CreationStrategy::Bind => Some(device.bind_for_setup(BindSlot::Texture, handle)),
                CreationStrategy::Direct => None,
            };
            if let Some(data) = initial_data {
                storage[..data.len()].copy_from_slice(data);
            }
        }

        let texture = Self {
            handle,
            strategy,
            mip_offsets,
            storage: Mutex::new(storage),
        };
        if initial_data.is_some()
            && texture_def
                .creation_flags
                .contains(ResourceCreation::GENERATE_MIPMAPS)
            && !texture_def
                .creation_flags
                .contains(ResourceCreation::DATA_CONTAINS_MIPMAPS)
        {
            texture.generate_mipmaps(texture_def);
        }
        texture
    }

    pub fn handle(&self) -> u32 {
        self.handle
    }

    pub fn creation_strategy(&self) -> CreationStrategy {
        self.strategy
    }

    fn subresource_offset(&self, def: &TextureDef, mip_level: u32, array_slice: u32) -> usize {
        let slice_size = def.format.level_size_in_bytes(def.extents, mip_level);
        (self.mip_offsets[mip_level as usize] + slice_size * u64::from(array_slice)) as usize
    }

    pub fn read_level(&self, def: &TextureDef, mip_level: u32, array_slice: u32) -> Vec<u8> {
        let offset = self.subresource_offset(def, mip_level, array_slice);
        let size = def.format.level_size_in_bytes(def.extents, mip_level) as usize;
        self.storage.lock().unwrap()[offset..offset + size].to_vec()
    }

    /// Fills the top-left `region_width` x `region_height` texels of one
    /// subresource with a packed texel value.
    pub fn fill_region(
        &self,
        def: &TextureDef,
        mip_level: u32,
        array_slice: u32,
        region_width: u32,
        region_height: u32,
        texel: &[u8],
    ) {
        if def.format.is_compressed() {
            log::warn!("clear of a block-compressed texture ignored");
            return;
        }
        let level = Format::level_extents(def.extents, mip_level);
        let texel_size = def.format.block_size_in_bytes() as usize;
        let row_pitch = level.width as usize * texel_size;
        let base = self.subresource_offset(def, mip_level, array_slice);
        let width = region_width.min(level.width) as usize;
        let height = region_height.min(level.height) as usize;

        let mut storage = self.storage.lock().unwrap();
        for z in 0..level.depth as usize {
            let layer = base + z * row_pitch * level.height as usize;
            for y in 0..height {
                let row = layer + y * row_pitch;
                for x in 0..width {
                    let at = row + x * texel_size;
                    storage[at..at + texel_size].copy_from_slice(texel);
                }
            }
        }
    }

    /// Nearest-sample downscale of every level from the one above it.
    fn generate_mipmaps(&self, def: &TextureDef) {
        if def.format.is_compressed() {
            log::warn!("mip generation for a block-compressed texture ignored");
            return;
        }
        let texel_size = def.format.block_size_in_bytes() as usize;
        let mut storage = self.storage.lock().unwrap();
        for mip in 1..def.mip_count {
            let src_extents = Format::level_extents(def.extents, mip - 1);
            let dst_extents = Format::level_extents(def.extents, mip);
            for slice in 0..def.array_length {
                let src_base = self.subresource_offset(def, mip - 1, slice);
                let dst_base = self.subresource_offset(def, mip, slice);
                for z in 0..dst_extents.depth as usize {
                    for y in 0..dst_extents.height as usize {
                        for x in 0..dst_extents.width as usize {
                            let src = src_base
                                + (((z * 2).min(src_extents.depth as usize - 1)
                                    * src_extents.height as usize
                                    + (y * 2).min(src_extents.height as usize - 1))
                                    * src_extents.width as usize
                                    + (x * 2).min(src_extents.width as usize - 1))
                                    * texel_size;
                            let dst = dst_base
                                + ((z * dst_extents.height as usize + y)
                                    * dst_extents.width as usize
                                    + x)
                                    * texel_size;
                            let texel: Vec<u8> = storage[src..src + texel_size].to_vec();
                            storage[dst..dst + texel_size].copy_from_slice(&texel);
                        }
                    }
                }
            }
        }
    }

    pub fn destroy(&self, device_context: &DeviceContext) {
        device_context
            .inner
            .backend_device_context
            .unbind_destroyed(BindSlot::Texture, self.handle);
    }
}
