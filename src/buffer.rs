use crate::backends::BackendBuffer;
use crate::deferred_drop::Drc;
use crate::{
    CreationStrategy, DeviceContext, GfxError, GfxResult, MemoryUsage, ResourceType,
    ResourceUsage,
};

/// Used to create a `Buffer`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferDef {
    pub size: u64,
    pub usage_flags: ResourceUsage,
    pub memory_usage: MemoryUsage,
}

impl Default for BufferDef {
    fn default() -> Self {
        Self {
            size: 0,
            usage_flags: ResourceUsage::empty(),
            memory_usage: MemoryUsage::GpuOnly,
        }
    }
}

impl BufferDef {
    pub fn verify(&self) {
        assert_ne!(self.size, 0);
        assert!(
            !self
                .usage_flags
                .intersects(ResourceUsage::TEXTURE_ONLY_USAGE_FLAGS),
            "buffer created with texture-only usage flags"
        );
        assert!(
            !self.usage_flags.is_empty(),
            "buffer created with no usage flags"
        );
    }

    pub fn for_staging_buffer(size: usize, usage_flags: ResourceUsage) -> Self {
        Self {
            size: size as u64,
            usage_flags,
            memory_usage: MemoryUsage::CpuToGpu,
        }
    }

    pub fn for_staging_vertex_buffer(size: usize) -> Self {
        Self::for_staging_buffer(size, ResourceUsage::AS_VERTEX_BUFFER)
    }

    pub fn for_staging_index_buffer(size: usize) -> Self {
        Self::for_staging_buffer(size, ResourceUsage::AS_INDEX_BUFFER)
    }

    pub fn for_uniform_buffer(size: usize) -> Self {
        Self {
            size: size as u64,
            usage_flags: ResourceUsage::AS_CONST_BUFFER,
            memory_usage: MemoryUsage::CpuToGpu,
        }
    }

    pub fn for_vertex_buffer(size: usize) -> Self {
        Self {
            size: size as u64,
            usage_flags: ResourceUsage::AS_VERTEX_BUFFER,
            memory_usage: MemoryUsage::GpuOnly,
        }
    }

    pub fn for_index_buffer(size: usize) -> Self {
        Self {
            size: size as u64,
            usage_flags: ResourceUsage::AS_INDEX_BUFFER,
            memory_usage: MemoryUsage::GpuOnly,
        }
    }

    pub fn for_structured_buffer(size: usize) -> Self {
        Self {
            size: size as u64,
            usage_flags: ResourceUsage::AS_SHADER_RESOURCE,
            memory_usage: MemoryUsage::GpuOnly,
        }
    }

    pub fn for_indirect_buffer(size: usize) -> Self {
        Self {
            size: size as u64,
            usage_flags: ResourceUsage::AS_INDIRECT_BUFFER,
            memory_usage: MemoryUsage::GpuOnly,
        }
    }
}

pub(crate) struct BufferInner {
    pub(crate) buffer_def: BufferDef,
    pub(crate) device_context: DeviceContext,
    pub(crate) backend_buffer: BackendBuffer,
}

impl Drop for BufferInner {
    fn drop(&mut self) {
        self.backend_buffer.destroy(&self.device_context);
    }
}

/// GPU memory block. Cloning is a reference-count increment; the backend
/// object is destroyed only when the last clone is released and the
/// deferred dropper flushes.
#[derive(Clone)]
pub struct Buffer {
    pub(crate) inner: Drc<BufferInner>,
}

impl Buffer {
    pub(crate) fn new(
        device_context: &DeviceContext,
        buffer_def: &BufferDef,
        initial_data: Option<&[u8]>,
    ) -> GfxResult<Self> {
        buffer_def.verify();
        if let Some(data) = initial_data {
            assert!(
                data.len() as u64 <= buffer_def.size,
                "initial data larger than buffer"
            );
        }
        let backend_buffer = BackendBuffer::new(device_context, buffer_def, initial_data);

        Ok(Self {
            inner: device_context.deferred_dropper().new_drc(BufferInner {
                buffer_def: *buffer_def,
                device_context: device_context.clone(),
                backend_buffer,
            }),
        })
    }

    pub fn definition(&self) -> &BufferDef {
        &self.inner.buffer_def
    }

    pub fn size(&self) -> u64 {
        self.inner.buffer_def.size
    }

    pub fn device_context(&self) -> &DeviceContext {
        &self.inner.device_context
    }

    /// Primary classification of this buffer, derived from its usage flags.
    pub fn resource_type(&self) -> ResourceType {
        let def = &self.inner.buffer_def;
        if def.usage_flags.intersects(ResourceUsage::AS_CONST_BUFFER) {
            ResourceType::UniformBuffer
        } else if def.usage_flags.intersects(ResourceUsage::AS_INDEX_BUFFER) {
            ResourceType::IndexBuffer
        } else if def.usage_flags.intersects(ResourceUsage::AS_VERTEX_BUFFER) {
            ResourceType::VertexBuffer
        } else if def.usage_flags.intersects(ResourceUsage::AS_INDIRECT_BUFFER) {
            ResourceType::IndirectBuffer
        } else if def.memory_usage == MemoryUsage::CpuToGpu {
            ResourceType::StagingBuffer
        } else {
            ResourceType::StructuredBuffer
        }
    }

    pub fn creation_strategy(&self) -> CreationStrategy {
        self.inner.backend_buffer.creation_strategy()
    }

    /// Overwrites a byte range of the buffer contents.
    pub fn write(&self, byte_offset: u64, data: &[u8]) -> GfxResult<()> {
        if byte_offset + data.len() as u64 > self.inner.buffer_def.size {
            return Err(GfxError::from("buffer write out of range"));
        }
        self.inner.backend_buffer.write(byte_offset, data);
        Ok(())
    }

    /// Copies the whole buffer back to the CPU. Staging and other
    /// write-only memory usages cannot be read back.
    pub fn read_back(&self) -> GfxResult<Vec<u8>> {
        if self.inner.buffer_def.memory_usage == MemoryUsage::CpuToGpu {
            return Err(GfxError::CapabilityUnsupported(
                "read back of a write-only staging buffer".to_owned(),
            ));
        }
        Ok(self.inner.backend_buffer.read_back())
    }

    /// Number of live handles to this buffer, the deferred-drop queue
    /// included.
    pub fn reference_count(&self) -> usize {
        self.inner.strong_count()
    }
}
