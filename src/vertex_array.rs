use crate::backends::BackendVertexArray;
use crate::deferred_drop::Drc;
use crate::{
    Buffer, CreationStrategy, DeviceContext, GfxResult, IndexType, ResourceUsage, VertexLayout,
};

/// Used to create a `VertexArray`. Buffer slots map one-to-one to the
/// `buffer_index` values referenced by the layout's attributes. An empty
/// layout with no buffers is valid; shaders can synthesize vertices from
/// the vertex index alone.
pub struct VertexArrayDef<'a> {
    pub vertex_buffers: &'a [&'a Buffer],
    pub index_buffer: Option<&'a Buffer>,
    pub index_type: IndexType,
    pub layout: &'a VertexLayout,
}

pub(crate) struct VertexArrayInner {
    device_context: DeviceContext,
    layout: VertexLayout,
    vertex_buffers: Vec<Buffer>,
    index_buffer: Option<Buffer>,
    index_type: IndexType,
    id: u16,
    pub(crate) backend_vertex_array: BackendVertexArray,
}

impl Drop for VertexArrayInner {
    fn drop(&mut self) {
        self.backend_vertex_array.destroy(&self.device_context);
        self.device_context.release_vertex_array_id(self.id);
    }
}

/// Binds vertex buffers to the slots of a vertex layout, with an optional
/// index buffer. Holds a reference on every attached buffer for its whole
/// lifetime and carries a dense 16-bit id recycled on destruction.
#[derive(Clone)]
pub struct VertexArray {
    pub(crate) inner: Drc<VertexArrayInner>,
}

impl VertexArray {
    pub(crate) fn new(
        device_context: &DeviceContext,
        def: &VertexArrayDef<'_>,
    ) -> GfxResult<Self> {
        assert!(def.vertex_buffers.len() <= crate::MAX_VERTEX_INPUT_BINDINGS);
        assert_eq!(def.layout.buffers.len(), def.vertex_buffers.len());
        for buffer in def.vertex_buffers {
            assert!(buffer
                .definition()
                .usage_flags
                .intersects(ResourceUsage::AS_VERTEX_BUFFER));
        }
        for attribute in &def.layout.attributes {
            assert!((attribute.buffer_index as usize) < def.vertex_buffers.len());
        }
        if let Some(index_buffer) = def.index_buffer {
            assert!(index_buffer
                .definition()
                .usage_flags
                .intersects(ResourceUsage::AS_INDEX_BUFFER));
        }

        let id = device_context.allocate_vertex_array_id()?;
        let backend_vertex_array = BackendVertexArray::new(device_context, def);

        Ok(Self {
            inner: device_context.deferred_dropper().new_drc(VertexArrayInner {
                device_context: device_context.clone(),
                layout: def.layout.clone(),
                vertex_buffers: def.vertex_buffers.iter().copied().cloned().collect(),
                index_buffer: def.index_buffer.cloned(),
                index_type: def.index_type,
                id,
                backend_vertex_array,
            }),
        })
    }

    pub fn vertex_array_id(&self) -> u16 {
        self.inner.id
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.inner.layout
    }

    pub fn vertex_buffer(&self, slot: usize) -> &Buffer {
        &self.inner.vertex_buffers[slot]
    }

    pub fn vertex_buffer_count(&self) -> usize {
        self.inner.vertex_buffers.len()
    }

    pub fn index_buffer(&self) -> Option<&Buffer> {
        self.inner.index_buffer.as_ref()
    }

    pub fn index_type(&self) -> IndexType {
        self.inner.index_type
    }

    pub fn creation_strategy(&self) -> CreationStrategy {
        self.inner.backend_vertex_array.creation_strategy()
    }

    pub fn reference_count(&self) -> usize {
        self.inner.strong_count()
    }
}
