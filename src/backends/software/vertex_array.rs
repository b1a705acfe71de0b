use crate::backends::software::device::BindSlot;
use crate::{CreationStrategy, DeviceContext, VertexArrayDef};

pub(crate) struct SoftwareVertexArray {
    handle: u32,
    strategy: CreationStrategy,
}

impl SoftwareVertexArray {
    pub fn new(device_context: &DeviceContext, def: &VertexArrayDef<'_>) -> Self {
        let device = &device_context.inner.backend_device_context;
        let handle = device.allocate_handle();
        let strategy = device.creation_strategy();

        match strategy {
            CreationStrategy::Bind => {
                // Attaching buffers on a bind-style device routes each one
                // through the buffer bind point while the array itself is
                // bound.
                let array_scope = device.bind_for_setup(BindSlot::VertexArray, handle);
                debug_assert!(array_scope.handle_is_bound(handle));
                for buffer in def.vertex_buffers {
                    let _buffer_scope = device
                        .bind_for_setup(BindSlot::Buffer, buffer.inner.backend_buffer.handle());
                }
                if let Some(index_buffer) = def.index_buffer {
                    let _buffer_scope = device.bind_for_setup(
                        BindSlot::Buffer,
                        index_buffer.inner.backend_buffer.handle(),
                    );
                }
            }
            CreationStrategy::Direct => {}
        }

        Self { handle, strategy }
    }

    pub fn handle(&self) -> u32 {
        self.handle
    }

    pub fn creation_strategy(&self) -> CreationStrategy {
        self.strategy
    }

    pub fn destroy(&self, device_context: &DeviceContext) {
        device_context
            .inner
            .backend_device_context
            .unbind_destroyed(BindSlot::VertexArray, self.handle);
    }
}
