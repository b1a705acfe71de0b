use std::sync::Mutex;

use crate::backends::software::device::BindSlot;
use crate::{BufferDef, CreationStrategy, DeviceContext};

pub(crate) struct SoftwareBuffer {
    handle: u32,
    strategy: CreationStrategy,
    storage: Mutex<Vec<u8>>,
}

impl SoftwareBuffer {
    pub fn new(
        device_context: &DeviceContext,
        buffer_def: &BufferDef,
        initial_data: Option<&[u8]>,
    ) -> Self {
        let device = &device_context.inner.backend_device_context;
        let handle = device.allocate_handle();
        let mut storage = vec![0u8; buffer_def.size as usize];

        let strategy = device.creation_strategy();
        match strategy {
            CreationStrategy::Bind => {
                let scope = device.bind_for_setup(BindSlot::Buffer, handle);
                debug_assert!(scope.handle_is_bound(handle));
                if let Some(data) = initial_data {
                    storage[..data.len()].copy_from_slice(data);
                }
            }
            CreationStrategy::Direct => {
                if let Some(data) = initial_data {
                    storage[..data.len()].copy_from_slice(data);
                }
            }
        }

        Self {
            handle,
            strategy,
            storage: Mutex::new(storage),
        }
    }

    pub fn handle(&self) -> u32 {
        self.handle
    }

    pub fn creation_strategy(&self) -> CreationStrategy {
        self.strategy
    }

    pub fn write(&self, byte_offset: u64, data: &[u8]) {
        let mut storage = self.storage.lock().unwrap();
        let start = byte_offset as usize;
        storage[start..start + data.len()].copy_from_slice(data);
    }

    pub fn read_back(&self) -> Vec<u8> {
        self.storage.lock().unwrap().clone()
    }

    pub fn destroy(&self, device_context: &DeviceContext) {
        device_context
            .inner
            .backend_device_context
            .unbind_destroyed(BindSlot::Buffer, self.handle);
    }
}
