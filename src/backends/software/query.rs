use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::{DeviceContext, QueryPoolDef};

struct QuerySlot {
    completed: AtomicBool,
    value: AtomicU64,
}

pub(crate) struct SoftwareQueryPool {
    handle: u32,
    slots: Vec<QuerySlot>,
}

impl SoftwareQueryPool {
    pub fn new(device_context: &DeviceContext, def: &QueryPoolDef) -> Self {
        let slots = (0..def.query_count)
            .map(|_| QuerySlot {
                completed: AtomicBool::new(false),
                value: AtomicU64::new(0),
            })
            .collect();
        Self {
            handle: device_context
                .inner
                .backend_device_context
                .allocate_handle(),
            slots,
        }
    }

    pub fn handle(&self) -> u32 {
        self.handle
    }

    /// Stages a value; it stays invisible to readers until `complete`.
    pub fn write_value(&self, index: u32, value: u64) {
        self.slots[index as usize].value.store(value, Ordering::Release);
    }

    pub fn complete(&self, index: u32) {
        self.slots[index as usize]
            .completed
            .store(true, Ordering::Release);
    }

    pub fn try_result(&self, index: u32) -> Option<u64> {
        let slot = &self.slots[index as usize];
        if slot.completed.load(Ordering::Acquire) {
            Some(slot.value.load(Ordering::Acquire))
        } else {
            None
        }
    }

    pub fn destroy(&self, _device_context: &DeviceContext) {}
}
