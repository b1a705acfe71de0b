use crate::backends::BackendQueryPool;
use crate::deferred_drop::Drc;
use crate::{DeviceContext, GfxResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryType {
    /// Counts draw work between begin and end.
    Occlusion,
    /// Single written timestamp value.
    Timestamp,
    /// Counts draws and dispatches between begin and end, packed as
    /// draws in the low 32 bits and dispatches in the high 32 bits.
    PipelineStatistics,
}

/// Used to create a `QueryPool`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QueryPoolDef {
    pub query_type: QueryType,
    pub query_count: u32,
}

pub(crate) struct QueryPoolInner {
    device_context: DeviceContext,
    definition: QueryPoolDef,
    pub(crate) backend_query_pool: BackendQueryPool,
}

impl Drop for QueryPoolInner {
    fn drop(&mut self) {
        self.backend_query_pool.destroy(&self.device_context);
    }
}

/// Fixed-size pool of GPU queries. Results become available only after the
/// submission containing the query retires; readers either poll or spin.
#[derive(Clone)]
pub struct QueryPool {
    pub(crate) inner: Drc<QueryPoolInner>,
}

impl QueryPool {
    pub(crate) fn new(device_context: &DeviceContext, def: &QueryPoolDef) -> GfxResult<Self> {
        assert!(def.query_count >= 1);
        let backend_query_pool = BackendQueryPool::new(device_context, def);
        Ok(Self {
            inner: device_context.deferred_dropper().new_drc(QueryPoolInner {
                device_context: device_context.clone(),
                definition: *def,
                backend_query_pool,
            }),
        })
    }

    pub fn definition(&self) -> &QueryPoolDef {
        &self.inner.definition
    }

    pub fn query_type(&self) -> QueryType {
        self.inner.definition.query_type
    }

    /// Fetches a query result. With `wait` false this is a poll that
    /// returns `None` while the result is outstanding; with `wait` true it
    /// spins until the result lands, which on a result that will never be
    /// written does not return.
    pub fn result(&self, index: u32, wait: bool) -> Option<u64> {
        assert!(index < self.inner.definition.query_count);
        loop {
            if let Some(value) = self.inner.backend_query_pool.try_result(index) {
                return Some(value);
            }
            if !wait {
                return None;
            }
            std::hint::spin_loop();
        }
    }
}
