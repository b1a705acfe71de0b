/// Arena + free-list allocator for the small dense integer handles used by
/// resource categories that need compact IDs distinct from object identity
/// (vertex arrays, pipeline states). IDs are 16-bit and recycled only after
/// the owning resource is fully destroyed.
#[derive(Debug)]
pub(crate) struct HandlePool {
    category: &'static str,
    live: Vec<bool>,
    free: Vec<u16>,
}

impl HandlePool {
    pub fn new(category: &'static str) -> Self {
        Self {
            category,
            live: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Pops a recycled ID or grows the arena. Returns `None` when the
    /// 16-bit ID space of this category is exhausted; the caller must roll
    /// back any partially constructed resource state.
    pub fn allocate(&mut self) -> Option<u16> {
        if let Some(id) = self.free.pop() {
            debug_assert!(!self.live[id as usize]);
            self.live[id as usize] = true;
            return Some(id);
        }

        if self.live.len() > u16::MAX as usize {
            log::error!("dense ID space exhausted for category {}", self.category);
            return None;
        }

        let id = self.live.len() as u16;
        self.live.push(true);
        Some(id)
    }

    /// Must be called exactly once per successful `allocate`. Releasing an
    /// ID that is not live is a contract violation.
    pub fn release(&mut self, id: u16) {
        debug_assert!(
            self.live.get(id as usize).copied().unwrap_or(false),
            "double release of {} ID {}",
            self.category,
            id
        );
        self.live[id as usize] = false;
        self.free.push(id);
    }

    #[cfg(test)]
    pub fn live_count(&self) -> usize {
        self.live.iter().filter(|x| **x).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_and_unique() {
        let mut pool = HandlePool::new("test");
        let a = pool.allocate().unwrap();
        let b = pool.allocate().unwrap();
        let c = pool.allocate().unwrap();
        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(pool.live_count(), 3);
    }

    #[test]
    fn released_id_is_immediately_reissued() {
        let mut pool = HandlePool::new("test");
        let a = pool.allocate().unwrap();
        let _b = pool.allocate().unwrap();
        pool.release(a);
        assert_eq!(pool.allocate().unwrap(), a);
    }

    #[test]
    fn release_order_drives_recycling() {
        let mut pool = HandlePool::new("test");
        let ids: Vec<u16> = (0..4).map(|_| pool.allocate().unwrap()).collect();
        pool.release(ids[1]);
        pool.release(ids[3]);
        // Free list is a stack: last released, first reissued.
        assert_eq!(pool.allocate().unwrap(), ids[3]);
        assert_eq!(pool.allocate().unwrap(), ids[1]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "double release")]
    fn double_release_asserts() {
        let mut pool = HandlePool::new("test");
        let a = pool.allocate().unwrap();
        pool.release(a);
        pool.release(a);
    }
}
