use std::num::NonZeroUsize;

use log::debug;
use lru::LruCache;

use crate::engine_state::rendering::{BufferHandle, RenderHost};

/// Result of acquiring a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGrant {
    /// Buffer the chunk may now upload into and draw from
    pub buffer: BufferHandle,
    /// Chunk whose buffer was taken, if the pool was full
    pub evicted: Option<usize>,
}

/// Fixed-capacity pool of vertex buffers shared among chunks.
///
/// Each buffer is owned by at most one chunk at a time. Chunks are keyed by their index
/// in the world and ordered by how recently they were rendered; when every slot is
/// taken, the least recently rendered owner loses its buffer to the new claimant.
pub struct SlotPool {
    slots: LruCache<usize, BufferHandle>,
}

impl SlotPool {
    /// Creates an empty pool holding at most `capacity` buffers.
    pub fn new(capacity: NonZeroUsize) -> Self {
        SlotPool {
            slots: LruCache::new(capacity),
        }
    }

    /// Gives `chunk` a buffer, allocating a new one while the pool has free slots.
    ///
    /// # Arguments
    /// * `chunk` - Index of the chunk claiming a slot
    /// * `host` - Host used to allocate buffers for unused slots
    ///
    /// # Returns
    /// The granted buffer and the chunk it was taken from, if any. The caller must
    /// drop the evicted chunk's handle and mark it for remeshing.
    pub fn acquire<H: RenderHost + ?Sized>(&mut self, chunk: usize, host: &mut H) -> SlotGrant {
        if let Some(&buffer) = self.slots.get(&chunk) {
            return SlotGrant {
                buffer,
                evicted: None,
            };
        }

        let reclaimed = if self.is_full() {
            self.slots.pop_lru()
        } else {
            None
        };
        let (buffer, evicted) = match reclaimed {
            Some((victim, buffer)) => {
                debug!(
                    "Moved buffer {:?} from chunk {} to chunk {}",
                    buffer, victim, chunk
                );
                (buffer, Some(victim))
            }
            None => {
                let buffer = host.allocate_buffer();
                debug!("Allocated buffer {:?} for chunk {}", buffer, chunk);
                (buffer, None)
            }
        };
        self.slots.put(chunk, buffer);
        SlotGrant { buffer, evicted }
    }

    /// Marks `chunk` as the most recently rendered owner.
    ///
    /// # Returns
    /// The chunk's buffer, or `None` if it holds no slot.
    pub fn touch(&mut self, chunk: usize) -> Option<BufferHandle> {
        self.slots.get(&chunk).copied()
    }

    pub fn capacity(&self) -> usize {
        self.slots.cap().get()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == self.slots.cap().get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::headless::HeadlessHost;

    fn pool(capacity: usize) -> SlotPool {
        SlotPool::new(NonZeroUsize::new(capacity).unwrap())
    }

    #[test]
    fn free_slots_allocate_new_buffers() {
        let mut host = HeadlessHost::new();
        let mut slots = pool(2);

        let a = slots.acquire(10, &mut host);
        let b = slots.acquire(11, &mut host);
        assert_ne!(a.buffer, b.buffer);
        assert_eq!(a.evicted, None);
        assert_eq!(b.evicted, None);
        assert_eq!(host.buffer_count(), 2);
        assert!(slots.is_full());
    }

    #[test]
    fn reacquiring_keeps_the_same_buffer() {
        let mut host = HeadlessHost::new();
        let mut slots = pool(2);

        let first = slots.acquire(3, &mut host);
        let again = slots.acquire(3, &mut host);
        assert_eq!(first, again);
        assert!(!slots.is_full());
        assert_eq!(host.buffer_count(), 1);
    }

    #[test]
    fn full_pool_evicts_the_least_recently_rendered_chunk() {
        let mut host = HeadlessHost::new();
        let mut slots = pool(2);

        let a = slots.acquire(0, &mut host);
        let b = slots.acquire(1, &mut host);
        // Chunk 0 is rendered again, so chunk 1 becomes the oldest.
        assert_eq!(slots.touch(0), Some(a.buffer));

        let c = slots.acquire(2, &mut host);
        assert_eq!(c.evicted, Some(1));
        assert_eq!(c.buffer, b.buffer);
        assert_eq!(slots.touch(1), None);
        assert_eq!(slots.touch(0), Some(a.buffer));
        assert_eq!(host.buffer_count(), 2);
    }

    #[test]
    fn touch_ignores_chunks_without_slots() {
        let mut slots = pool(1);
        assert_eq!(slots.touch(7), None);
        assert!(!slots.is_full());
    }

    #[test]
    fn single_slot_pool_hands_the_buffer_along() {
        let mut host = HeadlessHost::new();
        let mut slots = pool(1);

        let first = slots.acquire(0, &mut host);
        let second = slots.acquire(1, &mut host);
        let third = slots.acquire(0, &mut host);
        assert_eq!(second, SlotGrant { buffer: first.buffer, evicted: Some(0) });
        assert_eq!(third, SlotGrant { buffer: first.buffer, evicted: Some(1) });
        assert_eq!(host.buffer_count(), 1);
    }
}
