use std::collections::{HashSet, VecDeque};

pub type FrameId = usize;

/// Tracks frames that are candidates for eviction. The front of the internal queue is the
/// most-recently-unpinned frame; the back is the victim. Plain LRU: no access history, no `k`.
#[derive(Debug)]
pub struct LRUReplacer {
    capacity: usize,
    queue: VecDeque<FrameId>,
    members: HashSet<FrameId>,
}

pub struct LRUReplacerBuilder {
    capacity: usize,
}

impl LRUReplacerBuilder {
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn build(self) -> LRUReplacer {
        LRUReplacer {
            capacity: self.capacity,
            queue: VecDeque::new(),
            members: HashSet::new(),
        }
    }
}

impl LRUReplacer {
    pub fn builder() -> LRUReplacerBuilder {
        LRUReplacerBuilder { capacity: 0 }
    }

    pub fn new(capacity: usize) -> Self {
        Self::builder().capacity(capacity).build()
    }

    /// Removes and returns the least-recently-unpinned frame, or `None` if empty.
    pub fn victim(&mut self) -> Option<FrameId> {
        let frame_id = self.queue.pop_back()?;
        self.members.remove(&frame_id);
        Some(frame_id)
    }

    /// Marks `f` as in-use: removes it from the structure if present, otherwise a no-op.
    pub fn pin(&mut self, f: FrameId) {
        if self.members.remove(&f) {
            self.queue.retain(|&id| id != f);
        }
    }

    /// Marks `f` as having no users: inserts it at the MRU end if not already present.
    /// A frame re-unpinned without an intervening pin is a no-op, so it keeps its position.
    pub fn unpin(&mut self, f: FrameId) {
        if self.members.contains(&f) {
            return;
        }
        if self.queue.len() >= self.capacity {
            log::error!(
                "LRU replacer at capacity ({}) on unpin of frame {f}; this indicates a \
                 buffer pool manager bug (pin count 0 implies the frame should already be tracked)",
                self.capacity
            );
            if let Some(oldest) = self.queue.pop_back() {
                self.members.remove(&oldest);
            }
        }
        self.queue.push_front(f);
        self.members.insert(f);
    }

    /// Current tracked count. A pure observer: never mutates replacer state.
    pub fn size(&self) -> usize {
        self.queue.len()
    }
}
