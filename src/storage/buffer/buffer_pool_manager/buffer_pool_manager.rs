use crate::common::constants::INVALID_PID;
use crate::config::config::{default_num_instances, default_pool_size};
use crate::storage::buffer::buffer_pool_manager::frame_metadata::FrameMetadata;
use crate::storage::buffer::buffer_pool_manager::guard::PageGuard;
use crate::storage::buffer::lru_replacer::{FrameId, LRUReplacer};
use crate::storage::disk::disk_manager::{DiskManager, PageId};
use crate::storage::page::{Page, TablePage, TablePageHandle};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

/// Fixed-size, in-memory cache of disk pages. Maps page ids to frames, coordinates disk
/// transfers, and enforces pin discipline. All public operations conceptually hold a single
/// pool-wide mutex for their duration: correctness over scalability, per callers wrapping a
/// `BufferPoolManager` in `Arc<RwLock<_>>` and holding `.write()` across the whole call.
#[derive(Debug)]
pub struct BufferPoolManager {
    pool_size: usize,
    pub(crate) pages: Vec<TablePageHandle>,
    pub(crate) page_table: HashMap<PageId, FrameMetadata>,
    pub(crate) free_list: VecDeque<FrameId>,
    pub(crate) replacer: Arc<RwLock<LRUReplacer>>,
    disk_manager: Arc<RwLock<DiskManager>>,
    next_page_id: PageId,
    num_instances: usize,
    instance_index: usize,
}

pub struct BufferPoolManagerBuilder {
    pool_size: usize,
    replacer_k: usize,
    disk_manager: Option<Arc<RwLock<DiskManager>>>,
    num_instances: usize,
    instance_index: usize,
}

impl BufferPoolManagerBuilder {
    pub fn pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Capacity of the LRU replacer. Named for parity with the pre-redesign LRU-K builder;
    /// plain LRU has no `k`, so this is just the replacer's capacity.
    pub fn replacer_k(mut self, capacity: usize) -> Self {
        self.replacer_k = capacity;
        self
    }

    pub fn disk_manager(mut self, disk_manager: Arc<RwLock<DiskManager>>) -> Self {
        self.disk_manager = Some(disk_manager);
        self
    }

    pub fn num_instances(mut self, num_instances: usize) -> Self {
        self.num_instances = num_instances;
        self
    }

    pub fn instance_index(mut self, instance_index: usize) -> Self {
        self.instance_index = instance_index;
        self
    }

    pub fn build(self) -> BufferPoolManager {
        let pool_size = self.pool_size;
        let disk_manager = self
            .disk_manager
            .unwrap_or_else(DiskManager::new_with_handle_for_test);
        let num_instances = self.num_instances.max(1);

        BufferPoolManager {
            pool_size,
            pages: (0..pool_size)
                .map(|_| TablePage::builder().page_id(INVALID_PID).build_with_handle())
                .collect(),
            page_table: HashMap::new(),
            free_list: (0..pool_size).collect(),
            replacer: Arc::new(RwLock::new(LRUReplacer::new(self.replacer_k))),
            disk_manager,
            next_page_id: self.instance_index as PageId,
            num_instances,
            instance_index: self.instance_index,
        }
    }
}

impl BufferPoolManager {
    /// Starts from config-derived defaults (`pool_size`, `num_instances` — see
    /// `crate::config::config`), which `.pool_size(...)`/`.num_instances(...)` override.
    pub fn builder() -> BufferPoolManagerBuilder {
        BufferPoolManagerBuilder {
            pool_size: default_pool_size(),
            replacer_k: 0,
            disk_manager: None,
            num_instances: default_num_instances(),
            instance_index: 0,
        }
    }

    pub fn new(pool_size: usize, replacer_k: usize, disk_manager: Arc<RwLock<DiskManager>>) -> Self {
        Self::builder()
            .pool_size(pool_size)
            .replacer_k(replacer_k)
            .disk_manager(disk_manager)
            .build()
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Selects a victim frame (free list first, then the replacer), evicting and flushing its
    /// resident page if dirty. Returns `None` if every frame is pinned.
    fn select_victim_frame(&mut self) -> Option<FrameId> {
        if let Some(frame_id) = self.free_list.pop_front() {
            return Some(frame_id);
        }

        let frame_id = self.replacer.write().unwrap().victim()?;

        let prior_page_id = *self.pages[frame_id].read().unwrap().page_id();
        if prior_page_id != INVALID_PID {
            let is_dirty = self.pages[frame_id].read().unwrap().get_is_dirty();
            if is_dirty {
                let page = self.pages[frame_id].read().unwrap();
                self.disk_manager.write().unwrap().write_page(&page);
            }
            self.page_table.remove(&prior_page_id);
        }

        Some(frame_id)
    }

    pub fn new_page(&mut self) -> Option<PageId> {
        let frame_id = self.select_victim_frame()?;
        let new_id = self.allocate_page();

        *self.pages[frame_id].write().unwrap() = TablePage::builder().page_id(new_id).build();
        self.page_table.insert(new_id, FrameMetadata::new(frame_id));
        self.replacer.write().unwrap().pin(frame_id);

        Some(new_id)
    }

    pub fn fetch_page(&mut self, page_id: &PageId) -> Option<TablePageHandle> {
        if *page_id == INVALID_PID {
            return None;
        }

        if let Some(meta) = self.page_table.get_mut(page_id) {
            let frame_id = *meta.frame_id();
            let was_unused = meta.pin_count() == 0;
            meta.increment_pin();
            if was_unused {
                self.replacer.write().unwrap().pin(frame_id);
            }
            return Some(Arc::clone(&self.pages[frame_id]));
        }

        let frame_id = self.select_victim_frame()?;
        let mut page = self.disk_manager.write().unwrap().read_page(page_id);
        page.set_is_dirty(false);
        *self.pages[frame_id].write().unwrap() = page;

        self.page_table.insert(*page_id, FrameMetadata::new(frame_id));
        self.replacer.write().unwrap().pin(frame_id);

        Some(Arc::clone(&self.pages[frame_id]))
    }

    /// Like [`Self::fetch_page`], but returns an RAII [`PageGuard`] that releases the pin on
    /// drop instead of requiring a matching `unpin_page` call. `bpm` is the same pool wrapped
    /// in the `Arc<RwLock<_>>` external callers share.
    pub fn fetch_page_guarded(
        bpm: &Arc<RwLock<BufferPoolManager>>,
        page_id: &PageId,
    ) -> Option<PageGuard> {
        let handle = bpm.write().unwrap().fetch_page(page_id)?;
        Some(PageGuard::new(Arc::clone(bpm), *page_id, handle))
    }

    pub fn unpin_page(&mut self, page_id: &PageId, is_dirty: bool) -> bool {
        if *page_id == INVALID_PID {
            return false;
        }

        let Some(meta) = self.page_table.get_mut(page_id) else {
            return false;
        };
        if meta.pin_count() == 0 {
            return false;
        }

        let frame_id = *meta.frame_id();
        meta.decrement_pin();
        let new_pin_count = meta.pin_count();

        if is_dirty {
            self.pages[frame_id].write().unwrap().set_is_dirty(true);
        }
        if new_pin_count == 0 {
            self.replacer.write().unwrap().unpin(frame_id);
        }

        true
    }

    pub fn flush_page(&mut self, page_id: &PageId) -> bool {
        if *page_id == INVALID_PID {
            return false;
        }
        let Some(meta) = self.page_table.get(page_id) else {
            return false;
        };

        let frame_id = *meta.frame_id();
        let mut page = self.pages[frame_id].write().unwrap();
        self.disk_manager.write().unwrap().write_page(&page);
        page.set_is_dirty(false);

        true
    }

    pub fn flush_all_pages(&mut self) {
        let page_ids: Vec<PageId> = self.page_table.keys().copied().collect();
        for page_id in page_ids {
            self.flush_page(&page_id);
        }
    }

    /// `DeletePage` does not write back a dirty victim: there is no durable content worth
    /// preserving for a page that is being deleted.
    pub fn delete_page(&mut self, page_id: PageId) -> bool {
        if page_id == INVALID_PID {
            return true;
        }

        let Some(meta) = self.page_table.get(&page_id) else {
            return true;
        };
        if meta.pin_count() > 0 {
            return false;
        }

        let frame_id = *meta.frame_id();
        self.page_table.remove(&page_id);
        *self.pages[frame_id].write().unwrap() = TablePage::builder().page_id(INVALID_PID).build();
        self.replacer.write().unwrap().pin(frame_id);
        self.free_list.push_back(frame_id);

        self.deallocate_page(page_id);
        true
    }

    fn allocate_page(&mut self) -> PageId {
        let id = self.next_page_id;
        debug_assert_eq!(id as usize % self.num_instances, self.instance_index);
        self.next_page_id += self.num_instances as PageId;
        id
    }

    /// Notifies the allocator that `page_id` (its *original* id, not `INVALID_PAGE_ID`) is
    /// free. A single-instance deployment has nothing further to reclaim.
    fn deallocate_page(&mut self, _page_id: PageId) {}

    pub fn get_pin_count(&self, page_id: &PageId) -> Option<u32> {
        self.page_table.get(page_id).map(FrameMetadata::pin_count)
    }

    pub fn get_is_dirty(&self, page_id: &PageId) -> bool {
        self.page_table
            .get(page_id)
            .map(|meta| self.pages[*meta.frame_id()].read().unwrap().get_is_dirty())
            .unwrap_or(false)
    }

    pub fn set_is_dirty(&self, page_id: &PageId, is_dirty: bool) {
        if let Some(meta) = self.page_table.get(page_id) {
            self.pages[*meta.frame_id()]
                .write()
                .unwrap()
                .set_is_dirty(is_dirty);
        }
    }

    /// Test-only backdoor mirroring the replacer's own `Pin`/`Unpin` vocabulary: marks a
    /// resident page evictable (or not) directly in the replacer, bypassing pin-count
    /// bookkeeping so tests can force a specific eviction order.
    #[cfg(test)]
    pub(crate) fn set_evictable(&self, page_id: &PageId, evictable: bool, replacer: &mut LRUReplacer) {
        if let Some(meta) = self.page_table.get(page_id) {
            if evictable {
                replacer.unpin(*meta.frame_id());
            } else {
                replacer.pin(*meta.frame_id());
            }
        }
    }
}
