use crate::storage::buffer::buffer_pool_manager::BufferPoolManager;
use crate::storage::disk::disk_manager::PageId;
use crate::storage::page::{TablePage, TablePageHandle};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A scoped handle owning one unit of a page's pin count, released on drop. Eliminates the
/// class of "forgot to unpin" bugs the raw `fetch_page`/`unpin_page` pair is prone to.
/// Interior mutability through the underlying `RwLock<TablePage>` is safe because the pin
/// count, not a borrow, is what keeps the frame from being recycled out from under it.
pub struct PageGuard {
    bpm: Arc<RwLock<BufferPoolManager>>,
    page_id: PageId,
    handle: TablePageHandle,
}

impl PageGuard {
    pub(super) fn new(
        bpm: Arc<RwLock<BufferPoolManager>>,
        page_id: PageId,
        handle: TablePageHandle,
    ) -> Self {
        Self {
            bpm,
            page_id,
            handle,
        }
    }

    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn page(&self) -> RwLockReadGuard<'_, TablePage> {
        self.handle.read().expect("table page lock poisoned")
    }

    pub fn page_mut(&self) -> RwLockWriteGuard<'_, TablePage> {
        self.handle.write().expect("table page lock poisoned")
    }

    /// The raw handle this guard pins, for callers (e.g. a page iterator) that need to hold
    /// onto it directly rather than going through `page()`/`page_mut()` each time.
    pub(crate) fn handle(&self) -> TablePageHandle {
        Arc::clone(&self.handle)
    }

    /// Converts into a read-only guard. Takes ownership so the pin is released exactly once:
    /// the fields are cloned out and `self`'s own drop (which would otherwise unpin) is
    /// suppressed with `mem::forget`.
    pub fn read(self) -> ReadPageGuard {
        let guard = ReadPageGuard {
            bpm: Arc::clone(&self.bpm),
            page_id: self.page_id,
            handle: Arc::clone(&self.handle),
        };
        std::mem::forget(self);
        guard
    }

    /// Converts into a read-write guard, marking the page dirty when the guard is dropped.
    pub fn write(self) -> WritePageGuard {
        let guard = WritePageGuard {
            bpm: Arc::clone(&self.bpm),
            page_id: self.page_id,
            handle: Arc::clone(&self.handle),
        };
        std::mem::forget(self);
        guard
    }
}

impl Drop for PageGuard {
    fn drop(&mut self) {
        if let Ok(mut bpm) = self.bpm.write() {
            bpm.unpin_page(&self.page_id, false);
        }
    }
}

/// Read-only view over a pinned page. Unpins without marking the page dirty on drop.
pub struct ReadPageGuard {
    bpm: Arc<RwLock<BufferPoolManager>>,
    page_id: PageId,
    handle: TablePageHandle,
}

impl ReadPageGuard {
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn page(&self) -> RwLockReadGuard<'_, TablePage> {
        self.handle.read().expect("table page lock poisoned")
    }
}

impl Drop for ReadPageGuard {
    fn drop(&mut self) {
        if let Ok(mut bpm) = self.bpm.write() {
            bpm.unpin_page(&self.page_id, false);
        }
    }
}

/// Read-write view over a pinned page. Marks the page dirty on drop, since acquiring write
/// access is assumed to precede a mutation.
pub struct WritePageGuard {
    bpm: Arc<RwLock<BufferPoolManager>>,
    page_id: PageId,
    handle: TablePageHandle,
}

impl WritePageGuard {
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn page_mut(&self) -> RwLockWriteGuard<'_, TablePage> {
        self.handle.write().expect("table page lock poisoned")
    }
}

impl Drop for WritePageGuard {
    fn drop(&mut self) {
        if let Ok(mut bpm) = self.bpm.write() {
            bpm.unpin_page(&self.page_id, true);
        }
    }
}
