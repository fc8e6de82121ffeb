use crate::common::constants::{
    COULD_NOT_UNWRAP_BPM_MSG, INVALID_PID, NEW_PAGE_ERR_MSG, TUPLE_DOESNT_FIT_MSG,
};
use crate::common::{Error, Result};
use crate::storage::buffer::buffer_pool_manager::{BufferPoolManager, PageGuard};
use crate::storage::disk::disk_manager::PageId;
use crate::storage::page::{Page, RecordId, TablePage, TablePageHandle, TablePageIterator};
use crate::storage::tuple::{Tuple, TupleMetadata};
use crate::types::Table;
use std::sync::{Arc, RwLock};

/// Represents a table stored on disk.
#[derive(Debug)]
pub struct TableHeap {
    pub(crate) page_cnt: u32,
    pub(crate) schema: Table,
    // reference to the buffer pool manager instance shared between heap files
    pub(crate) buffer_pool_manager: Arc<RwLock<BufferPoolManager>>,
    pub(crate) first_page_id: PageId,
    pub(crate) last_page_id: PageId,
}

impl TableHeap {
    pub fn new(schema: Table, bpm: &Arc<RwLock<BufferPoolManager>>) -> TableHeap {
        let bpm = Arc::clone(bpm);
        let first_page_id = bpm.write().unwrap().new_page().unwrap();
        bpm.write().unwrap().unpin_page(&first_page_id, false);

        TableHeap {
            page_cnt: 1,
            schema,
            buffer_pool_manager: bpm,
            first_page_id,
            last_page_id: first_page_id,
        }
    }

    pub fn schema(&self) -> Table {
        self.schema.clone()
    }

    pub fn num_pages(&self) -> u32 {
        self.page_cnt
    }

    /// creates a new page and updates corresponding heap metadata.
    pub fn create_new_page(&mut self) -> Result<PageId> {
        let binding = Arc::clone(&self.buffer_pool_manager);
        let mut bpm = binding.write().expect(COULD_NOT_UNWRAP_BPM_MSG);

        let new_page_id = match bpm.new_page() {
            Some(id) => id,
            None => return Err(Error::CreationError),
        };
        bpm.unpin_page(&new_page_id, false);
        drop(bpm);

        let previous_last_page_id = self.last_page_id;
        let result = if let Some(guard) = self.fetch_page_guard(&previous_last_page_id) {
            let guard = guard.write();
            guard.page_mut().set_next_page_id(new_page_id);
            self.last_page_id = new_page_id;
            self.page_cnt += 1;
            Ok(new_page_id)
        } else {
            Err(Error::CreationError)
        };

        result
    }

    /// Fetches the tuple payload corresponding to the given record ID from the table heap.
    pub fn delete_tuple(&self, rid: &RecordId) -> Result<()> {
        let guard = self
            .fetch_page_guard(&rid.page_id())
            .expect(COULD_NOT_UNWRAP_BPM_MSG)
            .write();
        guard
            .page_mut()
            .update_tuple_metadata(&TupleMetadata::deleted_payload_metadata(), rid)
    }

    pub fn get_tuple(&self, rid: &RecordId) -> Result<Tuple> {
        let guard = self
            .fetch_page_guard(&rid.page_id())
            .expect(COULD_NOT_UNWRAP_BPM_MSG);
        guard.page().get_tuple(rid)
    }

    pub fn insert_tuple(&mut self, tuple: Tuple) -> Result<RecordId> {
        let _ = self.get_page_slot(&tuple).unwrap_or_else(|| {
            // tuple payload won't fit in the existing page, make a new page
            self.create_new_page().expect(NEW_PAGE_ERR_MSG);
            self.get_page_slot(&tuple).expect(TUPLE_DOESNT_FIT_MSG)
        });

        let guard = self
            .fetch_page_guard(&self.last_page_id)
            .expect(COULD_NOT_UNWRAP_BPM_MSG)
            .write();
        let metadata = TupleMetadata::new(false);
        let slot_id = guard
            .page_mut()
            .insert_tuple(metadata, tuple)
            .expect(TUPLE_DOESNT_FIT_MSG);

        Ok(RecordId::new(self.last_page_id, slot_id))
    }

    pub fn update_tuple(&self, rid: &RecordId, payload: Tuple) -> Result<()> {
        let page_id = rid.page_id();
        let guard = self
            .fetch_page_guard(&page_id)
            .expect(COULD_NOT_UNWRAP_BPM_MSG)
            .write();
        let mut page_guard = guard.page_mut();
        let metadata = page_guard.get_tuple_metadata(rid)?;

        // If the tuple has a variable length field and the size of the updated tuple is different
        // from the existing tuple, delete the existing tuple and insert the new tuple.
        let existing_size = page_guard.get_tuple(rid)?.data.len();
        match existing_size == payload.data.len() {
            true => page_guard.update_tuple_in_place_unchecked(metadata, payload, rid),
            false => {
                page_guard
                    .update_tuple_metadata(&TupleMetadata::deleted_payload_metadata(), rid)?;
                page_guard.insert_tuple(TupleMetadata::new(false), payload);
                Ok(())
            }
        }
    }

    pub fn iter(&self) -> TableHeapIterator {
        let current_page_id = self.first_page_id;
        let page_guard = self
            .fetch_page_guard(&current_page_id)
            .expect(COULD_NOT_UNWRAP_BPM_MSG);
        let current_page_iterator = TablePage::iter(page_guard.handle());

        TableHeapIterator {
            heap_file: self,
            current_page_id,
            current_page_iterator,
            page_guard,
        }
    }

    pub(crate) fn fetch_page_handle(&self, page_id: &PageId) -> TablePageHandle {
        let mut bpm = self
            .buffer_pool_manager
            .write()
            .expect(COULD_NOT_UNWRAP_BPM_MSG);
        bpm.fetch_page(page_id).unwrap()
    }

    /// Releases the pin `fetch_page_handle` took out. Every `fetch_page_handle` call must be
    /// paired with one of these once the caller is done with the handle.
    pub(crate) fn unpin_page_handle(&self, page_id: &PageId, is_dirty: bool) {
        let mut bpm = self
            .buffer_pool_manager
            .write()
            .expect(COULD_NOT_UNWRAP_BPM_MSG);
        bpm.unpin_page(page_id, is_dirty);
    }

    /// Fetches a page behind an RAII [`PageGuard`] instead of a raw handle, so the pin is
    /// released automatically whenever the guard (or whatever holds it) is dropped.
    pub(crate) fn fetch_page_guard(&self, page_id: &PageId) -> Option<PageGuard> {
        BufferPoolManager::fetch_page_guarded(&self.buffer_pool_manager, page_id)
    }

    pub(crate) fn get_page_slot(&self, payload: &Tuple) -> Option<u16> {
        let guard = self.fetch_page_guard(&self.last_page_id)?;
        guard.page().get_next_tuple_offset(payload)
    }
}

impl TableHeap {
    /// Like [`Self::iter`], but the iterator owns a shared handle to the heap file instead of
    /// borrowing it, so it can be stored alongside other owners (e.g. an executor holding the
    /// same `Arc<TableHeap>` the catalog hands out).
    pub fn iter_shared(heap_file: Arc<TableHeap>) -> SharedTableHeapIterator {
        let current_page_id = heap_file.first_page_id;
        let page_guard = heap_file
            .fetch_page_guard(&current_page_id)
            .expect(COULD_NOT_UNWRAP_BPM_MSG);
        let current_page_iterator = TablePage::iter(page_guard.handle());

        SharedTableHeapIterator {
            heap_file,
            current_page_id,
            current_page_iterator,
            page_guard,
        }
    }
}

/// Like [`TableHeapIterator`], but owns an `Arc<TableHeap>` rather than borrowing one.
///
/// `page_guard` pins `current_page_id` for as long as that page is the one being iterated.
/// Crossing to the next page fetches and pins it before the assignment drops the old guard, so
/// the frame backing the page just finished is never left unpinned while still reachable.
pub struct SharedTableHeapIterator {
    heap_file: Arc<TableHeap>,
    current_page_id: PageId,
    current_page_iterator: TablePageIterator,
    page_guard: PageGuard,
}

impl SharedTableHeapIterator {
    fn advance_to_page(&mut self, next_page_id: PageId) {
        let page_guard = self
            .heap_file
            .fetch_page_guard(&next_page_id)
            .expect(COULD_NOT_UNWRAP_BPM_MSG);
        self.current_page_iterator = TablePage::iter(page_guard.handle());
        self.page_guard = page_guard;
        self.current_page_id = next_page_id;
    }
}

impl Iterator for SharedTableHeapIterator {
    type Item = (RecordId, Tuple);

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_page_id <= self.heap_file.last_page_id {
            if let Some(item) = self.current_page_iterator.next() {
                return Some(item);
            }
            let next_page_id = self.current_page_iterator.next_page_id();
            match next_page_id {
                INVALID_PID => break,
                _ => self.advance_to_page(next_page_id),
            }
        }
        None
    }
}

/// Iterator that sequentially iterates over all the tuples in a heap file.
/// It does not outlive the lifetime of its underlying heap file.
///
/// `page_guard` pins `current_page_id` for as long as that page is the one being iterated.
/// Crossing to the next page fetches and pins it before the assignment drops the old guard, so
/// the frame backing the page just finished is never left unpinned while still reachable.
pub struct TableHeapIterator<'a> {
    heap_file: &'a TableHeap,
    current_page_id: PageId,
    current_page_iterator: TablePageIterator,
    page_guard: PageGuard,
}

impl TableHeapIterator<'_> {
    fn advance_to_page(&mut self, next_page_id: PageId) {
        let page_guard = self
            .heap_file
            .fetch_page_guard(&next_page_id)
            .expect(COULD_NOT_UNWRAP_BPM_MSG);
        self.current_page_iterator = TablePage::iter(page_guard.handle());
        self.page_guard = page_guard;
        self.current_page_id = next_page_id;
    }
}

impl Iterator for TableHeapIterator<'_> {
    type Item = (RecordId, Tuple);

    /// Returns `Some(tuple)` if a tuple exists at the iterator's current slot in the page, and
    /// `None` if the iterator is at the end of the page and there aren't anymore tuples.
    fn next(&mut self) -> Option<Self::Item> {
        while self.current_page_id <= self.heap_file.last_page_id {
            // our page iterator produced a valid tuple!
            if let Some(item) = self.current_page_iterator.next() {
                return Some(item);
            }
            let next_page_id = self.current_page_iterator.next_page_id();
            match next_page_id {
                // that was the last page in the heap file
                INVALID_PID => break,
                // or, there's another page to iterate through!
                _ => self.advance_to_page(next_page_id),
            }
        }
        None
    }
}
