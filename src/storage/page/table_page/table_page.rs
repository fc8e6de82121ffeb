use crate::common::constants::{DELETED_TUPLE_MSG, INVALID_PID, INVALID_RID_MSG};
use crate::common::{Error, Result};
use crate::config::config::RUSTY_DB_PAGE_SIZE_BYTES;
use crate::storage::disk::disk_manager::PageId;
use crate::storage::page::record_id::RecordId;
use crate::storage::page::Page;
use crate::storage::tuple::{Tuple, TupleMetadata};
use std::sync::{Arc, RwLock};

/// `next_page_id` (u32) + `tuple_count` (u16) + `deleted_count` (u16).
const HEADER_SIZE_BYTES: usize = 8;
/// `offset` (u16) + `size`, with the high bit of `size` used as the deleted flag.
const TUPLE_INFO_SIZE_BYTES: usize = 4;
const DELETE_MASK: u16 = 1 << 15;

pub type TablePageHandle = Arc<RwLock<TablePage>>;

#[derive(Clone, Copy, Debug)]
struct TupleInfo {
    offset: u16,
    size: u16,
}

impl TupleInfo {
    fn size(&self) -> u16 {
        self.size & !DELETE_MASK
    }

    fn is_deleted(&self) -> bool {
        self.size & DELETE_MASK != 0
    }

    fn set_deleted(&mut self, deleted: bool) {
        if deleted {
            self.size |= DELETE_MASK;
        } else {
            self.size &= !DELETE_MASK;
        }
    }
}

/// A slotted page holding variable-length tuple payloads. The tuple-info slot array grows
/// forward from immediately after the header; tuple payload bytes grow backward from the end
/// of the page. `page_id` is supplied by whoever constructs or reads the page rather than
/// serialized into its bytes — `DiskManager` derives it from the page's offset in the file.
#[derive(Debug, Clone)]
pub struct TablePage {
    pub page_id: PageId,
    next_page_id: PageId,
    tuple_infos: Vec<TupleInfo>,
    free_space_pointer: usize,
    data: Vec<u8>,
    is_dirty: bool,
}

pub struct TablePageBuilder {
    page_id: PageId,
    next_page_id: PageId,
}

impl TablePageBuilder {
    pub fn page_id(mut self, page_id: PageId) -> Self {
        self.page_id = page_id;
        self
    }

    pub fn next_page_id(mut self, next_page_id: PageId) -> Self {
        self.next_page_id = next_page_id;
        self
    }

    pub fn build(self) -> TablePage {
        TablePage {
            page_id: self.page_id,
            next_page_id: self.next_page_id,
            tuple_infos: Vec::new(),
            free_space_pointer: RUSTY_DB_PAGE_SIZE_BYTES,
            data: vec![0u8; RUSTY_DB_PAGE_SIZE_BYTES],
            is_dirty: false,
        }
    }

    pub fn build_with_handle(self) -> TablePageHandle {
        Arc::new(RwLock::new(self.build()))
    }
}

impl TablePage {
    pub fn builder() -> TablePageBuilder {
        TablePageBuilder {
            page_id: INVALID_PID,
            next_page_id: INVALID_PID,
        }
    }

    pub fn get_next_page_id(&self) -> PageId {
        self.next_page_id
    }

    pub fn set_next_page_id(&mut self, next_page_id: PageId) {
        self.next_page_id = next_page_id;
        self.is_dirty = true;
    }

    pub fn set_page_id(&mut self, page_id: PageId) {
        self.page_id = page_id;
    }

    /// Returns the byte offset a tuple of this size would be written at if inserted right now,
    /// or `None` if there isn't enough contiguous free space left on the page.
    pub fn get_next_tuple_offset(&self, tuple: &Tuple) -> Option<usize> {
        let tuple_size = tuple.data.len();
        let info_array_end = HEADER_SIZE_BYTES + (self.tuple_infos.len() + 1) * TUPLE_INFO_SIZE_BYTES;
        if self.free_space_pointer < info_array_end + tuple_size {
            None
        } else {
            Some(self.free_space_pointer - tuple_size)
        }
    }

    pub fn iter(handle: TablePageHandle) -> TablePageIterator {
        TablePageIterator {
            page: handle,
            next_slot: 0,
        }
    }

    fn slot_info(&self, rid: &RecordId) -> Result<&TupleInfo> {
        self.tuple_infos
            .get(rid.slot_id() as usize)
            .ok_or_else(|| Error::InvalidInput(RecordId::invalid_rid_message(rid)))
    }

    /// Overwrites a tuple's bytes in place. The replacement must be exactly as large as the
    /// existing payload; callers needing a different size should delete and re-insert instead.
    pub fn update_tuple_in_place_unchecked(
        &mut self,
        metadata: TupleMetadata,
        tuple: Tuple,
        rid: &RecordId,
    ) -> Result<()> {
        let slot = rid.slot_id() as usize;
        let info = *self
            .tuple_infos
            .get(slot)
            .ok_or_else(|| Error::InvalidInput(RecordId::invalid_rid_message(rid)))?;

        let size = info.size() as usize;
        if tuple.data.len() != size {
            return Err(Error::InvalidInput(
                "Replacement tuple size does not match the existing payload size.".to_string(),
            ));
        }

        let start = info.offset as usize;
        self.data[start..start + size].copy_from_slice(&tuple.data);
        self.tuple_infos[slot].set_deleted(metadata.is_deleted());
        self.is_dirty = true;

        Ok(())
    }
}

impl Page for TablePage {
    type InsertOutputType = u16;
    type ConcretePageType = TablePage;

    fn get_tuple(&self, rid: &RecordId) -> Result<Tuple> {
        let info = self.slot_info(rid)?;
        if info.is_deleted() {
            return Err(Error::InvalidData(DELETED_TUPLE_MSG.to_string()));
        }
        let start = info.offset as usize;
        let end = start + info.size() as usize;
        Ok(Tuple::from(&self.data[start..end]))
    }

    fn insert_tuple(&mut self, meta: TupleMetadata, tuple: Tuple) -> Option<u16> {
        let offset = self.get_next_tuple_offset(&tuple)?;
        let size = tuple.data.len();
        self.data[offset..offset + size].copy_from_slice(&tuple.data);

        let mut info = TupleInfo {
            offset: offset as u16,
            size: size as u16,
        };
        info.set_deleted(meta.is_deleted());

        self.tuple_infos.push(info);
        self.free_space_pointer = offset;
        self.is_dirty = true;

        Some((self.tuple_infos.len() - 1) as u16)
    }

    fn get_tuple_metadata(&self, rid: &RecordId) -> Result<TupleMetadata> {
        let info = self.slot_info(rid)?;
        Ok(TupleMetadata::new(info.is_deleted()))
    }

    fn update_tuple_metadata(&mut self, metadata: &TupleMetadata, rid: &RecordId) -> Result<()> {
        let slot = rid.slot_id() as usize;
        let info = self
            .tuple_infos
            .get_mut(slot)
            .ok_or_else(|| Error::InvalidInput(RecordId::invalid_rid_message(rid)))?;
        info.set_deleted(metadata.is_deleted());
        self.is_dirty = true;
        Ok(())
    }

    fn get_is_dirty(&self) -> bool {
        self.is_dirty
    }

    fn set_is_dirty(&mut self, is_dirty: bool) -> bool {
        let changed = self.is_dirty != is_dirty;
        self.is_dirty = is_dirty;
        changed
    }

    fn page_id(&self) -> &PageId {
        &self.page_id
    }

    fn tuple_count(&self) -> u16 {
        self.tuple_infos.iter().filter(|i| !i.is_deleted()).count() as u16
    }

    fn deleted_tuple_count(&self) -> u16 {
        self.tuple_infos.iter().filter(|i| i.is_deleted()).count() as u16
    }

    fn serialize(&self) -> Vec<u8> {
        let mut buf = vec![0u8; RUSTY_DB_PAGE_SIZE_BYTES];
        buf[0..4].copy_from_slice(&self.next_page_id.to_le_bytes());
        buf[4..6].copy_from_slice(&(self.tuple_infos.len() as u16).to_le_bytes());
        buf[6..8].copy_from_slice(&self.deleted_tuple_count().to_le_bytes());

        for (i, info) in self.tuple_infos.iter().enumerate() {
            let base = HEADER_SIZE_BYTES + i * TUPLE_INFO_SIZE_BYTES;
            buf[base..base + 2].copy_from_slice(&info.offset.to_le_bytes());
            buf[base + 2..base + 4].copy_from_slice(&info.size.to_le_bytes());

            let start = info.offset as usize;
            let end = start + info.size() as usize;
            buf[start..end].copy_from_slice(&self.data[start..end]);
        }

        buf
    }

    fn deserialize(buffer: &[u8]) -> TablePage {
        let next_page_id = u32::from_le_bytes(buffer[0..4].try_into().unwrap());
        let tuple_info_count = u16::from_le_bytes(buffer[4..6].try_into().unwrap()) as usize;

        let mut tuple_infos = Vec::with_capacity(tuple_info_count);
        let mut data = vec![0u8; RUSTY_DB_PAGE_SIZE_BYTES];
        let mut free_space_pointer = RUSTY_DB_PAGE_SIZE_BYTES;

        for i in 0..tuple_info_count {
            let base = HEADER_SIZE_BYTES + i * TUPLE_INFO_SIZE_BYTES;
            let offset = u16::from_le_bytes(buffer[base..base + 2].try_into().unwrap());
            let size_with_flag = u16::from_le_bytes(buffer[base + 2..base + 4].try_into().unwrap());
            let info = TupleInfo {
                offset,
                size: size_with_flag,
            };

            let start = offset as usize;
            let end = start + info.size() as usize;
            data[start..end].copy_from_slice(&buffer[start..end]);
            free_space_pointer = free_space_pointer.min(start);

            tuple_infos.push(info);
        }

        TablePage {
            page_id: INVALID_PID,
            next_page_id,
            tuple_infos,
            free_space_pointer,
            data,
            is_dirty: false,
        }
    }
}

/// Iterates the non-deleted tuples of a page in slot order, holding a shared handle rather
/// than a borrow so it can outlive the buffer pool call that produced it.
pub struct TablePageIterator {
    page: TablePageHandle,
    next_slot: u16,
}

impl TablePageIterator {
    /// The page's successor id, `INVALID_PAGE_ID` if it is the last page of its heap file.
    /// Valid to call once the iterator is exhausted, to decide whether to continue onto the
    /// next page.
    pub fn next_page_id(&self) -> PageId {
        self.page.read().unwrap().get_next_page_id()
    }
}

impl Iterator for TablePageIterator {
    type Item = (RecordId, Tuple);

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.page.read().unwrap();
        loop {
            let rid = RecordId::new(page.page_id, self.next_slot);
            let info = page.tuple_infos.get(self.next_slot as usize)?;
            self.next_slot += 1;
            if !info.is_deleted() {
                return page.get_tuple(&rid).ok().map(|tuple| (rid, tuple));
            }
        }
    }
}
