use crate::storage::page::RecordId;
use crate::storage::tuple::Tuple;
use std::collections::HashMap;
use std::sync::RwLock;

/// A secondary index mapping a key tuple's bytes to the record id of the row it indexes.
/// Lookup/scan are not part of the executor kernel's contract (`DeleteEntry` is the only
/// operation the Delete operator drives); this stays minimal rather than growing a full
/// range-scan surface nothing here calls.
pub trait Index: Send + Sync {
    fn insert_entry(&self, key: &Tuple, rid: RecordId);
    fn delete_entry(&self, key: &Tuple, rid: &RecordId);
    fn len(&self) -> usize;
}

/// A single-key hash index keyed on the serialized key tuple's bytes.
#[derive(Debug, Default)]
pub struct HashIndex {
    entries: RwLock<HashMap<Vec<u8>, RecordId>>,
}

impl HashIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Index for HashIndex {
    fn insert_entry(&self, key: &Tuple, rid: RecordId) {
        self.entries.write().unwrap().insert(key.data.clone(), rid);
    }

    fn delete_entry(&self, key: &Tuple, rid: &RecordId) {
        let mut entries = self.entries.write().unwrap();
        if entries.get(&key.data) == Some(rid) {
            entries.remove(&key.data);
        }
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}
