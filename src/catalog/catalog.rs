use crate::catalog::index::Index;
use crate::storage::buffer::BufferPoolManager;
use crate::storage::heap::TableHeap;
use crate::types::Table;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub type TableOid = u32;
pub type IndexOid = u32;

/// A table's identity, schema, and storage handle, as returned by [`Catalog::get_table`].
#[derive(Debug)]
pub struct TableInfo {
    pub oid: TableOid,
    pub name: String,
    pub schema: Arc<Table>,
    pub table_heap: Arc<TableHeap>,
}

/// An index's identity, key schema, and backing structure, as returned by
/// [`Catalog::get_table_indexes`].
pub struct IndexInfo {
    pub index_oid: IndexOid,
    pub name: String,
    pub table_name: String,
    pub key_schema: Table,
    pub key_attrs: Vec<usize>,
    pub index: Arc<dyn Index>,
}

impl std::fmt::Debug for IndexInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexInfo")
            .field("index_oid", &self.index_oid)
            .field("name", &self.name)
            .field("table_name", &self.table_name)
            .field("key_attrs", &self.key_attrs)
            .finish()
    }
}

/// Maps table and index identifiers to schemas and storage handles. Executors consume this
/// through `GetTable`/`GetTableIndexes`; how tables and indexes come to exist is outside the
/// executor kernel's contract, so `SimpleCatalog` keeps creation plain rather than growing a
/// DDL surface nothing here drives.
pub trait Catalog: Send + Sync {
    fn get_table(&self, oid: TableOid) -> Option<Arc<TableInfo>>;
    fn get_table_by_name(&self, name: &str) -> Option<Arc<TableInfo>>;
    fn get_table_indexes(&self, table_name: &str) -> Vec<Arc<IndexInfo>>;
}

#[derive(Default)]
pub struct SimpleCatalog {
    tables_by_oid: RwLock<HashMap<TableOid, Arc<TableInfo>>>,
    tables_by_name: RwLock<HashMap<String, TableOid>>,
    indexes_by_table: RwLock<HashMap<String, Vec<Arc<IndexInfo>>>>,
    next_table_oid: RwLock<TableOid>,
    next_index_oid: RwLock<IndexOid>,
}

impl SimpleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new table backed by a freshly created heap file on `bpm`.
    pub fn create_table(&self, name: &str, schema: Table, bpm: &Arc<RwLock<BufferPoolManager>>) -> Arc<TableInfo> {
        let oid = {
            let mut next = self.next_table_oid.write().unwrap();
            let oid = *next;
            *next += 1;
            oid
        };

        let table_info = Arc::new(TableInfo {
            oid,
            name: name.to_string(),
            schema: Arc::new(schema.clone()),
            table_heap: Arc::new(TableHeap::new(schema, bpm)),
        });

        self.tables_by_oid.write().unwrap().insert(oid, Arc::clone(&table_info));
        self.tables_by_name.write().unwrap().insert(name.to_string(), oid);
        table_info
    }

    /// Registers a new index over `table_name`'s key columns `key_attrs`.
    pub fn create_index(
        &self,
        index_name: &str,
        table_name: &str,
        key_schema: Table,
        key_attrs: Vec<usize>,
        index: Arc<dyn Index>,
    ) -> Arc<IndexInfo> {
        let index_oid = {
            let mut next = self.next_index_oid.write().unwrap();
            let oid = *next;
            *next += 1;
            oid
        };

        let index_info = Arc::new(IndexInfo {
            index_oid,
            name: index_name.to_string(),
            table_name: table_name.to_string(),
            key_schema,
            key_attrs,
            index,
        });

        self.indexes_by_table
            .write()
            .unwrap()
            .entry(table_name.to_string())
            .or_default()
            .push(Arc::clone(&index_info));
        index_info
    }
}

impl Catalog for SimpleCatalog {
    fn get_table(&self, oid: TableOid) -> Option<Arc<TableInfo>> {
        self.tables_by_oid.read().unwrap().get(&oid).cloned()
    }

    fn get_table_by_name(&self, name: &str) -> Option<Arc<TableInfo>> {
        let oid = *self.tables_by_name.read().unwrap().get(name)?;
        self.get_table(oid)
    }

    fn get_table_indexes(&self, table_name: &str) -> Vec<Arc<IndexInfo>> {
        self.indexes_by_table
            .read()
            .unwrap()
            .get(table_name)
            .cloned()
            .unwrap_or_default()
    }
}
