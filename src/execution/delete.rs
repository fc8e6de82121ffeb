use crate::catalog::{IndexInfo, TableInfo};
use crate::common::Result;
use crate::execution::context::ExecutorContext;
use crate::execution::executor::Executor;
use crate::storage::page::RecordId;
use crate::storage::tuple::Row;
use crate::txn::{IndexWriteRecord, IsolationLevel, WriteType};
use std::sync::Arc;

/// Pulls tuples from `child`, exclusive-locks and deletes each one, and maintains every index
/// on the table. Never emits an output tuple: a successful call returns `Some(())`, consumed
/// only for its side effects.
pub struct DeleteExecutor<C: Executor<Item = (Row, RecordId)>> {
    ctx: ExecutorContext,
    table_info: Arc<TableInfo>,
    table_indexes: Vec<Arc<IndexInfo>>,
    child: C,
}

impl<C: Executor<Item = (Row, RecordId)>> DeleteExecutor<C> {
    pub fn new(ctx: ExecutorContext, table_info: Arc<TableInfo>, child: C) -> Self {
        DeleteExecutor {
            ctx,
            table_info,
            table_indexes: Vec::new(),
            child,
        }
    }

    fn index_key_row(row: &Row, key_attrs: &[usize]) -> Result<Row> {
        let fields = key_attrs
            .iter()
            .map(|&i| row.get_field(i))
            .collect::<Result<Vec<_>>>()?;
        Ok(Row::from(fields))
    }
}

impl<C: Executor<Item = (Row, RecordId)>> Executor for DeleteExecutor<C> {
    type Item = ();

    fn init(&mut self) -> Result<()> {
        self.table_indexes = self.ctx.catalog().get_table_indexes(&self.table_info.name);
        self.child.init()
    }

    fn next(&mut self) -> Result<Option<()>> {
        let Some((row, rid)) = self.child.next()? else {
            return Ok(None);
        };

        if let Some(lock_manager) = self.ctx.lock_manager() {
            let already_exclusive = self.ctx.transaction().borrow().is_exclusive_locked(&rid);
            if !already_exclusive {
                let already_shared = self.ctx.transaction().borrow().is_shared_locked(&rid);
                let mut txn = self.ctx.transaction().borrow_mut();
                let acquired = if already_shared {
                    lock_manager.lock_upgrade(&mut txn, rid.clone())
                } else {
                    lock_manager.lock_exclusive(&mut txn, rid.clone())
                };
                if !acquired {
                    return Ok(None);
                }
            }
        }

        if self.table_info.table_heap.delete_tuple(&rid).is_err() {
            return Ok(None);
        }

        let original_tuple = row.to_tuple(&self.table_info.schema)?;
        for index_info in &self.table_indexes {
            let key_row = Self::index_key_row(&row, &index_info.key_attrs)?;
            let key_tuple = key_row.to_tuple(&index_info.key_schema)?;
            index_info.index.delete_entry(&key_tuple, &rid);

            self.ctx.transaction().borrow_mut().append_index_write(IndexWriteRecord {
                rid: rid.clone(),
                table_oid: self.table_info.oid,
                write_type: WriteType::Delete,
                tuple: original_tuple.clone(),
                index_oid: index_info.index_oid,
            });
        }

        if let Some(lock_manager) = self.ctx.lock_manager() {
            let isolation_level = self.ctx.transaction().borrow().isolation_level();
            if isolation_level == IsolationLevel::ReadCommitted {
                let mut txn = self.ctx.transaction().borrow_mut();
                if !lock_manager.unlock(&mut txn, rid) {
                    return Ok(None);
                }
            }
        }

        Ok(Some(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::index::HashIndex;
    use crate::catalog::{Catalog, SimpleCatalog};
    use crate::common::utility;
    use crate::execution::expression::Expression;
    use crate::execution::seq_scan::SeqScanExecutor;
    use crate::storage::buffer::BufferPoolManager;
    use crate::storage::disk::disk_manager::DiskManager;
    use crate::txn::{SimpleLockManager, Transaction};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::RwLock;

    fn setup(num_rows: usize, with_index: bool) -> (ExecutorContext, Arc<TableInfo>) {
        let bpm = Arc::new(RwLock::new(BufferPoolManager::new(
            20,
            20,
            DiskManager::new_with_handle_for_test(),
        )));
        let schema = utility::create_table_definition(2, "delete_test");
        let schema_handle = Arc::new(schema.clone());
        let catalog = SimpleCatalog::new();
        let table_info = catalog.create_table("delete_test", schema.clone(), &bpm);

        for i in 0..num_rows {
            let row = utility::create_random_row(&schema_handle, Some(i as u64));
            table_info
                .table_heap
                .insert_tuple(row.to_tuple(&schema).unwrap())
                .unwrap();
        }

        if with_index {
            let key_schema = utility::create_table_definition(1, "delete_test_key");
            catalog.create_index(
                "delete_test_pkey",
                "delete_test",
                key_schema,
                vec![0],
                Arc::new(HashIndex::new()),
            );
        }

        let txn = Rc::new(RefCell::new(Transaction::new(1, IsolationLevel::ReadCommitted)));
        let lock_manager: Arc<dyn crate::txn::LockManager> = Arc::new(SimpleLockManager::new());
        let ctx = ExecutorContext::new(Arc::new(catalog), txn, Some(lock_manager));
        (ctx, table_info)
    }

    fn scan_all(ctx: ExecutorContext, table_info: Arc<TableInfo>) -> SeqScanExecutor {
        let output_exprs = Expression::identity_projection(2);
        SeqScanExecutor::new(ctx, table_info, None, output_exprs)
    }

    #[test]
    fn test_delete_all_rows_removes_them_from_scan() {
        let (ctx, table_info) = setup(3, false);
        let mut child = scan_all(ctx.clone(), Arc::clone(&table_info));
        child.init().unwrap();

        let mut delete = DeleteExecutor::new(ctx.clone(), Arc::clone(&table_info), child);
        delete.init().unwrap();
        let mut deletions = 0;
        while delete.next().unwrap().is_some() {
            deletions += 1;
        }
        assert_eq!(deletions, 3);

        let mut verify = scan_all(ctx, table_info);
        verify.init().unwrap();
        assert!(verify.next().unwrap().is_none());
    }

    #[test]
    fn test_delete_maintains_index() {
        let (ctx, table_info) = setup(2, true);
        let mut child = scan_all(ctx.clone(), Arc::clone(&table_info));
        child.init().unwrap();

        let index_info = &ctx.catalog().get_table_indexes("delete_test")[0];
        assert_eq!(index_info.index.len(), 0); // deletes don't populate the index, only remove

        let mut delete = DeleteExecutor::new(ctx.clone(), Arc::clone(&table_info), child);
        delete.init().unwrap();
        while delete.next().unwrap().is_some() {}

        let txn = ctx.transaction().borrow();
        assert_eq!(txn.index_write_set().len(), 2);
    }

    #[test]
    fn test_delete_on_empty_child_does_nothing() {
        let (ctx, table_info) = setup(0, false);
        let mut child = scan_all(ctx.clone(), Arc::clone(&table_info));
        child.init().unwrap();

        let mut delete = DeleteExecutor::new(ctx.clone(), table_info, child);
        delete.init().unwrap();
        assert!(delete.next().unwrap().is_none());
    }

    #[test]
    fn test_delete_releases_exclusive_lock_under_read_committed() {
        let (ctx, table_info) = setup(1, false);

        let mut peek = scan_all(ctx.clone(), Arc::clone(&table_info));
        peek.init().unwrap();
        let (_, rid) = peek.next().unwrap().unwrap();

        let mut child = scan_all(ctx.clone(), Arc::clone(&table_info));
        child.init().unwrap();
        let mut delete = DeleteExecutor::new(ctx.clone(), table_info, child);
        delete.init().unwrap();
        delete.next().unwrap();

        let txn = ctx.transaction().borrow();
        assert!(!txn.is_shared_locked(&rid));
        assert!(!txn.is_exclusive_locked(&rid));
    }
}
