use crate::catalog::TableInfo;
use crate::common::Result;
use crate::execution::context::ExecutorContext;
use crate::execution::executor::Executor;
use crate::execution::expression::Expression;
use crate::storage::heap::{SharedTableHeapIterator, TableHeap};
use crate::storage::page::RecordId;
use crate::storage::tuple::Row;
use crate::txn::IsolationLevel;
use std::sync::Arc;

/// Pull-based full-table iteration with an optional predicate and isolation-aware shared
/// locking. `Init` positions a table iterator at the first tuple; `Next` advances it, skipping
/// tuples the predicate rejects, acquiring and (under `READ_COMMITTED`) releasing a shared
/// lock per emitted tuple.
pub struct SeqScanExecutor {
    ctx: ExecutorContext,
    table_info: Arc<TableInfo>,
    predicate: Option<Expression>,
    output_exprs: Vec<Expression>,
    iter: Option<SharedTableHeapIterator>,
}

impl SeqScanExecutor {
    pub fn new(
        ctx: ExecutorContext,
        table_info: Arc<TableInfo>,
        predicate: Option<Expression>,
        output_exprs: Vec<Expression>,
    ) -> Self {
        SeqScanExecutor {
            ctx,
            table_info,
            predicate,
            output_exprs,
            iter: None,
        }
    }
}

impl Executor for SeqScanExecutor {
    type Item = (Row, RecordId);

    fn init(&mut self) -> Result<()> {
        self.iter = Some(TableHeap::iter_shared(Arc::clone(&self.table_info.table_heap)));
        Ok(())
    }

    fn next(&mut self) -> Result<Option<(Row, RecordId)>> {
        let iter = self
            .iter
            .as_mut()
            .expect("SeqScanExecutor::next called before init");

        loop {
            let Some((rid, tuple)) = iter.next() else {
                return Ok(None);
            };
            let row = Row::from_tuple(tuple, &self.table_info.schema)?;

            if let Some(predicate) = &self.predicate {
                if !predicate.evaluate_predicate(&row)? {
                    continue;
                }
            }

            let isolation_level = self.ctx.transaction().borrow().isolation_level();
            if let Some(lock_manager) = self.ctx.lock_manager() {
                if isolation_level != IsolationLevel::ReadUncommitted {
                    let already_locked = {
                        let txn = self.ctx.transaction().borrow();
                        txn.is_shared_locked(&rid) || txn.is_exclusive_locked(&rid)
                    };
                    if !already_locked {
                        let mut txn = self.ctx.transaction().borrow_mut();
                        if !lock_manager.lock_shared(&mut txn, rid.clone()) {
                            return Ok(None);
                        }
                    }
                }
            }

            let output_values = self
                .output_exprs
                .iter()
                .map(|expr| expr.evaluate(&row))
                .collect::<Result<Vec<_>>>()?;
            let output_row = Row::from(output_values);

            if let Some(lock_manager) = self.ctx.lock_manager() {
                if isolation_level == IsolationLevel::ReadCommitted {
                    let mut txn = self.ctx.transaction().borrow_mut();
                    if !lock_manager.unlock(&mut txn, rid.clone()) {
                        return Ok(None);
                    }
                }
            }

            return Ok(Some((output_row, rid)));
        }
    }
}
