use crate::catalog::Catalog;
use crate::txn::{LockManager, Transaction};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Bundles the collaborators an executor needs to run a single operator tree for a single
/// transaction: the catalog (table/index lookup), the transaction (lock sets, write-set), and
/// an optional lock manager (absent means no locking is performed). Cheap to clone: everything
/// inside is a reference-counted handle.
#[derive(Clone)]
pub struct ExecutorContext {
    catalog: Arc<dyn Catalog>,
    transaction: Rc<RefCell<Transaction>>,
    lock_manager: Option<Arc<dyn LockManager>>,
}

impl ExecutorContext {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        transaction: Rc<RefCell<Transaction>>,
        lock_manager: Option<Arc<dyn LockManager>>,
    ) -> Self {
        ExecutorContext {
            catalog,
            transaction,
            lock_manager,
        }
    }

    pub fn catalog(&self) -> &Arc<dyn Catalog> {
        &self.catalog
    }

    pub fn transaction(&self) -> &Rc<RefCell<Transaction>> {
        &self.transaction
    }

    pub fn lock_manager(&self) -> Option<&Arc<dyn LockManager>> {
        self.lock_manager.as_ref()
    }
}
