use crate::catalog::{IndexOid, TableOid};
use crate::storage::page::RecordId;
use crate::storage::tuple::Tuple;
use std::collections::HashSet;

pub type TransactionId = u64;

/// SQL-standard isolation levels, controlling how long `SeqScan`/`Delete` retain locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
}

/// The kind of mutation an [`IndexWriteRecord`] undoes on abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteType {
    Insert,
    Delete,
    Update,
}

/// An undo record appended to a transaction's index write-set. The Delete operator appends one
/// of these per index maintained on the table it deletes from.
#[derive(Debug, Clone)]
pub struct IndexWriteRecord {
    pub rid: RecordId,
    pub table_oid: TableOid,
    pub write_type: WriteType,
    pub tuple: Tuple,
    pub index_oid: IndexOid,
}

/// An in-flight transaction's locking and undo state. Everything about commit/abort/recovery
/// beyond this observable state is the transaction manager's concern, not the executor
/// kernel's.
#[derive(Debug)]
pub struct Transaction {
    id: TransactionId,
    isolation_level: IsolationLevel,
    shared_lock_set: HashSet<RecordId>,
    exclusive_lock_set: HashSet<RecordId>,
    index_write_set: Vec<IndexWriteRecord>,
}

impl Transaction {
    pub fn new(id: TransactionId, isolation_level: IsolationLevel) -> Self {
        Transaction {
            id,
            isolation_level,
            shared_lock_set: HashSet::new(),
            exclusive_lock_set: HashSet::new(),
            index_write_set: Vec::new(),
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn isolation_level(&self) -> IsolationLevel {
        self.isolation_level
    }

    pub fn is_shared_locked(&self, rid: &RecordId) -> bool {
        self.shared_lock_set.contains(rid)
    }

    pub fn is_exclusive_locked(&self, rid: &RecordId) -> bool {
        self.exclusive_lock_set.contains(rid)
    }

    pub fn index_write_set(&self) -> &[IndexWriteRecord] {
        &self.index_write_set
    }

    pub fn append_index_write(&mut self, record: IndexWriteRecord) {
        self.index_write_set.push(record);
    }

    /// Records that this transaction now holds a shared lock on `rid`. Returns `true` if the
    /// lock was newly acquired.
    pub(crate) fn grant_shared(&mut self, rid: RecordId) -> bool {
        self.shared_lock_set.insert(rid)
    }

    /// Records that this transaction now holds an exclusive lock on `rid`. Returns `true` if
    /// the lock was newly acquired.
    pub(crate) fn grant_exclusive(&mut self, rid: RecordId) -> bool {
        self.exclusive_lock_set.insert(rid)
    }

    /// Moves `rid` from the shared set to the exclusive set, as part of a lock upgrade.
    pub(crate) fn upgrade_to_exclusive(&mut self, rid: RecordId) {
        self.shared_lock_set.remove(&rid);
        self.exclusive_lock_set.insert(rid);
    }

    pub(crate) fn release(&mut self, rid: &RecordId) {
        self.shared_lock_set.remove(rid);
        self.exclusive_lock_set.remove(rid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transaction_holds_no_locks() {
        let txn = Transaction::new(1, IsolationLevel::ReadCommitted);
        let rid = RecordId::new(0, 0);
        assert!(!txn.is_shared_locked(&rid));
        assert!(!txn.is_exclusive_locked(&rid));
        assert!(txn.index_write_set().is_empty());
    }

    #[test]
    fn test_grant_and_release_shared_lock() {
        let mut txn = Transaction::new(1, IsolationLevel::RepeatableRead);
        let rid = RecordId::new(0, 0);

        assert!(txn.grant_shared(rid.clone()));
        assert!(!txn.grant_shared(rid.clone()));
        assert!(txn.is_shared_locked(&rid));

        txn.release(&rid);
        assert!(!txn.is_shared_locked(&rid));
    }

    #[test]
    fn test_upgrade_moves_rid_between_sets() {
        let mut txn = Transaction::new(1, IsolationLevel::RepeatableRead);
        let rid = RecordId::new(0, 0);

        txn.grant_shared(rid.clone());
        txn.upgrade_to_exclusive(rid.clone());

        assert!(!txn.is_shared_locked(&rid));
        assert!(txn.is_exclusive_locked(&rid));
    }

    #[test]
    fn test_append_index_write_accumulates() {
        let mut txn = Transaction::new(1, IsolationLevel::ReadCommitted);
        txn.append_index_write(IndexWriteRecord {
            rid: RecordId::new(0, 0),
            table_oid: 0,
            write_type: WriteType::Delete,
            tuple: Tuple::from(vec![1, 2, 3]),
            index_oid: 0,
        });
        assert_eq!(txn.index_write_set().len(), 1);
    }
}
