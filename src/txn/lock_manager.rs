use crate::storage::page::RecordId;
use crate::txn::transaction::{Transaction, TransactionId};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// `LockShared`/`LockExclusive`/`LockUpgrade`/`Unlock`, the four operations `SeqScan`/`Delete`
/// drive. Deadlock detection and wound-wait scheduling are the transaction manager's concern,
/// not the executor kernel's; callers are expected to treat a `false` return as "abort".
pub trait LockManager: Send + Sync {
    fn lock_shared(&self, txn: &mut Transaction, rid: RecordId) -> bool;
    fn lock_exclusive(&self, txn: &mut Transaction, rid: RecordId) -> bool;
    fn lock_upgrade(&self, txn: &mut Transaction, rid: RecordId) -> bool;
    fn unlock(&self, txn: &mut Transaction, rid: RecordId) -> bool;
}

#[derive(Debug, Default)]
struct LockState {
    shared_holders: HashSet<TransactionId>,
    exclusive_holder: Option<TransactionId>,
}

/// A single global lock table, granting shared/exclusive record locks with no deadlock
/// detection. Sufficient to exercise the executors' lock-acquire/release contract; a real
/// lock manager's wait-for graph and timeout policy are out of scope here.
#[derive(Debug, Default)]
pub struct SimpleLockManager {
    lock_table: Mutex<HashMap<RecordId, LockState>>,
}

impl SimpleLockManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LockManager for SimpleLockManager {
    fn lock_shared(&self, txn: &mut Transaction, rid: RecordId) -> bool {
        let mut table = self.lock_table.lock().unwrap();
        let state = table.entry(rid.clone()).or_default();

        if let Some(holder) = state.exclusive_holder {
            if holder != txn.id() {
                return false;
            }
        }

        state.shared_holders.insert(txn.id());
        drop(table);
        txn.grant_shared(rid);
        true
    }

    fn lock_exclusive(&self, txn: &mut Transaction, rid: RecordId) -> bool {
        let mut table = self.lock_table.lock().unwrap();
        let state = table.entry(rid.clone()).or_default();

        let blocked_by_shared = state
            .shared_holders
            .iter()
            .any(|holder| *holder != txn.id());
        let blocked_by_exclusive = state
            .exclusive_holder
            .is_some_and(|holder| holder != txn.id());
        if blocked_by_shared || blocked_by_exclusive {
            return false;
        }

        state.exclusive_holder = Some(txn.id());
        drop(table);
        txn.grant_exclusive(rid);
        true
    }

    fn lock_upgrade(&self, txn: &mut Transaction, rid: RecordId) -> bool {
        let mut table = self.lock_table.lock().unwrap();
        let Some(state) = table.get_mut(&rid) else {
            return false;
        };

        let other_shared_holders = state
            .shared_holders
            .iter()
            .any(|holder| *holder != txn.id());
        let blocked_by_exclusive = state
            .exclusive_holder
            .is_some_and(|holder| holder != txn.id());
        if other_shared_holders || blocked_by_exclusive {
            return false;
        }

        state.shared_holders.remove(&txn.id());
        state.exclusive_holder = Some(txn.id());
        drop(table);
        txn.upgrade_to_exclusive(rid);
        true
    }

    fn unlock(&self, txn: &mut Transaction, rid: RecordId) -> bool {
        let mut table = self.lock_table.lock().unwrap();
        if let Some(state) = table.get_mut(&rid) {
            state.shared_holders.remove(&txn.id());
            if state.exclusive_holder == Some(txn.id()) {
                state.exclusive_holder = None;
            }
        }
        drop(table);
        txn.release(&rid);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::txn::transaction::IsolationLevel;

    #[test]
    fn test_two_transactions_can_share_lock() {
        let lm = SimpleLockManager::new();
        let mut t1 = Transaction::new(1, IsolationLevel::RepeatableRead);
        let mut t2 = Transaction::new(2, IsolationLevel::RepeatableRead);
        let rid = RecordId::new(0, 0);

        assert!(lm.lock_shared(&mut t1, rid.clone()));
        assert!(lm.lock_shared(&mut t2, rid.clone()));
    }

    #[test]
    fn test_exclusive_blocks_other_shared() {
        let lm = SimpleLockManager::new();
        let mut t1 = Transaction::new(1, IsolationLevel::RepeatableRead);
        let mut t2 = Transaction::new(2, IsolationLevel::RepeatableRead);
        let rid = RecordId::new(0, 0);

        assert!(lm.lock_exclusive(&mut t1, rid.clone()));
        assert!(!lm.lock_shared(&mut t2, rid.clone()));
    }

    #[test]
    fn test_upgrade_fails_with_other_shared_holder() {
        let lm = SimpleLockManager::new();
        let mut t1 = Transaction::new(1, IsolationLevel::RepeatableRead);
        let mut t2 = Transaction::new(2, IsolationLevel::RepeatableRead);
        let rid = RecordId::new(0, 0);

        assert!(lm.lock_shared(&mut t1, rid.clone()));
        assert!(lm.lock_shared(&mut t2, rid.clone()));
        assert!(!lm.lock_upgrade(&mut t1, rid.clone()));
    }

    #[test]
    fn test_upgrade_succeeds_as_sole_shared_holder() {
        let lm = SimpleLockManager::new();
        let mut t1 = Transaction::new(1, IsolationLevel::RepeatableRead);
        let rid = RecordId::new(0, 0);

        assert!(lm.lock_shared(&mut t1, rid.clone()));
        assert!(lm.lock_upgrade(&mut t1, rid.clone()));
        assert!(t1.is_exclusive_locked(&rid));
        assert!(!t1.is_shared_locked(&rid));
    }

    #[test]
    fn test_unlock_releases_for_subsequent_exclusive() {
        let lm = SimpleLockManager::new();
        let mut t1 = Transaction::new(1, IsolationLevel::RepeatableRead);
        let mut t2 = Transaction::new(2, IsolationLevel::RepeatableRead);
        let rid = RecordId::new(0, 0);

        assert!(lm.lock_shared(&mut t1, rid.clone()));
        assert!(lm.unlock(&mut t1, rid.clone()));
        assert!(lm.lock_exclusive(&mut t2, rid.clone()));
    }
}
