mod lock_manager;
mod transaction;

pub use lock_manager::{LockManager, SimpleLockManager};
pub use transaction::{IndexWriteRecord, IsolationLevel, Transaction, TransactionId, WriteType};
