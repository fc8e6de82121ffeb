mod context;
mod delete;
mod executor;
mod expression;
mod seq_scan;

pub use context::ExecutorContext;
pub use delete::DeleteExecutor;
pub use executor::Executor;
pub use expression::Expression;
pub use seq_scan::SeqScanExecutor;
