use crate::common::Result;

/// A pull-based operator. `init` positions the operator at its first output; `next` advances
/// and returns the next item, or `None` once exhausted. Mirrors the source system's
/// `Init`/`Next(&tuple, &rid) -> bool` pair, but returns the item directly instead of writing
/// through out-parameters.
pub trait Executor {
    type Item;

    fn init(&mut self) -> Result<()>;
    fn next(&mut self) -> Result<Option<Self::Item>>;
}
