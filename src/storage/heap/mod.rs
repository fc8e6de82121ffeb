mod heap;

#[cfg(test)]
mod tests;

pub use heap::{SharedTableHeapIterator, TableHeap, TableHeapIterator};
