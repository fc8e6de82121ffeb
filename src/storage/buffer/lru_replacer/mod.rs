mod lru_replacer;

#[cfg(test)]
mod tests;

pub use lru_replacer::{FrameId, LRUReplacer, LRUReplacerBuilder};
