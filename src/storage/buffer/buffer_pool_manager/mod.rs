mod buffer_pool_manager;
mod frame_metadata;
mod guard;


pub use buffer_pool_manager::{BufferPoolManager, BufferPoolManagerBuilder};
pub use frame_metadata::FrameMetadata;
pub use guard::{PageGuard, ReadPageGuard, WritePageGuard};
