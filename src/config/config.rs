use config::{Config, Environment, File};
use once_cell::sync::Lazy;

/// Fixed size, in bytes, of every page moved between disk and the buffer pool.
pub const RUSTY_DB_PAGE_SIZE_BYTES: usize = 4096;

/// Directory `DiskManager` database files and temp files are created under.
pub const RUST_DB_DATA_DIR: &str = "data";

/// Layered configuration: an optional `rustydb.toml`/`rustydb.json` in the working directory,
/// overridden by `RUSTYDB_*` environment variables. Neither source is required to exist; a
/// missing file or unset variable silently falls back to the defaults below.
static SETTINGS: Lazy<Config> = Lazy::new(|| {
    Config::builder()
        .add_source(File::with_name("rustydb").required(false))
        .add_source(Environment::with_prefix("RUSTYDB"))
        .build()
        .unwrap_or_else(|_| Config::default())
});

/// Default number of frames a [`crate::storage::buffer::buffer_pool_manager::BufferPoolManager`]
/// is built with when a caller doesn't size the pool explicitly. Overridable via the `pool_size`
/// config key or `RUSTYDB_POOL_SIZE` environment variable.
pub fn default_pool_size() -> usize {
    SETTINGS
        .get_int("pool_size")
        .map(|v| v as usize)
        .unwrap_or(64)
}

/// Default number of buffer pool instances used for allocation striping. A single-instance
/// deployment (the only one this crate builds end to end) always passes 1/0 explicitly; this
/// exists so a higher-level sharded pool has a sensible default to read from config.
pub fn default_num_instances() -> usize {
    SETTINGS
        .get_int("num_instances")
        .map(|v| v as usize)
        .unwrap_or(1)
}
