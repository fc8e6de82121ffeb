use crate::config::config::{RUST_DB_DATA_DIR, RUSTY_DB_PAGE_SIZE_BYTES};
use crate::storage::page::{Page, TablePage};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, RwLock};
#[cfg(test)]
use tempfile::NamedTempFile;

/// Offset into the database file.
pub type PageId = u32;

/// Synchronous, fixed-`PAGE_SIZE` page I/O against a single database file. `DiskManager` owns
/// no notion of which page ids are live; that bookkeeping (and allocation striping) belongs to
/// the buffer pool manager that sits in front of it.
#[derive(Debug)]
pub struct DiskManager {
    writer: BufWriter<File>,
    reader: BufReader<File>,
}

impl DiskManager {
    /// Creates a new disk manager for the given database file `filename`, e.g. `example.db`.
    pub fn new(filename: &str) -> Self {
        let path = Path::new(RUST_DB_DATA_DIR).join(filename);
        let file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .open(&path)
            .unwrap_or_else(|e| panic!("Unable to create or open {path:?}: {e}"));
        let reader = file;
        let writer = reader
            .try_clone()
            .expect("Unable to clone file handle for writer");

        DiskManager {
            writer: BufWriter::new(writer),
            reader: BufReader::new(reader),
        }
    }

    pub fn new_with_handle(filename: &str) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::new(filename)))
    }

    /// Reads the page at `page_id` from disk. A page that has never been flushed has no
    /// on-disk content; this returns a fresh, empty `TablePage` for it rather than erroring,
    /// since the database file is sparse until first write.
    pub fn read_page(&mut self, page_id: &PageId) -> TablePage {
        let offset = Self::calculate_offset(page_id);
        if self.reader.seek(SeekFrom::Start(offset)).is_err() {
            return TablePage::builder().page_id(*page_id).build();
        }

        let mut buffer = [0u8; RUSTY_DB_PAGE_SIZE_BYTES];
        match self.reader.read_exact(&mut buffer) {
            Ok(()) => {
                let mut page = TablePage::deserialize(&buffer);
                page.set_page_id(*page_id);
                page
            }
            Err(_) => TablePage::builder().page_id(*page_id).build(),
        }
    }

    /// Writes `page` to its slot on disk, identified by its own `page_id`.
    pub fn write_page(&mut self, page: &TablePage) {
        let offset = Self::calculate_offset(page.page_id());
        let payload = page.serialize();

        self.writer
            .seek(SeekFrom::Start(offset))
            .expect("Unable to seek to page offset");
        self.writer
            .write_all(&payload)
            .expect("Unable to write page payload to disk");
        self.writer
            .flush()
            .expect("Unable to flush page write to disk");
    }

    fn calculate_offset(page_id: &PageId) -> u64 {
        *page_id as u64 * RUSTY_DB_PAGE_SIZE_BYTES as u64
    }

    #[cfg(test)]
    /// Disk manager constructor for testing using a temporary file.
    pub fn new_for_test() -> Self {
        let temp_file =
            NamedTempFile::new_in(RUST_DB_DATA_DIR).expect("Unable to create temp file");
        let writer = temp_file.reopen().expect("Unable to reopen temp file");

        DiskManager {
            writer: BufWriter::new(writer),
            reader: BufReader::new(temp_file.into_file()),
        }
    }

    #[cfg(test)]
    /// Test-only version of `new_with_handle` that uses the test constructor.
    pub fn new_with_handle_for_test() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::new_for_test()))
    }
}
