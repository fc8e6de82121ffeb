mod table_page;

#[cfg(test)]
mod tests;

pub use table_page::{TablePage, TablePageBuilder, TablePageHandle, TablePageIterator};
