pub mod field;
pub mod schema;

pub use schema::{Column, DataType, Table};
