mod metadata;
mod row;
mod tuple;


pub use metadata::TupleMetadata;
pub use row::{Row, RowIterator, Rows};
pub use tuple::Tuple;
