pub mod constants;
pub mod utility;

use std::fmt;
use std::sync::PoisonError;

/// Errors surfaced across the storage and execution core. Every public operation that can
/// fail for a reason other than the "recoverable, return false/none" policy described for the
/// buffer pool and executors (see [`crate::storage::buffer::buffer_pool_manager`]) reports
/// through this type instead of panicking.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A caller supplied a value that is structurally invalid (bad byte layout, wrong slot, ...).
    InvalidInput(String),
    /// Data read back from storage does not match the expected shape.
    InvalidData(String),
    /// An index was out of the valid range for the collection being indexed.
    OutOfBounds,
    /// A checked arithmetic operation overflowed.
    OverflowError,
    /// A resource (page, table, index) could not be created.
    CreationError,
    /// A `RwLock`/`Mutex` guard was poisoned by a panicking holder.
    LockPoisoned(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Error::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            Error::OutOfBounds => write!(f, "index out of bounds"),
            Error::OverflowError => write!(f, "arithmetic overflow"),
            Error::CreationError => write!(f, "resource creation failed"),
            Error::LockPoisoned(msg) => write!(f, "lock poisoned: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

impl<T> From<Error> for Result<T> {
    fn from(error: Error) -> Self {
        Err(error)
    }
}

impl<T> From<PoisonError<T>> for Error {
    fn from(error: PoisonError<T>) -> Self {
        Error::LockPoisoned(error.to_string())
    }
}

/// Builds an `Err(Error::InvalidInput(...))` from a format string, mirroring `anyhow!`/`bail!`
/// but staying within this crate's own error type.
#[macro_export]
macro_rules! errinput {
    ($($args:tt)*) => {
        Err($crate::common::Error::InvalidInput(format!($($args)*)))
    };
}

/// Asserts that a `Result`-returning expression is an `Err`. Used throughout the test suite in
/// place of `assert!(x.is_err())` for a slightly more readable failure message.
#[macro_export]
macro_rules! assert_errors {
    ($expr:expr) => {
        assert!($expr.is_err(), "expected an error, got Ok")
    };
}
