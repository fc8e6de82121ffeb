#![crate_type = "lib"]
#![crate_name = "rustydb_core"]

pub mod catalog;
pub mod common;
pub mod config;
pub mod execution;
pub mod storage;
pub mod txn;
pub mod types;
