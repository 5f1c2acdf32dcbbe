//! Domain types shared by the vidgen store, event bus and API crates.

pub mod error;
pub mod job;
pub mod query;
pub mod types;
