//! candela-store
//!
//! `CacheStore` implementations: [`FileStore`] keeps one JSON document per
//! key under a root directory, [`MemoryStore`] keeps documents in process and
//! counts reads and writes.
#![warn(missing_docs)]

mod file;
mod key;
mod memory;

pub use crate::file::FileStore;
pub use crate::key::sanitize_key;
pub use crate::memory::MemoryStore;
