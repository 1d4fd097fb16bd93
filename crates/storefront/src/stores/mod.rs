//! [`KeyValueStore`](tiffin_core::KeyValueStore) backends.
//!
//! - [`MemoryStore`] - `HashMap`-backed, for tests and embedding
//! - [`FileStore`] - one JSON file per key in a data directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
