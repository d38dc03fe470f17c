//! Generation history for HookStudio.
//!
//! [`HistoryStore`] keeps the capped, newest-first log of past generations
//! as one blob inside any [`KvStore`](hookstudio_core::KvStore). Two stores
//! ship with the crate: [`InMemoryStore`] and [`FileStore`].

pub mod file_store;
pub mod in_memory;
pub mod store;

pub use file_store::FileStore;
pub use in_memory::InMemoryStore;
pub use store::{DEFAULT_CAPACITY, DEFAULT_STORAGE_KEY, HistoryStore};
