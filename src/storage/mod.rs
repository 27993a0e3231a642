pub mod index_store;

pub use index_store::{IndexDataStore, IndexStoreOp, MemoryIndexDataStore};
