//! Record storage.

pub mod memory;

pub use memory::MemoryStore;
