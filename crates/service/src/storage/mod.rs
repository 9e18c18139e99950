//! Storage abstractions for service layer
//!
//! Records live in process memory only; every store is re-seeded at start-up.

pub mod memory_store;

pub use memory_store::MemoryStore;
