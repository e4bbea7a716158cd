//! Outbound adapters for the driven ports.

pub mod selection;
pub mod store;

pub use selection::MemorySelectionStore;
pub use store::{MemorySpaceRepository, MemoryStore, MemoryUserDirectory};
