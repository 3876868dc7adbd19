//! Persistence adapters.
//!
//! [`InMemoryLendingStore`] implements both repository ports over a single
//! process-local book. Records do not survive a restart.

mod memory_lending_store;

pub use memory_lending_store::InMemoryLendingStore;
