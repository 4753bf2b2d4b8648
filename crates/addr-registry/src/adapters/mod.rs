//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory implementations of the outbound ports.

pub mod memory_ledger;
pub mod memory_list_store;

pub use memory_ledger::InMemoryLedger;
pub use memory_list_store::InMemoryListStore;
