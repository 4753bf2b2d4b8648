//! # Domain Layer (Inner Hexagon)
//!
//! Business rules of the registry: list records, the fee schedule, the
//! ownership check, fee settlement and the invariants they uphold.
//! Synchronous throughout; storage is reached only through the traits in
//! `crate::ports::outbound`.

pub mod access;
pub mod entities;
pub mod errors;
pub mod fees;
pub mod invariants;
pub mod settlement;

pub use access::*;
pub use entities::*;
pub use errors::*;
pub use fees::*;
pub use invariants::*;
pub use settlement::*;
