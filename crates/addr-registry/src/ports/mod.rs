//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Port (Inbound)**: `RegistryApi`
//! - **Driven Ports (Outbound)**: `ListStore`, `Ledger`
//!
//! No concrete implementations live here.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
