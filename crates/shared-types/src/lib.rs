//! # Shared Types Crate
//!
//! Value types used across the address-list registry workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address`, `ListId` and `Amount` are defined
//!   once here and re-exported by the registry core and the event bus.
//! - **Identity is upstream**: an `Address` reaching this layer has already
//!   been authenticated by the transport collaborator.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
