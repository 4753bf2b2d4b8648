//! # Address Registry
//!
//! A paid, owner-scoped address-membership registry. Callers create lists
//! of addresses, owners replace their lists wholesale, and anyone may pay a
//! fixed fee to ask whether an address is on a list. Each fee is split
//! atomically between the list owner and a treasury.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                 RegistryService (RegistryApi)              │
//! │   create_list        update_list            query_list     │
//! │       │                  │                      │          │
//! │       │          OwnerAccessControl       FeeSettlement    │
//! │       │                  │                      │          │
//! │       ▼                  ▼                      ▼          │
//! │  ┌──────────────────────────────┐   ┌────────────────────┐ │
//! │  │   ListStore (per-list lock)  │   │ Ledger (per-account│ │
//! │  │   ids 1, 2, 3, ...           │   │ lock, atomic batch)│ │
//! │  └──────────────────────────────┘   └────────────────────┘ │
//! └──────────────────────────┬─────────────────────────────────┘
//!                            │ ListCreated / ListUpdated
//!                            ▼
//!                      shared-bus event bus
//! ```
//!
//! ## Guarantees
//!
//! | Guarantee | Where |
//! |-----------|-------|
//! | Sequential, gapless ids from 1 | `InMemoryListStore::create` |
//! | Only the owner mutates a list | `OwnerAccessControl::authorize` |
//! | Exact fee, split all-or-nothing | `FeeSettlement::settle`, `Ledger::apply` |
//! | Queries create or destroy no value | `check_conservation` |
//! | Fee overflow caught at startup | `RegistryConfig::validate` |
//!
//! ## Example
//!
//! ```rust
//! use addr_registry::prelude::*;
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let treasury = Address::new([0xee; 20]);
//! let service = create_in_memory_service(&RegistryConfig::new(7, 3, treasury)).unwrap();
//!
//! let owner = Address::new([0x01; 20]);
//! let payer = Address::new([0x02; 20]);
//! let id = service.create_list(owner, vec![payer]).await.unwrap();
//!
//! service.deposit(payer, 10).unwrap();
//! assert!(service.query_list(payer, id, payer, 10).await.unwrap());
//! assert_eq!(service.balance_of(&owner), 7);
//! assert_eq!(service.balance_of(&treasury), 3);
//! # });
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Shared types
    pub use shared_types::{Address, Amount, ListId};

    // Domain
    pub use crate::domain::access::OwnerAccessControl;
    pub use crate::domain::entities::{
        AddressList, Direction, ListSummary, Posting, SettlementReceipt,
    };
    pub use crate::domain::errors::{ConfigError, RegistryError, UNAUTHORIZED_MESSAGE};
    pub use crate::domain::fees::FeeSchedule;
    pub use crate::domain::invariants::{check_conservation, check_sequential_ids};
    pub use crate::domain::settlement::FeeSettlement;

    // Ports
    pub use crate::ports::inbound::RegistryApi;
    pub use crate::ports::outbound::{Ledger, ListStore};

    // Adapters
    pub use crate::adapters::{InMemoryLedger, InMemoryListStore};

    // Configuration
    pub use crate::config::RegistryConfig;

    // Service
    pub use crate::service::{
        create_in_memory_service, InMemoryRegistryService, RegistryService, RegistryStats,
    };

    // Events
    pub use shared_bus::{
        EventFilter, EventPublisher, EventSubscriber, EventTopic, InMemoryEventBus,
        RegistryEvent,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
